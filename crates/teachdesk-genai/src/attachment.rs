//! Source documents attached to style-match requests

use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use teachdesk_core::prelude::*;

use crate::protocol::Part;

/// Document formats accepted for style matching
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Pdf,
    PlainText,
}

impl SourceKind {
    /// Detect the kind from the file extension (case-insensitive)
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "pdf" => Some(SourceKind::Pdf),
            "txt" | "text" | "md" => Some(SourceKind::PlainText),
            _ => None,
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            SourceKind::Pdf => "application/pdf",
            SourceKind::PlainText => "text/plain",
        }
    }
}

/// A fully-read, base64-encoded source document
#[derive(Debug, Clone, PartialEq)]
pub struct SourceAttachment {
    pub path: PathBuf,
    pub kind: SourceKind,
    pub encoded: String,
    pub byte_len: usize,
}

impl SourceAttachment {
    /// Read the whole file into memory and encode it.
    ///
    /// No size limit is enforced.
    pub async fn read(path: &Path) -> Result<Self> {
        let kind = SourceKind::from_path(path)
            .ok_or_else(|| Error::file_read(path, "only PDF or plain-text files are supported"))?;

        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| Error::file_read(path, e.to_string()))?;

        debug!("Read source file {:?} ({} bytes)", path, bytes.len());

        Ok(Self {
            path: path.to_path_buf(),
            kind,
            encoded: STANDARD.encode(&bytes),
            byte_len: bytes.len(),
        })
    }

    /// Inline-data request part carrying this document
    pub fn to_part(&self) -> Part {
        Part::inline(self.kind.mime_type(), self.encoded.clone())
    }
}
