//! Plan export: text and image files, and the terminal clipboard

use std::io::Write;
use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use teachdesk_core::prelude::*;
use teachdesk_core::{plan_text_filename, visual_aid_filename};

/// Write the plan text to `<dir>/<slug>-lesson-plan.txt`
pub fn export_plan_text(dir: &Path, topic: &str, content: &str) -> Result<PathBuf> {
    let path = dir.join(plan_text_filename(topic));
    write_file(&path, content.as_bytes())?;
    info!("Exported plan text to {:?}", path);
    Ok(path)
}

/// Decode a `data:` image URI and write it to `<dir>/lesson-visual-<slug>.png`
pub fn export_visual_aid(dir: &Path, topic: &str, data_uri: &str) -> Result<PathBuf> {
    let (mime, bytes) = decode_data_uri(data_uri)?;
    let path = dir.join(visual_aid_filename(topic));
    write_file(&path, &bytes)?;
    info!("Exported visual aid ({}, {} bytes) to {:?}", mime, bytes.len(), path);
    Ok(path)
}

/// Split a base64 `data:` URI into its MIME type and decoded payload
pub fn decode_data_uri(uri: &str) -> Result<(String, Vec<u8>)> {
    let rest = uri
        .strip_prefix("data:")
        .ok_or_else(|| Error::export("image is not a data URI"))?;
    let (meta, payload) = rest
        .split_once(',')
        .ok_or_else(|| Error::export("data URI has no payload"))?;
    let mime = meta
        .strip_suffix(";base64")
        .ok_or_else(|| Error::export("data URI is not base64-encoded"))?;

    let bytes = STANDARD
        .decode(payload.trim())
        .map_err(|e| Error::export(format!("invalid base64 image data: {}", e)))?;

    Ok((mime.to_string(), bytes))
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() {
            std::fs::create_dir_all(dir)
                .map_err(|e| Error::export(format!("Failed to create {:?}: {}", dir, e)))?;
        }
    }
    std::fs::write(path, bytes)
        .map_err(|e| Error::export(format!("Failed to write {:?}: {}", path, e)))
}

// ─────────────────────────────────────────────────────────────────────────────
// Clipboard
// ─────────────────────────────────────────────────────────────────────────────

/// OSC 52 escape sequence that sets the system clipboard to `text`
pub fn osc52_sequence(text: &str) -> String {
    format!("\x1b]52;c;{}\x07", STANDARD.encode(text))
}

/// Copy `text` to the clipboard through the controlling terminal
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    let mut stdout = std::io::stdout();
    stdout
        .write_all(osc52_sequence(text).as_bytes())
        .and_then(|_| stdout.flush())
        .map_err(|e| Error::export(format!("Failed to write clipboard sequence: {}", e)))?;
    debug!("Copied {} chars to clipboard via OSC 52", text.chars().count());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_export_plan_text_uses_slug_filename() {
        let temp = tempdir().unwrap();
        let path = export_plan_text(temp.path(), "The Roman  Empire", "Plan body").unwrap();

        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "the-roman-empire-lesson-plan.txt"
        );
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "Plan body");
    }

    #[test]
    fn test_export_visual_aid_writes_decoded_bytes() {
        let temp = tempdir().unwrap();
        let uri = format!("data:image/png;base64,{}", STANDARD.encode([0x89, b'P', b'N', b'G']));

        let path = export_visual_aid(&temp.path().join("out"), "Water Cycle", &uri).unwrap();

        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "lesson-visual-water-cycle.png"
        );
        assert_eq!(std::fs::read(&path).unwrap(), vec![0x89, b'P', b'N', b'G']);
    }

    #[test]
    fn test_decode_data_uri_rejects_malformed_input() {
        assert!(decode_data_uri("https://example.com/a.png").is_err());
        assert!(decode_data_uri("data:image/png;base64").is_err());
        assert!(decode_data_uri("data:image/png,rawdata").is_err());
        assert!(decode_data_uri("data:image/png;base64,@@@").is_err());
    }

    #[test]
    fn test_decode_data_uri_returns_mime() {
        let (mime, bytes) = decode_data_uri("data:image/jpeg;base64,QUJD").unwrap();
        assert_eq!(mime, "image/jpeg");
        assert_eq!(bytes, b"ABC");
    }

    #[test]
    fn test_osc52_sequence_format() {
        assert_eq!(osc52_sequence("hi"), "\x1b]52;c;aGk=\x07");
    }
}
