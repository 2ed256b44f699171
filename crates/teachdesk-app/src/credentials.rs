//! API key resolution
//!
//! Keys are looked up on every call, in order: `GEMINI_API_KEY`, `API_KEY`,
//! a key typed into the prompt this session, then the key file.

use std::path::{Path, PathBuf};

use teachdesk_core::prelude::*;

use crate::config::CredentialSettings;

/// Environment variables consulted for an API key, in priority order
pub const API_KEY_ENV_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

/// File name of the remembered key inside the config directory
pub const API_KEY_FILENAME: &str = "api_key";

/// Outcome of the credential precondition check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialStatus {
    /// A key is resolvable; requests may proceed
    Ready,
    /// No key yet, but one can be entered in the app
    NeedsCredential,
    /// No key and key entry is disabled
    Unavailable,
}

/// Where a resolved key came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeySource {
    Env(&'static str),
    Entered,
    File(PathBuf),
}

/// Resolves and stores the generative AI API key
#[derive(Debug, Clone)]
pub struct CredentialManager {
    key_file: Option<PathBuf>,
    settings: CredentialSettings,
    entered: Option<String>,
}

impl CredentialManager {
    pub fn new(key_file: Option<PathBuf>, settings: CredentialSettings) -> Self {
        Self {
            key_file,
            settings,
            entered: None,
        }
    }

    /// Manager using `<config_dir>/api_key` as the key file
    pub fn with_config_dir(config_dir: Option<&Path>, settings: CredentialSettings) -> Self {
        Self::new(config_dir.map(|d| d.join(API_KEY_FILENAME)), settings)
    }

    /// Current key and its source, if any
    pub fn resolve(&self) -> Option<(String, KeySource)> {
        for var in API_KEY_ENV_VARS {
            if let Some(key) = std::env::var(var).ok().and_then(normalize_key) {
                return Some((key, KeySource::Env(var)));
            }
        }

        if let Some(key) = self.entered.clone() {
            return Some((key, KeySource::Entered));
        }

        let path = self.key_file.as_ref()?;
        match std::fs::read_to_string(path) {
            Ok(content) => normalize_key(content).map(|key| (key, KeySource::File(path.clone()))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                warn!("Failed to read key file {:?}: {}", path, e);
                None
            }
        }
    }

    /// Current key, if any
    pub fn api_key(&self) -> Option<String> {
        self.resolve().map(|(key, _)| key)
    }

    pub fn status(&self) -> CredentialStatus {
        if self.resolve().is_some() {
            CredentialStatus::Ready
        } else if self.settings.allow_key_entry {
            CredentialStatus::NeedsCredential
        } else {
            CredentialStatus::Unavailable
        }
    }

    /// Accept a key typed into the prompt.
    ///
    /// The key is kept for this session and written to the key file when
    /// `remember_key` is enabled.
    pub fn submit_key(&mut self, key: &str) -> Result<CredentialStatus> {
        if !self.settings.allow_key_entry {
            return Err(Error::credential("key entry is disabled"));
        }

        let key = normalize_key(key.to_string())
            .ok_or_else(|| Error::credential("API key cannot be empty"))?;

        if self.settings.remember_key {
            if let Some(path) = &self.key_file {
                write_key_file(path, &key)?;
                info!("Remembered API key in {:?}", path);
            }
        }

        self.entered = Some(key);
        Ok(self.status())
    }
}

fn normalize_key(raw: String) -> Option<String> {
    let key = raw.trim();
    (!key.is_empty()).then(|| key.to_string())
}

/// Atomic write with owner-only permissions on unix
fn write_key_file(path: &Path, key: &str) -> Result<()> {
    let dir = path
        .parent()
        .ok_or_else(|| Error::credential(format!("Invalid key file path {:?}", path)))?;
    std::fs::create_dir_all(dir)
        .map_err(|e| Error::credential(format!("Failed to create {:?}: {}", dir, e)))?;

    let temp_path = dir.join(format!(".{}.tmp", API_KEY_FILENAME));
    std::fs::write(&temp_path, key)
        .map_err(|e| Error::credential(format!("Failed to write key file: {}", e)))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&temp_path, std::fs::Permissions::from_mode(0o600))
            .map_err(|e| Error::credential(format!("Failed to restrict key file: {}", e)))?;
    }

    std::fs::rename(&temp_path, path)
        .map_err(|e| Error::credential(format!("Failed to rename key file: {}", e)))?;
    Ok(())
}
