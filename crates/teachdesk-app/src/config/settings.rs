//! Settings parser for `config.toml`

use std::path::{Path, PathBuf};

use teachdesk_core::prelude::*;

use super::types::Settings;

const CONFIG_FILENAME: &str = "config.toml";
const APP_DIR: &str = "teachdesk";

/// Per-user configuration directory (`<config_dir>/teachdesk`)
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_DIR))
}

/// Default location of `config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join(CONFIG_FILENAME))
}

/// Per-user data directory (`<data_local_dir>/teachdesk`)
pub fn default_data_dir() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join(APP_DIR))
}

// ─────────────────────────────────────────────────────────────────────────────
// Settings Loading
// ─────────────────────────────────────────────────────────────────────────────

/// Load settings from `config_path`
///
/// Returns default settings if the file doesn't exist or can't be parsed.
pub fn load_settings(config_path: &Path) -> Settings {
    if !config_path.exists() {
        debug!("No config file at {:?}, using defaults", config_path);
        return Settings::default();
    }

    match std::fs::read_to_string(config_path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(settings) => {
                debug!("Loaded settings from {:?}", config_path);
                settings
            }
            Err(e) => {
                warn!("Failed to parse {:?}: {}", config_path, e);
                Settings::default()
            }
        },
        Err(e) => {
            warn!("Failed to read {:?}: {}", config_path, e);
            Settings::default()
        }
    }
}

/// Save settings to `config_path`
///
/// Uses atomic write (temp file + rename).
pub fn save_settings(config_path: &Path, settings: &Settings) -> Result<()> {
    let dir = config_path
        .parent()
        .ok_or_else(|| Error::config(format!("Invalid config path {:?}", config_path)))?;

    if !dir.as_os_str().is_empty() && !dir.exists() {
        std::fs::create_dir_all(dir)
            .map_err(|e| Error::config(format!("Failed to create config dir: {}", e)))?;
    }

    let temp_path = dir.join(".config.toml.tmp");
    let content = toml::to_string_pretty(settings)
        .map_err(|e| Error::config(format!("Failed to serialize settings: {}", e)))?;

    let full_content = format!("{}{}", generate_config_header(), content);

    std::fs::write(&temp_path, &full_content)
        .map_err(|e| Error::config(format!("Failed to write temp file: {}", e)))?;

    std::fs::rename(&temp_path, config_path)
        .map_err(|e| Error::config(format!("Failed to rename temp file: {}", e)))?;

    info!("Saved settings to {:?}", config_path);
    Ok(())
}

/// Write a default `config.toml` if none exists yet
pub fn init_config_file(config_path: &Path) -> Result<()> {
    if config_path.exists() {
        return Ok(());
    }
    save_settings(config_path, &Settings::default())
}

fn generate_config_header() -> String {
    r#"# TeachDesk Configuration
#
# [storage] data_dir: empty = platform data directory
# [export] output_dir: empty = current directory

"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use teachdesk_core::ImageResolution;
    use tempfile::tempdir;

    #[test]
    fn test_load_settings_defaults_when_missing() {
        let temp = tempdir().unwrap();
        let settings = load_settings(&temp.path().join("config.toml"));
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_load_settings_custom() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[defaults]
grade = "3rd Grade"

[credentials]
remember_key = true

[export]
output_dir = "/tmp/exports"
"#,
        )
        .unwrap();

        let settings = load_settings(&path);

        assert_eq!(settings.defaults.grade, "3rd Grade");
        assert!(settings.credentials.remember_key);
        assert!(settings.credentials.allow_key_entry);
        assert_eq!(settings.export.output_dir, "/tmp/exports");
    }

    #[test]
    fn test_load_settings_invalid_toml() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(&path, "not valid toml {{{{").unwrap();

        assert_eq!(load_settings(&path), Settings::default());
    }

    #[test]
    fn test_save_then_load_settings() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("nested").join("config.toml");

        let mut settings = Settings::default();
        settings.defaults.resolution = ImageResolution::Medium;
        settings.storage.data_dir = "/srv/teachdesk".into();

        save_settings(&path, &settings).unwrap();

        assert!(!temp.path().join("nested/.config.toml.tmp").exists());
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("# TeachDesk Configuration"));
        assert_eq!(load_settings(&path), settings);
    }

    #[test]
    fn test_init_config_file_is_idempotent() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("config.toml");

        init_config_file(&path).unwrap();
        std::fs::write(&path, "[defaults]\ngrade = \"High School\"\n").unwrap();
        init_config_file(&path).unwrap();

        assert_eq!(load_settings(&path).defaults.grade, "High School");
    }
}
