//! Configuration types for TeachDesk
//!
//! Defines `Settings` and one sub-struct per `config.toml` section.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use teachdesk_core::{ImageResolution, DEFAULT_GRADE};
use teachdesk_genai::{GeneratorConfig, DEFAULT_API_BASE_URL};

/// Global application settings (`config.toml`)
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub generation: GenerationSettings,

    #[serde(default)]
    pub defaults: DefaultsSettings,

    #[serde(default)]
    pub credentials: CredentialSettings,

    #[serde(default)]
    pub storage: StorageSettings,

    #[serde(default)]
    pub export: ExportSettings,
}

/// Model names and request parameters
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct GenerationSettings {
    #[serde(default = "default_text_model")]
    pub text_model: String,

    #[serde(default = "default_image_model")]
    pub image_model: String,

    /// Sampling temperature for Create New plans
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    #[serde(default = "default_aspect_ratio")]
    pub aspect_ratio: String,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            text_model: default_text_model(),
            image_model: default_image_model(),
            temperature: default_temperature(),
            api_base_url: default_api_base_url(),
            aspect_ratio: default_aspect_ratio(),
        }
    }
}

impl GenerationSettings {
    pub fn generator_config(&self) -> GeneratorConfig {
        GeneratorConfig {
            text_model: self.text_model.clone(),
            image_model: self.image_model.clone(),
            temperature: self.temperature,
            aspect_ratio: self.aspect_ratio.clone(),
        }
    }
}

fn default_text_model() -> String {
    GeneratorConfig::default().text_model
}

fn default_image_model() -> String {
    GeneratorConfig::default().image_model
}

fn default_temperature() -> f32 {
    GeneratorConfig::default().temperature
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_aspect_ratio() -> String {
    GeneratorConfig::default().aspect_ratio
}

/// Initial form values
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DefaultsSettings {
    /// Grade preselected in the Create New form
    #[serde(default = "default_grade")]
    pub grade: String,

    /// Visual aid resolution preselected on the Result screen
    #[serde(default)]
    pub resolution: ImageResolution,
}

impl Default for DefaultsSettings {
    fn default() -> Self {
        Self {
            grade: default_grade(),
            resolution: ImageResolution::default(),
        }
    }
}

fn default_grade() -> String {
    DEFAULT_GRADE.to_string()
}

/// API key handling
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CredentialSettings {
    /// Offer the in-app key prompt when no key is configured
    #[serde(default = "default_true")]
    pub allow_key_entry: bool,

    /// Write keys typed into the prompt to the key file
    #[serde(default)]
    pub remember_key: bool,
}

impl Default for CredentialSettings {
    fn default() -> Self {
        Self {
            allow_key_entry: true,
            remember_key: false,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Lesson store location
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct StorageSettings {
    /// Empty means `<data_local_dir>/teachdesk`
    #[serde(default)]
    pub data_dir: String,
}

impl StorageSettings {
    /// Configured directory, if one was set
    pub fn data_dir(&self) -> Option<PathBuf> {
        non_empty_path(&self.data_dir)
    }
}

/// Export destination
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ExportSettings {
    /// Empty means the current working directory
    #[serde(default)]
    pub output_dir: String,
}

impl ExportSettings {
    pub fn output_dir(&self) -> PathBuf {
        non_empty_path(&self.output_dir).unwrap_or_else(|| PathBuf::from("."))
    }
}

fn non_empty_path(value: &str) -> Option<PathBuf> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| PathBuf::from(trimmed))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_default_values() {
        let settings = Settings::default();
        assert_eq!(settings.generation.text_model, "gemini-2.5-flash");
        assert_eq!(settings.generation.image_model, "gemini-3-pro-image-preview");
        assert_eq!(settings.generation.aspect_ratio, "16:9");
        assert_eq!(settings.defaults.grade, "7th Grade");
        assert_eq!(settings.defaults.resolution, ImageResolution::Low);
        assert!(settings.credentials.allow_key_entry);
        assert!(!settings.credentials.remember_key);
    }

    #[test]
    fn test_partial_sections_fill_defaults() {
        let settings: Settings = toml::from_str(
            r#"
[generation]
temperature = 0.2

[defaults]
resolution = "high"
"#,
        )
        .unwrap();

        assert_eq!(settings.generation.temperature, 0.2);
        assert_eq!(settings.generation.text_model, "gemini-2.5-flash");
        assert_eq!(settings.defaults.resolution, ImageResolution::High);
        assert_eq!(settings.defaults.grade, "7th Grade");
    }

    #[test]
    fn test_empty_paths_fall_back() {
        let settings = Settings::default();
        assert!(settings.storage.data_dir().is_none());
        assert_eq!(settings.export.output_dir(), PathBuf::from("."));

        let storage = StorageSettings {
            data_dir: " /tmp/lessons ".into(),
        };
        assert_eq!(storage.data_dir(), Some(PathBuf::from("/tmp/lessons")));
    }

    #[test]
    fn test_generator_config_mirrors_settings() {
        let mut generation = GenerationSettings::default();
        generation.text_model = "custom-model".into();
        let config = generation.generator_config();
        assert_eq!(config.text_model, "custom-model");
        assert_eq!(config.temperature, 0.7);
    }
}
