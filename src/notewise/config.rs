use crate::error::{NotewiseError, Result};
use crate::model::SummaryStyle;
use crate::provider::FailurePolicy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";
pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_API_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Every key accepted by [`NotewiseConfig::get`] and [`NotewiseConfig::set`].
pub const CONFIG_KEYS: [&str; 7] = [
    "model",
    "api-base-url",
    "temperature",
    "failure-policy",
    "default-style",
    "import-extensions",
    "dictation-command",
];

/// Configuration for notewise, stored in `<data dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NotewiseConfig {
    /// Model name used for generation
    #[serde(default = "default_model")]
    pub model: String,

    /// Base URL of the generation API
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Whether provider failures fall back to the local summary or surface as errors
    #[serde(default)]
    pub failure_policy: FailurePolicy,

    #[serde(default)]
    pub default_style: SummaryStyle,

    /// Extensions accepted by file import (e.g. ".md", ".txt")
    #[serde(default = "default_import_ext")]
    pub import_extensions: Vec<String>,

    /// Command that prints one dictated utterance per line on stdout
    #[serde(default)]
    pub dictation_command: Option<String>,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_temperature() -> f32 {
    DEFAULT_TEMPERATURE
}

fn default_import_ext() -> Vec<String> {
    vec![".txt".to_string(), ".md".to_string(), ".pdf".to_string()]
}

impl Default for NotewiseConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            api_base_url: default_api_base_url(),
            temperature: DEFAULT_TEMPERATURE,
            failure_policy: FailurePolicy::default(),
            default_style: SummaryStyle::default(),
            import_extensions: default_import_ext(),
            dictation_command: None,
        }
    }
}

impl NotewiseConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(NotewiseError::Io)?;
        let config: NotewiseConfig =
            serde_json::from_str(&content).map_err(NotewiseError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(NotewiseError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(NotewiseError::Serialization)?;
        fs::write(config_path, content).map_err(NotewiseError::Io)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "model" => Some(self.model.clone()),
            "api-base-url" => Some(self.api_base_url.clone()),
            "temperature" => Some(self.temperature.to_string()),
            "failure-policy" => Some(self.failure_policy.to_string()),
            "default-style" => Some(self.default_style.to_string()),
            "import-extensions" => Some(self.import_extensions.join(",")),
            "dictation-command" => Some(self.dictation_command.clone().unwrap_or_default()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), String> {
        match key {
            "model" => {
                if value.trim().is_empty() {
                    return Err("model cannot be empty".to_string());
                }
                self.model = value.trim().to_string();
            }
            "api-base-url" => {
                if !(value.starts_with("http://") || value.starts_with("https://")) {
                    return Err(format!("api-base-url must be an http(s) URL: {}", value));
                }
                self.api_base_url = value.trim_end_matches('/').to_string();
            }
            "temperature" => {
                let t: f32 = value
                    .parse()
                    .map_err(|_| format!("temperature must be a number: {}", value))?;
                if !(0.0..=2.0).contains(&t) {
                    return Err("temperature must be between 0 and 2".to_string());
                }
                self.temperature = t;
            }
            "failure-policy" => self.failure_policy = value.parse()?,
            "default-style" => self.default_style = value.parse()?,
            "import-extensions" => self.set_import_extensions(value),
            "dictation-command" => {
                let trimmed = value.trim();
                self.dictation_command = if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                };
            }
            other => return Err(format!("Unknown config key: {}", other)),
        }
        Ok(())
    }

    /// Set the accepted import extensions from a comma separated list (normalizes to start with a dot)
    pub fn set_import_extensions(&mut self, list: &str) {
        self.import_extensions = list
            .split(',')
            .map(str::trim)
            .filter(|ext| !ext.is_empty())
            .map(|ext| {
                if ext.starts_with('.') {
                    ext.to_ascii_lowercase()
                } else {
                    format!(".{}", ext.to_ascii_lowercase())
                }
            })
            .collect();
    }

    pub fn accepts_extension(&self, ext: &str) -> bool {
        let ext = ext.trim_start_matches('.').to_ascii_lowercase();
        self.import_extensions
            .iter()
            .any(|allowed| allowed.trim_start_matches('.') == ext)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = NotewiseConfig::default();
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.failure_policy, FailurePolicy::Fallback);
        assert!(config.dictation_command.is_none());
    }

    #[test]
    fn test_load_missing_config() {
        let dir = TempDir::new().unwrap();
        let config = NotewiseConfig::load(dir.path().join("absent")).unwrap();
        assert_eq!(config, NotewiseConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();

        let mut config = NotewiseConfig::default();
        config.set("failure-policy", "strict").unwrap();
        config.set("default-style", "bullets").unwrap();
        config.save(dir.path()).unwrap();

        let loaded = NotewiseConfig::load(dir.path()).unwrap();
        assert_eq!(loaded.failure_policy, FailurePolicy::Strict);
        assert_eq!(loaded.default_style, SummaryStyle::Bullets);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), r#"{"model":"other-model"}"#).unwrap();

        let loaded = NotewiseConfig::load(dir.path()).unwrap();
        assert_eq!(loaded.model, "other-model");
        assert_eq!(loaded.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(loaded.import_extensions, default_import_ext());
    }

    #[test]
    fn test_set_import_extensions_normalizes() {
        let mut config = NotewiseConfig::default();
        config.set("import-extensions", "md, TXT,,.rst").unwrap();
        assert_eq!(config.import_extensions, vec![".md", ".txt", ".rst"]);
        assert!(config.accepts_extension("RST"));
        assert!(!config.accepts_extension("pdf"));
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut config = NotewiseConfig::default();
        assert!(config.set("temperature", "hot").is_err());
        assert!(config.set("temperature", "3.5").is_err());
        assert!(config.set("api-base-url", "ftp://x").is_err());
        assert!(config.set("failure-policy", "maybe").is_err());
        assert!(config.set("colour", "red").is_err());
        assert_eq!(config, NotewiseConfig::default());
    }

    #[test]
    fn test_every_key_is_readable() {
        let config = NotewiseConfig::default();
        for key in CONFIG_KEYS {
            assert!(config.get(key).is_some(), "missing getter for {}", key);
        }
    }

    #[test]
    fn test_clearing_dictation_command() {
        let mut config = NotewiseConfig::default();
        config.set("dictation-command", "whisper-stream").unwrap();
        assert_eq!(config.get("dictation-command").unwrap(), "whisper-stream");
        config.set("dictation-command", "").unwrap();
        assert!(config.dictation_command.is_none());
    }
}
