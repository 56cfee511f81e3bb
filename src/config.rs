//! Configuration loading.
//!
//! Configuration is optional: a missing file yields the defaults, and every
//! field can be set individually. The file lives at `$KHWARIZMI_CONFIG` or
//! `<config dir>/khwarizmi/config.toml`. The wisdom API key itself never
//! goes in the file; only the name of the environment variable holding it
//! is configurable, and the key is read once at startup.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Read(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub wisdom: WisdomConfig,
}

/// Settings for the wisdom client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WisdomConfig {
    pub enabled: bool,
    /// Text-generation backend: `google`, `openai`, `anthropic` or `ollama`.
    pub backend: String,
    pub model: String,
    /// Name of the environment variable holding the API key.
    pub api_key_env: String,
    pub timeout_secs: u64,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for WisdomConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            backend: "google".to_string(),
            model: "gemini-2.5-flash".to_string(),
            api_key_env: "GEMINI_API_KEY".to_string(),
            timeout_secs: 15,
            max_tokens: 256,
            temperature: 0.7,
        }
    }
}

impl WisdomConfig {
    /// Read the API key from the configured environment variable.
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|key| !key.is_empty())
    }
}

impl Config {
    /// Load configuration from the default location, or defaults when no
    /// file exists.
    pub fn load() -> Result<Self, ConfigError> {
        match config_path() {
            Some(path) if path.exists() => Self::load_from_path(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }
}

fn config_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("KHWARIZMI_CONFIG") {
        return Some(PathBuf::from(path));
    }
    Some(dirs::config_dir()?.join("khwarizmi").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(config.wisdom.enabled);
        assert_eq!(config.wisdom.backend, "google");
        assert_eq!(config.wisdom.model, "gemini-2.5-flash");
        assert_eq!(config.wisdom.api_key_env, "GEMINI_API_KEY");
        assert_eq!(config.wisdom.timeout_secs, 15);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
            [wisdom]
            model = "gemini-2.5-pro"
            timeout_secs = 5
            "#,
        )
        .unwrap();
        assert_eq!(config.wisdom.model, "gemini-2.5-pro");
        assert_eq!(config.wisdom.timeout_secs, 5);
        // Everything not set stays at its default.
        assert!(config.wisdom.enabled);
        assert_eq!(config.wisdom.backend, "google");
    }

    #[test]
    fn test_empty_file_is_all_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.wisdom.max_tokens, 256);
    }

    #[test]
    fn test_api_key_read_from_named_env_var() {
        let mut config = WisdomConfig::default();
        config.api_key_env = "KHWARIZMI_TEST_API_KEY".to_string();

        // Env mutation is process-global; this variable is unique to this
        // test, so parallel test threads cannot observe a partial state.
        unsafe { std::env::set_var("KHWARIZMI_TEST_API_KEY", "secret") };
        assert_eq!(config.api_key().as_deref(), Some("secret"));

        unsafe { std::env::set_var("KHWARIZMI_TEST_API_KEY", "") };
        assert_eq!(config.api_key(), None);

        unsafe { std::env::remove_var("KHWARIZMI_TEST_API_KEY") };
        assert_eq!(config.api_key(), None);
    }
}
