use crate::error::{ChefSortError, Result};
use chefsort_common::DEFAULT_MODEL;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Chat-completion endpoint used when nothing else is configured
pub const DEFAULT_ENDPOINT: &str = "https://openrouter.ai/api/v1/chat/completions";

/// Attribution sent as `HTTP-Referer`
pub const DEFAULT_REFERER: &str = "https://chefsort.streamlit.app";

/// Table used when no file is given
pub const DEFAULT_DATA_FILE: &str = "EPICurious.csv";

pub const DEFAULT_SAMPLE_SIZE: usize = 15;

/// Environment variable holding the OpenRouter key
pub const API_KEY_ENV: &str = "OPENROUTER_API_KEY";

/// Environment variable overriding the config file location
pub const CONFIG_PATH_ENV: &str = "CHEFSORT_CONFIG";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_key: Option<String>,
    pub model: String,
    pub endpoint: String,
    pub referer: String,
    pub sample_size: usize,
    pub data_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.into(),
            endpoint: DEFAULT_ENDPOINT.into(),
            referer: DEFAULT_REFERER.into(),
            sample_size: DEFAULT_SAMPLE_SIZE,
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Missing file means defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)
            .map_err(|e| ChefSortError::Config(format!("{}: {}", path.display(), e)))?;
        tracing::debug!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    /// Like `load_from`, but an unreadable or malformed file means defaults
    ///
    /// Used by `chefsort config` so a broken file can be repaired by saving
    /// over it.
    pub fn load_or_default_from(path: &Path) -> Self {
        Self::load_from(path).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Ignoring unreadable config, using defaults");
            Self::default()
        })
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            if !path.trim().is_empty() {
                return Ok(PathBuf::from(path));
            }
        }

        let home = dirs::home_dir()
            .ok_or_else(|| ChefSortError::Config("Home directory not found".into()))?;
        Ok(home.join(".config").join("chefsort").join("config.json"))
    }

    /// API key from the config file, then `OPENROUTER_API_KEY`
    pub fn resolve_api_key(&self) -> Result<String> {
        self.resolve_api_key_with(|name| std::env::var(name).ok())
    }

    /// Key lookup with an injectable environment
    ///
    /// Empty or whitespace-only values count as absent.
    pub fn resolve_api_key_with<F>(&self, env: F) -> Result<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let from_store = self.api_key.as_deref().map(str::trim).filter(|k| !k.is_empty());
        if let Some(key) = from_store {
            return Ok(key.to_string());
        }

        env(API_KEY_ENV)
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .ok_or(ChefSortError::MissingCredential)
    }

    pub fn set_api_key(&mut self, key: String) -> Result<()> {
        self.api_key = Some(key);
        self.save()
    }

    pub fn has_api_key(&self) -> bool {
        self.resolve_api_key().is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.model, "meta-llama/llama-3.3-8b-instruct:free");
        assert_eq!(config.endpoint, "https://openrouter.ai/api/v1/chat/completions");
        assert_eq!(config.sample_size, 15);
        assert_eq!(config.data_file, PathBuf::from("EPICurious.csv"));
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_store_key_wins_over_env() {
        let config = Config {
            api_key: Some("from-store".into()),
            ..Default::default()
        };
        let key = config
            .resolve_api_key_with(|_| Some("from-env".into()))
            .unwrap();
        assert_eq!(key, "from-store");
    }

    #[test]
    fn test_env_used_when_store_empty() {
        let config = Config {
            api_key: Some("   ".into()),
            ..Default::default()
        };
        let key = config
            .resolve_api_key_with(|name| {
                assert_eq!(name, API_KEY_ENV);
                Some("from-env".into())
            })
            .unwrap();
        assert_eq!(key, "from-env");
    }

    #[test]
    fn test_missing_credential() {
        let config = Config::default();
        let result = config.resolve_api_key_with(|_| Some(String::new()));
        assert!(matches!(result, Err(ChefSortError::MissingCredential)));

        let result = config.resolve_api_key_with(|_| None);
        assert!(matches!(result, Err(ChefSortError::MissingCredential)));
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("nope.json")).unwrap();
        assert_eq!(config.sample_size, DEFAULT_SAMPLE_SIZE);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"api_key": "abc", "sample_size": 5}"#).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.api_key.as_deref(), Some("abc"));
        assert_eq!(config.sample_size, 5);
        assert_eq!(config.model, DEFAULT_MODEL);
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        let result = Config::load_from(&path);
        assert!(matches!(result, Err(ChefSortError::Config(_))));
    }

    #[test]
    fn test_invalid_file_can_be_repaired() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        let mut config = Config::load_or_default_from(&path);
        assert_eq!(config.model, DEFAULT_MODEL);
        assert!(config.api_key.is_none());

        config.api_key = Some("new-key".into());
        config.save_to(&path).unwrap();
        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.api_key.as_deref(), Some("new-key"));
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let config = Config {
            api_key: Some("secret".into()),
            model: "openai/gpt-4o-mini".into(),
            ..Default::default()
        };
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.api_key.as_deref(), Some("secret"));
        assert_eq!(loaded.model, "openai/gpt-4o-mini");
    }
}
