use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use crate::error::{Result, LongtextError};

// Default values used when a settings file omits a field
fn default_ollama_host() -> String {
    "http://localhost:11434".to_string()
}

fn default_timeout_secs() -> u64 {
    300
}

fn default_source_language() -> String {
    "auto".to_string()
}

fn default_target_language() -> String {
    "en".to_string()
}

fn default_chunk_size() -> usize {
    1000
}

fn default_request_delay_ms() -> u64 {
    100
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub translate: TranslateConfig,
    #[serde(default)]
    pub interface: InterfaceConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Local ollama model server
    Ollama,
    /// Remote HTTP translation API
    Api,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Backend used when the command line does not pick one
    #[serde(default = "default_backend_kind")]
    pub kind: BackendKind,
    /// Ollama endpoint URL
    #[serde(default = "default_ollama_host")]
    pub ollama_host: String,
    /// Ollama model; the first installed model is used when empty
    #[serde(default)]
    pub ollama_model: String,
    /// Remote API endpoint
    #[serde(default)]
    pub api_url: String,
    /// Bearer token for the remote API
    #[serde(default)]
    pub api_key: String,
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_backend_kind() -> BackendKind {
    BackendKind::Ollama
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslateConfig {
    /// Source language code, or "auto"
    #[serde(default = "default_source_language")]
    pub source_language: String,
    /// Target language code
    #[serde(default = "default_target_language")]
    pub target_language: String,
    /// Maximum chunk size in characters for plain text documents
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
    /// Pause after every backend request, in milliseconds
    #[serde(default = "default_request_delay_ms")]
    pub request_delay_ms: u64,
    /// Write original and translated caption text together
    #[serde(default)]
    pub merge_bilingual: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterfaceLanguage {
    #[default]
    En,
    Zh,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InterfaceConfig {
    /// Language of user-facing messages
    #[serde(default)]
    pub language: InterfaceLanguage,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            kind: default_backend_kind(),
            ollama_host: default_ollama_host(),
            ollama_model: String::new(),
            api_url: String::new(),
            api_key: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for TranslateConfig {
    fn default() -> Self {
        Self {
            source_language: default_source_language(),
            target_language: default_target_language(),
            chunk_size: default_chunk_size(),
            request_delay_ms: default_request_delay_ms(),
            merge_bilingual: false,
        }
    }
}

impl BackendKind {
    pub fn parse(value: &str) -> Result<Self> {
        match value.to_lowercase().as_str() {
            "ollama" => Ok(Self::Ollama),
            "api" => Ok(Self::Api),
            _ => Err(LongtextError::Config(format!(
                "Invalid backend '{}'. Valid backends: ollama, api",
                value
            ))),
        }
    }
}

impl InterfaceLanguage {
    pub fn parse(value: &str) -> Result<Self> {
        match value.to_lowercase().as_str() {
            "en" | "english" => Ok(Self::En),
            "zh" | "chinese" | "中文" => Ok(Self::Zh),
            _ => Err(LongtextError::Config(format!(
                "Invalid interface language '{}'. Valid languages: en, zh",
                value
            ))),
        }
    }
}

impl TranslateConfig {
    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_ms)
    }
}

impl BackendConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Config {
    /// Location of the settings file in the user's configuration directory
    pub fn default_path() -> Result<PathBuf> {
        let base = dirs::config_dir()
            .ok_or_else(|| LongtextError::Config("Cannot determine configuration directory".to_string()))?;
        Ok(base.join("longtext").join("config.toml"))
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| LongtextError::Config(format!("Failed to read config file: {}", e)))?;

        toml::from_str(&content)
            .map_err(|e| LongtextError::Config(format!("Failed to parse config file: {}", e)))
    }

    /// Load settings from `path`, falling back to defaults when the file does not exist yet
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Copy suitable for display, with the API key masked
    pub fn redacted(&self) -> Self {
        let mut shown = self.clone();
        let key: Vec<char> = self.backend.api_key.chars().collect();
        shown.backend.api_key = match key.len() {
            0 => String::new(),
            1..=8 => "****".to_string(),
            n => format!("****{}", key[n - 4..].iter().collect::<String>()),
        };
        shown
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self)
            .map_err(|e| LongtextError::Config(format!("Failed to serialize config: {}", e)))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| LongtextError::Config(format!("Failed to create config directory: {}", e)))?;
        }

        std::fs::write(path, content)
            .map_err(|e| LongtextError::Config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: Config = toml::from_str("[backend]\napi_url = \"https://example.test/translate\"\n").unwrap();
        assert_eq!(config.backend.api_url, "https://example.test/translate");
        assert_eq!(config.backend.ollama_host, "http://localhost:11434");
        assert_eq!(config.backend.kind, BackendKind::Ollama);
        assert_eq!(config.translate.chunk_size, 1000);
        assert_eq!(config.translate.request_delay_ms, 100);
        assert_eq!(config.interface.language, InterfaceLanguage::En);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.backend.kind = BackendKind::Api;
        config.backend.api_key = "secret".to_string();
        config.interface.language = InterfaceLanguage::Zh;
        config.save_to_file(&path).unwrap();

        let loaded = Config::from_file(&path).unwrap();
        assert_eq!(loaded.backend.kind, BackendKind::Api);
        assert_eq!(loaded.backend.api_key, "secret");
        assert_eq!(loaded.interface.language, InterfaceLanguage::Zh);
    }

    #[test]
    fn test_redacted_masks_api_key() {
        let mut config = Config::default();
        config.backend.api_key = "sk-0123456789abcd".to_string();
        assert_eq!(config.redacted().backend.api_key, "****abcd");

        config.backend.api_key = "short".to_string();
        let shown = toml::to_string_pretty(&config.redacted()).unwrap();
        assert!(!shown.contains("short"));
        assert_eq!(config.backend.api_key, "short");

        config.backend.api_key.clear();
        assert_eq!(config.redacted().backend.api_key, "");
    }

    #[test]
    fn test_missing_file_loads_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_or_default(dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.translate.target_language, "en");
    }

    #[test]
    fn test_parse_names() {
        assert_eq!(BackendKind::parse("API").unwrap(), BackendKind::Api);
        assert!(BackendKind::parse("deepl").is_err());
        assert_eq!(InterfaceLanguage::parse("中文").unwrap(), InterfaceLanguage::Zh);
        assert!(InterfaceLanguage::parse("fr").is_err());
    }
}
