// Translation backends
//
// Every backend translates one unit (a text chunk or a caption) per request:
// - Ollama: local model server, `/api/generate`
// - Api: remote HTTP endpoint taking `{text, source_language, target_language}`

pub mod common;
pub mod ollama;
pub mod api;

use async_trait::async_trait;
use std::time::Duration;

pub use common::*;
use crate::config::{BackendConfig, BackendKind};
use crate::error::{Result, LongtextError};

/// Main trait for translation operations
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate a single unit of text; no state is shared between calls
    async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<String>;

    /// Human-readable backend description for logs
    fn describe(&self) -> String;
}

/// Backend selected for a single job
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendSettings {
    Ollama { host: String, model: String },
    Api { url: String, key: String },
}

impl BackendSettings {
    /// Build settings from configuration; `model` must already be resolved for ollama
    pub fn from_config(config: &BackendConfig, kind: BackendKind, model: Option<String>) -> Result<Self> {
        match kind {
            BackendKind::Ollama => {
                let model = model
                    .filter(|m| !m.trim().is_empty())
                    .or_else(|| Some(config.ollama_model.clone()).filter(|m| !m.trim().is_empty()))
                    .ok_or_else(|| LongtextError::Config("No Ollama model selected".to_string()))?;
                Ok(Self::Ollama {
                    host: config.ollama_host.trim_end_matches('/').to_string(),
                    model,
                })
            }
            BackendKind::Api => {
                if config.api_url.trim().is_empty() {
                    return Err(LongtextError::Config("API URL is not configured".to_string()));
                }
                Ok(Self::Api {
                    url: config.api_url.trim().to_string(),
                    key: config.api_key.clone(),
                })
            }
        }
    }
}

/// Factory for creating translator instances
pub struct TranslatorFactory;

impl TranslatorFactory {
    /// Create a translator for the given backend
    pub fn create_translator(settings: &BackendSettings, timeout: Duration) -> Result<Box<dyn Translator>> {
        match settings {
            BackendSettings::Ollama { host, model } => {
                Ok(Box::new(ollama::OllamaTranslator::new(host, model, timeout)?))
            }
            BackendSettings::Api { url, key } => {
                Ok(Box::new(api::ApiTranslator::new(url, key, timeout)?))
            }
        }
    }
}

/// List the models installed on an ollama server
pub async fn list_ollama_models(host: &str, timeout: Duration) -> Result<Vec<String>> {
    ollama::list_models(host, timeout).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ollama_settings_prefer_explicit_model() {
        let mut config = BackendConfig::default();
        config.ollama_host = "http://localhost:11434/".to_string();
        config.ollama_model = "llama3".to_string();

        let settings = BackendSettings::from_config(&config, BackendKind::Ollama, Some("qwen2.5".to_string())).unwrap();
        assert_eq!(settings, BackendSettings::Ollama {
            host: "http://localhost:11434".to_string(),
            model: "qwen2.5".to_string(),
        });

        let settings = BackendSettings::from_config(&config, BackendKind::Ollama, None).unwrap();
        assert!(matches!(settings, BackendSettings::Ollama { model, .. } if model == "llama3"));
    }

    #[test]
    fn test_ollama_settings_need_model() {
        let config = BackendConfig::default();
        assert!(BackendSettings::from_config(&config, BackendKind::Ollama, Some(" ".to_string())).is_err());
    }

    #[test]
    fn test_api_settings_need_url() {
        let mut config = BackendConfig::default();
        let err = BackendSettings::from_config(&config, BackendKind::Api, None).unwrap_err();
        assert!(matches!(err, LongtextError::Config(_)));

        config.api_url = "https://translate.example.test/v1".to_string();
        config.api_key = "token".to_string();
        let settings = BackendSettings::from_config(&config, BackendKind::Api, None).unwrap();
        assert_eq!(settings, BackendSettings::Api {
            url: "https://translate.example.test/v1".to_string(),
            key: "token".to_string(),
        });
    }

    #[test]
    fn test_factory_builds_each_backend() {
        let ollama = TranslatorFactory::create_translator(
            &BackendSettings::Ollama { host: "http://localhost:11434".to_string(), model: "llama3".to_string() },
            Duration::from_secs(5),
        ).unwrap();
        assert!(ollama.describe().contains("llama3"));

        let api = TranslatorFactory::create_translator(
            &BackendSettings::Api { url: "https://translate.example.test".to_string(), key: String::new() },
            Duration::from_secs(5),
        ).unwrap();
        assert!(api.describe().contains("translate.example.test"));
    }
}
