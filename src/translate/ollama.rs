use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::error::{Result, LongtextError};
use super::{Translator, common};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub model: String,
    pub prompt: String,
    pub system: String,
    pub stream: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub response: String,
}

#[derive(Debug, Clone, Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Vec<ModelTag>,
}

#[derive(Debug, Clone, Deserialize)]
struct ModelTag {
    name: String,
}

/// Translator backed by a local ollama server
pub struct OllamaTranslator {
    client: Client,
    host: String,
    model: String,
}

impl OllamaTranslator {
    pub fn new(host: &str, model: &str, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: common::build_client(timeout)?,
            host: host.trim_end_matches('/').to_string(),
            model: model.to_string(),
        })
    }

    fn generate_url(&self) -> String {
        format!("{}/api/generate", self.host)
    }

    fn build_request(&self, text: &str, source_language: &str, target_language: &str) -> GenerateRequest {
        GenerateRequest {
            model: self.model.clone(),
            prompt: common::build_translation_prompt(text),
            system: common::build_system_prompt(source_language, target_language),
            stream: false,
        }
    }
}

#[async_trait]
impl Translator for OllamaTranslator {
    async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<String> {
        let request = self.build_request(text, source_language, target_language);
        let url = self.generate_url();

        debug!("Sending translation request to: {}", url);

        let response = self.client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| LongtextError::Translation(format!("HTTP request failed: {}", e)))?;

        let body = common::ensure_success(response).await?
            .text()
            .await
            .map_err(|e| LongtextError::Translation(format!("Failed to read response: {}", e)))?;

        parse_generate_response(&body)
    }

    fn describe(&self) -> String {
        format!("ollama model '{}' at {}", self.model, self.host)
    }
}

/// Extract the generated text from a non-streaming `/api/generate` reply
pub fn parse_generate_response(body: &str) -> Result<String> {
    let response: GenerateResponse = serde_json::from_str(body)
        .map_err(|e| LongtextError::Translation(format!("Failed to parse response: {}", e)))?;
    Ok(response.response)
}

/// Parse the model names out of an `/api/tags` reply
fn parse_tags_response(body: &str) -> Result<Vec<String>> {
    let tags: TagsResponse = serde_json::from_str(body)?;
    Ok(tags.models.into_iter().map(|m| m.name).collect())
}

/// Query `GET {host}/api/tags` for installed models
pub async fn list_models(host: &str, timeout: Duration) -> Result<Vec<String>> {
    let url = format!("{}/api/tags", host.trim_end_matches('/'));
    debug!("Listing ollama models at: {}", url);

    let response = common::build_client(timeout)?
        .get(&url)
        .send()
        .await
        .map_err(|e| LongtextError::Translation(format!("Failed to connect to Ollama: {}", e)))?;

    let status = response.status();
    if !status.is_success() {
        return Err(LongtextError::Translation(format!("Failed to get models: {}", status)));
    }

    let body = response.text().await?;
    parse_tags_response(&body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_shape() {
        let translator = OllamaTranslator::new("http://localhost:11434/", "llama3", Duration::from_secs(1)).unwrap();
        let request = translator.build_request("Bonjour", "fr", "en");

        assert_eq!(translator.generate_url(), "http://localhost:11434/api/generate");
        assert_eq!(serde_json::to_value(&request).unwrap(), json!({
            "model": "llama3",
            "prompt": "Translate: Bonjour",
            "system": "Translate the following text from French to English. Preserve the original meaning and style.",
            "stream": false,
        }));
    }

    #[test]
    fn test_parse_generate_response() {
        let body = r#"{"model":"llama3","response":"  Hello  ","done":true}"#;
        assert_eq!(parse_generate_response(body).unwrap(), "  Hello  ");
        assert_eq!(parse_generate_response(r#"{"done":true}"#).unwrap(), "");
        assert!(parse_generate_response("<html>").is_err());
    }

    #[test]
    fn test_parse_tags_response() {
        let body = r#"{"models":[{"name":"llama3:8b","size":1},{"name":"qwen2.5:7b"}]}"#;
        assert_eq!(parse_tags_response(body).unwrap(), vec!["llama3:8b", "qwen2.5:7b"]);
        assert!(parse_tags_response("{}").unwrap().is_empty());
    }
}
