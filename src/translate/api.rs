use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::error::{Result, LongtextError};
use super::{Translator, common};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiRequest {
    pub text: String,
    pub source_language: String,
    pub target_language: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    #[serde(default)]
    pub translated_text: String,
}

/// Translator backed by a remote HTTP API with bearer authentication
pub struct ApiTranslator {
    client: Client,
    url: String,
    key: String,
}

impl ApiTranslator {
    pub fn new(url: &str, key: &str, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: common::build_client(timeout)?,
            url: url.to_string(),
            key: key.to_string(),
        })
    }
}

#[async_trait]
impl Translator for ApiTranslator {
    async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<String> {
        let request = ApiRequest {
            text: text.to_string(),
            source_language: source_language.to_string(),
            target_language: target_language.to_string(),
        };

        debug!("Sending translation request to: {}", self.url);

        let response = self.client
            .post(&self.url)
            .bearer_auth(&self.key)
            .json(&request)
            .send()
            .await
            .map_err(|e| LongtextError::Translation(format!("HTTP request failed: {}", e)))?;

        let body = common::ensure_success(response).await?
            .text()
            .await
            .map_err(|e| LongtextError::Translation(format!("Failed to read response: {}", e)))?;

        parse_api_response(&body)
    }

    fn describe(&self) -> String {
        format!("translation API at {}", self.url)
    }
}

pub fn parse_api_response(body: &str) -> Result<String> {
    let response: ApiResponse = serde_json::from_str(body)
        .map_err(|e| LongtextError::Translation(format!("Failed to parse response: {}", e)))?;
    Ok(response.translated_text)
}
