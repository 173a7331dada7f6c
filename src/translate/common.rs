use std::time::Duration;
use reqwest::{Client, Response};
use tracing::debug;

use crate::error::{Result, LongtextError};

/// Build the HTTP client shared by one translator
pub fn build_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .user_agent(concat!("longtext/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(LongtextError::Http)
}

/// Fail the unit on any non-success status; the body is only logged
pub async fn ensure_success(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    debug!("Backend returned {}: {}", status, body);
    Err(LongtextError::Translation(format!("Translation failed: {}", status)))
}

/// System instruction sent with every unit
pub fn build_system_prompt(source_language: &str, target_language: &str) -> String {
    format!(
        "Translate the following text from {} to {}. Preserve the original meaning and style.",
        language_code_to_name(source_language),
        language_code_to_name(target_language)
    )
}

/// Prompt carrying the unit itself
pub fn build_translation_prompt(text: &str) -> String {
    format!("Translate: {}", text)
}

/// Convert language code to full language name for clearer prompts
pub fn language_code_to_name(code: &str) -> String {
    match code.to_lowercase().as_str() {
        "auto" => "the detected source language".to_string(),
        "en" => "English".to_string(),
        "zh" => "Chinese".to_string(),
        "ja" => "Japanese".to_string(),
        "ko" => "Korean".to_string(),
        "fr" => "French".to_string(),
        "de" => "German".to_string(),
        "es" => "Spanish".to_string(),
        "ru" => "Russian".to_string(),
        "it" => "Italian".to_string(),
        "pt" => "Portuguese".to_string(),
        "nl" => "Dutch".to_string(),
        "pl" => "Polish".to_string(),
        "tr" => "Turkish".to_string(),
        "ar" => "Arabic".to_string(),
        "vi" => "Vietnamese".to_string(),
        "th" => "Thai".to_string(),
        "uk" => "Ukrainian".to_string(),
        _ => code.to_string(), // Fallback to the code itself if not found
    }
}
