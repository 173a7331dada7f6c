use thiserror::Error;

#[derive(Error, Debug)]
pub enum LongtextError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to read document: {0}")]
    Read(String),

    #[error("Translation error: {0}")]
    Translation(String),

    #[error("Failed to write output: {0}")]
    Write(String),

    #[error("Failed to merge subtitles: {0}")]
    Merge(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

pub type Result<T> = std::result::Result<T, LongtextError>;
