use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Translate a document or subtitle file
    Translate {
        /// Input file (txt, pdf, docx, epub or srt)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file (defaults to <name>_translated next to the input)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Input format; inferred from the extension when omitted
        #[arg(short, long)]
        format: Option<String>,

        /// Translation backend: ollama or api
        #[arg(long)]
        backend: Option<String>,

        /// Ollama model to use
        #[arg(short, long)]
        model: Option<String>,

        /// Source language code, or "auto"
        #[arg(short, long)]
        source_lang: Option<String>,

        /// Target language code
        #[arg(short, long)]
        target_lang: Option<String>,

        /// Write original and translated subtitle text together
        #[arg(long)]
        merge_bilingual: bool,

        /// Maximum chunk size in characters for text documents
        #[arg(long)]
        chunk_size: Option<usize>,
    },

    /// List the models installed on the ollama server
    Models {
        /// Ollama host (defaults to the configured one)
        #[arg(long)]
        host: Option<String>,
    },

    /// Show or change persisted settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the current settings
    Show,

    /// Print the settings file location
    Path,

    /// Update settings; they take effect on the next run
    Set {
        /// Default backend: ollama or api
        #[arg(long)]
        backend: Option<String>,

        /// Ollama host URL
        #[arg(long)]
        ollama_host: Option<String>,

        /// Default ollama model
        #[arg(long)]
        ollama_model: Option<String>,

        /// Remote translation API URL
        #[arg(long)]
        api_url: Option<String>,

        /// Remote translation API key
        #[arg(long)]
        api_key: Option<String>,

        /// Default source language
        #[arg(long)]
        source_lang: Option<String>,

        /// Default target language
        #[arg(long)]
        target_lang: Option<String>,

        /// Interface language: en or zh
        #[arg(long)]
        language: Option<String>,
    },
}
