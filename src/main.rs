//! Longtext - Document and Subtitle Translation
//!
//! Command-line entry point: loads settings, runs one translation job on a
//! background task and renders its progress.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{bail, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, level_filters::LevelFilter};
use tracing_appender::{non_blocking, non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};
use uuid::Uuid;

use longtext::cli::{Args, Commands, ConfigAction};
use longtext::config::{BackendKind, Config, InterfaceLanguage};
use longtext::document::{self, DocumentFormat};
use longtext::i18n::Messages;
use longtext::translate::{list_ollama_models, BackendSettings, TranslatorFactory};
use longtext::workflow::{JobEvent, TranslationJob};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Parse command line arguments
    let args = Args::parse();

    // Setup logging to both console and file
    let _guard = setup_logging(args.verbose)?;
    info!("Starting Longtext");

    // Settings are read once; changes made by `config set` apply to the next run
    let config_path = match &args.config {
        Some(path) => path.clone(),
        None => Config::default_path()?,
    };
    let mut config = Config::load_or_default(&config_path)?;
    let messages = Messages::new(config.interface.language);

    let status = match args.command {
        Commands::Translate {
            input,
            output,
            format,
            backend,
            model,
            source_lang,
            target_lang,
            merge_bilingual,
            chunk_size,
        } => {
            let format = match format {
                Some(name) => DocumentFormat::parse(&name)?,
                None => DocumentFormat::from_path(&input)?,
            };
            let kind = match backend {
                Some(name) => BackendKind::parse(&name)?,
                None => config.backend.kind,
            };

            let model = match kind {
                BackendKind::Ollama => Some(resolve_ollama_model(&config, model, &messages).await?),
                BackendKind::Api => {
                    if config.backend.api_url.trim().is_empty() {
                        bail!(messages.enter_api_url());
                    }
                    None
                }
            };
            let settings = BackendSettings::from_config(&config.backend, kind, model)?;

            let job = TranslationJob {
                id: Uuid::new_v4(),
                output: output.unwrap_or_else(|| document::default_output_path(&input, format)),
                input,
                format,
                source_language: source_lang.unwrap_or_else(|| config.translate.source_language.clone()),
                target_language: target_lang.unwrap_or_else(|| config.translate.target_language.clone()),
                backend: settings,
                merge_bilingual: merge_bilingual || config.translate.merge_bilingual,
                chunk_size: chunk_size.unwrap_or(config.translate.chunk_size),
                request_delay: config.translate.request_delay(),
            };

            run_job(job, &config, &messages).await?
        }
        Commands::Models { host } => {
            let host = host.unwrap_or_else(|| config.backend.ollama_host.clone());
            println!("{}", messages.refreshing_models());

            match list_ollama_models(&host, config.backend.timeout()).await {
                Ok(models) => {
                    println!("{}", messages.found_models(models.len()));
                    for model in models {
                        println!("  {}", model);
                    }
                }
                Err(e) => bail!(messages.error_refreshing(e)),
            }
            ExitCode::SUCCESS
        }
        Commands::Config { action } => {
            match action {
                ConfigAction::Show => {
                    let content = toml::to_string_pretty(&config.redacted())?;
                    println!("{}", content);
                }
                ConfigAction::Path => {
                    println!("{}", config_path.display());
                }
                ConfigAction::Set {
                    backend,
                    ollama_host,
                    ollama_model,
                    api_url,
                    api_key,
                    source_lang,
                    target_lang,
                    language,
                } => {
                    if let Some(backend) = backend {
                        config.backend.kind = BackendKind::parse(&backend)?;
                    }
                    if let Some(host) = ollama_host {
                        config.backend.ollama_host = host;
                    }
                    if let Some(model) = ollama_model {
                        config.backend.ollama_model = model;
                    }
                    if let Some(url) = api_url {
                        config.backend.api_url = url;
                    }
                    if let Some(key) = api_key {
                        config.backend.api_key = key;
                    }
                    if let Some(source) = source_lang {
                        config.translate.source_language = source;
                    }
                    if let Some(target) = target_lang {
                        config.translate.target_language = target;
                    }
                    if let Some(language) = language {
                        config.interface.language = InterfaceLanguage::parse(&language)?;
                    }

                    config.save_to_file(&config_path)?;
                    info!("Settings written to {}", config_path.display());

                    // Report in the language the user just chose
                    println!("{}", Messages::new(config.interface.language).settings_saved(config_path.display()));
                }
            }
            ExitCode::SUCCESS
        }
    };

    info!("Longtext finished");
    Ok(status)
}

/// Pick the model from the command line, the settings, or the first one the server reports
async fn resolve_ollama_model(config: &Config, requested: Option<String>, messages: &Messages) -> Result<String> {
    if let Some(model) = requested.filter(|m| !m.trim().is_empty()) {
        return Ok(model);
    }
    if !config.backend.ollama_model.trim().is_empty() {
        return Ok(config.backend.ollama_model.clone());
    }

    info!("{}", messages.refreshing_models());
    let models = list_ollama_models(&config.backend.ollama_host, config.backend.timeout())
        .await
        .map_err(|e| anyhow::anyhow!(messages.error_refreshing(e)))?;
    info!("{}", messages.found_models(models.len()));

    match models.into_iter().next() {
        Some(model) => Ok(model),
        None => bail!(messages.no_models()),
    }
}

/// Spawn the job and follow its events until it completes or fails
///
/// A failed job prints its localized notice once and maps to a failure exit code.
async fn run_job(job: TranslationJob, config: &Config, messages: &Messages) -> Result<ExitCode> {
    let translator = TranslatorFactory::create_translator(&job.backend, config.backend.timeout())?;
    println!("{}", messages.starting_translation(job.input.display()));

    let (handle, mut events) = job.spawn(Arc::from(translator));
    let progress = ProgressBar::new(100);
    progress.set_style(
        ProgressStyle::with_template("{msg} [{bar:40.cyan/blue}] {pos:>3}% ({elapsed})")?
            .progress_chars("=> "),
    );
    progress.set_message(messages.progress());

    let mut outcome: Option<std::result::Result<PathBuf, String>> = None;
    while let Some(event) = events.recv().await {
        match event {
            JobEvent::Started { job_id, units } => {
                info!("Job {} has {} units to translate", job_id, units);
                progress.set_position(0);
            }
            JobEvent::Progress(value) => progress.set_position(u64::from(value)),
            JobEvent::Completed(path) => outcome = Some(Ok(path)),
            JobEvent::Failed(message) => outcome = Some(Err(message)),
        }
    }
    handle.await?;

    match outcome {
        Some(Ok(path)) => {
            progress.finish();
            println!("{}", messages.translation_completed(path.display()));
            Ok(ExitCode::SUCCESS)
        }
        Some(Err(message)) => {
            progress.abandon();
            eprintln!("{}", messages.error(&message));
            Ok(ExitCode::FAILURE)
        }
        None => bail!("Translation job ended without a result"),
    }
}

/// Setup logging to both console and file
fn setup_logging(verbose: bool) -> Result<WorkerGuard> {
    let log_dir = log_directory();
    std::fs::create_dir_all(&log_dir)?;

    // Set up file appender with daily rotation
    let file_appender = rolling::daily(&log_dir, "longtext.log");
    let (non_blocking_file, guard) = non_blocking(file_appender);

    // The console stays quiet unless asked so the progress bar is readable
    let console_level = if verbose { LevelFilter::DEBUG } else { LevelFilter::WARN };
    let file_level = if verbose { LevelFilter::DEBUG } else { LevelFilter::INFO };

    // Create console layer
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_file(true)
        .with_line_number(true)
        .with_filter(console_level);

    // Create file layer
    let file_layer = fmt::layer()
        .with_writer(non_blocking_file)
        .with_target(false)
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(false) // No ANSI colors in file
        .with_filter(file_level);

    // Setup layered subscriber
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("longtext=debug")))
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    info!("Logging initialized - file: {}", log_dir.join("longtext.log").display());

    Ok(guard)
}

/// Platform cache directory, or `.longtext/log` under the working directory
fn log_directory() -> PathBuf {
    dirs::cache_dir()
        .map(|dir| dir.join("longtext").join("log"))
        .unwrap_or_else(|| Path::new(".longtext").join("log"))
}
