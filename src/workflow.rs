use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, info_span, Instrument};
use uuid::Uuid;

use crate::chunk::split_text_into_chunks;
use crate::document::{self, Document, DocumentFormat};
use crate::error::Result;
use crate::subtitle::{merge_captions, Caption};
use crate::translate::{BackendSettings, Translator};

/// Everything needed to run one translation from input file to output file
#[derive(Debug, Clone)]
pub struct TranslationJob {
    pub id: Uuid,
    pub input: PathBuf,
    pub output: PathBuf,
    pub format: DocumentFormat,
    pub source_language: String,
    pub target_language: String,
    pub backend: BackendSettings,
    pub merge_bilingual: bool,
    pub chunk_size: usize,
    pub request_delay: Duration,
}

/// Notifications sent from the running job to the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobEvent {
    /// Document read; `units` requests will follow
    Started { job_id: Uuid, units: usize },
    /// Percentage of units translated so far
    Progress(u8),
    Completed(PathBuf),
    Failed(String),
}

/// Percentage reported after `completed` of `total` units
pub fn progress_percent(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 100;
    }
    ((completed as f64 / total as f64) * 100.0).round() as u8
}

struct ProgressReporter<'a> {
    events: &'a UnboundedSender<JobEvent>,
    total: usize,
    completed: usize,
}

impl<'a> ProgressReporter<'a> {
    fn new(events: &'a UnboundedSender<JobEvent>, total: usize) -> Self {
        Self { events, total, completed: 0 }
    }

    fn unit_done(&mut self) {
        self.completed += 1;
        // The receiver may be gone; the job still finishes
        let _ = self.events.send(JobEvent::Progress(progress_percent(self.completed, self.total)));
    }
}

impl TranslationJob {
    /// Run the job on a background task, streaming events to the returned receiver.
    ///
    /// The last event is always `Completed` or `Failed`.
    pub fn spawn(self, translator: Arc<dyn Translator>) -> (JoinHandle<()>, UnboundedReceiver<JobEvent>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let span = info_span!("job", id = %self.id);

        let handle = tokio::spawn(
            async move {
                let event = match self.run(translator.as_ref(), &sender).await {
                    Ok(output) => JobEvent::Completed(output),
                    Err(e) => {
                        error!("Job failed: {}", e);
                        JobEvent::Failed(e.to_string())
                    }
                };
                let _ = sender.send(event);
            }
            .instrument(span),
        );

        (handle, receiver)
    }

    /// Read, translate and write; stops at the first failure
    pub async fn run(&self, translator: &dyn Translator, events: &UnboundedSender<JobEvent>) -> Result<PathBuf> {
        info!("Processing {} with {}", self.input.display(), translator.describe());

        // Step 1: Read
        let original = document::read(&self.input, self.format).await?;

        // Step 2: Translate
        let translated = self.translate_document(&original, translator, events).await?;

        // Step 3: Merge and write
        let output = match (original, translated) {
            (Document::CaptionSequence { items: original }, Document::CaptionSequence { items: translated })
                if self.merge_bilingual =>
            {
                Document::CaptionSequence {
                    items: merge_captions(&original, &translated)?,
                }
            }
            (_, translated) => translated,
        };

        document::write(&self.output, &output).await?;
        info!("Completed: {}", self.output.display());
        Ok(self.output.clone())
    }

    /// Translate every unit of `document` in order
    pub async fn translate_document(
        &self,
        document: &Document,
        translator: &dyn Translator,
        events: &UnboundedSender<JobEvent>,
    ) -> Result<Document> {
        match document {
            Document::PlainText { content } => {
                let chunks = split_text_into_chunks(content, self.chunk_size);
                let _ = events.send(JobEvent::Started { job_id: self.id, units: chunks.len() });
                let mut progress = ProgressReporter::new(events, chunks.len());
                let mut translated = Vec::with_capacity(chunks.len());

                for (idx, chunk) in chunks.iter().enumerate() {
                    info!("┌─ Translating chunk {}/{} ────────", idx + 1, chunks.len());
                    debug!("│ Source: {}", chunk);
                    let text = self.translate_unit(translator, chunk).await?;
                    debug!("│ Target: {}", text);
                    info!("└─────────────────────────────────────");

                    translated.push(text);
                    progress.unit_done();
                    self.pause().await;
                }

                Ok(Document::PlainText { content: translated.join("\n") })
            }
            Document::CaptionSequence { items } => {
                let _ = events.send(JobEvent::Started { job_id: self.id, units: items.len() });
                let mut progress = ProgressReporter::new(events, items.len());
                let mut translated: Vec<Caption> = Vec::with_capacity(items.len());

                for (idx, caption) in items.iter().enumerate() {
                    info!("┌─ Translating caption {}/{} ────────", idx + 1, items.len());
                    info!("│ Source: {}", caption.text);
                    let text = self.translate_unit(translator, &caption.text).await?;
                    info!("│ Target: {}", text);
                    info!("└─────────────────────────────────────");

                    translated.push(caption.with_text(text));
                    progress.unit_done();
                    self.pause().await;
                }

                Ok(Document::CaptionSequence { items: translated })
            }
        }
    }

    async fn translate_unit(&self, translator: &dyn Translator, text: &str) -> Result<String> {
        let translated = translator
            .translate(text, &self.source_language, &self.target_language)
            .await?;
        Ok(translated.trim().to_string())
    }

    async fn pause(&self) {
        if !self.request_delay.is_zero() {
            tokio::time::sleep(self.request_delay).await;
        }
    }
}
