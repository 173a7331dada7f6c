use std::path::Path;
use tracing::debug;

use crate::error::{Result, LongtextError};

const PDF_MAGIC: &[u8] = b"%PDF";

/// Extract the text layer of a PDF.
///
/// Extraction runs on the blocking pool; a panic inside the parser on a
/// malformed file surfaces as a read error instead of taking the job down.
pub async fn read_pdf_file(path: &Path) -> Result<String> {
    let bytes = tokio::fs::read(path).await?;

    if !bytes.starts_with(PDF_MAGIC) {
        return Err(LongtextError::Read(format!(
            "{} is not a PDF file (missing header)", path.display()
        )));
    }

    let text = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
        .await
        .map_err(|e| LongtextError::Read(format!("PDF extraction aborted: {}", e)))?
        .map_err(|e| LongtextError::Read(format!("PDF extraction failed: {}", e)))?;

    debug!("Extracted {} characters from PDF", text.chars().count());
    Ok(text)
}
