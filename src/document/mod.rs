// Document readers and writers
//
// Every supported input format is reduced to one of two shapes:
// - PlainText: extracted text of txt, pdf, docx and epub files
// - CaptionSequence: timed SRT records

pub mod text;
pub mod pdf;
pub mod docx;
pub mod ebook;

use std::fmt;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::{Result, LongtextError};
use crate::subtitle::{self, Caption};

/// Content of an input or output file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Document {
    PlainText { content: String },
    CaptionSequence { items: Vec<Caption> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Txt,
    Pdf,
    Docx,
    Epub,
    Srt,
}

impl DocumentFormat {
    pub fn parse(name: &str) -> Result<Self> {
        match name.trim_start_matches('.').to_lowercase().as_str() {
            "txt" | "text" => Ok(Self::Txt),
            "pdf" => Ok(Self::Pdf),
            "docx" => Ok(Self::Docx),
            "epub" => Ok(Self::Epub),
            "srt" => Ok(Self::Srt),
            _ => Err(LongtextError::UnsupportedFormat(format!(
                "'{}'. Supported formats: txt, pdf, docx, epub, srt", name
            ))),
        }
    }

    /// Infer the format from a file extension
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| LongtextError::UnsupportedFormat(format!(
                "cannot infer format of {} without an extension", path.display()
            )))?;
        Self::parse(extension)
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Txt => "txt",
            Self::Pdf => "pdf",
            Self::Docx => "docx",
            Self::Epub => "epub",
            Self::Srt => "srt",
        }
    }

    /// Extension of the translated file: subtitles stay subtitles, everything else becomes text
    pub fn output_extension(&self) -> &'static str {
        match self {
            Self::Srt => "srt",
            _ => "txt",
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Read `path` as `format`
pub async fn read<P: AsRef<Path>>(path: P, format: DocumentFormat) -> Result<Document> {
    let path = path.as_ref();
    info!("Reading {} as {}", path.display(), format);

    if !path.exists() {
        return Err(LongtextError::FileNotFound(path.display().to_string()));
    }

    let document = match format {
        DocumentFormat::Txt => Document::PlainText {
            content: text::read_text_file(path).await?,
        },
        DocumentFormat::Pdf => Document::PlainText {
            content: pdf::read_pdf_file(path).await?,
        },
        DocumentFormat::Docx => Document::PlainText {
            content: docx::read_docx_file(path).await?,
        },
        DocumentFormat::Epub => Document::PlainText {
            content: ebook::read_epub_file(path).await?,
        },
        DocumentFormat::Srt => {
            let content = text::read_text_file(path).await?;
            Document::CaptionSequence {
                items: subtitle::parse_srt(&content)?,
            }
        }
    };

    Ok(document)
}

/// Serialize `document` to `path` as UTF-8 text or SRT
pub async fn write<P: AsRef<Path>>(path: P, document: &Document) -> Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await
            .map_err(|e| LongtextError::Write(format!("{}: {}", parent.display(), e)))?;
    }

    match document {
        Document::PlainText { content } => {
            info!("Writing text file: {}", path.display());
            tokio::fs::write(path, content).await
                .map_err(|e| LongtextError::Write(format!("{}: {}", path.display(), e)))
        }
        Document::CaptionSequence { items } => subtitle::write_srt(items, path).await,
    }
}

/// `{stem}_translated.{ext}` next to the input
pub fn default_output_path(input: &Path, format: DocumentFormat) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());

    let extension = match format {
        DocumentFormat::Txt => input
            .extension()
            .map(|e| e.to_string_lossy().into_owned())
            .unwrap_or_else(|| format.output_extension().to_string()),
        _ => format.output_extension().to_string(),
    };

    input.with_file_name(format!("{}_translated.{}", stem, extension))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::subtitle::Timestamp;

    #[test]
    fn test_format_from_path() {
        assert_eq!(DocumentFormat::from_path(Path::new("book.EPUB")).unwrap(), DocumentFormat::Epub);
        assert_eq!(DocumentFormat::from_path(Path::new("a/b/movie.srt")).unwrap(), DocumentFormat::Srt);
        assert!(DocumentFormat::from_path(Path::new("README")).is_err());
        assert!(matches!(
            DocumentFormat::parse("odt"),
            Err(LongtextError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_default_output_path() {
        assert_eq!(
            default_output_path(Path::new("/tmp/notes.md"), DocumentFormat::Txt),
            PathBuf::from("/tmp/notes_translated.md")
        );
        assert_eq!(
            default_output_path(Path::new("/tmp/book.pdf"), DocumentFormat::Pdf),
            PathBuf::from("/tmp/book_translated.txt")
        );
        assert_eq!(
            default_output_path(Path::new("movie.srt"), DocumentFormat::Srt),
            PathBuf::from("movie_translated.srt")
        );
    }

    #[tokio::test]
    async fn test_missing_file() {
        let err = read("/definitely/not/here.txt", DocumentFormat::Txt).await.unwrap_err();
        assert!(matches!(err, LongtextError::FileNotFound(_)));
    }

    #[tokio::test]
    async fn test_read_and_write_subtitles() {
        let dir = tempfile::TempDir::new().unwrap();
        let input = dir.path().join("in.srt");
        std::fs::write(&input, "1\n00:00:01,000 --> 00:00:02,000\nHi\n").unwrap();

        let document = read(&input, DocumentFormat::Srt).await.unwrap();
        let Document::CaptionSequence { items } = &document else {
            panic!("expected captions");
        };
        assert_eq!(items[0].start, Timestamp(1_000));

        let output = dir.path().join("out").join("copy.srt");
        write(&output, &document).await.unwrap();
        assert_eq!(
            std::fs::read_to_string(&output).unwrap(),
            "1\n00:00:01,000 --> 00:00:02,000\nHi\n\n"
        );
    }

    #[tokio::test]
    async fn test_write_plain_text() {
        let dir = tempfile::TempDir::new().unwrap();
        let output = dir.path().join("out.txt");
        let document = Document::PlainText { content: "Bonjour\nle monde".to_string() };

        write(&output, &document).await.unwrap();
        assert_eq!(std::fs::read_to_string(&output).unwrap(), "Bonjour\nle monde");
    }
}
