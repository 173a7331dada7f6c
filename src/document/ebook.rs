use std::path::Path;

use epub::doc::EpubDoc;
use tracing::debug;

use crate::error::{Result, LongtextError};

/// Load every spine document of an EPUB and return its text with markup removed
pub async fn read_epub_file(path: &Path) -> Result<String> {
    let path = path.to_path_buf();
    tokio::task::spawn_blocking(move || load_epub_text(&path))
        .await
        .map_err(|e| LongtextError::Read(format!("EPUB extraction aborted: {}", e)))?
}

fn load_epub_text(path: &Path) -> Result<String> {
    let mut doc = EpubDoc::new(path)
        .map_err(|e| LongtextError::Read(format!("Failed to open EPUB at {}: {}", path.display(), e)))?;

    let mut combined = String::new();
    let mut documents = 0usize;

    loop {
        if let Some((content, _mime)) = doc.get_current_str() {
            combined.push_str(&strip_markup(&content));
            combined.push('\n');
            documents += 1;
        }

        if !doc.go_next() {
            break;
        }
    }

    debug!("Loaded {} EPUB documents", documents);
    Ok(combined)
}

/// Turn paragraph and line-break tags into newlines and drop every other tag
pub fn strip_markup(html: &str) -> String {
    let html = html
        .replace("<p>", "\n")
        .replace("</p>", "\n")
        .replace("<br>", "\n")
        .replace("<br/>", "\n");

    let mut in_tag = false;
    let mut text = String::with_capacity(html.len());
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => text.push(c),
            _ => {}
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    const CONTAINER: &str = r#"<?xml version="1.0"?>
<container version="1.0" xmlns="urn:oasis:names:tc:opendocument:xmlns:container">
  <rootfiles>
    <rootfile full-path="OEBPS/content.opf" media-type="application/oebps-package+xml"/>
  </rootfiles>
</container>"#;

    // Manifest lists chapter two first; the spine decides reading order
    const PACKAGE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<package xmlns="http://www.idpf.org/2007/opf" version="2.0" unique-identifier="bookid">
  <metadata xmlns:dc="http://purl.org/dc/elements/1.1/">
    <dc:title>Two Chapters</dc:title>
    <dc:identifier id="bookid">urn:uuid:longtext-test</dc:identifier>
    <dc:language>en</dc:language>
  </metadata>
  <manifest>
    <item id="ch2" href="ch2.xhtml" media-type="application/xhtml+xml"/>
    <item id="ch1" href="ch1.xhtml" media-type="application/xhtml+xml"/>
  </manifest>
  <spine>
    <itemref idref="ch1"/>
    <itemref idref="ch2"/>
  </spine>
</package>"#;

    fn write_epub(path: &Path) {
        let mut zip = ZipWriter::new(std::fs::File::create(path).unwrap());
        let stored = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
        let entries = [
            ("mimetype", "application/epub+zip"),
            ("META-INF/container.xml", CONTAINER),
            ("OEBPS/content.opf", PACKAGE),
            ("OEBPS/ch1.xhtml", "<html><body><p>Chapter one</p></body></html>"),
            ("OEBPS/ch2.xhtml", "<html><body><p>Chapter two</p></body></html>"),
        ];
        for (name, content) in entries {
            zip.start_file(name, stored).unwrap();
            zip.write_all(content.as_bytes()).unwrap();
        }
        zip.finish().unwrap();
    }

    #[tokio::test]
    async fn test_reads_spine_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("book.epub");
        write_epub(&path);

        let text = read_epub_file(&path).await.unwrap();
        assert_eq!(text, "\nChapter one\n\n\nChapter two\n\n");
    }

    #[test]
    fn test_strip_markup() {
        let html = "<html><body><h1>Title</h1><p>First</p><p>Second<br/>line</p></body></html>";
        assert_eq!(strip_markup(html), "Title\nFirst\n\nSecond\nline\n");
    }

    #[test]
    fn test_strip_markup_keeps_plain_text() {
        assert_eq!(strip_markup("no tags here"), "no tags here");
    }

    #[tokio::test]
    async fn test_invalid_epub() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), "definitely not an epub").unwrap();

        let err = read_epub_file(file.path()).await.unwrap_err();
        assert!(matches!(err, LongtextError::Read(_)));
    }
}
