use std::fs::File;
use std::io::Read;
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::Reader;
use zip::ZipArchive;

use crate::error::{Result, LongtextError};

const DOCUMENT_PART: &str = "word/document.xml";

/// Read the paragraph text of a DOCX file, one paragraph per line
pub async fn read_docx_file(path: &Path) -> Result<String> {
    let path = path.to_path_buf();
    tokio::task::spawn_blocking(move || {
        let xml = read_document_part(&path)?;
        paragraphs_from_xml(&xml)
    })
    .await
    .map_err(|e| LongtextError::Read(format!("DOCX extraction aborted: {}", e)))?
}

fn read_document_part(path: &Path) -> Result<Vec<u8>> {
    let file = File::open(path)?;
    let mut archive = ZipArchive::new(file)
        .map_err(|e| LongtextError::Read(format!("{} is not a DOCX package: {}", path.display(), e)))?;
    let mut part = archive
        .by_name(DOCUMENT_PART)
        .map_err(|e| LongtextError::Read(format!("Missing {}: {}", DOCUMENT_PART, e)))?;

    let mut data = Vec::with_capacity(part.size() as usize);
    part.read_to_end(&mut data)?;
    Ok(data)
}

/// Walk `w:body` and collect the text runs of every `w:p`
fn paragraphs_from_xml(xml: &[u8]) -> Result<String> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(false);

    let mut text = String::new();
    let mut paragraph = String::new();
    let mut in_run = false;
    let mut in_text_run = false;
    // Text boxes nest their own paragraphs inside a run; only body text is read
    let mut text_box_depth = 0usize;
    let mut buf = Vec::new();

    loop {
        buf.clear();
        let event = reader
            .read_event_into(&mut buf)
            .map_err(|e| LongtextError::Read(format!("Malformed document XML: {}", e)))?;

        match event {
            Event::Eof => break,
            Event::Start(e) if e.name().as_ref() == b"w:txbxContent" => text_box_depth += 1,
            Event::End(e) if e.name().as_ref() == b"w:txbxContent" => {
                text_box_depth = text_box_depth.saturating_sub(1);
            }
            _ if text_box_depth > 0 => {}
            Event::Start(e) => match e.name().as_ref() {
                b"w:p" => paragraph.clear(),
                b"w:r" => in_run = true,
                b"w:t" => in_text_run = true,
                _ => {}
            },
            Event::Empty(e) => match e.name().as_ref() {
                // Self-closing paragraph is an empty line
                b"w:p" => text.push('\n'),
                // Tab stops in paragraph properties share the name, only runs count
                b"w:tab" if in_run => paragraph.push('\t'),
                b"w:br" | b"w:cr" if in_run => paragraph.push('\n'),
                _ => {}
            },
            Event::Text(t) if in_text_run => {
                let unescaped = t
                    .unescape()
                    .map_err(|e| LongtextError::Read(format!("Malformed document XML: {}", e)))?;
                paragraph.push_str(&unescaped);
            }
            Event::End(e) => match e.name().as_ref() {
                b"w:t" => in_text_run = false,
                b"w:r" => in_run = false,
                b"w:p" => {
                    text.push_str(&paragraph);
                    text.push('\n');
                }
                _ => {}
            },
            _ => {}
        }
    }

    Ok(text)
}
