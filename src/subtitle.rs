use std::fmt;
use std::path::Path;
use tokio::fs;
use tracing::{debug, info, warn};

use crate::error::{Result, LongtextError};

/// Position in the media, in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Timestamp(pub u64);

/// Single timed subtitle record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caption {
    pub index: u32,
    pub start: Timestamp,
    pub end: Timestamp,
    pub text: String,
}

impl Timestamp {
    pub fn from_millis(ms: u64) -> Self {
        Self(ms)
    }

    pub fn as_millis(&self) -> u64 {
        self.0
    }

    /// Parse `HH:MM:SS,mmm` (a `.` before the milliseconds is accepted too)
    pub fn parse(value: &str) -> Result<Self> {
        let value = value.trim();
        let parts: Vec<&str> = value.split([':', ',', '.']).collect();

        if parts.len() != 4 {
            return Err(LongtextError::Read(format!("Invalid timestamp format: {}", value)));
        }

        let mut numbers = [0u64; 4];
        for (slot, part) in numbers.iter_mut().zip(&parts) {
            *slot = part.trim().parse().map_err(|_| {
                LongtextError::Read(format!("Invalid timestamp format: {}", value))
            })?;
        }
        let [hours, minutes, seconds, millis] = numbers;

        if minutes >= 60 || seconds >= 60 || millis >= 1000 {
            return Err(LongtextError::Read(format!(
                "Invalid time components in timestamp: {}", value
            )));
        }

        hours
            .checked_mul(3_600_000)
            .and_then(|ms| ms.checked_add(minutes * 60_000 + seconds * 1_000 + millis))
            .map(Self)
            .ok_or_else(|| LongtextError::Read(format!("Timestamp out of range: {}", value)))
    }
}

impl fmt::Display for Timestamp {
    /// Format as SRT time (HH:MM:SS,mmm)
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hours = self.0 / 3_600_000;
        let minutes = (self.0 % 3_600_000) / 60_000;
        let secs = (self.0 % 60_000) / 1_000;
        let millis = self.0 % 1_000;

        write!(f, "{:02}:{:02}:{:02},{:03}", hours, minutes, secs, millis)
    }
}

impl Caption {
    pub fn with_text(&self, text: String) -> Self {
        Self {
            index: self.index,
            start: self.start,
            end: self.end,
            text,
        }
    }
}

impl fmt::Display for Caption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.index)?;
        writeln!(f, "{} --> {}", self.start, self.end)?;
        writeln!(f, "{}", self.text)?;
        writeln!(f)
    }
}

/// Parse SRT content into captions ordered by start time
pub fn parse_srt(content: &str) -> Result<Vec<Caption>> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut captions = Vec::new();
    let mut lines = content.lines().map(|l| l.trim_end_matches('\r')).enumerate().peekable();

    loop {
        // Skip blank lines between blocks
        while matches!(lines.peek(), Some((_, line)) if line.trim().is_empty()) {
            lines.next();
        }

        let Some((line_no, index_line)) = lines.next() else {
            break;
        };

        let index: u32 = index_line.trim().parse().map_err(|_| {
            LongtextError::Read(format!(
                "Expected subtitle index at line {}: {}", line_no + 1, index_line.trim()
            ))
        })?;

        let (timing_no, timing_line) = lines.next().ok_or_else(|| {
            LongtextError::Read(format!("Subtitle {} has no timing line", index))
        })?;

        let (start, end) = timing_line.split_once("-->").ok_or_else(|| {
            LongtextError::Read(format!(
                "Expected timing at line {}: {}", timing_no + 1, timing_line.trim()
            ))
        })?;
        let start = Timestamp::parse(start)?;
        // Positional tags may follow the end time
        let end = Timestamp::parse(end.split_whitespace().next().unwrap_or_default())?;

        let mut text_lines = Vec::new();
        while let Some((_, line)) = lines.peek() {
            if line.trim().is_empty() {
                break;
            }
            text_lines.push(*line);
            lines.next();
        }

        if end < start {
            warn!("Subtitle {} ends before it starts", index);
        }

        captions.push(Caption {
            index,
            start,
            end,
            text: text_lines.join("\n"),
        });
    }

    if captions.is_empty() && !content.trim().is_empty() {
        return Err(LongtextError::Read("No subtitle entries were found".to_string()));
    }

    // Stable sort keeps file order for captions sharing a start time
    captions.sort_by_key(|caption| caption.start);

    debug!("Parsed {} subtitle entries", captions.len());
    Ok(captions)
}

/// Serialize captions in SRT format
pub fn format_srt(captions: &[Caption]) -> String {
    captions.iter().map(|caption| caption.to_string()).collect()
}

/// Generate SRT subtitle file from captions
pub async fn write_srt<P: AsRef<Path>>(captions: &[Caption], output_path: P) -> Result<()> {
    let output_path = output_path.as_ref();
    info!("Generating SRT file: {}", output_path.display());

    fs::write(output_path, format_srt(captions)).await
        .map_err(|e| LongtextError::Write(format!("{}: {}", output_path.display(), e)))?;

    info!("SRT file generated successfully");
    Ok(())
}

/// Pair every original caption with its translation as two-line bilingual text
pub fn merge_captions(original: &[Caption], translated: &[Caption]) -> Result<Vec<Caption>> {
    if original.len() != translated.len() {
        return Err(LongtextError::Merge(format!(
            "Original and translated subtitles have different lengths ({} vs {})",
            original.len(),
            translated.len()
        )));
    }

    Ok(original
        .iter()
        .zip(translated)
        .map(|(orig, trans)| orig.with_text(format!("{}\n{}", orig.text, trans.text)))
        .collect())
}
