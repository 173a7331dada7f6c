//! Paragraph-preserving text chunking.
//!
//! Text is split on `\n` and paragraphs are packed greedily into chunks of
//! at most `max_size` characters. Every paragraph is re-terminated with
//! `\n`, so concatenating the chunks gives back the input with a trailing
//! newline. A paragraph longer than `max_size` becomes its own oversized
//! chunk; it is never split mid-paragraph.

/// Default chunk size in characters
pub const DEFAULT_CHUNK_SIZE: usize = 1000;

/// Split `text` into chunks of roughly `max_size` characters on paragraph boundaries
pub fn split_text_into_chunks(text: &str, max_size: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    if text.is_empty() {
        return chunks;
    }

    let mut current = String::new();
    let mut current_len = 0usize;

    for paragraph in text.split('\n') {
        let paragraph_len = paragraph.chars().count();

        if current_len + paragraph_len > max_size && !current.is_empty() {
            chunks.push(std::mem::take(&mut current));
            current_len = 0;
        }

        current.push_str(paragraph);
        current.push('\n');
        current_len += paragraph_len + 1;
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_chunk() {
        let chunks = split_text_into_chunks("Hello.\nWorld.", 1000);
        assert_eq!(chunks, vec!["Hello.\nWorld.\n".to_string()]);
    }

    #[test]
    fn test_empty_input() {
        assert!(split_text_into_chunks("", 1000).is_empty());
    }

    #[test]
    fn test_splits_on_paragraphs() {
        let text = "aaaa\nbbbb\ncccc";
        let chunks = split_text_into_chunks(text, 10);
        assert_eq!(chunks, vec!["aaaa\nbbbb\n".to_string(), "cccc\n".to_string()]);
    }

    #[test]
    fn test_oversized_paragraph_is_kept_whole() {
        let long = "x".repeat(25);
        let text = format!("short\n{}\ntail", long);
        let chunks = split_text_into_chunks(&text, 10);

        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0], "short\n");
        assert_eq!(chunks[1], format!("{}\n", long));
        assert_eq!(chunks[2], "tail\n");
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        // Six characters, eighteen bytes
        let text = "你好世界再见\n你好世界再见";
        let chunks = split_text_into_chunks(text, 14);
        assert_eq!(chunks.len(), 1);
    }

    #[test]
    fn test_concatenation_reconstructs_paragraphs() {
        let text = "First paragraph here.\nSecond one.\n\nAfter a blank line.\nLast";
        for max_size in [1, 5, 20, 40, 1000] {
            let joined: String = split_text_into_chunks(text, max_size).concat();
            assert_eq!(joined, format!("{}\n", text), "max_size = {}", max_size);
        }
    }

    #[test]
    fn test_chunk_count_is_minimal() {
        // Five 9-character paragraphs, each 10 with its newline
        let text = vec!["123456789"; 5].join("\n");
        let chunks = split_text_into_chunks(&text, 20);

        // The comparison excludes the trailing newline of the running chunk
        for chunk in &chunks {
            assert!(chunk.trim_end_matches('\n').chars().count() <= 20);
        }
        assert_eq!(chunks.len(), 3);
    }
}
