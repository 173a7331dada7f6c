//! Longtext - Document and Subtitle Translation
//!
//! Extracts text from plain text, PDF, DOCX, EPUB and SRT files, translates it
//! unit by unit through a local ollama server or a remote HTTP API, and writes
//! the translated text or subtitles back to disk.

pub mod cli;
pub mod config;
pub mod workflow;
pub mod translate;
pub mod document;
pub mod subtitle;
pub mod chunk;
pub mod i18n;
pub mod error;
