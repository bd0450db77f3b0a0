//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.
//!
//! Per-header parsing failures never show up here: they are absorbed
//! into empty labels and missing timestamps by the parser.

use thiserror::Error;

/// Errors that can abort a whole analysis call
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Header block is not valid UTF-8 text: {0}")]
    NotText(#[from] std::str::Utf8Error),

    #[error("Failed to split header block: {0}")]
    HeaderBlock(#[from] mailparse::MailParseError),
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
