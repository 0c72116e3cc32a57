//! Error types for the artifact filter

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the artifact filter library
#[derive(Error, Debug)]
pub enum Error {
    /// PDF processing error
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// File not found
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// No input paths were given
    #[error("Missing arguments: expected one or more PDF files")]
    NoInputFiles,

    /// Invalid glob pattern
    #[error("Invalid glob pattern: {0}")]
    InvalidGlob(String),

    /// No files matched pattern
    #[error("No PDF files found matching pattern: {0}")]
    NoFilesMatched(String),

    /// Artifact region without a closing EMC (strict mode only)
    #[error("Malformed content stream on page {page}: {unterminated} artifact region(s) missing EMC")]
    MalformedStream { page: u32, unterminated: usize },

    /// General error
    #[error("{0}")]
    General(String),
}
