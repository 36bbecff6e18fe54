//! Error types for the pagemark library.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for pagemark operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while building the annotated text stream.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading input or writing extracted figures.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input document does not exist.
    #[error("Input not found: {}", .0.display())]
    InputNotFound(PathBuf),

    /// The layout dump could not be decoded.
    #[error("Layout error: {0}")]
    Layout(String),

    /// Page number is out of range.
    #[error("Page {0} is out of range (document has {1} pages)")]
    PageOutOfRange(u32, u32),

    /// Error extracting image bytes for a figure.
    #[error("Image extraction error: {0}")]
    ImageExtract(String),

    /// Native table detection failed for a page.
    #[error("Table detection error: {0}")]
    TableDetect(String),

    /// Invalid page range specification.
    #[error("Invalid page range: {0}")]
    InvalidPageRange(String),

    /// The annotated text contains unpaired or nested markers.
    #[error("Unbalanced markers: {0}")]
    UnbalancedMarkers(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        match err.classify() {
            serde_json::error::Category::Io => Error::Io(err.into()),
            _ => Error::Layout(err.to_string()),
        }
    }
}
