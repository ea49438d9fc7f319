//! Error types for the certificate generation library

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the certificate generation library
#[derive(Error, Debug)]
pub enum Error {
    /// PDF processing error
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Spreadsheet could not be read
    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] calamine::XlsxError),

    /// File not found
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Spreadsheet has an unsupported extension
    #[error("Not an .xlsx spreadsheet: {}", .0.display())]
    UnsupportedSpreadsheet(PathBuf),

    /// Spreadsheet contains no worksheets
    #[error("Spreadsheet has no worksheets: {}", .0.display())]
    EmptyWorkbook(PathBuf),

    /// Invalid PDF (no pages)
    #[error("PDF has no pages: {}", .0.display())]
    EmptyPdf(PathBuf),

    /// Invalid spreadsheet column letter
    #[error("Invalid column letter: {0:?}")]
    InvalidColumn(String),

    /// Inverted or degenerate bounding box
    #[error("Invalid bounding box: {0}")]
    InvalidBoundingBox(String),

    /// Font name not present in the catalog
    #[error("Unknown font: {0:?} (see FONTS_README.md for available names)")]
    UnknownFont(String),

    /// Font error
    #[error("Font error: {0}")]
    Font(String),

    /// General error
    #[error("{0}")]
    General(String),
}
