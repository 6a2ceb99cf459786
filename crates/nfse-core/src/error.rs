//! Error types for the nfse-core library.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the nfse library.
///
/// Every variant belongs to the text-source side of the pipeline or to
/// configuration. Field extraction itself never fails: a field that cannot be
/// found is reported as `None` in the result.
#[derive(Error, Debug)]
pub enum NfseError {
    /// The document does not exist.
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// No text source is configured for this document type.
    #[error("unsupported file type: {0}")]
    UnsupportedType(String),

    /// The document exists but access rights prevent reading it.
    #[error("permission denied: {}", .0.display())]
    PermissionDenied(PathBuf),

    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// OCR processing error.
    #[error("OCR error: {0}")]
    Ocr(#[from] OcrError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl NfseError {
    /// Whether the document was present but could not yield text.
    pub fn is_processing(&self) -> bool {
        matches!(self, NfseError::Pdf(_) | NfseError::Ocr(_))
    }
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// The PDF has no usable text layer.
    #[error("no text could be extracted from the PDF")]
    NoText,
}

/// Errors related to OCR processing.
#[derive(Error, Debug)]
pub enum OcrError {
    /// The OCR backend is missing (models absent or feature disabled).
    #[error("OCR engine unavailable: {0}")]
    EngineUnavailable(String),

    /// Failed to load OCR models.
    #[error("failed to load model: {0}")]
    ModelLoad(String),

    /// Invalid image format or contents.
    #[error("invalid image: {0}")]
    InvalidImage(String),

    /// Text recognition failed.
    #[error("text recognition failed: {0}")]
    Recognition(String),

    /// OCR ran but produced no text.
    #[error("no text could be extracted from the image")]
    NoText,
}

/// Result type for the nfse library.
pub type Result<T> = std::result::Result<T, NfseError>;
