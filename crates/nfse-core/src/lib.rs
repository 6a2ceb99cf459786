//! Core library for NFSe provider extraction.
//!
//! This crate provides:
//! - Provider section isolation and CNPJ / Razão Social rules
//! - PDF text-layer extraction
//! - OCR for scanned invoices using PaddleOCR models
//! - Typed errors for every way a document can fail to yield text

pub mod error;
pub mod models;
pub mod nfse;
pub mod ocr;
pub mod pdf;
pub mod source;

pub use error::{NfseError, OcrError, PdfError, Result};
pub use models::config::NfseConfig;
pub use models::result::ExtractionResult;
pub use nfse::{NfseExtractor, NfseParser};
pub use ocr::{ImageTextSource, OcrResult, TextBox};
pub use pdf::{PdfExtractor, PdfProcessor, PdfTextSource};
pub use source::{extract_from_file, read_text, DocumentKind, TextSource};
