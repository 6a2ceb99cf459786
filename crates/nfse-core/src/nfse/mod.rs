//! NFSe provider field extraction.

mod parser;
pub mod rules;

pub use parser::NfseParser;

use crate::models::result::ExtractionResult;

/// Trait for provider field extractors.
pub trait NfseExtractor {
    /// Extract provider fields from the raw text of one document.
    ///
    /// Never fails: fields that cannot be found are `None`.
    fn extract(&self, text: &str) -> ExtractionResult;
}
