//! NFSe parser composing section isolation with the field rules.

use regex::Regex;
use tracing::debug;

use crate::error::NfseError;
use crate::models::config::ExtractionConfig;
use crate::models::result::ExtractionResult;

use super::rules::{
    patterns::{SECTION_END_PATTERN, SECTION_START_PATTERN},
    section, CnpjExtractor, FieldExtractor, LegalNameExtractor,
};
use super::NfseExtractor;

/// Rule-based parser for the provider block of an NFSe.
///
/// Immutable after construction; `extract` is a pure function of its input
/// and can be shared freely across threads.
#[derive(Debug, Clone)]
pub struct NfseParser {
    section_start: Regex,
    section_end: Option<Regex>,
    identifier: CnpjExtractor,
    legal_name: LegalNameExtractor,
}

impl NfseParser {
    /// Create a parser with the built-in patterns.
    pub fn new() -> Self {
        Self {
            section_start: SECTION_START_PATTERN.clone(),
            section_end: Some(SECTION_END_PATTERN.clone()),
            identifier: CnpjExtractor::new(),
            legal_name: LegalNameExtractor::new(),
        }
    }

    /// Create a parser from configured patterns.
    ///
    /// An empty `section_end` or `legal_name_stop` disables that bound.
    pub fn from_config(config: &ExtractionConfig) -> Result<Self, NfseError> {
        Ok(Self {
            section_start: compile("section_start", &config.section_start)?,
            section_end: compile_optional("section_end", &config.section_end)?,
            identifier: CnpjExtractor::new()
                .with_pattern(compile("identifier", &config.identifier)?)
                .with_validation(config.validate_cnpj),
            legal_name: LegalNameExtractor::new()
                .with_label(compile("legal_name_label", &config.legal_name_label)?)
                .with_stop(compile_optional("legal_name_stop", &config.legal_name_stop)?),
        })
    }

    /// Narrow the text to the provider section.
    pub fn isolate_section<'a>(&self, text: &'a str) -> &'a str {
        section::isolate_section(text, &self.section_start, self.section_end.as_ref())
    }

    /// Extract the provider identifier from an already isolated section.
    pub fn extract_identifier(&self, section: &str) -> Option<String> {
        self.identifier.extract(section).map(|m| m.value)
    }

    /// Extract the provider legal name from an already isolated section.
    pub fn extract_legal_name(&self, section: &str) -> Option<String> {
        self.legal_name.extract(section).map(|m| m.value)
    }
}

impl Default for NfseParser {
    fn default() -> Self {
        Self::new()
    }
}

impl NfseExtractor for NfseParser {
    fn extract(&self, text: &str) -> ExtractionResult {
        let section = self.isolate_section(text);

        let result = ExtractionResult {
            identifier: self.extract_identifier(section),
            legal_name: self.extract_legal_name(section),
        };

        debug!(
            "Extracted provider fields: identifier={}, legal_name={}",
            result.identifier.is_some(),
            result.legal_name.is_some()
        );

        result
    }
}

fn compile(name: &str, pattern: &str) -> Result<Regex, NfseError> {
    Regex::new(pattern)
        .map_err(|e| NfseError::Config(format!("invalid {} pattern: {}", name, e)))
}

fn compile_optional(name: &str, pattern: &str) -> Result<Option<Regex>, NfseError> {
    if pattern.trim().is_empty() {
        Ok(None)
    } else {
        compile(name, pattern).map(Some)
    }
}
