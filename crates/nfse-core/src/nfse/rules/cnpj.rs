//! CNPJ (Brazilian legal-entity identifier) extraction and validation.

use regex::Regex;

use super::patterns::CNPJ_PATTERN;
use super::{ExtractionMatch, FieldExtractor};

/// CNPJ field extractor.
///
/// Matching is purely syntactic unless validation is switched on, in which
/// case candidates with wrong check digits are skipped.
#[derive(Debug, Clone)]
pub struct CnpjExtractor {
    pattern: Regex,
    validate: bool,
}

impl CnpjExtractor {
    /// Create a new CNPJ extractor using the built-in pattern.
    pub fn new() -> Self {
        Self {
            pattern: CNPJ_PATTERN.clone(),
            validate: false,
        }
    }

    /// Use a custom identifier pattern. The whole match is returned.
    pub fn with_pattern(mut self, pattern: Regex) -> Self {
        self.pattern = pattern;
        self
    }

    /// Set whether to validate CNPJ check digits.
    pub fn with_validation(mut self, validate: bool) -> Self {
        self.validate = validate;
        self
    }
}

impl Default for CnpjExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for CnpjExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.pattern
            .find_iter(text)
            .find(|m| !self.validate || validate_cnpj(m.as_str()))
            .map(|m| {
                ExtractionMatch::new(m.as_str().to_string(), m.as_str())
                    .with_position(m.start(), m.end())
            })
    }
}

/// Extract the first formatted CNPJ from text.
pub fn extract_cnpj(text: &str) -> Option<String> {
    CnpjExtractor::new().extract(text).map(|m| m.value)
}

/// Validate a CNPJ using its two check digits.
///
/// Punctuation is ignored. Fourteen identical digits pass the arithmetic but
/// are not issued, so they are rejected.
pub fn validate_cnpj(cnpj: &str) -> bool {
    let digits: Vec<u32> = cnpj.chars().filter_map(|c| c.to_digit(10)).collect();

    if digits.len() != 14 {
        return false;
    }

    if digits.iter().all(|&d| d == digits[0]) {
        return false;
    }

    const FIRST: [u32; 12] = [5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];
    const SECOND: [u32; 13] = [6, 5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];

    check_digit(&digits[..12], &FIRST) == digits[12]
        && check_digit(&digits[..13], &SECOND) == digits[13]
}

fn check_digit(digits: &[u32], weights: &[u32]) -> u32 {
    let sum: u32 = digits.iter().zip(weights).map(|(d, w)| d * w).sum();
    match sum % 11 {
        0 | 1 => 0,
        r => 11 - r,
    }
}
