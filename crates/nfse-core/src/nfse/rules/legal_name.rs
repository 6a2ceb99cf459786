//! Razão Social (legal name) extraction.

use regex::Regex;

use super::patterns::{LEGAL_NAME_LABEL_PATTERN, LEGAL_NAME_STOP_PATTERN, WHITESPACE_RUN};
use super::{ExtractionMatch, FieldExtractor};

/// Legal-name field extractor.
///
/// The value is whatever follows the label up to the end of its line, cut
/// short at the next known field label when several fields share a line.
#[derive(Debug, Clone)]
pub struct LegalNameExtractor {
    label: Regex,
    stop: Option<Regex>,
}

impl LegalNameExtractor {
    /// Create a new extractor using the built-in label and stop patterns.
    pub fn new() -> Self {
        Self {
            label: LEGAL_NAME_LABEL_PATTERN.clone(),
            stop: Some(LEGAL_NAME_STOP_PATTERN.clone()),
        }
    }

    /// Use a custom label pattern. The value starts where the match ends.
    pub fn with_label(mut self, label: Regex) -> Self {
        self.label = label;
        self
    }

    /// Use custom stop labels, or `None` to capture the whole line.
    pub fn with_stop(mut self, stop: Option<Regex>) -> Self {
        self.stop = stop;
        self
    }

    fn capture_at(&self, text: &str, start: usize) -> Option<String> {
        let line = text[start..].lines().next().unwrap_or("");

        let value = match self.stop.as_ref().and_then(|re| re.find(line)) {
            Some(stop) => &line[..stop.start()],
            None => line,
        };

        let value = value
            .trim()
            .trim_end_matches(|c: char| c.is_whitespace() || matches!(c, '-' | '|' | ',' | ';'));
        let value = WHITESPACE_RUN.replace_all(value, " ");

        if value.is_empty() {
            None
        } else {
            Some(value.into_owned())
        }
    }
}

impl Default for LegalNameExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for LegalNameExtractor {
    type Output = ExtractionMatch<String>;

    /// Only the first label occurrence is considered. If its value is blank
    /// the field is absent, even when a later label carries a value.
    fn extract(&self, text: &str) -> Option<Self::Output> {
        let label = self.label.find(text)?;
        self.capture_at(text, label.end()).map(|value| {
            ExtractionMatch::new(value, label.as_str()).with_position(label.start(), label.end())
        })
    }
}

/// Extract the first legal name from text.
pub fn extract_legal_name(text: &str) -> Option<String> {
    LegalNameExtractor::new().extract(text).map(|m| m.value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_extract_simple() {
        assert_eq!(
            extract_legal_name("Razão Social: ACME LTDA\nCNPJ: 12.345.678/0001-90"),
            Some("ACME LTDA".to_string())
        );
    }

    #[test]
    fn test_no_trailing_whitespace() {
        assert_eq!(
            extract_legal_name("Razão Social: ACME LTDA   \t\n"),
            Some("ACME LTDA".to_string())
        );
    }

    #[test]
    fn test_not_found() {
        assert_eq!(extract_legal_name("Texto sem Razão"), None);
    }

    #[test]
    fn test_collapses_internal_whitespace() {
        assert_eq!(
            extract_legal_name("RAZAO SOCIAL:  EMPRESA \t  FICTÍCIA   LTDA"),
            Some("EMPRESA FICTÍCIA LTDA".to_string())
        );
    }

    #[test]
    fn test_stops_at_next_label_on_same_line() {
        assert_eq!(
            extract_legal_name("Nome/Razão Social: ACME SERVICOS LTDA CPF/CNPJ: 12.345.678/0001-90"),
            Some("ACME SERVICOS LTDA".to_string())
        );
        assert_eq!(
            extract_legal_name("Razão Social: ACME LTDA - Inscrição Municipal: 123"),
            Some("ACME LTDA".to_string())
        );
    }

    #[test]
    fn test_stop_label_requires_word_boundary() {
        assert_eq!(
            extract_legal_name("Razão Social: CPFL ENERGIA S.A."),
            Some("CPFL ENERGIA S.A.".to_string())
        );
    }

    #[test]
    fn test_name_containing_field_words() {
        for name in [
            "EMAIL MARKETING LTDA",
            "TELEFONE & CIA LTDA",
            "MUNICIPIO DE CAMPINAS",
            "ENDERECO CERTO IMOVEIS LTDA",
            "ACME CNPJ CONSULTORIA LTDA",
            "CPF CONTABILIDADE ME",
        ] {
            let text = format!("Razão Social: {}\nCNPJ: 12.345.678/0001-90", name);
            assert_eq!(extract_legal_name(&text), Some(name.to_string()));
        }
    }

    #[test]
    fn test_name_with_field_word_then_label() {
        assert_eq!(
            extract_legal_name("Razão Social: TELEFONE & CIA LTDA Telefone: (11) 5555-0000"),
            Some("TELEFONE & CIA LTDA".to_string())
        );
    }

    #[test]
    fn test_value_on_next_line() {
        assert_eq!(
            extract_legal_name("Razão Social\nEMPRESA TESTE LTDA\nCNPJ: 11.222.333/0001-81"),
            Some("EMPRESA TESTE LTDA".to_string())
        );
    }

    #[test]
    fn test_blank_value_is_absent() {
        assert_eq!(extract_legal_name("Razão Social:\nCNPJ: 11.222.333/0001-81"), None);
        assert_eq!(extract_legal_name("Razão Social:   "), None);
    }

    #[test]
    fn test_first_occurrence_only() {
        let text = "Razão Social: PRIMEIRA LTDA\nRazão Social: SEGUNDA LTDA";
        assert_eq!(extract_legal_name(text), Some("PRIMEIRA LTDA".to_string()));

        let found = LegalNameExtractor::new().extract(text).unwrap();
        assert_eq!(found.position, Some((0, 15)));
    }

    #[test]
    fn test_without_stop_labels() {
        let extractor = LegalNameExtractor::new().with_stop(None);
        let found = extractor.extract("Razão Social: ACME LTDA CNPJ: 1").unwrap();
        assert_eq!(found.value, "ACME LTDA CNPJ: 1");
    }
}
