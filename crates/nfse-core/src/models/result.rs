//! Extraction result model.

use serde::{Deserialize, Serialize};

/// Provider fields extracted from one NFSe document.
///
/// Each field is either a non-empty trimmed string or `None`. The two are
/// extracted independently from the same provider section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// Provider CNPJ, verbatim with punctuation (`NN.NNN.NNN/NNNN-NN`).
    #[serde(rename = "cnpj_prestador")]
    pub identifier: Option<String>,

    /// Provider legal name (Razão Social).
    #[serde(rename = "nome_prestador")]
    pub legal_name: Option<String>,
}

impl ExtractionResult {
    /// Whether neither field was found.
    pub fn is_empty(&self) -> bool {
        self.identifier.is_none() && self.legal_name.is_none()
    }

    /// Whether both fields were found.
    pub fn is_complete(&self) -> bool {
        self.identifier.is_some() && self.legal_name.is_some()
    }
}
