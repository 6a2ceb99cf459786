//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::nfse::rules::patterns;

/// Main configuration for the nfse pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NfseConfig {
    /// Field extraction configuration.
    pub extraction: ExtractionConfig,

    /// PDF processing configuration.
    pub pdf: PdfConfig,

    /// OCR configuration.
    pub ocr: OcrConfig,
}

/// Field extraction configuration.
///
/// All patterns are regular expressions in `regex` crate syntax. Marker and
/// label patterns should carry their own `(?i)` flag.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Start of the provider section.
    pub section_start: String,

    /// End of the provider section.
    pub section_end: String,

    /// Provider identifier (CNPJ) pattern.
    pub identifier: String,

    /// Label preceding the legal name. Must end where the value begins
    /// (separator included).
    pub legal_name_label: String,

    /// Labels that terminate a legal-name capture on the same line.
    pub legal_name_stop: String,

    /// Skip CNPJ candidates whose check digits do not verify.
    pub validate_cnpj: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            section_start: patterns::SECTION_START.to_string(),
            section_end: patterns::SECTION_END.to_string(),
            identifier: patterns::CNPJ.to_string(),
            legal_name_label: patterns::LEGAL_NAME_LABEL.to_string(),
            legal_name_stop: patterns::LEGAL_NAME_STOP.to_string(),
            validate_cnpj: false,
        }
    }
}

/// PDF processing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Minimum number of non-whitespace characters for a text layer to count.
    pub min_text_length: usize,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self { min_text_length: 1 }
    }
}

/// OCR engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Directory containing model files.
    pub model_dir: PathBuf,

    /// Text detection model file name.
    pub detection_model: String,

    /// Text recognition model file name.
    pub recognition_model: String,

    /// Character dictionary file name.
    pub dictionary: String,

    /// Keep `[UNK]` tokens emitted by the recognizer instead of blanking them.
    pub keep_unk: bool,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            model_dir: PathBuf::from("models"),
            detection_model: "det.onnx".to_string(),
            recognition_model: "latin_rec.onnx".to_string(),
            dictionary: "latin_dict.txt".to_string(),
            keep_unk: false,
        }
    }
}

impl OcrConfig {
    /// Full paths to the detection model, recognition model and dictionary.
    pub fn model_paths(&self) -> [PathBuf; 3] {
        [
            self.model_dir.join(&self.detection_model),
            self.model_dir.join(&self.recognition_model),
            self.model_dir.join(&self.dictionary),
        ]
    }
}

impl NfseConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }
}
