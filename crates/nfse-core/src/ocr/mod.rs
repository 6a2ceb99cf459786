//! OCR text source for scanned NFSe images.

#[cfg(feature = "ocr")]
mod pure_engine;

#[cfg(feature = "ocr")]
pub use pure_engine::PureOcrEngine;

use std::path::Path;

use image::DynamicImage;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::OcrError;
use crate::models::config::OcrConfig;
use crate::source::{read_document, TextSource};

/// A detected text box with its coordinates and content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextBox {
    /// Bounding box coordinates (x1, y1, x2, y2, x3, y3, x4, y4) for quadrilateral.
    pub bbox: [f32; 8],

    /// Recognized text content.
    pub text: String,

    /// Recognition confidence score (0.0 - 1.0).
    pub confidence: f32,
}

impl TextBox {
    /// Get the axis-aligned bounding rectangle.
    pub fn rect(&self) -> (f32, f32, f32, f32) {
        let xs = [self.bbox[0], self.bbox[2], self.bbox[4], self.bbox[6]];
        let ys = [self.bbox[1], self.bbox[3], self.bbox[5], self.bbox[7]];

        let min_x = xs.iter().cloned().fold(f32::INFINITY, f32::min);
        let max_x = xs.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
        let min_y = ys.iter().cloned().fold(f32::INFINITY, f32::min);
        let max_y = ys.iter().cloned().fold(f32::NEG_INFINITY, f32::max);

        (min_x, min_y, max_x, max_y)
    }
}

/// Result of OCR processing on an image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OcrResult {
    /// Detected and recognized text boxes.
    pub boxes: Vec<TextBox>,

    /// Full text (boxes joined with newlines).
    pub text: String,

    /// Processing time in milliseconds.
    pub processing_time_ms: u64,

    /// Image dimensions (width, height).
    pub image_size: (u32, u32),
}

impl OcrResult {
    /// Sort boxes by reading order (top-to-bottom, left-to-right) and rebuild
    /// the full text.
    pub fn sort_by_reading_order(&mut self) {
        self.boxes.sort_by(|a, b| {
            let (ax, ay, _, _) = a.rect();
            let (bx, by, _, _) = b.rect();

            // Group by approximate vertical position (within 20 pixels)
            let row_a = (ay / 20.0) as i32;
            let row_b = (by / 20.0) as i32;

            if row_a != row_b {
                row_a.cmp(&row_b)
            } else {
                ax.partial_cmp(&bx).unwrap_or(std::cmp::Ordering::Equal)
            }
        });

        self.text = self
            .boxes
            .iter()
            .map(|b| b.text.as_str())
            .collect::<Vec<_>>()
            .join("\n");
    }
}

/// Text source running OCR over an image file.
///
/// The engine is loaded per document, so no model state outlives a call.
#[derive(Debug, Clone, Default)]
pub struct ImageTextSource {
    #[cfg_attr(not(feature = "ocr"), allow(dead_code))]
    config: OcrConfig,
}

impl ImageTextSource {
    pub fn new(config: OcrConfig) -> Self {
        Self { config }
    }

    /// Decode image bytes and run OCR on them.
    pub fn read_bytes(&self, data: &[u8]) -> Result<String, OcrError> {
        let image = image::load_from_memory(data)
            .map_err(|e| OcrError::InvalidImage(e.to_string()))?;

        let text = self.recognize(&image)?;

        if text.trim().is_empty() {
            return Err(OcrError::NoText);
        }

        debug!("OCR produced {} chars", text.len());
        Ok(text)
    }

    #[cfg(feature = "ocr")]
    fn recognize(&self, image: &DynamicImage) -> Result<String, OcrError> {
        if let Some(missing) = self.config.model_paths().iter().find(|p| !p.exists()) {
            return Err(OcrError::EngineUnavailable(format!(
                "model file not found: {}",
                missing.display()
            )));
        }

        let engine = PureOcrEngine::from_config(self.config.clone())?;
        Ok(engine.process(image)?.text)
    }

    #[cfg(not(feature = "ocr"))]
    fn recognize(&self, _image: &DynamicImage) -> Result<String, OcrError> {
        Err(OcrError::EngineUnavailable(
            "built without the `ocr` feature".to_string(),
        ))
    }
}

impl TextSource for ImageTextSource {
    fn read_text(&self, path: &Path) -> crate::Result<String> {
        let data = read_document(path)?;
        info!("Running OCR on image: {}", path.display());
        Ok(self.read_bytes(&data)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NfseError;
    use pretty_assertions::assert_eq;

    fn text_box(x: f32, y: f32, text: &str) -> TextBox {
        TextBox {
            bbox: [x, y, x + 50.0, y, x + 50.0, y + 10.0, x, y + 10.0],
            text: text.to_string(),
            confidence: 0.9,
        }
    }

    #[test]
    fn test_sort_by_reading_order() {
        let mut result = OcrResult {
            boxes: vec![
                text_box(10.0, 100.0, "CNPJ: 12.345.678/0001-90"),
                text_box(200.0, 42.0, "LTDA"),
                text_box(10.0, 41.0, "Razão Social: ACME"),
                text_box(10.0, 5.0, "Dados do Prestador"),
            ],
            text: String::new(),
            processing_time_ms: 0,
            image_size: (800, 600),
        };

        result.sort_by_reading_order();

        assert_eq!(
            result.text,
            "Dados do Prestador\nRazão Social: ACME\nLTDA\nCNPJ: 12.345.678/0001-90"
        );
    }

    #[test]
    fn test_invalid_image() {
        let result = ImageTextSource::default().read_bytes(b"not an image");
        assert!(matches!(result, Err(OcrError::InvalidImage(_))));
    }

    #[test]
    fn test_read_text_missing_file() {
        let err = ImageTextSource::default()
            .read_text(Path::new("caminho/imagem/inexistente.png"))
            .unwrap_err();
        assert!(matches!(err, NfseError::NotFound(_)));
    }

    #[test]
    fn test_engine_unavailable_without_models() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blank.png");
        image::RgbImage::new(16, 16).save(&path).unwrap();

        let config = OcrConfig {
            model_dir: dir.path().join("no-models-here"),
            ..OcrConfig::default()
        };

        let err = ImageTextSource::new(config).read_text(&path).unwrap_err();
        assert!(err.is_processing());
        assert!(matches!(err, NfseError::Ocr(OcrError::EngineUnavailable(_))));
    }

    #[cfg(not(feature = "ocr"))]
    #[test]
    fn test_engine_unavailable_without_ocr_feature() {
        let mut png = std::io::Cursor::new(Vec::new());
        image::RgbImage::new(8, 8)
            .write_to(&mut png, image::ImageFormat::Png)
            .unwrap();

        let err = ImageTextSource::default().read_bytes(png.get_ref()).unwrap_err();
        assert!(
            matches!(err, OcrError::EngineUnavailable(ref msg) if msg.contains("`ocr` feature"))
        );
    }
}
