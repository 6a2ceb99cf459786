//! PDF processing module.

mod extractor;

pub use extractor::PdfExtractor;

use std::path::Path;

use tracing::{debug, info};

use crate::error::PdfError;
use crate::models::config::PdfConfig;
use crate::source::{read_document, TextSource};

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Trait for PDF processing implementations.
pub trait PdfProcessor {
    /// Load a PDF from bytes.
    fn load(&mut self, data: &[u8]) -> Result<()>;

    /// Get the number of pages in the PDF.
    fn page_count(&self) -> u32;

    /// Extract text from the entire PDF.
    fn extract_text(&self) -> Result<String>;
}

/// Text source reading the embedded text layer of a PDF.
#[derive(Debug, Clone, Default)]
pub struct PdfTextSource {
    config: PdfConfig,
}

impl PdfTextSource {
    pub fn new(config: PdfConfig) -> Self {
        Self { config }
    }

    /// Extract text from PDF bytes already in memory.
    pub fn read_bytes(&self, data: &[u8]) -> Result<String> {
        let mut extractor = PdfExtractor::new();
        extractor.load(data)?;

        let text = extractor.extract_text()?;
        let meaningful = text.chars().filter(|c| !c.is_whitespace()).count();

        debug!(
            "PDF text layer: {} pages, {} non-blank chars",
            extractor.page_count(),
            meaningful
        );

        if meaningful == 0 || meaningful < self.config.min_text_length {
            return Err(PdfError::NoText);
        }

        Ok(text)
    }
}

impl TextSource for PdfTextSource {
    fn read_text(&self, path: &Path) -> crate::Result<String> {
        let data = read_document(path)?;
        info!("Extracting text from PDF: {}", path.display());
        Ok(self.read_bytes(&data)?)
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Document, Object, Stream};

    /// Build a one-page PDF with each line drawn as its own text run.
    pub fn pdf_with_lines(lines: &[&str]) -> Vec<u8> {
        let mut operations = vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), 12.into()]),
            Operation::new("Td", vec![50.into(), 780.into()]),
        ];
        for line in lines {
            operations.push(Operation::new("Tj", vec![Object::string_literal(*line)]));
            operations.push(Operation::new("Td", vec![0.into(), (-20).into()]));
        }
        operations.push(Operation::new("ET", vec![]));

        build(Content { operations }, 1)
    }

    /// Build a PDF with no pages at all.
    pub fn pdf_without_pages() -> Vec<u8> {
        build(Content { operations: vec![] }, 0)
    }

    fn build(content: Content, pages: usize) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                "F1" => font_id,
            },
        });

        let mut kids: Vec<Object> = Vec::new();
        if pages > 0 {
            let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        let pages_dict = dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut data = Vec::new();
        doc.save_to(&mut data).unwrap();
        data
    }
}
