//! Text sources: turning a document on disk into raw text.
//!
//! Each document kind has one [`TextSource`] implementation; callers pick it
//! with a [`DocumentKind`] tag, then hand the text to an
//! [`NfseExtractor`](crate::nfse::NfseExtractor).

use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{NfseError, Result};
use crate::models::config::NfseConfig;
use crate::models::result::ExtractionResult;
use crate::nfse::{NfseExtractor, NfseParser};
use crate::ocr::ImageTextSource;
use crate::pdf::PdfTextSource;

/// Image file extensions routed to OCR.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "tif", "tiff", "gif"];

/// Capability of producing the raw text of a document.
pub trait TextSource {
    /// Read the full text of the document at `path`.
    fn read_text(&self, path: &Path) -> Result<String>;
}

/// Kind of input document, selecting the text source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    /// PDF with a text layer.
    Pdf,
    /// Raster image, read with OCR.
    Image,
}

impl DocumentKind {
    /// Determine the kind from a file extension (without the dot).
    pub fn from_extension(extension: &str) -> Result<Self> {
        let extension = extension.to_lowercase();
        if extension == "pdf" {
            Ok(DocumentKind::Pdf)
        } else if IMAGE_EXTENSIONS.contains(&extension.as_str()) {
            Ok(DocumentKind::Image)
        } else {
            Err(NfseError::UnsupportedType(extension))
        }
    }

    /// Determine the kind from a path's extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        Self::from_extension(extension)
    }

    /// Create the text source for this kind.
    pub fn text_source(self, config: &NfseConfig) -> Box<dyn TextSource> {
        match self {
            DocumentKind::Pdf => Box::new(PdfTextSource::new(config.pdf.clone())),
            DocumentKind::Image => Box::new(ImageTextSource::new(config.ocr.clone())),
        }
    }
}

impl FromStr for DocumentKind {
    type Err = NfseError;

    /// Parse a type name, `"pdf"` or `"image"`, case-insensitively.
    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "pdf" => Ok(DocumentKind::Pdf),
            "image" => Ok(DocumentKind::Image),
            _ => Err(NfseError::UnsupportedType(s.to_string())),
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentKind::Pdf => write!(f, "pdf"),
            DocumentKind::Image => write!(f, "image"),
        }
    }
}

/// Read a document's bytes, mapping missing files and access errors to their
/// own variants.
pub(crate) fn read_document(path: &Path) -> Result<Vec<u8>> {
    if !path.exists() {
        return Err(NfseError::NotFound(path.to_path_buf()));
    }

    fs::read(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => NfseError::NotFound(path.to_path_buf()),
        ErrorKind::PermissionDenied => NfseError::PermissionDenied(path.to_path_buf()),
        _ => NfseError::Io(e),
    })
}

/// Read the raw text of a document with the source for `kind`.
pub fn read_text(path: &Path, kind: DocumentKind, config: &NfseConfig) -> Result<String> {
    kind.text_source(config).read_text(path)
}

/// Read a document and extract its provider fields.
///
/// Fails only when the document cannot produce text; missing fields are
/// reported as `None` in the result.
pub fn extract_from_file(
    path: &Path,
    kind: DocumentKind,
    config: &NfseConfig,
) -> Result<ExtractionResult> {
    if !path.exists() {
        return Err(NfseError::NotFound(path.to_path_buf()));
    }

    let parser = NfseParser::from_config(&config.extraction)?;

    info!("Processing {}: {}", kind, path.display());
    let text = read_text(path, kind, config)?;

    Ok(parser.extract(&text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    #[test]
    fn test_kind_from_str() {
        assert_eq!("pdf".parse::<DocumentKind>().unwrap(), DocumentKind::Pdf);
        assert_eq!("PDF".parse::<DocumentKind>().unwrap(), DocumentKind::Pdf);
        assert_eq!("image".parse::<DocumentKind>().unwrap(), DocumentKind::Image);
        assert!(matches!(
            "docx".parse::<DocumentKind>(),
            Err(NfseError::UnsupportedType(ref t)) if t == "docx"
        ));
    }

    #[test]
    fn test_kind_from_path() {
        assert_eq!(
            DocumentKind::from_path(Path::new("nota.PDF")).unwrap(),
            DocumentKind::Pdf
        );
        for name in ["a.png", "a.jpg", "a.JPEG", "a.bmp", "a.tiff", "a.gif"] {
            assert_eq!(
                DocumentKind::from_path(Path::new(name)).unwrap(),
                DocumentKind::Image
            );
        }
        assert!(DocumentKind::from_path(Path::new("a.docx")).is_err());
        assert!(DocumentKind::from_path(Path::new("no_extension")).is_err());
    }

    #[test]
    fn test_read_document_not_found() {
        let err = read_document(Path::new("caminho/garantidamente/inexistente.pdf")).unwrap_err();
        assert!(matches!(err, NfseError::NotFound(_)));
    }

    #[test]
    fn test_extract_from_file_not_found() {
        let path = PathBuf::from("caminho/inexistente.pdf");
        let err = extract_from_file(&path, DocumentKind::Pdf, &NfseConfig::default()).unwrap_err();
        assert!(matches!(err, NfseError::NotFound(p) if p == path));
    }

    #[test]
    fn test_extract_from_file_bad_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nota.pdf");
        fs::write(&path, b"%PDF-1.4").unwrap();

        let mut config = NfseConfig::default();
        config.extraction.section_start = "(".to_string();

        let err = extract_from_file(&path, DocumentKind::Pdf, &config).unwrap_err();
        assert!(matches!(err, NfseError::Config(_)));
    }

    #[cfg(unix)]
    #[test]
    fn test_read_document_permission_denied() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("protegido.pdf");
        fs::write(&path, b"%PDF-1.4").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o000)).unwrap();

        // Root ignores file modes; only assert when the read really fails.
        if fs::read(&path).is_err() {
            let err = read_document(&path).unwrap_err();
            assert!(matches!(err, NfseError::PermissionDenied(_)));
        }
    }
}
