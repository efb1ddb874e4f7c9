//! Raw text extraction from uploaded study documents.
//!
//! Plain-text files are decoded as UTF-8; PDF files have their text pulled
//! page by page, concatenated in page order with no layout preservation.

use std::fs;
use std::path::Path;

use lopdf::Document;
use thiserror::Error;

/// Failure while turning a document into raw text.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("failed to read file: {0}")]
    Io(#[from] std::io::Error),
    #[error("file is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
    #[error("failed to extract PDF text: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("unsupported file type: {0} (expected .txt or .pdf)")]
    Unsupported(String),
}

/// Read a `.txt` or `.pdf` document into a single text string.
pub fn read_document(path: &Path) -> Result<String, ExtractError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "txt" => {
            let bytes = fs::read(path)?;
            Ok(String::from_utf8(bytes)?)
        }
        "pdf" => extract_pdf_text(path),
        _ => Err(ExtractError::Unsupported(path.display().to_string())),
    }
}

/// Extract text from every page of a PDF, concatenated in page order.
fn extract_pdf_text(path: &Path) -> Result<String, ExtractError> {
    let doc = Document::load(path)?;
    let mut text = String::new();
    // get_pages returns a BTreeMap keyed by page number, so iteration order
    // is page order.
    for page_number in doc.get_pages().keys() {
        text.push_str(&doc.extract_text(&[*page_number])?);
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_txt_is_decoded_as_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "Révision für tomorrow").unwrap();
        assert_eq!(read_document(&path).unwrap(), "Révision für tomorrow");
    }

    #[test]
    fn test_invalid_utf8_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();
        assert!(matches!(read_document(&path), Err(ExtractError::Utf8(_))));
    }

    #[test]
    fn test_unknown_extension_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.docx");
        std::fs::write(&path, "whatever").unwrap();
        assert!(matches!(
            read_document(&path),
            Err(ExtractError::Unsupported(_))
        ));
    }
}
