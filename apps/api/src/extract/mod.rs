#![allow(dead_code)]

//! Plain-text extraction from uploaded resume files.
//!
//! Recognized extensions: `.pdf`, `.docx`, `.txt`. Everything downstream of
//! this module works on in-memory text only.

use std::path::Path;

use docx_rs::{DocumentChild, ParagraphChild, RunChild};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Unsupported file type: {0}")]
    UnsupportedFormat(String),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("PDF extraction failed: {0}")]
    Pdf(#[from] pdf_extract::OutputError),

    #[error("DOCX extraction failed: {0}")]
    Docx(String),
}

/// Extracts plain text from a file on disk, dispatching on its extension.
pub fn extract_text(path: &Path) -> Result<String, ExtractError> {
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let bytes = std::fs::read(path).map_err(|source| ExtractError::Io {
        path: path.display().to_string(),
        source,
    })?;
    extract_text_from_bytes(&filename, &bytes)
}

/// Extracts plain text from an in-memory upload, dispatching on the
/// filename's extension.
pub fn extract_text_from_bytes(filename: &str, bytes: &[u8]) -> Result<String, ExtractError> {
    match extension(filename).as_deref() {
        Some("pdf") => Ok(pdf_extract::extract_text_from_mem(bytes)?),
        Some("docx") => extract_docx(bytes),
        Some("txt") => Ok(String::from_utf8_lossy(bytes).into_owned()),
        other => Err(ExtractError::UnsupportedFormat(
            other.map(|e| format!(".{e}")).unwrap_or_default(),
        )),
    }
}

fn extension(filename: &str) -> Option<String> {
    Path::new(filename)
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
}

/// Concatenates the text runs of every paragraph, one paragraph per line.
fn extract_docx(bytes: &[u8]) -> Result<String, ExtractError> {
    let docx = docx_rs::read_docx(bytes).map_err(|e| ExtractError::Docx(e.to_string()))?;

    let mut text = String::new();
    for child in docx.document.children {
        if let DocumentChild::Paragraph(paragraph) = child {
            for paragraph_child in paragraph.children {
                if let ParagraphChild::Run(run) = paragraph_child {
                    for run_child in run.children {
                        if let RunChild::Text(t) = run_child {
                            text.push_str(&t.text);
                        }
                    }
                }
            }
            text.push('\n');
        }
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_txt_roundtrip() {
        let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        write!(file, "Experience\nBuilt things.").unwrap();

        let text = extract_text(file.path()).unwrap();
        assert_eq!(text, "Experience\nBuilt things.");
    }

    #[test]
    fn test_unsupported_extension_rejected() {
        let err = extract_text_from_bytes("resume.odt", b"whatever").unwrap_err();
        assert!(matches!(err, ExtractError::UnsupportedFormat(ref ext) if ext == ".odt"));
    }

    #[test]
    fn test_missing_extension_rejected() {
        let err = extract_text_from_bytes("resume", b"whatever").unwrap_err();
        assert!(matches!(err, ExtractError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_extension_is_case_insensitive() {
        let text = extract_text_from_bytes("RESUME.TXT", b"plain text").unwrap();
        assert_eq!(text, "plain text");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = extract_text(Path::new("/nonexistent/resume.txt")).unwrap_err();
        assert!(matches!(err, ExtractError::Io { .. }));
    }
}
