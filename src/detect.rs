//! Input format detection from magic bytes.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Document formats the converter can recognise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// Office Open XML word-processing document (a zip container)
    Docx,
    /// Portable Document Format
    Pdf,
}

impl InputFormat {
    /// Lowercase file extension without the leading dot.
    pub fn extension(&self) -> &'static str {
        match self {
            InputFormat::Docx => "docx",
            InputFormat::Pdf => "pdf",
        }
    }
}

impl std::fmt::Display for InputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputFormat::Docx => write!(f, "Word document"),
            InputFormat::Pdf => write!(f, "PDF"),
        }
    }
}

/// Local file header signature of a zip archive.
const ZIP_MAGIC: &[u8] = b"PK\x03\x04";
/// PDF magic bytes: %PDF-
const PDF_MAGIC: &[u8] = b"%PDF-";

/// Detect the input format from a file path.
///
/// Only the first bytes of the file are read.
///
/// # Example
/// ```no_run
/// use wordpdf::detect::{detect_format_from_path, InputFormat};
///
/// let format = detect_format_from_path("report.docx").unwrap();
/// assert_eq!(format, InputFormat::Docx);
/// ```
pub fn detect_format_from_path<P: AsRef<Path>>(path: P) -> Result<InputFormat> {
    let file = File::open(path)?;
    let mut header = Vec::with_capacity(8);
    file.take(8).read_to_end(&mut header)?;
    detect_format_from_bytes(&header)
}

/// Detect the input format from the leading bytes of a file.
///
/// A zip signature is reported as DOCX; whether the archive really holds a
/// word-processing document is only known once the reader opens it.
pub fn detect_format_from_bytes(data: &[u8]) -> Result<InputFormat> {
    if data.starts_with(ZIP_MAGIC) {
        Ok(InputFormat::Docx)
    } else if data.starts_with(PDF_MAGIC) {
        Ok(InputFormat::Pdf)
    } else {
        Err(Error::UnknownFormat)
    }
}

/// Check if a file looks like a Word document.
pub fn is_docx<P: AsRef<Path>>(path: P) -> bool {
    matches!(detect_format_from_path(path), Ok(InputFormat::Docx))
}

/// Check if bytes look like a Word document.
pub fn is_docx_bytes(data: &[u8]) -> bool {
    matches!(detect_format_from_bytes(data), Ok(InputFormat::Docx))
}
