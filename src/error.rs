//! Error types for wordpdf library.

use std::io;
use thiserror::Error;

/// Result type alias for wordpdf operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while converting a document.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input is neither a Word document nor a PDF.
    #[error("Unknown file format: not a DOCX or PDF document")]
    UnknownFormat,

    /// The input format is recognised but cannot be converted.
    #[error("Unsupported conversion: {0}")]
    UnsupportedConversion(String),

    /// The source document could not be read or translated.
    ///
    /// Covers malformed archives and XML, unmeasurable text and
    /// malformed block markup. No partial translation is returned.
    #[error("Translation error: {0}")]
    Translation(String),

    /// The paginated output could not be built or written.
    #[error("Render error: {0}")]
    Render(String),

    /// A physical length or page size string could not be parsed.
    #[error("Invalid length: {0}")]
    InvalidLength(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        match err {
            zip::result::ZipError::Io(e) => Error::Io(e),
            _ => Error::Translation(format!("invalid document archive: {}", err)),
        }
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::Translation(format!("malformed document XML: {}", err))
    }
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        Error::Render(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::UnknownFormat;
        assert_eq!(
            err.to_string(),
            "Unknown file format: not a DOCX or PDF document"
        );

        let err = Error::Translation("word/document.xml missing".into());
        assert_eq!(
            err.to_string(),
            "Translation error: word/document.xml missing"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_zip_error_maps_to_translation() {
        let err: Error = zip::result::ZipError::FileNotFound.into();
        assert!(matches!(err, Error::Translation(_)));
    }
}
