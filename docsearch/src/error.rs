//! Error types for docsearch

use thiserror::Error;

/// Docsearch error type
#[derive(Error, Debug)]
pub enum Error {
    /// Document id is negative
    #[error("Invalid document id: {0}")]
    InvalidDocumentId(i64),

    /// Document id is already present in the index
    #[error("Duplicate document id: {0}")]
    DuplicateDocumentId(i64),

    /// Document text contains a word with control characters
    #[error("Word {0:?} is invalid")]
    InvalidWord(String),

    /// Stop word contains control characters
    #[error("Stop word {0:?} is invalid")]
    InvalidStopWord(String),

    /// Query word is malformed (bare `-`, double `-`, control characters)
    #[error("Query word {0:?} is invalid")]
    MalformedQueryWord(String),

    /// Document has no indexable words after stop-word removal
    #[error("Document {0} has no indexable words")]
    EmptyDocument(i64),

    /// Document not found
    #[error("Document not found: {0}")]
    DocumentNotFound(i64),

    /// Insertion-order index past the end
    #[error("Document index {index} is out of range (document count: {count})")]
    IndexOutOfRange { index: usize, count: usize },

    /// Page size of zero
    #[error("Page size must be greater than zero")]
    InvalidPageSize,

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML serialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Parse error in line-oriented input
    #[error("Parse error: {0}")]
    ParseError(String),
}

/// Broad classification of an [`Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad id, malformed text, malformed query, invalid stop word
    InvalidArgument,
    /// Unknown document id or insertion index
    OutOfRange,
    /// Failure reading or decoding external input
    Io,
}

impl Error {
    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidDocumentId(_)
            | Error::DuplicateDocumentId(_)
            | Error::InvalidWord(_)
            | Error::InvalidStopWord(_)
            | Error::MalformedQueryWord(_)
            | Error::EmptyDocument(_)
            | Error::InvalidPageSize => ErrorKind::InvalidArgument,
            Error::DocumentNotFound(_) | Error::IndexOutOfRange { .. } => ErrorKind::OutOfRange,
            Error::Io(_)
            | Error::Serialization(_)
            | Error::Yaml(_)
            | Error::ConfigError(_)
            | Error::ParseError(_) => ErrorKind::Io,
        }
    }
}

/// Result type alias for docsearch operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::DocumentNotFound(42);
        assert_eq!(err.to_string(), "Document not found: 42");

        let err = Error::IndexOutOfRange { index: 3, count: 3 };
        assert_eq!(
            err.to_string(),
            "Document index 3 is out of range (document count: 3)"
        );
    }

    #[test]
    fn test_error_kind() {
        assert_eq!(Error::InvalidDocumentId(-1).kind(), ErrorKind::InvalidArgument);
        assert_eq!(Error::DuplicateDocumentId(1).kind(), ErrorKind::InvalidArgument);
        assert_eq!(
            Error::MalformedQueryWord("--x".into()).kind(),
            ErrorKind::InvalidArgument
        );
        assert_eq!(Error::DocumentNotFound(7).kind(), ErrorKind::OutOfRange);
        assert_eq!(
            Error::IndexOutOfRange { index: 0, count: 0 }.kind(),
            ErrorKind::OutOfRange
        );
        assert_eq!(Error::ParseError("eof".into()).kind(), ErrorKind::Io);
    }
}
