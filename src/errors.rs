//! Error types for news_keyrank
//!
//! This module defines the error types used throughout the library.
//! Every fatal error carries enough context to tell which document or
//! stage failed.

use thiserror::Error;

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, ClassifierError>;

/// Main error type for news_keyrank
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClassifierError {
    /// The tagger could not tokenize or tag the input text
    #[error("Malformed input: {message}")]
    MalformedInput { message: String },

    /// Human input outside the recognised label set
    #[error("Invalid human label: {input:?}")]
    InvalidHumanLabel { input: String },

    /// A document name could not be mapped to a ground-truth label
    #[error("Unknown document category for {document}")]
    UnknownDocumentCategory { document: String },

    /// A label name did not match any known label
    #[error("Unknown label: {name:?}")]
    UnknownLabel { name: String },

    /// Configuration validation failed
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// Reading a document or directory failed
    #[error("I/O error at {path}: {message}")]
    Io { path: String, message: String },

    /// A training phase was run out of order
    #[error("Invalid phase: expected {expected}, currently {actual}")]
    InvalidPhase { expected: String, actual: String },

    /// The interactive label source reached end of input
    #[error("Label input closed before a valid label was entered")]
    InputClosed,

    /// A failure while processing one document
    #[error("Failed to process {document} during {stage}: {source}")]
    Document {
        document: String,
        stage: &'static str,
        #[source]
        source: Box<ClassifierError>,
    },
}

impl ClassifierError {
    /// Create a malformed input error
    pub fn malformed_input(message: impl Into<String>) -> Self {
        Self::MalformedInput {
            message: message.into(),
        }
    }

    /// Create an invalid human label error
    pub fn invalid_human_label(input: impl Into<String>) -> Self {
        Self::InvalidHumanLabel {
            input: input.into(),
        }
    }

    /// Create an unknown document category error
    pub fn unknown_document_category(document: impl Into<String>) -> Self {
        Self::UnknownDocumentCategory {
            document: document.into(),
        }
    }

    /// Create an unknown label error
    pub fn unknown_label(name: impl Into<String>) -> Self {
        Self::UnknownLabel { name: name.into() }
    }

    /// Create an invalid config error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create a serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    /// Create an I/O error for a path
    pub fn io(path: impl Into<String>, err: &std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: err.to_string(),
        }
    }

    /// Create an invalid phase error
    pub fn invalid_phase(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::InvalidPhase {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Wrap this error with the document and stage it occurred in
    pub fn in_document(self, document: impl Into<String>, stage: &'static str) -> Self {
        Self::Document {
            document: document.into(),
            stage,
            source: Box::new(self),
        }
    }

    /// Check if this error came from bad human input
    /// (which is recoverable by asking again)
    pub fn is_invalid_human_label(&self) -> bool {
        matches!(self, Self::InvalidHumanLabel { .. })
    }
}

impl From<serde_json::Error> for ClassifierError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ClassifierError::malformed_input("no text provided");
        assert!(err.to_string().contains("Malformed input"));
        assert!(err.to_string().contains("no text provided"));

        let err = ClassifierError::unknown_document_category("weather_001.txt");
        assert!(err.to_string().contains("weather_001.txt"));
    }

    #[test]
    fn test_in_document_keeps_source() {
        let err = ClassifierError::malformed_input("bad bytes").in_document("data/test/a.txt", "extract");
        let msg = err.to_string();
        assert!(msg.contains("data/test/a.txt"));
        assert!(msg.contains("extract"));
        assert!(msg.contains("bad bytes"));

        match err {
            ClassifierError::Document { source, .. } => {
                assert!(matches!(*source, ClassifierError::MalformedInput { .. }));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_is_invalid_human_label() {
        assert!(ClassifierError::invalid_human_label("7").is_invalid_human_label());
        assert!(!ClassifierError::InputClosed.is_invalid_human_label());
    }

    #[test]
    fn test_from_serde_json() {
        let err: ClassifierError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, ClassifierError::Serialization { .. }));
    }
}
