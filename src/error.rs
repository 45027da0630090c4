//! Error types for records extraction

use thiserror::Error;

/// A normalizer was handed text it cannot parse
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("not a phone number: {input:?} ({details})")]
    Phone { input: String, details: String },

    #[error("not a recognizable date: {0:?}")]
    Date(String),

    /// The range text did not split into exactly two endpoints
    #[error("expected two dates separated by \" to \", found {segments} segment(s) in {input:?}")]
    DateRange { input: String, segments: usize },

    #[error("not a base-10 integer: {0:?}")]
    Integer(String),
}

/// Errors that can occur while converting a records export
#[derive(Error, Debug)]
pub enum ParseError {
    /// A recognized label carried a malformed value
    #[error("Invalid value for {label:?}: {source}")]
    Format {
        label: String,
        #[source]
        source: FormatError,
    },

    /// The pane tree is missing a cell the parser relies on
    #[error("Unexpected document structure: {0}")]
    Structure(String),

    /// Failed to parse the email envelope
    #[error("Failed to parse email structure: {0}")]
    Envelope(String),

    /// Missing required header
    #[error("Missing required header: {0}")]
    MissingHeader(String),

    /// Invalid header format
    #[error("Invalid header format for {header}: {details}")]
    InvalidHeader { header: String, details: String },
}

impl ParseError {
    pub fn format(label: impl Into<String>, source: FormatError) -> Self {
        Self::Format {
            label: label.into(),
            source,
        }
    }
}

/// Result type for records extraction
pub type Result<T> = std::result::Result<T, ParseError>;
