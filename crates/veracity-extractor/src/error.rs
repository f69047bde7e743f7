//! Error types for the Extractor

use thiserror::Error;

/// Errors that can occur during extraction
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// Completion capability error
    #[error("completion error: {0}")]
    Completion(String),

    /// Text exceeds maximum length
    #[error("text too long: {0} chars (max: {1})")]
    TextTooLong(usize, usize),

    /// Extraction timeout
    #[error("extraction timed out")]
    Timeout,

    /// Input is empty or contains no extractable assertions
    #[error("no verifiable claims found in input")]
    NoVerifiableClaims,

    /// Invalid claim format in LLM response
    #[error("invalid claim format: {0}")]
    InvalidFormat(String),

    /// JSON parsing error
    #[error("JSON parse error: {0}")]
    JsonParse(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for ExtractorError {
    fn from(e: serde_json::Error) -> Self {
        ExtractorError::JsonParse(e.to_string())
    }
}
