//! Platform error types

use thiserror::Error;

/// Platform-related errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlatformError {
    /// Selector could not be parsed
    #[error("Invalid selector: {0:?}")]
    InvalidSelector(String),

    /// Color literal could not be parsed
    #[error("Invalid color: {0:?}")]
    InvalidColor(String),

    /// Element handle does not belong to this document
    #[error("Unknown element")]
    UnknownElement,
}

/// Result type for platform operations
pub type Result<T> = std::result::Result<T, PlatformError>;
