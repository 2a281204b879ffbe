//! Animation error types

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnimationError {
    /// Easing name not recognized
    #[error("Unknown easing: {0:?}")]
    UnknownEasing(String),

    /// Easing parameters could not be parsed
    #[error("Invalid easing parameters in {0:?}")]
    InvalidEasingParams(String),
}

pub type Result<T> = std::result::Result<T, AnimationError>;
