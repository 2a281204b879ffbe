//! Motion component error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MotionError {
    /// A component could not find the elements it cannot work without
    #[error("{component}: required elements not found: {}", .missing.join(", "))]
    MissingElements {
        component: &'static str,
        missing: Vec<&'static str>,
    },

    /// A configuration value is outside the range its component accepts
    #[error("Invalid value for {field}: {value} ({expected})")]
    InvalidValue {
        field: &'static str,
        value: f32,
        expected: &'static str,
    },

    /// Configuration could not be parsed
    #[error("Invalid motion configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// Configuration could not be written
    #[error("Failed to serialize motion configuration: {0}")]
    Serialize(#[from] toml::ser::Error),
}

pub type Result<T> = std::result::Result<T, MotionError>;
