//! Picker errors.

use thiserror::Error;

/// Errors raised by picker setters and constructors.
///
/// A setter that fails leaves the widget untouched.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PickerError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(&'static str),
    #[error("Color sequence must not be empty")]
    EmptyInput,
}

/// Result type for picker operations.
pub type Result<T> = std::result::Result<T, PickerError>;
