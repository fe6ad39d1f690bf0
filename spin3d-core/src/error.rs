//! Error types for spin3d-core.

use thiserror::Error;

/// A rejected speed entry.
///
/// The `Display` text is exactly what the control panel shows in its error
/// banner.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeedError {
    /// A numeric entry below zero.
    #[error("Speed value cannot be negative.")]
    Negative,

    /// The text field lost focus while empty or negative.
    #[error("Please enter a valid speed value within the range.")]
    OutOfRange,
}

/// Errors from parsing a CSS hex color.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorError {
    #[error("color must start with '#': {0:?}")]
    MissingHash(String),

    #[error("expected 3 or 6 hex digits, got {0}")]
    BadLength(usize),

    #[error("invalid hex digit in {0:?}")]
    InvalidDigit(String),
}
