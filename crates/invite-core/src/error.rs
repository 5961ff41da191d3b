//! Error types for the invitation launcher.

use thiserror::Error;

/// Gesture controller errors.
///
/// Out-of-range or out-of-order input is never an error; it is clamped or
/// ignored. These variants cover host configuration mistakes only.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GestureError {
    /// The host did not supply the slider container bounds.
    #[error("Slider container bounds missing")]
    MissingContainer,

    /// The track leaves no room for the thumb to travel.
    #[error("Slider track {width}px is not wider than thumb {thumb_width}px")]
    DegenerateTrack { width: f64, thumb_width: f64 },

    /// A deferred callback was requested outside a tokio runtime.
    #[error("No async runtime available for deferred callback")]
    NoRuntime,
}

/// Remote data source errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The backing service reported a failure.
    #[error("Store backend error: {0}")]
    Backend(String),

    /// Requested object or document does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A document did not have the expected shape.
    #[error("Invalid document: {0}")]
    InvalidDocument(String),
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(String),

    /// Parse error.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Value outside its allowed range.
    #[error("Invalid config: {0}")]
    Invalid(String),
}
