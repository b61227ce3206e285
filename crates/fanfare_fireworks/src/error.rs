//! Fireworks error types

use fanfare_platform::PlatformError;
use thiserror::Error;

/// Errors that stop a session from starting or a call from taking effect
///
/// None of these reach callers of [`Fireworks::trigger`](crate::Fireworks::trigger);
/// they are logged there and only surface through the `launch*` variants.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FireworksError {
    /// The host could not provide what the effect needs
    #[error(transparent)]
    Platform(#[from] PlatformError),

    /// The configuration is unusable
    #[error("Invalid fireworks config: {0}")]
    InvalidConfig(#[from] ConfigError),

    /// The session has already been torn down
    #[error("Session already terminated")]
    Terminated,
}

/// Configuration validation errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{field} range {start}..{end} must be finite and non-decreasing")]
    InvalidRange {
        field: &'static str,
        start: f32,
        end: f32,
    },

    #[error("{0} must be greater than zero")]
    Zero(&'static str),

    #[error("{field} must be finite, got {value}")]
    NonFinite { field: &'static str, value: f32 },

    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f32 },

    #[error("damping {0} must be within (0, 1]")]
    Damping(f32),

    #[error("palette must contain at least one color")]
    EmptyPalette,
}

/// Result type for fireworks operations
pub type Result<T> = std::result::Result<T, FireworksError>;
