//! Platform error types

use crate::target::ElementId;
use thiserror::Error;

/// Host-related errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlatformError {
    /// No 2D drawing surface could be acquired
    #[error("Drawing surface unavailable: {0}")]
    SurfaceUnavailable(String),

    /// The element is no longer part of the document
    #[error("Target element {0:?} is detached")]
    TargetDetached(ElementId),
}

/// Result type for platform operations
pub type Result<T> = std::result::Result<T, PlatformError>;
