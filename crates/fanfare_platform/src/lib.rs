//! Fanfare Host Abstraction Layer
//!
//! Effects never touch a document, a window or a clock directly. They talk to
//! the host through four collaborators:
//!
//! - [`SurfaceProvider`] - viewport size and drawable overlay surfaces
//! - [`FrameScheduler`] - one callback per display refresh
//! - [`TimerService`] - delayed one-shot callbacks
//! - [`TargetLocator`] - on-screen geometry of document elements
//!
//! [`Host`] bundles them. The [`headless`] module provides an in-memory
//! display and locator.

mod error;
pub mod headless;
mod host;
mod schedule;
mod surface;
mod target;

// Re-export all public types
pub use error::{PlatformError, Result};
pub use host::Host;
pub use schedule::{
    FrameCallback, FrameRequestId, FrameScheduler, TimerCallback, TimerId, TimerService,
};
pub use surface::{Surface, SurfaceConfig, SurfaceProvider};
pub use target::{ElementId, TargetLocator};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{PlatformError, Result};
    pub use crate::host::Host;
    pub use crate::schedule::{FrameScheduler, TimerService};
    pub use crate::surface::{Surface, SurfaceConfig, SurfaceProvider};
    pub use crate::target::{ElementId, TargetLocator};
}
