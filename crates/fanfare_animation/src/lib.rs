//! Fanfare Animation Runtime
//!
//! # Features
//!
//! - **HostScheduler**: cooperative frame/timer scheduler with its own clock,
//!   implementing the host's frame scheduler and timer service
//! - **SchedulerHandle**: weak handle that no-ops once the scheduler is gone
//! - **Easing**: easing curves, including CSS-style cubic béziers

pub mod easing;
pub mod scheduler;

pub use easing::Easing;
pub use scheduler::{HostScheduler, SchedulerHandle, DEFAULT_FRAME_INTERVAL};
