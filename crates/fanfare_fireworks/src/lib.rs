//! Fanfare Fireworks
//!
//! A celebratory particle effect for a host that can hand out overlay
//! surfaces, frame callbacks and timers.
//!
//! # Features
//!
//! - **Fireworks**: launches independent sessions, each with its own surface
//! - **Shows**: the standard burst sequence and a layered finale
//! - **Physics**: per-frame velocity, gravity and damping with age-based expiry
//! - **Rendering**: translucent trail wash plus additive glow circles
//! - **Spark markers**: a physics-free variant driven by a shared motion rule
//! - **Observers**: optional per-frame diagnostics
//!
//! # Example
//!
//! ```
//! use fanfare_animation::HostScheduler;
//! use fanfare_core::{Point, Size};
//! use fanfare_fireworks::{show_fireworks, Target};
//! use fanfare_platform::headless::HeadlessDisplay;
//! use fanfare_platform::Host;
//! use std::rc::Rc;
//!
//! let scheduler = HostScheduler::new();
//! let display = HeadlessDisplay::new(Size::new(800.0, 600.0));
//! let host = Host::new(
//!     Rc::new(display.clone()),
//!     Rc::new(scheduler.handle()),
//!     Rc::new(scheduler.handle()),
//! );
//!
//! show_fireworks(&host, Some(Target::Point(Point::new(400.0, 200.0))));
//! scheduler.run_until_idle(1000);
//! assert_eq!(display.created_count(), 1);
//! assert_eq!(display.attached_count(), 0);
//! ```

pub mod animator;
pub mod burst;
pub mod config;
pub mod error;
pub mod observer;
pub mod origin;
pub mod particle;
pub mod render;
pub mod session;
pub mod show;
pub mod sparks;

pub use animator::{show_fireworks, Fireworks};
pub use burst::{Burst, BurstParams};
pub use config::{DrainPolicy, FireworksConfig, GlowStyle, DEFAULT_PALETTE};
pub use error::{ConfigError, FireworksError, Result};
pub use observer::{FrameObserver, FrameStats, TracingObserver};
pub use origin::{default_origin, resolve_origin, Target};
pub use particle::{Particle, ParticleSet, Physics};
pub use render::{paint_frame, FlashState};
pub use session::{SessionHandle, SessionId, SessionState};
pub use show::{Cue, Flash, Show, ShowEvent};
pub use sparks::{
    generate_markers, GroupId, MarkerFrame, MotionRule, SparkMarker, SparkOverlay,
    SparkOverlayConfig,
};
