//! Per-frame diagnostics hook

use crate::session::SessionId;
use std::time::Duration;

/// Snapshot handed to a [`FrameObserver`] after every frame
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameStats {
    pub session: SessionId,
    /// Frame number within the session, starting at 1
    pub frame: u64,
    pub active_particles: usize,
    /// Particles removed this frame
    pub expired: usize,
    /// Cues that have not fired yet
    pub pending_cues: usize,
    /// Frame timestamp from the host's frame scheduler
    pub timestamp: Duration,
}

/// Receives session diagnostics
///
/// Observers are called outside of any session borrow, so they may inspect
/// the session through its handle.
pub trait FrameObserver {
    fn on_frame(&self, stats: &FrameStats);

    fn on_terminated(&self, _session: SessionId, _frames: u64) {}
}

/// Logs every frame at trace level
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingObserver;

impl FrameObserver for TracingObserver {
    fn on_frame(&self, stats: &FrameStats) {
        tracing::trace!(
            session = stats.session.0,
            frame = stats.frame,
            active = stats.active_particles,
            expired = stats.expired,
            pending = stats.pending_cues,
            "fireworks frame"
        );
    }

    fn on_terminated(&self, session: SessionId, frames: u64) {
        tracing::trace!(session = session.0, frames, "fireworks session terminated");
    }
}
