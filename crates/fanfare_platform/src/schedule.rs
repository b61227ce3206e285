//! Frame and timer scheduling
//!
//! Both schedulers deliver their callbacks on one logical execution
//! sequence: a callback always runs to completion before the next one starts,
//! so callbacks may share `Rc<RefCell<..>>` state without locking.

use slotmap::new_key_type;
use std::time::Duration;

new_key_type! {
    /// Handle to a pending frame callback
    pub struct FrameRequestId;
    /// Handle to a pending one-shot timer
    pub struct TimerId;
}

/// Invoked once with the frame timestamp (time since the host clock started)
pub type FrameCallback = Box<dyn FnOnce(Duration)>;

/// Invoked once when a timer elapses
pub type TimerCallback = Box<dyn FnOnce()>;

/// Display-synchronized frame callbacks
///
/// A request covers exactly one frame; a callback that wants to keep
/// animating must request the next frame itself.
pub trait FrameScheduler {
    /// Run `callback` on the next display refresh
    fn request_frame(&self, callback: FrameCallback) -> FrameRequestId;

    /// Cancel a pending request. Unknown or already-run ids are ignored.
    fn cancel_frame(&self, id: FrameRequestId);
}

/// Delayed one-shot callbacks
pub trait TimerService {
    /// Run `callback` once `delay` has elapsed
    fn set_timeout(&self, delay: Duration, callback: TimerCallback) -> TimerId;

    /// Cancel a pending timer. Unknown or already-fired ids are ignored.
    fn clear_timeout(&self, id: TimerId);

    /// Current host time
    fn now(&self) -> Duration;
}
