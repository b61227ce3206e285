//! Host scheduler
//!
//! A cooperative, single-sequence scheduler with its own clock. It implements
//! both [`FrameScheduler`] and [`TimerService`] and is what drives effects when
//! the host does not supply a display-synchronized frame clock of its own.
//!
//! Time only moves when the scheduler is driven:
//! - [`HostScheduler::tick`] advances one frame interval, fires the timers that
//!   came due on the way, then runs every frame callback requested so far
//! - [`HostScheduler::advance`] moves the clock without producing a frame
//! - [`HostScheduler::run_paced`] ticks in real time until idle
//!
//! Callbacks are taken out of the scheduler before they run, so they are free
//! to request frames and set timers on the same scheduler.

use fanfare_platform::{
    FrameCallback, FrameRequestId, FrameScheduler, TimerCallback, TimerId, TimerService,
};
use slotmap::SlotMap;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::{Duration, Instant};

/// Default frame interval (60fps)
pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_micros(16_667);

struct PendingTimer {
    due: Duration,
    /// Insertion order, breaks ties between timers due at the same instant
    seq: u64,
    callback: TimerCallback,
}

/// Internal state of the scheduler
struct SchedulerInner {
    now: Duration,
    frame_interval: Duration,
    frames: SlotMap<FrameRequestId, FrameCallback>,
    timers: SlotMap<TimerId, PendingTimer>,
    next_seq: u64,
    frame_count: u64,
}

/// The scheduler that owns the clock and all pending callbacks
///
/// Hand [`SchedulerHandle`]s to the code that schedules work; keep the
/// scheduler itself wherever the loop is driven.
///
/// ```
/// use fanfare_animation::HostScheduler;
/// use fanfare_platform::TimerService;
/// use std::cell::Cell;
/// use std::rc::Rc;
/// use std::time::Duration;
///
/// let scheduler = HostScheduler::new();
/// let fired = Rc::new(Cell::new(false));
/// let flag = Rc::clone(&fired);
/// scheduler
///     .handle()
///     .set_timeout(Duration::from_millis(100), Box::new(move || flag.set(true)));
///
/// scheduler.advance(Duration::from_millis(99));
/// assert!(!fired.get());
/// scheduler.advance(Duration::from_millis(1));
/// assert!(fired.get());
/// ```
pub struct HostScheduler {
    inner: Rc<RefCell<SchedulerInner>>,
}

impl HostScheduler {
    pub fn new() -> Self {
        Self::with_frame_interval(DEFAULT_FRAME_INTERVAL)
    }

    pub fn with_frame_interval(frame_interval: Duration) -> Self {
        Self {
            inner: Rc::new(RefCell::new(SchedulerInner {
                now: Duration::ZERO,
                frame_interval,
                frames: SlotMap::with_key(),
                timers: SlotMap::with_key(),
                next_seq: 0,
                frame_count: 0,
            })),
        }
    }

    /// Get a handle to this scheduler for passing to components
    pub fn handle(&self) -> SchedulerHandle {
        SchedulerHandle {
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// Current clock value
    pub fn now(&self) -> Duration {
        self.inner.borrow().now
    }

    pub fn frame_interval(&self) -> Duration {
        self.inner.borrow().frame_interval
    }

    /// Number of frames produced so far
    pub fn frame_count(&self) -> u64 {
        self.inner.borrow().frame_count
    }

    /// Number of frame callbacks waiting for the next frame
    pub fn pending_frames(&self) -> usize {
        self.inner.borrow().frames.len()
    }

    /// Number of timers that have not fired yet
    pub fn pending_timers(&self) -> usize {
        self.inner.borrow().timers.len()
    }

    /// Whether anything is still scheduled
    pub fn has_pending(&self) -> bool {
        let inner = self.inner.borrow();
        !inner.frames.is_empty() || !inner.timers.is_empty()
    }

    /// Move the clock forward by `by`, firing due timers in order
    ///
    /// No frame callbacks run.
    pub fn advance(&self, by: Duration) {
        let target = self.now() + by;
        self.fire_timers_until(target);
        self.inner.borrow_mut().now = target;
    }

    /// Produce one frame
    ///
    /// Advances the clock by one frame interval (firing the timers due on the
    /// way) and then runs every frame callback requested before this call.
    /// Callbacks requested while the frame runs wait for the next one.
    ///
    /// Returns true if anything is still scheduled.
    pub fn tick(&self) -> bool {
        let interval = self.frame_interval();
        self.advance(interval);

        let (now, callbacks) = {
            let mut inner = self.inner.borrow_mut();
            inner.frame_count += 1;
            let callbacks: Vec<FrameCallback> = inner.frames.drain().map(|(_, cb)| cb).collect();
            (inner.now, callbacks)
        };

        for callback in callbacks {
            callback(now);
        }

        self.has_pending()
    }

    /// Produce `count` frames
    pub fn run_frames(&self, count: usize) {
        for _ in 0..count {
            self.tick();
        }
    }

    /// Produce frames until at least `duration` of clock time has passed
    pub fn run_for(&self, duration: Duration) {
        let target = self.now() + duration;
        while self.now() < target {
            self.tick();
        }
    }

    /// Produce frames until nothing is scheduled, up to `max_frames`
    ///
    /// Returns the number of frames produced.
    pub fn run_until_idle(&self, max_frames: usize) -> usize {
        let mut frames = 0;
        while frames < max_frames && self.has_pending() {
            self.tick();
            frames += 1;
        }
        frames
    }

    /// Produce frames in real time until nothing is scheduled or `limit` passes
    ///
    /// Sleeps out the remainder of each frame interval.
    pub fn run_paced(&self, limit: Duration) -> usize {
        let started = Instant::now();
        let interval = self.frame_interval();
        let mut frames = 0;

        while self.has_pending() && started.elapsed() < limit {
            let start = Instant::now();
            self.tick();
            frames += 1;

            if frames % 60 == 0 {
                tracing::debug!(
                    "HostScheduler: {} frames, {} pending frame callbacks, {} pending timers",
                    frames,
                    self.pending_frames(),
                    self.pending_timers()
                );
            }

            let elapsed = start.elapsed();
            if elapsed < interval {
                std::thread::sleep(interval - elapsed);
            }
        }

        frames
    }

    fn fire_timers_until(&self, target: Duration) {
        loop {
            let next = {
                let mut inner = self.inner.borrow_mut();
                let due = inner
                    .timers
                    .iter()
                    .filter(|(_, t)| t.due <= target)
                    .min_by_key(|(_, t)| (t.due, t.seq))
                    .map(|(id, _)| id);

                match due.and_then(|id| inner.timers.remove(id)) {
                    Some(timer) => {
                        if timer.due > inner.now {
                            inner.now = timer.due;
                        }
                        Some(timer.callback)
                    }
                    None => None,
                }
            };

            match next {
                Some(callback) => callback(),
                None => break,
            }
        }
    }
}

impl Default for HostScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameScheduler for HostScheduler {
    fn request_frame(&self, callback: FrameCallback) -> FrameRequestId {
        self.inner.borrow_mut().frames.insert(callback)
    }

    fn cancel_frame(&self, id: FrameRequestId) {
        // Drop outside the borrow; the callback may own state that reschedules
        let removed = self.inner.borrow_mut().frames.remove(id);
        drop(removed);
    }
}

impl TimerService for HostScheduler {
    fn set_timeout(&self, delay: Duration, callback: TimerCallback) -> TimerId {
        let mut inner = self.inner.borrow_mut();
        let due = inner.now + delay;
        let seq = inner.next_seq;
        inner.next_seq += 1;
        inner.timers.insert(PendingTimer { due, seq, callback })
    }

    fn clear_timeout(&self, id: TimerId) {
        let removed = self.inner.borrow_mut().timers.remove(id);
        drop(removed);
    }

    fn now(&self) -> Duration {
        HostScheduler::now(self)
    }
}

/// A weak handle to the scheduler
///
/// This is passed to components that need to schedule work.
/// It won't keep the scheduler alive; once the scheduler is dropped every
/// operation is a no-op and requests return null ids.
#[derive(Clone)]
pub struct SchedulerHandle {
    inner: Weak<RefCell<SchedulerInner>>,
}

impl SchedulerHandle {
    /// Check if the scheduler is still alive
    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }
}

impl FrameScheduler for SchedulerHandle {
    fn request_frame(&self, callback: FrameCallback) -> FrameRequestId {
        self.inner
            .upgrade()
            .map(|inner| inner.borrow_mut().frames.insert(callback))
            .unwrap_or_default()
    }

    fn cancel_frame(&self, id: FrameRequestId) {
        if let Some(inner) = self.inner.upgrade() {
            let removed = inner.borrow_mut().frames.remove(id);
            drop(removed);
        }
    }
}

impl TimerService for SchedulerHandle {
    fn set_timeout(&self, delay: Duration, callback: TimerCallback) -> TimerId {
        self.inner
            .upgrade()
            .map(|inner| {
                let mut inner = inner.borrow_mut();
                let due = inner.now + delay;
                let seq = inner.next_seq;
                inner.next_seq += 1;
                inner.timers.insert(PendingTimer { due, seq, callback })
            })
            .unwrap_or_default()
    }

    fn clear_timeout(&self, id: TimerId) {
        if let Some(inner) = self.inner.upgrade() {
            let removed = inner.borrow_mut().timers.remove(id);
            drop(removed);
        }
    }

    fn now(&self) -> Duration {
        self.inner
            .upgrade()
            .map(|inner| inner.borrow().now)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn test_timers_fire_in_due_order() {
        let scheduler = HostScheduler::new();
        let handle = scheduler.handle();
        let order = Rc::new(RefCell::new(Vec::new()));

        for (delay, tag) in [(300, 'c'), (100, 'a'), (200, 'b'), (100, 'd')] {
            let order = Rc::clone(&order);
            handle.set_timeout(ms(delay), Box::new(move || order.borrow_mut().push(tag)));
        }

        scheduler.advance(ms(1000));
        assert_eq!(*order.borrow(), vec!['a', 'd', 'b', 'c']);
        assert_eq!(scheduler.now(), ms(1000));
    }

    #[test]
    fn test_timer_sees_its_due_time() {
        let scheduler = HostScheduler::new();
        let handle = scheduler.handle();
        let seen = Rc::new(Cell::new(Duration::ZERO));

        let seen_in = Rc::clone(&seen);
        let clock = handle.clone();
        handle.set_timeout(ms(150), Box::new(move || seen_in.set(clock.now())));

        scheduler.advance(ms(500));
        assert_eq!(seen.get(), ms(150));
    }

    #[test]
    fn test_clear_timeout() {
        let scheduler = HostScheduler::new();
        let handle = scheduler.handle();
        let fired = Rc::new(Cell::new(false));

        let flag = Rc::clone(&fired);
        let id = handle.set_timeout(ms(10), Box::new(move || flag.set(true)));
        handle.clear_timeout(id);

        scheduler.advance(ms(20));
        assert!(!fired.get());
        assert_eq!(scheduler.pending_timers(), 0);
    }

    #[test]
    fn test_frame_callback_runs_once() {
        let scheduler = HostScheduler::new();
        let handle = scheduler.handle();
        let count = Rc::new(Cell::new(0));

        let counter = Rc::clone(&count);
        handle.request_frame(Box::new(move |_| counter.set(counter.get() + 1)));

        assert!(!scheduler.tick());
        scheduler.tick();
        assert_eq!(count.get(), 1);
        assert_eq!(scheduler.frame_count(), 2);
    }

    #[test]
    fn test_rerequest_waits_for_next_frame() {
        fn request(handle: SchedulerHandle, count: Rc<Cell<u32>>) {
            let next = handle.clone();
            handle.request_frame(Box::new(move |_| {
                count.set(count.get() + 1);
                if count.get() < 5 {
                    request(next, count);
                }
            }));
        }

        let scheduler = HostScheduler::new();
        let count = Rc::new(Cell::new(0));
        request(scheduler.handle(), Rc::clone(&count));

        scheduler.tick();
        assert_eq!(count.get(), 1);

        let frames = scheduler.run_until_idle(100);
        assert_eq!(frames, 4);
        assert_eq!(count.get(), 5);
    }

    #[test]
    fn test_cancel_frame() {
        let scheduler = HostScheduler::new();
        let handle = scheduler.handle();
        let ran = Rc::new(Cell::new(false));

        let flag = Rc::clone(&ran);
        let id = handle.request_frame(Box::new(move |_| flag.set(true)));
        handle.cancel_frame(id);

        scheduler.tick();
        assert!(!ran.get());
    }

    #[test]
    fn test_frame_timestamp_advances() {
        let scheduler = HostScheduler::with_frame_interval(ms(10));
        let stamp = Rc::new(Cell::new(Duration::ZERO));

        let seen = Rc::clone(&stamp);
        scheduler
            .handle()
            .request_frame(Box::new(move |now| seen.set(now)));
        scheduler.tick();

        assert_eq!(stamp.get(), ms(10));
    }

    #[test]
    fn test_run_for() {
        let scheduler = HostScheduler::with_frame_interval(ms(10));
        scheduler.run_for(ms(95));
        assert_eq!(scheduler.frame_count(), 10);
        assert_eq!(scheduler.now(), ms(100));
    }

    #[test]
    fn test_handle_weak_reference() {
        let handle = {
            let scheduler = HostScheduler::new();
            scheduler.handle()
        };

        // Scheduler is dropped, handle should not be alive
        assert!(!handle.is_alive());

        // Operations should safely no-op
        let id = handle.set_timeout(ms(1), Box::new(|| {}));
        assert_eq!(id, TimerId::default());
        handle.clear_timeout(id);
        assert_eq!(handle.now(), Duration::ZERO);
    }
}
