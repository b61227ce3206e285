//! Animation sessions
//!
//! A session is one run of the effect: it owns a surface and a particle set,
//! plays a [`Show`], animates until the particles are gone and tears itself
//! down at the show's deadline (or earlier, under a drain policy).
//!
//! Ownership follows the host's callbacks. The pending frame callback and the
//! teardown timer hold the session strongly; cue and linger timers hold it
//! weakly and do nothing once it is gone or terminated. Callers only ever get
//! a weak [`SessionHandle`].

use crate::burst::{Burst, BurstParams};
use crate::config::FireworksConfig;
use crate::error::{FireworksError, Result};
use crate::observer::{FrameObserver, FrameStats};
use crate::origin;
use crate::particle::{Particle, ParticleSet, Physics};
use crate::render::{paint_frame, FlashState};
use crate::show::{Show, ShowEvent};
use fanfare_core::{Point, Size};
use fanfare_paint::PaintContext;
use fanfare_platform::{FrameRequestId, FrameScheduler, Host, Surface, TimerId, TimerService};
use smallvec::SmallVec;
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

static NEXT_SESSION_ID: AtomicU64 = AtomicU64::new(1);

/// Unique identifier of a session
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(pub u64);

impl SessionId {
    fn next() -> Self {
        SessionId(NEXT_SESSION_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "session-{}", self.0)
    }
}

/// Session lifecycle
///
/// `Idle -> Spawning -> Animating -> Terminated`. Particles animate while
/// cues are still pending; the session reports `Spawning` until the last cue
/// has fired. `Terminated` is final.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    Idle,
    Spawning,
    Animating,
    Terminated,
}

struct SessionInner {
    state: SessionState,
    config: Rc<FireworksConfig>,
    physics: Physics,
    params: BurstParams,
    origin: Point,
    viewport: Size,
    particles: ParticleSet,
    frame: u64,
    frame_request: Option<FrameRequestId>,
    cue_timers: SmallVec<[TimerId; 8]>,
    pending_cues: usize,
    teardown_timer: Option<TimerId>,
    linger_timer: Option<TimerId>,
    flash: Option<FlashState>,
    surface: Box<dyn Surface>,
    rng: fastrand::Rng,
}

impl SessionInner {
    fn refresh_state(&mut self) {
        if self.state != SessionState::Terminated {
            self.state = if self.pending_cues > 0 {
                SessionState::Spawning
            } else {
                SessionState::Animating
            };
        }
    }
}

pub(crate) struct Session {
    id: SessionId,
    inner: RefCell<SessionInner>,
    frames: Rc<dyn FrameScheduler>,
    timers: Rc<dyn TimerService>,
    observer: Option<Rc<dyn FrameObserver>>,
}

/// Everything a session is started from
pub(crate) struct SessionSetup {
    pub config: Rc<FireworksConfig>,
    pub observer: Option<Rc<dyn FrameObserver>>,
    pub origin: Point,
    pub viewport: Size,
    pub surface: Box<dyn Surface>,
    pub rng: fastrand::Rng,
}

impl Session {
    /// Start playing `show`
    ///
    /// Cues at time zero fire before this returns.
    pub(crate) fn start(host: &Host, setup: SessionSetup, show: Show) -> SessionHandle {
        let SessionSetup {
            config,
            observer,
            origin,
            viewport,
            surface,
            rng,
        } = setup;

        let session = Rc::new(Session {
            id: SessionId::next(),
            inner: RefCell::new(SessionInner {
                state: SessionState::Idle,
                physics: Physics {
                    gravity: config.gravity,
                    damping: config.damping,
                },
                params: BurstParams::from_config(&config),
                config,
                origin,
                viewport,
                particles: ParticleSet::new(),
                frame: 0,
                frame_request: None,
                cue_timers: SmallVec::new(),
                pending_cues: 0,
                teardown_timer: None,
                linger_timer: None,
                flash: None,
                surface,
                rng,
            }),
            frames: Rc::clone(&host.frames),
            timers: Rc::clone(&host.timers),
            observer,
        });

        tracing::debug!(
            "Fireworks {} started at {:?}: {} cues, deadline {:?}",
            session.id,
            origin,
            show.cues().len(),
            show.duration()
        );

        let teardown = {
            let strong = Rc::clone(&session);
            session
                .timers
                .set_timeout(show.duration(), Box::new(move || strong.terminate()))
        };

        let mut immediate = Vec::new();
        let mut scheduled: SmallVec<[TimerId; 8]> = SmallVec::new();
        for cue in show.cues() {
            if cue.at.is_zero() {
                immediate.push(cue.event.clone());
                continue;
            }
            let weak = Rc::downgrade(&session);
            let event = cue.event.clone();
            let id = session.timers.set_timeout(
                cue.at,
                Box::new(move || {
                    if let Some(session) = weak.upgrade() {
                        session.fire_cue(event, true);
                    }
                }),
            );
            scheduled.push(id);
        }

        {
            let mut inner = session.inner.borrow_mut();
            inner.teardown_timer = Some(teardown);
            inner.pending_cues = scheduled.len();
            inner.cue_timers = scheduled;
            inner.refresh_state();
        }

        for event in immediate {
            session.fire_cue(event, false);
        }
        session.ensure_frame();

        SessionHandle {
            id: session.id,
            session: Rc::downgrade(&session),
        }
    }

    fn fire_cue(self: &Rc<Self>, event: ShowEvent, scheduled: bool) {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.state == SessionState::Terminated {
                return;
            }
            if scheduled {
                inner.pending_cues = inner.pending_cues.saturating_sub(1);
            }

            match event {
                ShowEvent::Burst {
                    offset,
                    count,
                    speed,
                    jitter,
                } => {
                    let mut at = inner.origin.offset(offset);
                    if jitter {
                        let amount = inner.config.jitter;
                        at = origin::jitter(at, amount, &mut inner.rng);
                    }
                    let mut params = inner.params.clone();
                    if let Some(speed) = speed {
                        params = params.with_speed(speed);
                    }
                    let burst = Burst::new(at, count, params);
                    spawn_into(&mut inner, &burst);
                }
                ShowEvent::Flash(flash) => inner.flash = Some(FlashState::new(flash)),
            }

            inner.refresh_state();
        }

        self.cancel_linger();
        self.ensure_frame();
    }

    /// Request a frame unless one is already pending
    fn ensure_frame(self: &Rc<Self>) {
        {
            let inner = self.inner.borrow();
            if inner.state == SessionState::Terminated || inner.frame_request.is_some() {
                return;
            }
        }

        let session = Rc::clone(self);
        let id = self
            .frames
            .request_frame(Box::new(move |timestamp| session.on_frame(timestamp)));
        self.inner.borrow_mut().frame_request = Some(id);
    }

    fn on_frame(self: &Rc<Self>, timestamp: Duration) {
        let (stats, keep_going, linger) = {
            let mut inner = self.inner.borrow_mut();
            inner.frame_request = None;
            if inner.state == SessionState::Terminated {
                return;
            }

            let physics = inner.physics;
            inner.particles.step(&physics);
            let expired = inner.particles.remove_expired();
            inner.frame += 1;

            let mut ctx = PaintContext::from_size(inner.viewport);
            paint_frame(&mut ctx, &inner.particles, &inner.config, inner.flash.as_ref());
            inner.surface.present(ctx.take_commands());

            let spent = inner.flash.as_mut().map_or(false, |flash| !flash.advance());
            if spent {
                inner.flash = None;
            }

            let drain = inner.config.drain;
            let warming_up = drain.map_or(false, |d| inner.frame < d.min_frames);
            let keep_going = !inner.particles.is_empty()
                || inner.pending_cues > 0
                || inner.flash.is_some()
                || warming_up;
            let linger = match drain {
                Some(policy) if !keep_going && inner.linger_timer.is_none() => {
                    Some(policy.linger())
                }
                _ => None,
            };

            let stats = FrameStats {
                session: self.id,
                frame: inner.frame,
                active_particles: inner.particles.len(),
                expired,
                pending_cues: inner.pending_cues,
                timestamp,
            };
            (stats, keep_going, linger)
        };

        if keep_going {
            self.ensure_frame();
        }
        if let Some(delay) = linger {
            self.schedule_linger(delay);
        }
        if let Some(observer) = &self.observer {
            observer.on_frame(&stats);
        }
    }

    fn schedule_linger(self: &Rc<Self>, delay: Duration) {
        let weak = Rc::downgrade(self);
        let id = self.timers.set_timeout(
            delay,
            Box::new(move || {
                if let Some(session) = weak.upgrade() {
                    tracing::debug!("Fireworks {} drained", session.id);
                    session.terminate();
                }
            }),
        );
        self.inner.borrow_mut().linger_timer = Some(id);
    }

    fn cancel_linger(&self) {
        let linger = self.inner.borrow_mut().linger_timer.take();
        if let Some(id) = linger {
            self.timers.clear_timeout(id);
        }
    }

    /// Tear the session down
    ///
    /// Removes the surface, cancels the pending frame and every timer. Later
    /// calls do nothing.
    fn terminate(&self) {
        let (frame_request, timers, frames) = {
            let mut inner = self.inner.borrow_mut();
            if inner.state == SessionState::Terminated {
                return;
            }
            inner.state = SessionState::Terminated;
            inner.particles.clear();
            inner.flash = None;
            inner.surface.remove();

            let mut timers: SmallVec<[TimerId; 8]> = inner.cue_timers.drain(..).collect();
            timers.extend(inner.teardown_timer.take());
            timers.extend(inner.linger_timer.take());
            (inner.frame_request.take(), timers, inner.frame)
        };

        if let Some(id) = frame_request {
            self.frames.cancel_frame(id);
        }
        for id in timers {
            self.timers.clear_timeout(id);
        }

        tracing::debug!("Fireworks {} terminated after {} frames", self.id, frames);
        if let Some(observer) = &self.observer {
            observer.on_terminated(self.id, frames);
        }
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        let inner = self.inner.get_mut();
        if inner.surface.is_attached() {
            inner.surface.remove();
        }
    }
}

fn spawn_into(inner: &mut SessionInner, burst: &Burst) -> usize {
    let SessionInner {
        config,
        particles,
        rng,
        ..
    } = inner;
    let spawned = burst.spawn(rng, &config.palette);
    let count = spawned.len();
    particles.extend(spawned);
    count
}

/// Weak handle to a running session
///
/// Every query answers as if the session were terminated once it is gone.
#[derive(Clone)]
pub struct SessionHandle {
    id: SessionId,
    session: Weak<Session>,
}

impl SessionHandle {
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Whether the session exists and has not terminated
    pub fn is_alive(&self) -> bool {
        self.state() != SessionState::Terminated
    }

    pub fn state(&self) -> SessionState {
        self.with_inner(|inner| inner.state)
            .unwrap_or(SessionState::Terminated)
    }

    /// Frames run so far
    pub fn frame(&self) -> u64 {
        self.with_inner(|inner| inner.frame).unwrap_or(0)
    }

    pub fn particle_count(&self) -> usize {
        self.with_inner(|inner| inner.particles.len()).unwrap_or(0)
    }

    /// Cues that have not fired yet
    pub fn pending_cues(&self) -> usize {
        self.with_inner(|inner| inner.pending_cues).unwrap_or(0)
    }

    /// Resolved show origin
    pub fn origin(&self) -> Option<Point> {
        self.with_inner(|inner| inner.origin)
    }

    /// Copy of the active particles
    pub fn particles(&self) -> Vec<Particle> {
        self.with_inner(|inner| inner.particles.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Tear the session down now
    pub fn terminate(&self) {
        if let Some(session) = self.session.upgrade() {
            session.terminate();
        }
    }

    /// Fire an extra burst into the session, returning the number of
    /// particles spawned
    pub fn spawn(&self, burst: &Burst) -> Result<usize> {
        let session = self.session.upgrade().ok_or(FireworksError::Terminated)?;
        let spawned = {
            let mut inner = session.inner.borrow_mut();
            if inner.state == SessionState::Terminated {
                return Err(FireworksError::Terminated);
            }
            spawn_into(&mut inner, burst)
        };

        session.cancel_linger();
        session.ensure_frame();
        Ok(spawned)
    }

    fn with_inner<T>(&self, f: impl FnOnce(&SessionInner) -> T) -> Option<T> {
        let session = self.session.upgrade()?;
        let inner = session.inner.borrow();
        Some(f(&inner))
    }
}

impl fmt::Debug for SessionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionHandle")
            .field("id", &self.id)
            .field("state", &self.state())
            .finish()
    }
}
