//! Spark markers
//!
//! A lighter variant of the effect with no physics: every spark is a marker
//! with fixed parameters (angle, travel distance, size, delay, color) and a
//! shared [`MotionRule`] decides where it is at any moment. Groups of markers
//! live on one shared overlay surface, which exists only while at least one
//! group does.

use crate::burst::sample;
use crate::config::DEFAULT_PALETTE;
use crate::error::Result;
use crate::origin::{resolve_origin, Target};
use fanfare_animation::Easing;
use fanfare_core::{Color, DrawContext, Point, Vec2};
use fanfare_paint::PaintContext;
use fanfare_platform::{FrameRequestId, Host, Surface, SurfaceConfig, TimerId};
use slotmap::{new_key_type, SlotMap};
use std::cell::RefCell;
use std::ops::Range;
use std::rc::{Rc, Weak};
use std::time::Duration;

new_key_type! {
    /// Identifier of a group of sparks on a [`SparkOverlay`]
    pub struct GroupId;
}

// ─────────────────────────────────────────────────────────────────────────────
// Markers and Motion
// ─────────────────────────────────────────────────────────────────────────────

/// One spark's fixed parameters
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SparkMarker {
    /// Direction of travel, clockwise from +x
    pub angle_deg: f32,
    /// How far the spark travels from the group centre
    pub distance: f32,
    /// Diameter in pixels
    pub size: f32,
    /// Time before the spark starts moving
    pub delay: Duration,
    pub color: Color,
}

/// Where a marker is drawn at one moment, relative to its group centre
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MarkerFrame {
    pub offset: Vec2,
    pub opacity: f32,
    pub scale: f32,
}

/// Shared animation applied to every marker: eased travel outwards while
/// fading and shrinking
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotionRule {
    pub duration: Duration,
    pub easing: Easing,
    /// Scale at the end of the motion
    pub end_scale: f32,
}

impl Default for MotionRule {
    fn default() -> Self {
        Self {
            duration: Duration::from_millis(1000),
            easing: Easing::CSS_EASE_OUT,
            end_scale: 0.4,
        }
    }
}

impl MotionRule {
    /// Where `marker` is `elapsed` after its group was shown
    ///
    /// `None` while the marker waits out its delay and after its motion ends.
    pub fn sample(&self, marker: &SparkMarker, elapsed: Duration) -> Option<MarkerFrame> {
        let local = elapsed.checked_sub(marker.delay)?;
        if local > self.duration {
            return None;
        }

        let t = if self.duration.is_zero() {
            1.0
        } else {
            local.as_secs_f32() / self.duration.as_secs_f32()
        };
        let travel = self.easing.apply(t);

        Some(MarkerFrame {
            offset: Vec2::from_polar(marker.angle_deg.to_radians(), marker.distance * travel),
            opacity: 1.0 - t,
            scale: 1.0 + (self.end_scale - 1.0) * t,
        })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Shape of every group shown on a [`SparkOverlay`]
#[derive(Clone, Debug, PartialEq)]
pub struct SparkOverlayConfig {
    /// Sparks per group, spread evenly around the circle
    pub count: u32,
    /// Random deviation from the even spread, in degrees either way
    pub angle_jitter_deg: f32,
    pub distance: Range<f32>,
    pub size: Range<f32>,
    pub max_delay: Duration,
    /// Extra time a group stays after its motion before it is removed
    pub grace: Duration,
    pub palette: Vec<Color>,
    pub motion: MotionRule,
}

impl Default for SparkOverlayConfig {
    fn default() -> Self {
        Self {
            count: 28,
            angle_jitter_deg: 6.0,
            distance: 90.0..150.0,
            size: 4.0..7.0,
            max_delay: Duration::from_millis(100),
            grace: Duration::from_millis(200),
            palette: DEFAULT_PALETTE.iter().map(|&hex| Color::from_hex(hex)).collect(),
            motion: MotionRule::default(),
        }
    }
}

impl SparkOverlayConfig {
    /// How long a group stays on the overlay
    pub fn group_lifetime(&self) -> Duration {
        self.motion.duration + self.grace
    }
}

/// Randomize the markers of one group
pub fn generate_markers(config: &SparkOverlayConfig, rng: &mut fastrand::Rng) -> Vec<SparkMarker> {
    let step = 360.0 / config.count.max(1) as f32;
    let jitter = config.angle_jitter_deg;
    let max_delay = config.max_delay.as_secs_f32();

    (0..config.count)
        .map(|i| SparkMarker {
            angle_deg: step * i as f32 + sample(rng, &(-jitter..jitter)),
            distance: sample(rng, &config.distance),
            size: sample(rng, &config.size),
            delay: Duration::from_secs_f32(sample(rng, &(0.0..max_delay))),
            color: if config.palette.is_empty() {
                Color::WHITE
            } else {
                config.palette[rng.usize(..config.palette.len())]
            },
        })
        .collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Overlay
// ─────────────────────────────────────────────────────────────────────────────

struct SparkGroup {
    center: Point,
    markers: Vec<SparkMarker>,
    shown_at: Duration,
    cleanup: Option<TimerId>,
}

struct OverlayState {
    surface: Option<Box<dyn Surface>>,
    groups: SlotMap<GroupId, SparkGroup>,
    frame_request: Option<FrameRequestId>,
    rng: fastrand::Rng,
}

struct OverlayShared {
    host: Host,
    config: SparkOverlayConfig,
    state: RefCell<OverlayState>,
}

/// Shared overlay of spark groups
///
/// Each [`show`](SparkOverlay::show) adds a group that removes itself once
/// its sparks have finished. The overlay surface is created with the first
/// group and removed with the last.
pub struct SparkOverlay {
    shared: Rc<OverlayShared>,
}

impl SparkOverlay {
    pub fn new(host: Host) -> Self {
        Self::with_config(host, SparkOverlayConfig::default())
    }

    pub fn with_config(host: Host, config: SparkOverlayConfig) -> Self {
        Self::build(host, config, fastrand::Rng::new())
    }

    /// Overlay with a seeded random source
    pub fn with_seed(host: Host, config: SparkOverlayConfig, seed: u64) -> Self {
        Self::build(host, config, fastrand::Rng::with_seed(seed))
    }

    fn build(host: Host, config: SparkOverlayConfig, rng: fastrand::Rng) -> Self {
        Self {
            shared: Rc::new(OverlayShared {
                host,
                config,
                state: RefCell::new(OverlayState {
                    surface: None,
                    groups: SlotMap::with_key(),
                    frame_request: None,
                    rng,
                }),
            }),
        }
    }

    pub fn config(&self) -> &SparkOverlayConfig {
        &self.shared.config
    }

    /// Show a group of sparks at `target`
    pub fn show(&self, target: Option<Target>) -> Result<GroupId> {
        let shared = &self.shared;
        let viewport = shared.host.surfaces.viewport();
        let center = resolve_origin(target, shared.host.locator.as_deref(), viewport);

        let needs_surface = shared.state.borrow().surface.is_none();
        if needs_surface {
            let surface = shared
                .host
                .surfaces
                .create_surface(SurfaceConfig::try_overlay(viewport)?)?;
            shared.state.borrow_mut().surface = Some(surface);
            tracing::debug!("Spark overlay attached");
        }

        let shown_at = shared.host.timers.now();
        let id = {
            let mut state = shared.state.borrow_mut();
            let markers = generate_markers(&shared.config, &mut state.rng);
            state.groups.insert(SparkGroup {
                center,
                markers,
                shown_at,
                cleanup: None,
            })
        };

        let weak = Rc::downgrade(shared);
        let cleanup = shared.host.timers.set_timeout(
            shared.config.group_lifetime(),
            Box::new(move || {
                if let Some(shared) = weak.upgrade() {
                    remove_group(&shared, id);
                }
            }),
        );
        if let Some(group) = shared.state.borrow_mut().groups.get_mut(id) {
            group.cleanup = Some(cleanup);
        }

        ensure_frame(shared);
        Ok(id)
    }

    /// Fire and forget
    pub fn trigger(&self, target: Option<Target>) {
        if let Err(e) = self.show(target) {
            tracing::warn!("Sparks skipped: {}", e);
        }
    }

    pub fn group_count(&self) -> usize {
        self.shared.state.borrow().groups.len()
    }

    /// Whether the overlay surface currently exists
    pub fn is_attached(&self) -> bool {
        self.shared
            .state
            .borrow()
            .surface
            .as_ref()
            .map_or(false, |s| s.is_attached())
    }
}

impl Drop for SparkOverlay {
    fn drop(&mut self) {
        let (frame_request, timers, surface) = {
            let mut state = self.shared.state.borrow_mut();
            let timers: Vec<TimerId> = state
                .groups
                .drain()
                .filter_map(|(_, group)| group.cleanup)
                .collect();
            (state.frame_request.take(), timers, state.surface.take())
        };

        if let Some(id) = frame_request {
            self.shared.host.frames.cancel_frame(id);
        }
        for id in timers {
            self.shared.host.timers.clear_timeout(id);
        }
        if let Some(mut surface) = surface {
            surface.remove();
        }
    }
}

fn ensure_frame(shared: &Rc<OverlayShared>) {
    if shared.state.borrow().frame_request.is_some() {
        return;
    }

    let weak: Weak<OverlayShared> = Rc::downgrade(shared);
    let id = shared.host.frames.request_frame(Box::new(move |timestamp| {
        if let Some(shared) = weak.upgrade() {
            on_frame(&shared, timestamp);
        }
    }));
    shared.state.borrow_mut().frame_request = Some(id);
}

fn on_frame(shared: &Rc<OverlayShared>, timestamp: Duration) {
    let keep_going = {
        let mut state = shared.state.borrow_mut();
        state.frame_request = None;

        let OverlayState {
            surface, groups, ..
        } = &mut *state;
        let Some(surface) = surface.as_mut() else {
            return;
        };

        let mut ctx = PaintContext::from_size(surface.size());
        ctx.clear();
        let motion = &shared.config.motion;
        for group in groups.values() {
            let elapsed = timestamp.saturating_sub(group.shown_at);
            for marker in &group.markers {
                if let Some(frame) = motion.sample(marker, elapsed) {
                    let color = marker.color.with_alpha(marker.color.a * frame.opacity);
                    ctx.fill_circle(
                        group.center.offset(frame.offset),
                        marker.size / 2.0 * frame.scale,
                        color.into(),
                    );
                }
            }
        }
        surface.present(ctx.take_commands());

        !groups.is_empty()
    };

    if keep_going {
        ensure_frame(shared);
    }
}

fn remove_group(shared: &Rc<OverlayShared>, id: GroupId) {
    let (frame_request, surface) = {
        let mut state = shared.state.borrow_mut();
        if state.groups.remove(id).is_none() {
            return;
        }
        tracing::trace!("Spark group {:?} removed, {} left", id, state.groups.len());
        if !state.groups.is_empty() {
            return;
        }
        (state.frame_request.take(), state.surface.take())
    };

    if let Some(request) = frame_request {
        shared.host.frames.cancel_frame(request);
    }
    if let Some(mut surface) = surface {
        surface.remove();
        tracing::debug!("Spark overlay removed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marker(delay_ms: u64) -> SparkMarker {
        SparkMarker {
            angle_deg: 90.0,
            distance: 100.0,
            size: 6.0,
            delay: Duration::from_millis(delay_ms),
            color: Color::WHITE,
        }
    }

    #[test]
    fn test_generate_markers() {
        let config = SparkOverlayConfig::default();
        let mut rng = fastrand::Rng::with_seed(5);
        let markers = generate_markers(&config, &mut rng);

        assert_eq!(markers.len(), 28);
        let step = 360.0 / 28.0;
        for (i, m) in markers.iter().enumerate() {
            assert!((m.angle_deg - step * i as f32).abs() <= 6.0);
            assert!((90.0..150.0).contains(&m.distance));
            assert!((4.0..7.0).contains(&m.size));
            assert!(m.delay <= Duration::from_millis(100));
            assert!(config.palette.contains(&m.color));
        }
    }

    #[test]
    fn test_motion_waits_for_delay() {
        let rule = MotionRule::default();
        let m = marker(50);
        assert_eq!(rule.sample(&m, Duration::from_millis(20)), None);
        assert!(rule.sample(&m, Duration::from_millis(50)).is_some());
        assert_eq!(rule.sample(&m, Duration::from_millis(1051)), None);
    }

    #[test]
    fn test_motion_travels_out_and_fades() {
        let rule = MotionRule::default();
        let m = marker(0);

        let start = rule.sample(&m, Duration::ZERO).unwrap();
        assert_eq!(start.opacity, 1.0);
        assert!(start.offset.length() < 1e-3);

        let end = rule.sample(&m, Duration::from_millis(1000)).unwrap();
        assert!(end.opacity.abs() < 1e-6);
        assert!((end.offset.length() - 100.0).abs() < 1e-2);
        // 90 degrees points down the screen
        assert!(end.offset.y > 99.0);
        assert!((end.scale - 0.4).abs() < 1e-6);

        // ease-out covers more than half the distance by the halfway point
        let half = rule.sample(&m, Duration::from_millis(500)).unwrap();
        assert!(half.offset.length() > 50.0);
    }

    #[test]
    fn test_group_lifetime() {
        assert_eq!(
            SparkOverlayConfig::default().group_lifetime(),
            Duration::from_millis(1200)
        );
    }
}
