//! Shows: timed sequences of bursts and flashes
//!
//! A session plays exactly one [`Show`]. The standard show is the configured
//! number of bursts at a fixed interval; the finale layers a ring, a cluster, a
//! salvo with a flash, and a closing burst.

use crate::config::FireworksConfig;
use fanfare_core::{Color, Vec2};
use std::f32::consts::{FRAC_PI_2, TAU};
use std::ops::Range;
use std::time::Duration;

/// How long the finale keeps running after its last cue
pub const FINALE_TAIL: Duration = Duration::from_millis(1500);

/// A full-surface flash fading out over a number of frames
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Flash {
    pub color: Color,
    /// Alpha on the first frame
    pub alpha: f32,
    pub frames: u32,
}

/// Something that happens at a point in a show
#[derive(Clone, Debug, PartialEq)]
pub enum ShowEvent {
    Burst {
        /// Offset from the show origin
        offset: Vec2,
        count: u32,
        /// Overrides the configured speed range
        speed: Option<Range<f32>>,
        /// Whether the configured random jitter is added on top of `offset`
        jitter: bool,
    },
    Flash(Flash),
}

/// A [`ShowEvent`] and when it happens, relative to the start of the show
#[derive(Clone, Debug, PartialEq)]
pub struct Cue {
    pub at: Duration,
    pub event: ShowEvent,
}

/// An ordered list of cues plus the hard deadline of the session playing it
#[derive(Clone, Debug, PartialEq)]
pub struct Show {
    cues: Vec<Cue>,
    duration: Duration,
}

impl Show {
    /// An empty show that ends after `duration`
    pub fn new(duration: Duration) -> Self {
        Self {
            cues: Vec::new(),
            duration,
        }
    }

    /// Add a cue, keeping cues ordered by time
    pub fn cue(mut self, at: Duration, event: ShowEvent) -> Self {
        let index = self.cues.partition_point(|c| c.at <= at);
        self.cues.insert(index, Cue { at, event });
        self
    }

    /// A jittered burst of `count` particles from the origin
    pub fn burst(self, at: Duration, count: u32) -> Self {
        self.cue(
            at,
            ShowEvent::Burst {
                offset: Vec2::ZERO,
                count,
                speed: None,
                jitter: true,
            },
        )
    }

    pub fn flash(self, at: Duration, flash: Flash) -> Self {
        self.cue(at, ShowEvent::Flash(flash))
    }

    /// `burst_count` jittered bursts, `burst_interval` apart
    pub fn standard(config: &FireworksConfig) -> Self {
        let interval = config.burst_interval();
        (0..config.burst_count).fold(Self::new(config.duration()), |show, i| {
            show.burst(interval * i, config.particles_per_burst)
        })
    }

    /// The finale
    pub fn finale(config: &FireworksConfig) -> Self {
        let count = config.particles_per_burst;
        let fast = config.speed.start..config.speed.end * 1.3;
        let mut show = Self::new(config.duration());

        // Ring of eight, clockwise from the top
        for i in 0..8u32 {
            let angle = i as f32 * TAU / 8.0 - FRAC_PI_2;
            show = show.cue(
                Duration::from_millis(90) * i,
                ShowEvent::Burst {
                    offset: Vec2::from_polar(angle, 160.0),
                    count,
                    speed: None,
                    jitter: false,
                },
            );
        }

        for i in 0..4u32 {
            show = show.burst(Duration::from_millis(800 + 120 * u64::from(i)), 120);
        }

        let salvo = Duration::from_millis(1500);
        for offset in [Vec2::new(-120.0, 0.0), Vec2::new(0.0, -40.0), Vec2::new(120.0, 0.0)] {
            show = show.cue(
                salvo,
                ShowEvent::Burst {
                    offset,
                    count: 220,
                    speed: Some(fast.clone()),
                    jitter: false,
                },
            );
        }
        show = show.flash(
            salvo,
            Flash {
                color: Color::WHITE,
                alpha: 0.35,
                frames: 12,
            },
        );

        show = show.cue(
            Duration::from_millis(2100),
            ShowEvent::Burst {
                offset: Vec2::ZERO,
                count: count * 2,
                speed: Some(fast),
                jitter: false,
            },
        );

        let tail = show.last_cue() + FINALE_TAIL;
        show.duration = show.duration.max(tail);
        show
    }

    pub fn cues(&self) -> &[Cue] {
        &self.cues
    }

    /// Time of the last cue, zero for an empty show
    pub fn last_cue(&self) -> Duration {
        self.cues.last().map(|c| c.at).unwrap_or_default()
    }

    /// Hard deadline of a session playing this show
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Total particles the show's bursts spawn (before any are dropped)
    pub fn particle_total(&self) -> u64 {
        self.cues
            .iter()
            .map(|c| match c.event {
                ShowEvent::Burst { count, .. } => u64::from(count),
                ShowEvent::Flash(_) => 0,
            })
            .sum()
    }
}
