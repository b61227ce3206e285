//! Fireworks configuration
//!
//! One parameter set drives every variant of the effect. The default is the
//! celebration used by [`show_fireworks`](crate::show_fireworks);
//! [`FireworksConfig::diagnostic`] is a slow, sparse variant for checking a
//! host's surface and frame plumbing.

use crate::error::ConfigError;
use fanfare_core::{Color, Vec2};
use serde::{Deserialize, Serialize};
use std::ops::Range;
use std::time::Duration;

/// The reference palette
pub const DEFAULT_PALETTE: [u32; 11] = [
    0xff3b30, 0xff9500, 0xffcc00, 0x4cd964, 0x007aff, 0x5856d6, 0xa78bfa, 0xff2d55, 0x64d2ff,
    0x5e5ce6, 0xffffff,
];

/// Ending a session early once it has drained
///
/// Once no particles are left, no bursts are pending and at least
/// `min_frames` frames have run, teardown happens `linger_ms` later instead
/// of waiting for the hard timeout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrainPolicy {
    pub min_frames: u64,
    pub linger_ms: u64,
}

impl DrainPolicy {
    pub fn linger(&self) -> Duration {
        Duration::from_millis(self.linger_ms)
    }
}

/// Colored glow behind each particle plus a bright core on top
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GlowStyle {
    /// Glow radius relative to the particle radius
    pub scale: f32,
    /// Glow alpha relative to the particle alpha
    pub alpha: f32,
    /// Core radius relative to the particle radius
    pub core_scale: f32,
    pub core_color: Color,
}

impl GlowStyle {
    /// Every factor must be finite and non-negative
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("glow.scale", self.scale),
            ("glow.alpha", self.alpha),
            ("glow.core_scale", self.core_scale),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field, value });
            }
            if value < 0.0 {
                return Err(ConfigError::Negative { field, value });
            }
        }
        Ok(())
    }
}

impl Default for GlowStyle {
    fn default() -> Self {
        Self {
            scale: 3.0,
            alpha: 0.45,
            core_scale: 0.45,
            core_color: Color::WHITE,
        }
    }
}

/// Everything that shapes a fireworks session
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FireworksConfig {
    /// Bursts per show
    pub burst_count: u32,
    /// Delay between consecutive bursts
    pub burst_interval_ms: u64,
    /// Maximum random offset of each burst from the origin, per axis
    pub jitter: Vec2,
    pub particles_per_burst: u32,
    /// Launch speed in pixels per frame
    pub speed: Range<f32>,
    /// Particle radius in pixels
    pub size: Range<f32>,
    /// Particle lifespan in frames
    pub lifespan: Range<f32>,
    /// Maximum per-particle spawn delay in frames
    pub delay_jitter_frames: u32,
    /// Added to vertical velocity every frame
    pub gravity: f32,
    /// Velocity multiplier applied every frame
    pub damping: f32,
    /// Radius multiplier a particle spawns with
    pub entrance_scale: f32,
    /// Frames over which the entrance radius shrinks back to the particle size
    pub entrance_frames: u32,
    /// Frames a particle stays fully opaque before fading out
    pub opaque_frames: u32,
    /// Translucent fill painted over the surface every frame
    pub wash: Color,
    pub glow: Option<GlowStyle>,
    pub palette: Vec<Color>,
    /// Hard upper bound on a session's lifetime
    pub duration_ms: u64,
    pub drain: Option<DrainPolicy>,
}

impl Default for FireworksConfig {
    fn default() -> Self {
        Self {
            burst_count: 6,
            burst_interval_ms: 150,
            jitter: Vec2::new(80.0, 60.0),
            particles_per_burst: 80,
            speed: 1.2..12.0,
            size: 1.2..3.2,
            lifespan: 45.0..95.0,
            delay_jitter_frames: 3,
            gravity: 0.08,
            damping: 0.985,
            entrance_scale: 2.2,
            entrance_frames: 6,
            opaque_frames: 12,
            wash: Color::BLACK.with_alpha(0.18),
            glow: Some(GlowStyle::default()),
            palette: DEFAULT_PALETTE.iter().map(|&hex| Color::from_hex(hex)).collect(),
            duration_ms: 3500,
            drain: None,
        }
    }
}

impl FireworksConfig {
    pub fn new() -> Self {
        Self::default()
    }

    // ========== Presets ==========

    /// The reference celebration
    pub fn celebration() -> Self {
        Self::default()
    }

    /// A handful of large, slow, unfading particles from the exact origin.
    ///
    /// Runs at least 100 frames and tears down a second after the last
    /// particle is gone.
    pub fn diagnostic() -> Self {
        Self {
            burst_count: 1,
            burst_interval_ms: 0,
            jitter: Vec2::ZERO,
            particles_per_burst: 10,
            speed: 0.0..7.0,
            size: 20.0..20.0,
            lifespan: 100.0..100.0,
            delay_jitter_frames: 0,
            gravity: 0.0,
            damping: 1.0,
            entrance_scale: 1.0,
            entrance_frames: 0,
            opaque_frames: 100,
            wash: Color::BLACK.with_alpha(0.3),
            glow: None,
            palette: vec![Color::from_hex(0xff0000)],
            duration_ms: 10_000,
            drain: Some(DrainPolicy {
                min_frames: 100,
                linger_ms: 1000,
            }),
        }
    }

    // ========== Builders ==========

    pub fn with_bursts(mut self, count: u32, interval_ms: u64) -> Self {
        self.burst_count = count;
        self.burst_interval_ms = interval_ms;
        self
    }

    pub fn with_jitter(mut self, jitter: Vec2) -> Self {
        self.jitter = jitter;
        self
    }

    pub fn with_particles_per_burst(mut self, count: u32) -> Self {
        self.particles_per_burst = count;
        self
    }

    pub fn with_speed(mut self, speed: Range<f32>) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_size(mut self, size: Range<f32>) -> Self {
        self.size = size;
        self
    }

    pub fn with_lifespan(mut self, lifespan: Range<f32>) -> Self {
        self.lifespan = lifespan;
        self
    }

    pub fn with_delay_jitter(mut self, frames: u32) -> Self {
        self.delay_jitter_frames = frames;
        self
    }

    pub fn with_physics(mut self, gravity: f32, damping: f32) -> Self {
        self.gravity = gravity;
        self.damping = damping;
        self
    }

    pub fn with_glow(mut self, glow: Option<GlowStyle>) -> Self {
        self.glow = glow;
        self
    }

    pub fn with_palette(mut self, palette: Vec<Color>) -> Self {
        self.palette = palette;
        self
    }

    pub fn with_duration_ms(mut self, duration_ms: u64) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    pub fn with_drain(mut self, drain: Option<DrainPolicy>) -> Self {
        self.drain = drain;
        self
    }

    // ========== Accessors ==========

    pub fn burst_interval(&self) -> Duration {
        Duration::from_millis(self.burst_interval_ms)
    }

    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }

    /// Check that every parameter is usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.burst_count == 0 {
            return Err(ConfigError::Zero("burst_count"));
        }
        if self.particles_per_burst == 0 {
            return Err(ConfigError::Zero("particles_per_burst"));
        }
        if self.duration_ms == 0 {
            return Err(ConfigError::Zero("duration_ms"));
        }

        check_range("speed", &self.speed)?;
        check_range("size", &self.size)?;
        check_range("lifespan", &self.lifespan)?;

        for (field, value) in [
            ("jitter.x", self.jitter.x),
            ("jitter.y", self.jitter.y),
            ("gravity", self.gravity),
            ("entrance_scale", self.entrance_scale),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field, value });
            }
        }

        if self.size.start < 0.0 {
            return Err(ConfigError::Negative {
                field: "size",
                value: self.size.start,
            });
        }
        if self.entrance_scale < 0.0 {
            return Err(ConfigError::Negative {
                field: "entrance_scale",
                value: self.entrance_scale,
            });
        }
        if let Some(glow) = &self.glow {
            glow.validate()?;
        }

        if !(self.damping > 0.0 && self.damping <= 1.0) {
            return Err(ConfigError::Damping(self.damping));
        }
        if self.palette.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }

        Ok(())
    }
}

fn check_range(field: &'static str, range: &Range<f32>) -> Result<(), ConfigError> {
    if range.start.is_finite() && range.end.is_finite() && range.start <= range.end {
        Ok(())
    } else {
        Err(ConfigError::InvalidRange {
            field,
            start: range.start,
            end: range.end,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_valid() {
        assert_eq!(FireworksConfig::celebration().validate(), Ok(()));
        assert_eq!(FireworksConfig::diagnostic().validate(), Ok(()));
    }

    #[test]
    fn test_reference_values() {
        let config = FireworksConfig::default();
        assert_eq!(config.burst_count, 6);
        assert_eq!(config.burst_interval(), Duration::from_millis(150));
        assert_eq!(config.jitter, Vec2::new(80.0, 60.0));
        assert_eq!(config.particles_per_burst, 80);
        assert_eq!(config.palette.len(), 11);
        assert!(config.damping < 1.0);
    }

    #[test]
    fn test_rejects_inverted_range() {
        let config = FireworksConfig::default().with_lifespan(100.0..40.0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidRange {
                field: "lifespan",
                ..
            })
        ));
    }

    #[test]
    fn test_rejects_nan_speed() {
        let config = FireworksConfig::default().with_speed(f32::NAN..1.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_bad_damping() {
        let config = FireworksConfig::default().with_physics(0.1, 1.5);
        assert_eq!(config.validate(), Err(ConfigError::Damping(1.5)));

        let config = FireworksConfig::default().with_physics(0.1, 0.0);
        assert_eq!(config.validate(), Err(ConfigError::Damping(0.0)));
    }

    #[test]
    fn test_rejects_negative_radii() {
        let config = FireworksConfig::default().with_size(-5.0..-1.0);
        assert_eq!(
            config.validate(),
            Err(ConfigError::Negative {
                field: "size",
                value: -5.0
            })
        );

        let mut config = FireworksConfig::default();
        config.entrance_scale = -1.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Negative {
                field: "entrance_scale",
                ..
            })
        ));
    }

    #[test]
    fn test_rejects_bad_glow() {
        let nan_scale = FireworksConfig::default().with_glow(Some(GlowStyle {
            scale: f32::NAN,
            ..GlowStyle::default()
        }));
        assert!(matches!(
            nan_scale.validate(),
            Err(ConfigError::NonFinite {
                field: "glow.scale",
                ..
            })
        ));

        let negative_core = FireworksConfig::default().with_glow(Some(GlowStyle {
            core_scale: -0.5,
            ..GlowStyle::default()
        }));
        assert_eq!(
            negative_core.validate(),
            Err(ConfigError::Negative {
                field: "glow.core_scale",
                value: -0.5
            })
        );

        let infinite_alpha = FireworksConfig::default().with_glow(Some(GlowStyle {
            alpha: f32::INFINITY,
            ..GlowStyle::default()
        }));
        assert!(infinite_alpha.validate().is_err());

        // No glow, nothing to check
        assert_eq!(FireworksConfig::default().with_glow(None).validate(), Ok(()));
    }

    #[test]
    fn test_rejects_empty_palette() {
        let config = FireworksConfig::default().with_palette(Vec::new());
        assert_eq!(config.validate(), Err(ConfigError::EmptyPalette));
    }

    #[test]
    fn test_rejects_zero_counts() {
        let config = FireworksConfig::default().with_bursts(0, 150);
        assert_eq!(config.validate(), Err(ConfigError::Zero("burst_count")));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: FireworksConfig =
            serde_json::from_str(r#"{ "burst_count": 3, "gravity": 0.2 }"#).unwrap();

        assert_eq!(config.burst_count, 3);
        assert_eq!(config.gravity, 0.2);
        assert_eq!(config.particles_per_burst, 80);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_json_round_trip_keeps_drain_policy() {
        let config = FireworksConfig::diagnostic();
        let json = serde_json::to_string(&config).unwrap();
        let back: FireworksConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.drain, config.drain);
    }
}
