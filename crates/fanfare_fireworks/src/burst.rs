//! Burst spawning

use crate::config::FireworksConfig;
use crate::particle::Particle;
use fanfare_core::{Color, Point, Vec2};
use std::f32::consts::TAU;
use std::ops::Range;

/// Per-particle randomization of a burst
#[derive(Clone, Debug, PartialEq)]
pub struct BurstParams {
    pub speed: Range<f32>,
    pub size: Range<f32>,
    pub lifespan: Range<f32>,
    /// Maximum spawn delay in frames
    pub delay_jitter_frames: u32,
}

impl BurstParams {
    pub fn from_config(config: &FireworksConfig) -> Self {
        Self {
            speed: config.speed.clone(),
            size: config.size.clone(),
            lifespan: config.lifespan.clone(),
            delay_jitter_frames: config.delay_jitter_frames,
        }
    }

    /// Same parameters with a different speed range
    pub fn with_speed(mut self, speed: Range<f32>) -> Self {
        self.speed = speed;
        self
    }
}

/// One spawn event: `count` particles flung out from `origin`
#[derive(Clone, Debug, PartialEq)]
pub struct Burst {
    pub origin: Point,
    pub count: u32,
    pub params: BurstParams,
}

impl Burst {
    pub fn new(origin: Point, count: u32, params: BurstParams) -> Self {
        Self {
            origin,
            count,
            params,
        }
    }

    /// Produce the burst's particles
    ///
    /// Directions are uniform over the full circle. Particles whose initial
    /// state is not finite are dropped.
    pub fn spawn(&self, rng: &mut fastrand::Rng, palette: &[Color]) -> Vec<Particle> {
        let mut particles = Vec::with_capacity(self.count as usize);
        let mut dropped = 0usize;

        for _ in 0..self.count {
            let angle = rng.f32() * TAU;
            let speed = sample(rng, &self.params.speed);
            let velocity = Vec2::from_polar(angle, speed);
            let lifespan = sample(rng, &self.params.lifespan);
            let size = sample(rng, &self.params.size);
            let color = if palette.is_empty() {
                Color::WHITE
            } else {
                palette[rng.usize(..palette.len())]
            };
            let delay = if self.params.delay_jitter_frames > 0 {
                rng.u32(0..=self.params.delay_jitter_frames)
            } else {
                0
            };

            if !(self.origin.is_finite()
                && velocity.is_finite()
                && lifespan.is_finite()
                && size.is_finite())
            {
                dropped += 1;
                continue;
            }

            particles.push(
                Particle::new(self.origin, velocity, lifespan, color, size).with_delay(delay),
            );
        }

        if dropped > 0 {
            tracing::trace!("Burst at {:?} dropped {} non-finite particles", self.origin, dropped);
        }

        particles
    }
}

/// Uniform sample from `range`; an empty range yields its start
pub(crate) fn sample(rng: &mut fastrand::Rng, range: &Range<f32>) -> f32 {
    if range.end <= range.start {
        return range.start;
    }
    range.start + rng.f32() * (range.end - range.start)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> BurstParams {
        BurstParams {
            speed: 1.0..4.0,
            size: 1.0..2.0,
            lifespan: 40.0..100.0,
            delay_jitter_frames: 0,
        }
    }

    #[test]
    fn test_spawn_count_and_ranges() {
        let mut rng = fastrand::Rng::with_seed(7);
        let palette = [Color::WHITE, Color::BLACK];
        let burst = Burst::new(Point::new(10.0, 20.0), 80, params());

        let particles = burst.spawn(&mut rng, &palette);
        assert_eq!(particles.len(), 80);

        for p in &particles {
            assert_eq!(p.position, Point::new(10.0, 20.0));
            assert_eq!(p.age, 0);
            assert!((40.0..100.0).contains(&p.lifespan));
            assert!((1.0..2.0).contains(&p.size));
            let speed = p.velocity.length();
            assert!(speed >= 0.99 && speed <= 4.01, "speed {speed}");
            assert!(palette.contains(&p.color));
        }
    }

    #[test]
    fn test_directions_cover_the_circle() {
        let mut rng = fastrand::Rng::with_seed(3);
        let particles = Burst::new(Point::ZERO, 200, params()).spawn(&mut rng, &[Color::WHITE]);

        let left = particles.iter().filter(|p| p.velocity.x < 0.0).count();
        let up = particles.iter().filter(|p| p.velocity.y < 0.0).count();
        assert!(left > 50 && left < 150);
        assert!(up > 50 && up < 150);
    }

    #[test]
    fn test_non_finite_origin_drops_particles() {
        let mut rng = fastrand::Rng::with_seed(1);
        let burst = Burst::new(Point::new(f32::NAN, 0.0), 10, params());
        assert!(burst.spawn(&mut rng, &[Color::WHITE]).is_empty());
    }

    #[test]
    fn test_empty_palette_falls_back_to_white() {
        let mut rng = fastrand::Rng::with_seed(1);
        let particles = Burst::new(Point::ZERO, 5, params()).spawn(&mut rng, &[]);
        assert!(particles.iter().all(|p| p.color == Color::WHITE));
    }

    #[test]
    fn test_delay_jitter_bounds() {
        let mut rng = fastrand::Rng::with_seed(9);
        let mut params = params();
        params.delay_jitter_frames = 4;
        let particles = Burst::new(Point::ZERO, 100, params).spawn(&mut rng, &[Color::WHITE]);
        assert!(particles.iter().all(|p| p.delay <= 4));
        assert!(particles.iter().any(|p| p.delay > 0));
    }

    #[test]
    fn test_sample_degenerate_range() {
        let mut rng = fastrand::Rng::with_seed(1);
        assert_eq!(sample(&mut rng, &(20.0..20.0)), 20.0);
    }
}
