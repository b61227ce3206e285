//! Individual particle data and the active particle set

use fanfare_core::{Color, Point, Vec2};

/// Per-frame forces applied to every active particle
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Physics {
    /// Added to vertical velocity every frame (screen y grows downwards)
    pub gravity: f32,
    /// Velocity multiplier applied every frame
    pub damping: f32,
}

impl Default for Physics {
    fn default() -> Self {
        Self {
            gravity: 0.0,
            damping: 1.0,
        }
    }
}

/// A single particle instance
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    /// Current position in screen pixels
    pub position: Point,
    /// Pixels per frame
    pub velocity: Vec2,
    /// Active frames lived so far
    pub age: u32,
    /// Frames until expiry
    pub lifespan: f32,
    pub color: Color,
    /// Resting render radius
    pub size: f32,
    /// Frames left before the particle becomes active
    pub delay: u32,
}

impl Particle {
    /// Create an active particle
    pub fn new(position: Point, velocity: Vec2, lifespan: f32, color: Color, size: f32) -> Self {
        Self {
            position,
            velocity,
            age: 0,
            lifespan,
            color,
            size,
            delay: 0,
        }
    }

    /// Hold the particle back for `frames` frames
    pub fn with_delay(mut self, frames: u32) -> Self {
        self.delay = frames;
        self
    }

    /// Whether the particle is still waiting out its spawn delay
    pub fn is_delayed(&self) -> bool {
        self.delay > 0
    }

    /// Advance one frame
    ///
    /// A delayed particle only counts down its delay.
    pub fn step(&mut self, physics: &Physics) {
        if self.delay > 0 {
            self.delay -= 1;
            return;
        }

        self.position = self.position.offset(self.velocity);
        self.velocity.y += physics.gravity;
        self.velocity = self.velocity.scale(physics.damping);
        self.age = self.age.saturating_add(1);
    }

    /// Whether the particle has outlived its lifespan
    pub fn is_expired(&self) -> bool {
        self.age as f32 > self.lifespan
    }

    /// Opacity: fully opaque for `opaque_frames`, then a linear fade to zero at
    /// the end of life
    pub fn alpha(&self, opaque_frames: u32) -> f32 {
        let age = self.age as f32;
        let hold = opaque_frames as f32;
        if age <= hold {
            return 1.0;
        }

        let fade = self.lifespan - hold;
        if fade <= 0.0 {
            return if age <= self.lifespan { 1.0 } else { 0.0 };
        }
        ((self.lifespan - age) / fade).clamp(0.0, 1.0)
    }

    /// Render radius, starting at `size * entrance_scale` and shrinking
    /// linearly to `size` over `entrance_frames`
    pub fn radius(&self, entrance_scale: f32, entrance_frames: u32) -> f32 {
        if entrance_frames == 0 || self.age >= entrance_frames {
            return self.size;
        }
        let t = self.age as f32 / entrance_frames as f32;
        let start = self.size * entrance_scale;
        start + (self.size - start) * t
    }
}

/// The particles owned by one session
#[derive(Clone, Debug, Default)]
pub struct ParticleSet {
    particles: Vec<Particle>,
}

impl ParticleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extend(&mut self, particles: impl IntoIterator<Item = Particle>) {
        self.particles.extend(particles);
    }

    /// Advance every particle by one frame
    pub fn step(&mut self, physics: &Physics) {
        for particle in &mut self.particles {
            particle.step(physics);
        }
    }

    /// Drop every expired particle, returning how many were removed
    pub fn remove_expired(&mut self) -> usize {
        let before = self.particles.len();
        self.particles.retain(|p| !p.is_expired());
        before - self.particles.len()
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    /// Particles past their spawn delay
    pub fn visible(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter().filter(|p| !p.is_delayed())
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn particle(lifespan: f32) -> Particle {
        Particle::new(
            Point::new(100.0, 100.0),
            Vec2::new(2.0, -4.0),
            lifespan,
            Color::WHITE,
            2.0,
        )
    }

    #[test]
    fn test_step_order() {
        let mut p = particle(50.0);
        let physics = Physics {
            gravity: 0.5,
            damping: 0.5,
        };

        p.step(&physics);

        // Position moves by the velocity from before gravity and damping
        assert_eq!(p.position, Point::new(102.0, 96.0));
        assert_eq!(p.velocity, Vec2::new(1.0, -1.75));
        assert_eq!(p.age, 1);
    }

    #[test]
    fn test_delay_holds_particle() {
        let mut p = particle(50.0).with_delay(2);
        let physics = Physics::default();

        p.step(&physics);
        p.step(&physics);
        assert_eq!(p.age, 0);
        assert_eq!(p.position, Point::new(100.0, 100.0));
        assert!(!p.is_delayed());

        p.step(&physics);
        assert_eq!(p.age, 1);
    }

    #[test]
    fn test_expiry_is_strict() {
        let mut p = particle(3.0);
        let physics = Physics::default();
        for _ in 0..3 {
            p.step(&physics);
        }
        assert!(!p.is_expired());

        p.step(&physics);
        assert!(p.is_expired());
    }

    #[test]
    fn test_alpha_holds_then_fades() {
        let mut p = particle(20.0);
        p.age = 10;
        assert_eq!(p.alpha(10), 1.0);

        p.age = 15;
        assert!((p.alpha(10) - 0.5).abs() < 1e-6);

        p.age = 20;
        assert_eq!(p.alpha(10), 0.0);
    }

    #[test]
    fn test_alpha_without_fade_window() {
        let mut p = particle(10.0);
        p.age = 10;
        assert_eq!(p.alpha(100), 1.0);
    }

    #[test]
    fn test_entrance_radius() {
        let mut p = particle(50.0);
        assert_eq!(p.radius(3.0, 4), 6.0);

        p.age = 2;
        assert_eq!(p.radius(3.0, 4), 4.0);

        p.age = 4;
        assert_eq!(p.radius(3.0, 4), 2.0);
        assert_eq!(p.radius(3.0, 0), 2.0);
    }

    #[test]
    fn test_set_removes_expired() {
        let mut set = ParticleSet::new();
        set.extend([particle(1.0), particle(5.0), particle(1.0).with_delay(3)]);

        let physics = Physics::default();
        set.step(&physics);
        set.step(&physics);

        assert_eq!(set.remove_expired(), 1);
        assert_eq!(set.len(), 2);
        assert_eq!(set.visible().count(), 1);

        set.clear();
        assert!(set.is_empty());
    }
}
