//! Frame rendering
//!
//! Each frame is painted on top of the previous one: a translucent wash dims
//! what is already there (leaving trails), then every visible particle is drawn
//! additively so overlapping sparks brighten.

use crate::config::FireworksConfig;
use crate::particle::ParticleSet;
use crate::show::Flash;
use fanfare_core::{BlendMode, Brush, DrawContext};
use fanfare_paint::PaintContext;

/// A flash being played out
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlashState {
    flash: Flash,
    remaining: u32,
}

impl FlashState {
    pub fn new(flash: Flash) -> Self {
        Self {
            flash,
            remaining: flash.frames,
        }
    }

    /// Alpha for the current frame, fading linearly over the flash's frames
    pub fn alpha(&self) -> f32 {
        if self.flash.frames == 0 {
            return 0.0;
        }
        self.flash.alpha * self.remaining as f32 / self.flash.frames as f32
    }

    /// Consume one frame; returns false once the flash is spent
    pub fn advance(&mut self) -> bool {
        self.remaining = self.remaining.saturating_sub(1);
        self.remaining > 0
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }
}

/// Paint one frame of a session
pub fn paint_frame(
    ctx: &mut PaintContext,
    particles: &ParticleSet,
    config: &FireworksConfig,
    flash: Option<&FlashState>,
) {
    ctx.wash(config.wash);

    ctx.with_blend_mode(BlendMode::Additive, |ctx| {
        for particle in particles.visible() {
            let alpha = particle.alpha(config.opaque_frames);
            if alpha <= 0.0 {
                continue;
            }
            let radius = particle.radius(config.entrance_scale, config.entrance_frames);
            let color = particle.color.with_alpha(particle.color.a * alpha);

            match &config.glow {
                Some(glow) => {
                    let halo = particle.color.with_alpha(alpha * glow.alpha);
                    ctx.fill_circle(particle.position, radius * glow.scale, Brush::glow(halo));
                    ctx.fill_circle(particle.position, radius, color.into());
                    let core = glow.core_color.with_alpha(glow.core_color.a * alpha);
                    ctx.fill_circle(particle.position, radius * glow.core_scale, core.into());
                }
                None => ctx.fill_circle(particle.position, radius, color.into()),
            }
        }
    });

    if let Some(flash) = flash {
        let alpha = flash.alpha();
        if alpha > 0.0 {
            ctx.wash(flash.flash.color.with_alpha(alpha));
        }
    }
}
