//! Fanfare Paint/Canvas API
//!
//! A 2D drawing API for overlay effects, similar to HTML Canvas.
//! All core types are unified with fanfare_core.
//!
//! # Example
//!
//! ```
//! use fanfare_paint::{BlendMode, Color, PaintContext};
//!
//! let mut ctx = PaintContext::new(800.0, 600.0);
//!
//! // Trail wash instead of a hard clear
//! ctx.wash(Color::BLACK.with_alpha(0.2));
//!
//! ctx.with_blend_mode(BlendMode::Additive, |ctx| {
//!     ctx.fill_circle_xyr(400.0, 300.0, 3.0, Color::WHITE);
//! });
//!
//! // Get commands for the host surface
//! let commands = ctx.take_commands();
//! assert_eq!(commands.len(), 4);
//! ```

pub mod context;

// ─────────────────────────────────────────────────────────────────────────────
// Core type re-exports from fanfare_core (unified type system)
// ─────────────────────────────────────────────────────────────────────────────

pub use fanfare_core::{
    BlendMode, Brush, Color, DrawCommand, DrawContext, Point, Rect, Size, Vec2,
};

pub use context::PaintContext;
