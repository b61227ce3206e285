//! Draw Context - Unified Rendering API
//!
//! The `DrawContext` trait is the interface every Fanfare effect paints
//! through. Implementations either rasterize directly or, like
//! [`RecordingContext`], record [`DrawCommand`]s for a host surface to replay.
//!
//! # Example
//!
//! ```
//! use fanfare_core::{BlendMode, Color, DrawContext, Point, RecordingContext, Rect, Size};
//!
//! let mut ctx = RecordingContext::new(Size::new(800.0, 600.0));
//! ctx.fill_rect(Rect::new(0.0, 0.0, 800.0, 600.0), Color::BLACK.with_alpha(0.2).into());
//!
//! ctx.push_blend_mode(BlendMode::Additive);
//! ctx.fill_circle(Point::new(400.0, 300.0), 3.0, Color::WHITE.into());
//! ctx.pop_blend_mode();
//!
//! assert_eq!(ctx.commands().len(), 4);
//! ```

use crate::layer::{BlendMode, Brush, Point, Rect, Size};

// ─────────────────────────────────────────────────────────────────────────────
// Draw Context Trait
// ─────────────────────────────────────────────────────────────────────────────

/// Drawing context for 2D overlay content
pub trait DrawContext {
    // ─────────────────────────────────────────────────────────────────────────
    // State Stack
    // ─────────────────────────────────────────────────────────────────────────

    /// Push an opacity value (multiplied with parent)
    fn push_opacity(&mut self, opacity: f32);

    /// Pop the top opacity from the stack
    fn pop_opacity(&mut self);

    /// Push a blend mode
    fn push_blend_mode(&mut self, mode: BlendMode);

    /// Pop the top blend mode from the stack
    fn pop_blend_mode(&mut self);

    // ─────────────────────────────────────────────────────────────────────────
    // 2D Drawing Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Reset every pixel of the surface to transparent
    fn clear(&mut self);

    /// Fill a rectangle
    fn fill_rect(&mut self, rect: Rect, brush: Brush);

    /// Fill a circle
    fn fill_circle(&mut self, center: Point, radius: f32, brush: Brush);

    // ─────────────────────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────────────────────

    /// Size of the drawable area
    fn viewport_size(&self) -> Size;

    /// Combined opacity of the opacity stack
    fn current_opacity(&self) -> f32;

    /// Blend mode on top of the stack
    fn current_blend_mode(&self) -> BlendMode;
}

// ─────────────────────────────────────────────────────────────────────────────
// Recording Draw Context
// ─────────────────────────────────────────────────────────────────────────────

/// A draw command that can be recorded and replayed
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    // State
    PushOpacity(f32),
    PopOpacity,
    PushBlendMode(BlendMode),
    PopBlendMode,

    // 2D Drawing
    Clear,
    FillRect {
        rect: Rect,
        brush: Brush,
    },
    FillCircle {
        center: Point,
        radius: f32,
        brush: Brush,
    },
}

impl DrawCommand {
    /// Whether this command touches pixels (as opposed to changing state)
    pub fn is_paint(&self) -> bool {
        matches!(
            self,
            DrawCommand::Clear | DrawCommand::FillRect { .. } | DrawCommand::FillCircle { .. }
        )
    }
}

/// A draw context that records commands for later execution
#[derive(Debug, Default)]
pub struct RecordingContext {
    commands: Vec<DrawCommand>,
    opacity_stack: Vec<f32>,
    blend_mode_stack: Vec<BlendMode>,
    viewport: Size,
}

impl RecordingContext {
    /// Create a new recording context
    pub fn new(viewport: Size) -> Self {
        Self {
            commands: Vec::new(),
            opacity_stack: vec![1.0],
            blend_mode_stack: vec![BlendMode::Normal],
            viewport,
        }
    }

    /// Get the recorded commands
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Take the recorded commands
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }
}

impl DrawContext for RecordingContext {
    fn push_opacity(&mut self, opacity: f32) {
        self.commands.push(DrawCommand::PushOpacity(opacity));
        let current = *self.opacity_stack.last().unwrap_or(&1.0);
        self.opacity_stack.push(current * opacity);
    }

    fn pop_opacity(&mut self) {
        self.commands.push(DrawCommand::PopOpacity);
        if self.opacity_stack.len() > 1 {
            self.opacity_stack.pop();
        }
    }

    fn push_blend_mode(&mut self, mode: BlendMode) {
        self.commands.push(DrawCommand::PushBlendMode(mode));
        self.blend_mode_stack.push(mode);
    }

    fn pop_blend_mode(&mut self) {
        self.commands.push(DrawCommand::PopBlendMode);
        if self.blend_mode_stack.len() > 1 {
            self.blend_mode_stack.pop();
        }
    }

    fn clear(&mut self) {
        self.commands.push(DrawCommand::Clear);
    }

    fn fill_rect(&mut self, rect: Rect, brush: Brush) {
        self.commands.push(DrawCommand::FillRect { rect, brush });
    }

    fn fill_circle(&mut self, center: Point, radius: f32, brush: Brush) {
        self.commands.push(DrawCommand::FillCircle {
            center,
            radius,
            brush,
        });
    }

    fn viewport_size(&self) -> Size {
        self.viewport
    }

    fn current_opacity(&self) -> f32 {
        *self.opacity_stack.last().unwrap_or(&1.0)
    }

    fn current_blend_mode(&self) -> BlendMode {
        self.blend_mode_stack.last().copied().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::Color;

    #[test]
    fn test_recording_context() {
        let mut ctx = RecordingContext::new(Size::new(800.0, 600.0));

        ctx.fill_rect(Rect::new(0.0, 0.0, 100.0, 50.0), Color::BLACK.into());
        ctx.fill_circle(Point::new(10.0, 30.0), 4.0, Color::WHITE.into());

        assert_eq!(ctx.commands().len(), 2);
        assert!(ctx.commands().iter().all(DrawCommand::is_paint));
    }

    #[test]
    fn test_opacity_stack() {
        let mut ctx = RecordingContext::new(Size::new(800.0, 600.0));

        assert_eq!(ctx.current_opacity(), 1.0);

        ctx.push_opacity(0.5);
        assert_eq!(ctx.current_opacity(), 0.5);

        ctx.push_opacity(0.5);
        assert_eq!(ctx.current_opacity(), 0.25);

        ctx.pop_opacity();
        ctx.pop_opacity();
        assert_eq!(ctx.current_opacity(), 1.0);

        // Should not panic when popping past the root
        ctx.pop_opacity();
        assert_eq!(ctx.current_opacity(), 1.0);
    }

    #[test]
    fn test_blend_mode_stack() {
        let mut ctx = RecordingContext::new(Size::new(800.0, 600.0));

        assert_eq!(ctx.current_blend_mode(), BlendMode::Normal);
        ctx.push_blend_mode(BlendMode::Additive);
        assert_eq!(ctx.current_blend_mode(), BlendMode::Additive);
        ctx.pop_blend_mode();
        assert_eq!(ctx.current_blend_mode(), BlendMode::Normal);
    }

    #[test]
    fn test_take_commands() {
        let mut ctx = RecordingContext::new(Size::new(10.0, 10.0));
        ctx.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), Color::WHITE.into());

        let taken = ctx.take_commands();
        assert_eq!(taken.len(), 1);
        assert!(ctx.commands().is_empty());
    }
}
