//! Paint context - Canvas-like drawing API implementing DrawContext
//!
//! PaintContext provides a 2D-focused drawing API similar to HTML Canvas,
//! while implementing the DrawContext trait so effects can be written
//! against either.

use fanfare_core::{
    BlendMode, Brush, DrawCommand, DrawContext, Point, RecordingContext, Rect, Size,
};

/// The paint context used for overlay drawing
///
/// PaintContext wraps a RecordingContext to record draw commands,
/// while providing a Canvas-like API for convenience.
pub struct PaintContext {
    recording: RecordingContext,
}

impl PaintContext {
    /// Create a new paint context with the given viewport size
    pub fn new(width: f32, height: f32) -> Self {
        Self::from_size(Size::new(width, height))
    }

    /// Create from a Size
    pub fn from_size(size: Size) -> Self {
        Self {
            recording: RecordingContext::new(size),
        }
    }

    /// Get all recorded commands
    pub fn commands(&self) -> &[DrawCommand] {
        self.recording.commands()
    }

    /// Take ownership of recorded commands
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        self.recording.take_commands()
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // Canvas-like convenience API
    // ═══════════════════════════════════════════════════════════════════════════

    /// Fill a rectangle at (x, y) with width/height and a brush
    pub fn fill_rect_xywh(
        &mut self,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        brush: impl Into<Brush>,
    ) {
        self.fill_rect(Rect::new(x, y, width, height), brush.into());
    }

    /// Fill a circle at (cx, cy) with radius
    pub fn fill_circle_xyr(&mut self, cx: f32, cy: f32, radius: f32, brush: impl Into<Brush>) {
        self.fill_circle(Point::new(cx, cy), radius, brush.into());
    }

    /// Paint a brush over the whole viewport without clearing what is below
    ///
    /// With a translucent color this leaves fading trails behind moving content.
    pub fn wash(&mut self, brush: impl Into<Brush>) {
        let viewport = self.viewport_size().to_rect();
        self.fill_rect(viewport, brush.into());
    }

    /// Run `f` with `mode` pushed, popping it afterwards
    pub fn with_blend_mode<F>(&mut self, mode: BlendMode, f: F)
    where
        F: FnOnce(&mut Self),
    {
        self.push_blend_mode(mode);
        f(self);
        self.pop_blend_mode();
    }
}

impl Default for PaintContext {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// DrawContext Implementation - delegates to RecordingContext
// ═══════════════════════════════════════════════════════════════════════════════

impl DrawContext for PaintContext {
    fn push_opacity(&mut self, opacity: f32) {
        self.recording.push_opacity(opacity);
    }

    fn pop_opacity(&mut self) {
        self.recording.pop_opacity();
    }

    fn push_blend_mode(&mut self, mode: BlendMode) {
        self.recording.push_blend_mode(mode);
    }

    fn pop_blend_mode(&mut self) {
        self.recording.pop_blend_mode();
    }

    fn clear(&mut self) {
        self.recording.clear();
    }

    fn fill_rect(&mut self, rect: Rect, brush: Brush) {
        self.recording.fill_rect(rect, brush);
    }

    fn fill_circle(&mut self, center: Point, radius: f32, brush: Brush) {
        self.recording.fill_circle(center, radius, brush);
    }

    fn viewport_size(&self) -> Size {
        self.recording.viewport_size()
    }

    fn current_opacity(&self) -> f32 {
        self.recording.current_opacity()
    }

    fn current_blend_mode(&self) -> BlendMode {
        self.recording.current_blend_mode()
    }
}
