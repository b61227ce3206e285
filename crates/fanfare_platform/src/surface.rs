//! Display surface abstraction and configuration

use crate::error::{PlatformError, Result};
use fanfare_core::{Color, DrawCommand, PointerEvents, Size, ZOrder};

/// Surface configuration
#[derive(Clone, Debug, PartialEq)]
pub struct SurfaceConfig {
    /// Drawable size in logical pixels
    pub size: Size,
    /// Stacking order relative to the rest of the document
    pub z_order: ZOrder,
    /// Whether the surface takes part in hit testing
    pub pointer_events: PointerEvents,
    /// Whether pixels that are never painted stay see-through
    pub transparent: bool,
    /// Background tint applied by the host underneath painted content
    pub background: Color,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            size: Size::ZERO,
            z_order: ZOrder::Content,
            pointer_events: PointerEvents::Auto,
            transparent: false,
            background: Color::TRANSPARENT,
        }
    }
}

impl SurfaceConfig {
    /// An overlay covering `size` that sits above everything and ignores input
    pub fn overlay(size: Size) -> Self {
        Self {
            size,
            z_order: ZOrder::Overlay,
            pointer_events: PointerEvents::None,
            transparent: true,
            background: Color::TRANSPARENT,
        }
    }

    /// Overlay for `viewport`, or `SurfaceUnavailable` when the viewport
    /// has no finite positive area
    pub fn try_overlay(viewport: Size) -> Result<Self> {
        let usable = viewport.width > 0.0
            && viewport.height > 0.0
            && viewport.width.is_finite()
            && viewport.height.is_finite();
        if !usable {
            return Err(PlatformError::SurfaceUnavailable(format!(
                "viewport {}x{} cannot hold a surface",
                viewport.width, viewport.height
            )));
        }
        Ok(Self::overlay(viewport))
    }

    /// Set the surface size
    pub fn size(mut self, size: Size) -> Self {
        self.size = size;
        self
    }

    /// Set the stacking order
    pub fn z_order(mut self, z_order: ZOrder) -> Self {
        self.z_order = z_order;
        self
    }

    /// Set pointer event behavior
    pub fn pointer_events(mut self, pointer_events: PointerEvents) -> Self {
        self.pointer_events = pointer_events;
        self
    }

    /// Set whether the surface is transparent
    pub fn transparent(mut self, transparent: bool) -> Self {
        self.transparent = transparent;
        self
    }

    /// Set the background tint
    pub fn background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }
}

/// A drawable bitmap attached to the visible document
///
/// Created attached; stays attached until [`Surface::remove`] is called.
pub trait Surface {
    /// Drawable size in logical pixels
    fn size(&self) -> Size;

    /// Replay one frame of recorded commands onto the bitmap
    ///
    /// Commands are drawn over the previous frame's pixels; the surface is
    /// never cleared implicitly.
    fn present(&mut self, commands: Vec<DrawCommand>);

    /// Detach from the document. Calling this more than once is a no-op.
    fn remove(&mut self);

    /// Whether the surface is still attached
    fn is_attached(&self) -> bool;
}

/// Supplies display surfaces sized to the viewport
pub trait SurfaceProvider {
    /// Current viewport size in logical pixels
    fn viewport(&self) -> Size;

    /// Create a surface and attach it to the document
    ///
    /// Returns [`PlatformError::SurfaceUnavailable`](crate::PlatformError::SurfaceUnavailable)
    /// when the host cannot provide 2D drawing.
    fn create_surface(&self, config: SurfaceConfig) -> Result<Box<dyn Surface>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlay_config() {
        let config = SurfaceConfig::overlay(Size::new(1024.0, 768.0));
        assert_eq!(config.z_order, ZOrder::Overlay);
        assert_eq!(config.pointer_events, PointerEvents::None);
        assert!(config.transparent);
    }

    #[test]
    fn test_try_overlay_needs_finite_area() {
        let viewport = Size::new(640.0, 480.0);
        assert_eq!(
            SurfaceConfig::try_overlay(viewport),
            Ok(SurfaceConfig::overlay(viewport))
        );

        for bad in [
            Size::new(0.0, 480.0),
            Size::new(640.0, -1.0),
            Size::new(f32::INFINITY, 480.0),
            Size::new(640.0, f32::NAN),
        ] {
            assert!(matches!(
                SurfaceConfig::try_overlay(bad),
                Err(PlatformError::SurfaceUnavailable(_))
            ));
        }
    }

    #[test]
    fn test_builder() {
        let config = SurfaceConfig::default()
            .size(Size::new(10.0, 20.0))
            .background(Color::BLACK.with_alpha(0.3));
        assert_eq!(config.size, Size::new(10.0, 20.0));
        assert_eq!(config.background.a, 0.3);
        assert_eq!(config.z_order, ZOrder::Content);
    }
}
