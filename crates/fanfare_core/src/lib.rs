//! Fanfare Core
//!
//! Foundational types shared by the Fanfare crates:
//!
//! - **Geometry**: points, sizes, rects and vectors in screen pixels
//! - **Color & Brush**: RGBA colors, solid and radial glow brushes
//! - **Compositing**: blend modes (including additive), pointer transparency, z-order
//! - **Draw Context**: the drawing trait plus a command-recording implementation

pub mod draw;
pub mod layer;

pub use draw::{DrawCommand, DrawContext, RecordingContext};
pub use layer::{BlendMode, Brush, Color, Point, PointerEvents, Rect, Size, Vec2, ZOrder};
