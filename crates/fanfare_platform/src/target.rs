//! Element geometry lookup

use crate::error::Result;
use fanfare_core::Rect;

/// Opaque handle to an element in the host document
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ElementId(pub u64);

/// Resolves element handles to on-screen geometry
pub trait TargetLocator {
    /// Bounding rectangle of `element` in viewport coordinates
    fn bounding_rect(&self, element: ElementId) -> Result<Rect>;
}
