//! Where a show is centred

use fanfare_core::{Point, Rect, Size, Vec2};
use fanfare_platform::{ElementId, TargetLocator};

/// What a show is aimed at
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Target {
    /// A point in viewport coordinates
    Point(Point),
    /// The centre of a host element
    Element(ElementId),
}

impl From<Point> for Target {
    fn from(point: Point) -> Self {
        Target::Point(point)
    }
}

impl From<ElementId> for Target {
    fn from(element: ElementId) -> Self {
        Target::Element(element)
    }
}

/// Horizontal centre, a little above the vertical middle
pub fn default_origin(viewport: Size) -> Point {
    Point::new(viewport.width / 2.0, viewport.height * 0.35)
}

/// Resolve a target to a show origin
///
/// Anything unusable (no target, no locator, a detached element, a zero or
/// non-finite rect, a non-finite point) falls back to [`default_origin`].
pub fn resolve_origin(
    target: Option<Target>,
    locator: Option<&dyn TargetLocator>,
    viewport: Size,
) -> Point {
    let fallback = default_origin(viewport);

    match target {
        None => fallback,
        Some(Target::Point(point)) if point.is_finite() => point,
        Some(Target::Point(point)) => {
            tracing::debug!("Non-finite target point {:?}, using default origin", point);
            fallback
        }
        Some(Target::Element(element)) => {
            let Some(locator) = locator else {
                tracing::debug!("No target locator for {:?}, using default origin", element);
                return fallback;
            };
            match locator.bounding_rect(element) {
                Ok(rect) if usable(&rect) => rect.center(),
                Ok(rect) => {
                    tracing::debug!(
                        "Unusable rect {:?} for {:?}, using default origin",
                        rect,
                        element
                    );
                    fallback
                }
                Err(e) => {
                    tracing::debug!("Could not locate {:?}: {}, using default origin", element, e);
                    fallback
                }
            }
        }
    }
}

fn usable(rect: &Rect) -> bool {
    rect.is_finite() && !rect.is_degenerate()
}

/// Offset `point` by a uniform random amount within ±`amount` per axis
pub fn jitter(point: Point, amount: Vec2, rng: &mut fastrand::Rng) -> Point {
    let dx = (rng.f32() * 2.0 - 1.0) * amount.x;
    let dy = (rng.f32() * 2.0 - 1.0) * amount.y;
    point.offset(Vec2::new(dx, dy))
}
