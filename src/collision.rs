use crate::entities::{Body, Size};
use crate::vector::Vector2;

/// Axis-aligned bounding box in screen pixels (y grows downward).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Aabb {
    /// Box of `size` centred on `center`.
    pub fn centered(center: Vector2, size: Size) -> Self {
        let left = center.x - size.width / 2.0;
        let top = center.y - size.height / 2.0;
        Self {
            left,
            top,
            right: left + size.width,
            bottom: top + size.height,
        }
    }
}

/// Overlap test.  Boxes that merely touch count as colliding.
pub fn collide(a: &Aabb, b: &Aabb) -> bool {
    !(a.bottom < b.top || a.top > b.bottom || a.right < b.left || a.left > b.right)
}

pub fn bodies_collide(a: &Body, b: &Body) -> bool {
    collide(&a.bounds(), &b.bounds())
}
