//! Horizontal ground plane

use rainfall_math::Vec2;

/// The horizontal line drops land on
///
/// Screen space has y growing downward, so a drop has hit the ground once its
/// y is at or below the plane on screen, i.e. `y >= self.y`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GroundPlane {
    /// Y coordinate of the plane
    pub y: f32,
}

impl GroundPlane {
    /// Create a ground plane at the given height
    pub fn new(y: f32) -> Self {
        Self { y }
    }

    /// Whether `position` is on or past the plane
    #[inline]
    pub fn is_hit(&self, position: Vec2) -> bool {
        position.y >= self.y
    }

    /// Height splash droplets start from: one pixel above the plane
    #[inline]
    pub fn rest_height(&self) -> f32 {
        self.y - 1.0
    }
}
