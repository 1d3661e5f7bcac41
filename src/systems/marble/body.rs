use crate::domain::CategoryId;

use super::vec2::Vec2;

/// Stable arena handle of a marble. Never reused within a session.
///
/// Allocation saturates at `u32::MAX`; past that point keys repeat and the
/// store's key order no longer holds. `MarbleSystem::clear` restarts at 1.
pub type BodyKey = u32;

/// Marble - a disc that bounces around the jar
#[derive(Clone, Debug)]
pub struct Marble {
    /// Arena handle
    pub key: BodyKey,
    /// Id of the source record this marble stands for
    pub record_id: String,
    pub category: CategoryId,

    // === Physics State ===
    /// Center position (pixels, y grows downward)
    pub pos: Vec2,
    /// Velocity (pixels per tick)
    pub velocity: Vec2,
    radius: f32,
}

impl Marble {
    pub fn new(key: BodyKey, record_id: String, category: CategoryId, pos: Vec2, radius: f32) -> Self {
        Self {
            key,
            record_id,
            category,
            pos,
            velocity: Vec2::ZERO,
            radius,
        }
    }

    /// Fixed at creation; there is no setter.
    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// A marble rests once the stabilizer has snapped its velocity to zero.
    #[inline]
    pub fn is_resting(&self) -> bool {
        self.velocity == Vec2::ZERO
    }

    #[inline]
    pub fn overlaps(&self, pos: Vec2, radius: f32) -> bool {
        let reach = self.radius + radius;
        (pos - self.pos).length_squared() < reach * reach
    }

    /// Apply impulse at the center (unit mass)
    #[inline]
    pub fn apply_impulse(&mut self, impulse: Vec2) {
        self.velocity += impulse;
    }
}
