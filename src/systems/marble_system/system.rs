use crate::domain::JarConfig;
use crate::marble::{BodyKey, Marble, Vec2};

use super::boundary::{self, Container};
use super::collision::{self, CollisionStats};
use super::integrate;
use super::stabilize;

/// Owns every active marble. The tick pipeline only ever touches bodies
/// through this store, so pairwise mutation never aliases.
pub struct MarbleSystem {
    bodies: Vec<Marble>,
    next_key: BodyKey,
}

impl MarbleSystem {
    pub fn new() -> Self {
        Self {
            bodies: Vec::new(),
            next_key: 1,
        }
    }

    /// Hand out the key for a marble about to be created. Keys increase
    /// monotonically, so bodies inserted in creation order stay sorted.
    pub fn alloc_key(&mut self) -> BodyKey {
        let key = self.next_key;
        self.next_key = self.next_key.saturating_add(1);
        key
    }

    pub fn insert(&mut self, marble: Marble) {
        debug_assert!(
            self.bodies.last().map_or(true, |last| last.key < marble.key),
            "marbles must be inserted in key order"
        );
        self.bodies.push(marble);
    }

    pub fn bodies(&self) -> &[Marble] {
        &self.bodies
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn resting_count(&self) -> usize {
        self.bodies.iter().filter(|m| m.is_resting()).count()
    }

    /// True if a disc at `pos` would overlap any active marble.
    pub fn overlaps_any(&self, pos: Vec2, radius: f32) -> bool {
        self.bodies.iter().any(|m| m.overlaps(pos, radius))
    }

    /// Remove all bodies and restart key allocation.
    pub fn clear(&mut self) {
        self.bodies.clear();
        self.next_key = 1;
    }

    // === Tick pipeline, in order ===

    pub fn integrate(&mut self, config: &JarConfig) {
        integrate::integrate(&mut self.bodies, config);
    }

    pub fn resolve_collisions(&mut self, container: Container, config: &JarConfig) -> CollisionStats {
        collision::resolve_collisions(&mut self.bodies, container, config)
    }

    pub fn constrain(&mut self, container: Container, config: &JarConfig) -> u32 {
        boundary::constrain(&mut self.bodies, container, config.wall_damping)
    }

    pub fn stabilize(&mut self, container: Container, config: &JarConfig) -> u32 {
        stabilize::stabilize(&mut self.bodies, container, config)
    }
}

impl Default for MarbleSystem {
    fn default() -> Self {
        Self::new()
    }
}
