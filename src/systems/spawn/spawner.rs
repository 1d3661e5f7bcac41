use std::collections::HashSet;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::domain::{CategoryRegistry, JarConfig, SpawnEvent};
use crate::marble::{Marble, Vec2};
use crate::marble_system::{Container, MarbleSystem};

use super::scheduler::SpawnScheduler;

/// What one `spawn` call did with its events.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SpawnReport {
    /// Marbles created and queued.
    pub created: u32,
    /// New ids marked displayed without a marble because the jar was full.
    pub dropped: u32,
    /// Ids already displayed earlier.
    pub skipped: u32,
}

/// Turns spawn events into pending marbles, at most once per record id.
pub struct Spawner {
    displayed: HashSet<String>,
    rng: SmallRng,
}

impl Spawner {
    pub fn new(seed: u64) -> Self {
        Self {
            displayed: HashSet::new(),
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn is_displayed(&self, id: &str) -> bool {
        self.displayed.contains(id)
    }

    pub fn displayed_count(&self) -> usize {
        self.displayed.len()
    }

    /// Forget every displayed id and reseed placement.
    pub fn reset(&mut self, seed: u64) {
        self.displayed.clear();
        self.rng = SmallRng::seed_from_u64(seed);
    }

    /// Create a pending marble for every event whose id has not been seen.
    ///
    /// Ids are marked displayed even when the jar is full, so a dropped spawn
    /// is never retried.
    pub fn spawn(
        &mut self,
        events: &[SpawnEvent],
        container: Container,
        config: &JarConfig,
        categories: &mut CategoryRegistry,
        store: &mut MarbleSystem,
        scheduler: &mut SpawnScheduler,
    ) -> SpawnReport {
        let mut report = SpawnReport::default();

        for event in events {
            if !self.displayed.insert(event.id.clone()) {
                report.skipped += 1;
                continue;
            }

            if store.body_count() + scheduler.pending_count() >= config.capacity {
                report.dropped += 1;
                continue;
            }

            let radius = config.marble_radius;
            let pos = self.place(store, container, radius, config.placement_attempts);
            let category = categories.intern(&event.category);
            let key = store.alloc_key();
            scheduler.enqueue(Marble::new(key, event.id.clone(), category, pos, radius));
            report.created += 1;
        }

        report
    }

    /// Random spot in the upper half of the jar, retried to dodge active
    /// marbles. Pending marbles are not considered. Falls back to the last
    /// candidate when every attempt overlaps.
    fn place(&mut self, store: &MarbleSystem, container: Container, radius: f32, attempts: u32) -> Vec2 {
        let (min_x, max_x) = container.x_range(radius);
        let min_y = radius;
        let max_y = container.height * 0.5;

        let mut pos = Vec2::new(min_x, min_y);
        for _ in 0..attempts.max(1) {
            pos = Vec2::new(
                sample(&mut self.rng, min_x, max_x),
                sample(&mut self.rng, min_y, max_y),
            );
            if !store.overlaps_any(pos, radius) {
                break;
            }
        }
        pos
    }
}

/// Uniform in `[lo, hi)`, with the span widened to at least 1 for tiny jars.
fn sample(rng: &mut SmallRng, lo: f32, hi: f32) -> f32 {
    let span = (hi - lo).max(1.0);
    rng.gen_range(lo..lo + span)
}
