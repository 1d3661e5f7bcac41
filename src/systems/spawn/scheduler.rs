use std::collections::VecDeque;

use crate::marble::Marble;
use crate::marble_system::MarbleSystem;

/// Drains pending marbles into the store one at a time.
///
/// The drain is a small state machine advanced by `advance(dt_ms)` from the
/// tick, so it shares the tick's thread and never races the physics. A drain
/// promotes the head of the queue, waits `interval_ms`, and repeats until it
/// finds the queue empty after a wait.
pub struct SpawnScheduler {
    pending: VecDeque<Marble>,
    draining: bool,
    since_last_ms: f64,
}

impl SpawnScheduler {
    pub fn new() -> Self {
        Self {
            pending: VecDeque::new(),
            draining: false,
            since_last_ms: 0.0,
        }
    }

    pub fn enqueue(&mut self, marble: Marble) {
        self.pending.push_back(marble);
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn pending(&self) -> impl Iterator<Item = &Marble> {
        self.pending.iter()
    }

    pub fn is_draining(&self) -> bool {
        self.draining
    }

    /// Begin draining. A no-op while a drain is already running or when
    /// nothing is pending. Returns whether a new drain started.
    pub fn start(&mut self, store: &mut MarbleSystem) -> bool {
        if self.draining {
            return false;
        }
        let Some(head) = self.pending.pop_front() else {
            return false;
        };
        self.draining = true;
        self.since_last_ms = 0.0;
        store.insert(head);
        true
    }

    /// Let `dt_ms` of tick time pass. Returns the number of marbles promoted.
    pub fn advance(&mut self, dt_ms: f64, interval_ms: f64, store: &mut MarbleSystem) -> u32 {
        if !self.draining {
            return 0;
        }
        if dt_ms.is_finite() && dt_ms > 0.0 {
            self.since_last_ms += dt_ms;
        }

        let mut promoted = 0u32;
        while self.since_last_ms >= interval_ms {
            self.since_last_ms -= interval_ms;
            match self.pending.pop_front() {
                Some(marble) => {
                    store.insert(marble);
                    promoted += 1;
                }
                None => {
                    self.draining = false;
                    self.since_last_ms = 0.0;
                    break;
                }
            }
        }
        promoted
    }

    /// Drop everything pending and stop any running drain.
    pub fn clear(&mut self) {
        self.pending.clear();
        self.draining = false;
        self.since_last_ms = 0.0;
    }
}

impl Default for SpawnScheduler {
    fn default() -> Self {
        Self::new()
    }
}
