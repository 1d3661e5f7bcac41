//! Spawn pipeline: events -> pending queue -> marble store
//!
//! The spawner dedups by record id and respects capacity; the scheduler
//! throttles promotion to one marble per interval.

mod scheduler;
mod spawner;

pub use scheduler::SpawnScheduler;
pub use spawner::{SpawnReport, Spawner};
