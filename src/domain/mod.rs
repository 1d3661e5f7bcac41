//! Domain types the host talks to the jar in: configuration, spawn events and
//! the category table.

pub mod categories;
pub mod config;
pub mod events;

pub use categories::{CategoryId, CategoryRegistry};
pub use config::JarConfig;
pub use events::{events_from_json, SpawnEvent};
