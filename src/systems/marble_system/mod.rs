//! MarbleSystem - the body store and the per-tick physics pipeline
//!
//! One tick runs, in order:
//! - integrate: gravity, friction, velocity clamp, position update
//! - collision: Gauss-Seidel pair relaxation with restitution impulses
//! - boundary: wall clamp with damped reflection
//! - stabilize: pressure/zone damping, floor landing, rest snap
//!
//! Nothing in here blocks or allocates per tick.

mod boundary;
mod collision;
mod integrate;
mod stabilize;
mod system;

pub use boundary::Container;
pub use collision::CollisionStats;
pub use system::MarbleSystem;
