//! Marble - a rigid disc with a fixed radius
//!
//! Position is the disc's center in container pixels; y grows downward so
//! gravity is +y and the floor sits at `height - radius`.

mod body;
mod vec2;

pub use body::{BodyKey, Marble};
pub use vec2::Vec2;
