//! Marble Jar Engine - rigid-circle "jar of marbles" simulation in WASM
//!
//! Every record the host shows becomes a marble that drops into a
//! rectangular jar and settles on the pile.
//!
//! Layout:
//! - domain/     - config, spawn events, category table
//! - systems/    - marble store, physics passes, spawner and drain queue
//! - simulation/ - `JarCore` controller and the `Jar` wasm facade

pub mod domain;
pub mod error;
pub mod systems;
pub mod simulation;

pub use systems::marble;
pub use systems::marble_system;
pub use systems::spawn;

use wasm_bindgen::prelude::*;

// Thread pool for the rayon passes; JS must await it before the first step.
#[cfg(all(feature = "parallel", target_arch = "wasm32"))]
pub use wasm_bindgen_rayon::init_thread_pool;

// Better error messages in debug mode
#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize the engine
#[wasm_bindgen]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    web_sys::console::log_1(&"Marble jar engine initialized".into());
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "marble jar engine initialized");
}

/// Get engine version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

// Re-export main types
pub use domain::{CategoryId, JarConfig, SpawnEvent};
pub use error::JarError;
pub use simulation::{BodySnapshot, Jar, JarCore, PerfStats, RENDER_STRIDE};
