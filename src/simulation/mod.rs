//! Jar - the marble jar simulation controller
//!
//! `JarCore` owns every piece of mutable state: the marble store, the pending
//! queue, the displayed-id set and the category table. The host drives it from
//! a single thread:
//! - `apply_events` whenever the record list changes
//! - `step(dt_ms)` once per frame
//! - `snapshot` / `extract_render_buffer` to draw
//!
//! There is no timer in here. The spawn drain advances on the `dt_ms` handed
//! to `step`, which keeps it on the same thread as the physics.

use crate::domain::{CategoryId, CategoryRegistry, JarConfig, SpawnEvent};
use crate::error::JarError;
use crate::marble::Vec2;
use crate::marble_system::{Container, MarbleSystem};
use crate::spawn::{SpawnReport, SpawnScheduler, Spawner};

#[path = "perf/perf_timer.rs"]
mod perf_timer;
#[path = "perf/perf_stats.rs"]
mod perf_stats;
#[path = "step/step.rs"]
mod step;
#[path = "commands/commands.rs"]
mod commands;
#[path = "render/render_extract.rs"]
mod render_extract;
#[path = "init/init.rs"]
mod init;
#[path = "init/settings.rs"]
mod settings;
mod facade;

pub use facade::Jar;
pub use perf_stats::PerfStats;
pub use render_extract::{BodySnapshot, RENDER_STRIDE};

use perf_timer::Stopwatch;

/// Consecutive quiet ticks before a pile that never snaps to rest counts as settled.
const SETTLE_TICKS: u32 = 30;

/// The simulation controller
pub struct JarCore {
    config: JarConfig,
    container: Container,
    categories: CategoryRegistry,
    marbles: MarbleSystem,
    spawner: Spawner,
    scheduler: SpawnScheduler,

    // State
    frame: u64,
    render_buffer: Vec<f32>,
    // Positions at the start of the tick, reused across steps
    tick_start: Vec<Vec2>,
    /// Ticks in a row where no marble moved `rest_epsilon` or more.
    quiet_ticks: u32,

    // Perf metrics
    perf_enabled: bool,
    perf_stats: PerfStats,
}

impl JarCore {
    /// Create an empty jar with the default constants
    pub fn new(width: f32, height: f32) -> Self {
        init::create_jar_core(width, height, JarConfig::default())
    }

    pub fn with_config(width: f32, height: f32, config: JarConfig) -> Result<Self, JarError> {
        config.validate()?;
        Ok(init::create_jar_core(width, height, config))
    }

    pub fn width(&self) -> f32 { self.container.width }

    pub fn height(&self) -> f32 { self.container.height }

    pub fn container(&self) -> Container { self.container }

    pub fn frame(&self) -> u64 { self.frame }

    pub fn config(&self) -> &JarConfig { &self.config }

    /// Swap the simulation constants. Existing marbles keep their radius.
    ///
    /// Lowering `capacity` below the current marble count keeps every marble,
    /// so `active + pending <= capacity` is relaxed until the next `reset()`.
    /// New records are dropped in the meantime.
    pub fn set_config(&mut self, config: JarConfig) -> Result<(), JarError> {
        settings::set_config(self, config)
    }

    pub fn load_config_json(&mut self, json: &str) -> Result<(), JarError> {
        let config = JarConfig::from_json(json)?;
        settings::set_config(self, config)
    }

    pub fn set_container(&mut self, width: f32, height: f32) {
        settings::set_container(self, width, height);
    }

    /// Enable or disable per-step perf metrics (adds timing overhead when enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        settings::enable_perf_metrics(self, enabled);
    }

    /// Get last step perf snapshot (zeros when perf disabled)
    pub fn get_perf_stats(&self) -> PerfStats {
        settings::get_perf_stats(self)
    }

    // === SPAWN API ===

    /// Turn unseen records into pending marbles and kick off the drain.
    pub fn apply_events(&mut self, events: &[SpawnEvent], width: f32, height: f32) -> SpawnReport {
        commands::apply_events(self, events, width, height)
    }

    pub fn apply_events_json(&mut self, json: &str, width: f32, height: f32) -> Result<SpawnReport, JarError> {
        let events = crate::domain::events_from_json(json)?;
        Ok(commands::apply_events(self, &events, width, height))
    }

    /// Drop every marble, pending spawn and displayed id.
    pub fn reset(&mut self) {
        commands::reset(self)
    }

    pub fn is_displayed(&self, record_id: &str) -> bool {
        self.spawner.is_displayed(record_id)
    }

    pub fn displayed_count(&self) -> usize {
        self.spawner.displayed_count()
    }

    // === STATE ===

    pub fn body_count(&self) -> usize {
        self.marbles.body_count()
    }

    pub fn pending_count(&self) -> usize {
        self.scheduler.pending_count()
    }

    pub fn resting_count(&self) -> usize {
        self.marbles.resting_count()
    }

    pub fn is_draining(&self) -> bool {
        self.scheduler.is_draining()
    }

    /// Nothing left to spawn and the pile has stopped moving: either every
    /// marble snapped to rest, or no marble has moved `rest_epsilon` or more
    /// per tick for the last `SETTLE_TICKS` ticks. Stacked marbles keep a
    /// small stored velocity against their neighbours, so the second rule is
    /// what lets a pile settle. Hosts can stop ticking until the next
    /// `apply_events`.
    pub fn is_settled(&self) -> bool {
        if self.scheduler.is_draining() || self.scheduler.pending_count() > 0 {
            return false;
        }
        self.marbles.resting_count() == self.marbles.body_count() || self.quiet_ticks >= SETTLE_TICKS
    }

    pub fn marbles(&self) -> &MarbleSystem {
        &self.marbles
    }

    /// Step the simulation forward one tick
    pub fn step(&mut self, dt_ms: f64) {
        step::step(self, dt_ms);
    }

    // === RENDER API ===

    pub fn snapshot(&self) -> Vec<BodySnapshot> {
        render_extract::snapshot(self)
    }

    pub fn snapshot_json(&self) -> String {
        render_extract::snapshot_json(self)
    }

    /// Fill the flat render buffer; returns the number of marbles written.
    pub fn extract_render_buffer(&mut self) -> usize {
        render_extract::extract_render_buffer(self)
    }

    pub fn render_buffer(&self) -> &[f32] {
        &self.render_buffer
    }

    /// Get pointer to the render buffer (for JS rendering)
    pub fn render_buffer_ptr(&self) -> *const f32 {
        self.render_buffer.as_ptr()
    }

    pub fn category_key(&self, id: CategoryId) -> Option<&str> {
        self.categories.key(id)
    }

    pub fn categories_manifest_json(&self) -> String {
        self.categories.manifest_json()
    }
}

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;
