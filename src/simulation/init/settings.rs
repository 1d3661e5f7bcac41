use crate::domain::JarConfig;
use crate::error::JarError;
use crate::marble_system::Container;

use super::perf_stats::PerfStats;
use super::JarCore;

pub(super) fn enable_perf_metrics(jar: &mut JarCore, enabled: bool) {
    jar.perf_enabled = enabled;
    if !enabled {
        jar.perf_stats.reset();
    }
}

pub(super) fn get_perf_stats(jar: &JarCore) -> PerfStats {
    jar.perf_stats.clone()
}

/// A capacity below the current count only blocks new spawns; the
/// `active + pending <= capacity` bound holds again after `reset()`.
pub(super) fn set_config(jar: &mut JarCore, config: JarConfig) -> Result<(), JarError> {
    config.validate()?;
    if config.capacity < jar.marbles.body_count() + jar.scheduler.pending_count() {
        tracing::warn!(
            capacity = config.capacity,
            bodies = jar.marbles.body_count(),
            "capacity lowered below current marble count; existing marbles stay"
        );
    }
    tracing::info!(
        gravity = config.gravity,
        iterations = config.solver_iterations,
        capacity = config.capacity,
        "jar config updated"
    );
    jar.config = config;
    Ok(())
}

pub(super) fn set_container(jar: &mut JarCore, width: f32, height: f32) {
    let container = Container::new(width, height);
    if container != jar.container {
        tracing::debug!(width = container.width, height = container.height, "jar resized");
        jar.container = container;
    }
}
