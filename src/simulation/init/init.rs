use crate::domain::{CategoryRegistry, JarConfig};
use crate::marble_system::{Container, MarbleSystem};
use crate::spawn::{SpawnScheduler, Spawner};

use super::perf_stats::PerfStats;
use super::JarCore;

pub(super) fn create_jar_core(width: f32, height: f32, config: JarConfig) -> JarCore {
    let capacity = config.capacity;
    JarCore {
        container: Container::new(width, height),
        categories: CategoryRegistry::new(),
        marbles: MarbleSystem::new(),
        spawner: Spawner::new(config.seed),
        scheduler: SpawnScheduler::new(),
        config,

        frame: 0,
        // Sized for a full jar up front; grows if the capacity is raised later.
        render_buffer: Vec::with_capacity(capacity.min(4096) * super::RENDER_STRIDE),
        tick_start: Vec::new(),
        quiet_ticks: 0,

        perf_enabled: false,
        perf_stats: PerfStats::default(),
    }
}
