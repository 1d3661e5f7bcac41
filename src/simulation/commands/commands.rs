use crate::domain::SpawnEvent;
use crate::spawn::SpawnReport;

use super::JarCore;

pub(super) fn apply_events(jar: &mut JarCore, events: &[SpawnEvent], width: f32, height: f32) -> SpawnReport {
    super::settings::set_container(jar, width, height);

    let report = jar.spawner.spawn(
        events,
        jar.container,
        &jar.config,
        &mut jar.categories,
        &mut jar.marbles,
        &mut jar.scheduler,
    );

    if report.dropped > 0 {
        tracing::warn!(
            dropped = report.dropped,
            capacity = jar.config.capacity,
            "jar is full; records marked displayed without a marble"
        );
    }
    if report.created > 0 {
        tracing::debug!(
            created = report.created,
            skipped = report.skipped,
            pending = jar.scheduler.pending_count(),
            "queued new marbles"
        );
        jar.scheduler.start(&mut jar.marbles);
    }

    report
}

pub(super) fn reset(jar: &mut JarCore) {
    tracing::info!(
        bodies = jar.marbles.body_count(),
        pending = jar.scheduler.pending_count(),
        "jar reset"
    );
    jar.marbles.clear();
    jar.scheduler.clear();
    jar.spawner.reset(jar.config.seed);
    jar.categories.clear();
    jar.render_buffer.clear();
    jar.tick_start.clear();
    jar.quiet_ticks = 0;
    jar.frame = 0;
}
