use super::{JarCore, Stopwatch};

pub(super) fn step(jar: &mut JarCore, dt_ms: f64) {
    let perf_on = jar.perf_enabled;
    let mut watch = if perf_on {
        jar.perf_stats.reset();
        Some(Stopwatch::start())
    } else {
        None
    };
    let lap = |watch: &mut Option<Stopwatch>| watch.as_mut().map_or(0.0, Stopwatch::lap_ms);
    let step_start = perf_on.then(Stopwatch::start);

    let JarCore {
        config,
        container,
        marbles,
        scheduler,
        perf_stats,
        tick_start,
        quiet_ticks,
        ..
    } = jar;
    let container = *container;

    // === SPAWN DRAIN ===
    // Promote before integrating so a new marble gets its first tick now.
    let promoted = scheduler.advance(dt_ms, config.spawn_interval_ms, marbles);
    let spawn_ms = lap(&mut watch);

    tick_start.clear();
    tick_start.extend(marbles.bodies().iter().map(|m| m.pos));

    // === PHYSICS PIPELINE ===
    marbles.integrate(config);
    let integrate_ms = lap(&mut watch);

    let collisions = marbles.resolve_collisions(container, config);
    let collision_ms = lap(&mut watch);

    let wall_contacts = marbles.constrain(container, config);
    let boundary_ms = lap(&mut watch);

    let resting = marbles.stabilize(container, config);
    let stabilize_ms = lap(&mut watch);

    let max_step = marbles
        .bodies()
        .iter()
        .zip(tick_start.iter())
        .map(|(m, start)| m.pos.distance(*start))
        .fold(0.0f32, f32::max);
    if max_step < config.rest_epsilon {
        *quiet_ticks = quiet_ticks.saturating_add(1);
    } else {
        *quiet_ticks = 0;
    }

    if perf_on {
        perf_stats.spawn_ms = spawn_ms;
        perf_stats.integrate_ms = integrate_ms;
        perf_stats.collision_ms = collision_ms;
        perf_stats.boundary_ms = boundary_ms;
        perf_stats.stabilize_ms = stabilize_ms;

        perf_stats.promoted = promoted;
        perf_stats.body_count = marbles.body_count() as u32;
        perf_stats.pending_count = scheduler.pending_count() as u32;
        perf_stats.resting_count = resting;
        perf_stats.pair_checks = collisions.pair_checks;
        perf_stats.overlaps = collisions.overlaps;
        perf_stats.impulses = collisions.impulses;
        perf_stats.wall_contacts = wall_contacts;
        perf_stats.max_penetration = collisions.max_penetration;
        perf_stats.max_step = max_step;
        if let Some(mut start) = step_start {
            perf_stats.step_ms = start.lap_ms();
        }
    }

    jar.frame += 1;
}
