use super::*;
use crate::marble::{Marble, Vec2};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

const FRAME_MS: f64 = 16.0;

fn events(ids: std::ops::Range<u32>) -> Vec<SpawnEvent> {
    ids.map(|i| SpawnEvent::new(format!("rec-{}", i), if i % 2 == 0 { "girl" } else { "boy" }))
        .collect()
}

/// Put a marble straight into the active set, bypassing the spawner.
fn drop_marble(jar: &mut JarCore, x: f32, y: f32, vx: f32, vy: f32) {
    let key = jar.marbles.alloc_key();
    let radius = jar.config.marble_radius;
    let mut marble = Marble::new(key, format!("m{}", key), 0, Vec2::new(x, y), radius);
    marble.velocity = Vec2::new(vx, vy);
    jar.marbles.insert(marble);
}

fn assert_inside(jar: &JarCore) {
    let (w, h) = (jar.width(), jar.height());
    for m in jar.marbles().bodies() {
        let r = m.radius();
        assert!(m.pos.x >= r - 1e-3 && m.pos.x <= w - r + 1e-3, "x out of jar: {:?}", m.pos);
        assert!(m.pos.y >= r - 1e-3 && m.pos.y <= h - r + 1e-3, "y out of jar: {:?}", m.pos);
    }
}

#[test]
fn marbles_stay_inside_the_jar_every_tick() {
    let mut jar = JarCore::new(200.0, 300.0);
    jar.apply_events(&events(0..40), 200.0, 300.0);

    for _ in 0..400 {
        jar.step(FRAME_MS);
        assert_inside(&jar);
    }
    assert_eq!(jar.body_count(), 40);
}

#[test]
fn integrator_clamps_velocity_components() {
    let mut jar = JarCore::new(300.0, 300.0);
    drop_marble(&mut jar, 150.0, 100.0, 50.0, -80.0);
    drop_marble(&mut jar, 60.0, 60.0, -3.0, 25.0);

    for _ in 0..30 {
        jar.marbles.integrate(&jar.config);
        let vmax = jar.config.max_velocity;
        for m in jar.marbles().bodies() {
            assert!(m.velocity.x.abs() <= vmax && m.velocity.y.abs() <= vmax, "{:?}", m.velocity);
        }
        let container = jar.container();
        jar.marbles.resolve_collisions(container, &jar.config);
        jar.marbles.constrain(container, &jar.config);
        jar.marbles.stabilize(container, &jar.config);
    }
}

#[test]
fn capacity_bounds_active_plus_pending() {
    let mut config = JarConfig::default();
    config.capacity = 10;
    let mut jar = JarCore::with_config(300.0, 300.0, config).unwrap();

    let report = jar.apply_events(&events(0..25), 300.0, 300.0);
    assert_eq!(report.created, 10);
    assert_eq!(report.dropped, 15);
    assert!(jar.body_count() + jar.pending_count() <= 10);

    for i in 0..50 {
        jar.step(FRAME_MS);
        if i == 5 {
            jar.apply_events(&events(25..40), 300.0, 300.0);
        }
        assert!(jar.body_count() + jar.pending_count() <= 10);
    }
    assert_eq!(jar.body_count(), 10);
    // Dropped records still count as displayed and are never retried.
    assert!(jar.is_displayed("rec-20"));
    assert_eq!(jar.displayed_count(), 40);
}

#[test]
fn repeated_event_list_spawns_nothing_new() {
    let mut jar = JarCore::new(300.0, 300.0);
    let list = events(0..8);

    let first = jar.apply_events(&list, 300.0, 300.0);
    assert_eq!(first.created, 8);
    let total = jar.body_count() + jar.pending_count();

    let second = jar.apply_events(&list, 300.0, 300.0);
    assert_eq!(second.created, 0);
    assert_eq!(second.skipped, 8);
    assert_eq!(jar.body_count() + jar.pending_count(), total);
}

#[test]
fn drain_is_single_flight() {
    let mut jar = JarCore::new(300.0, 300.0);
    jar.apply_events(&events(0..3), 300.0, 300.0);
    assert!(jar.is_draining());
    // Head promoted immediately.
    assert_eq!(jar.body_count(), 1);
    assert_eq!(jar.pending_count(), 2);

    // New records join the running drain instead of starting another.
    jar.apply_events(&events(3..5), 300.0, 300.0);
    assert_eq!(jar.body_count(), 1);
    assert_eq!(jar.pending_count(), 4);

    // 50 ms cadence: one promotion per interval, never a burst.
    jar.step(30.0);
    assert_eq!(jar.body_count(), 1);
    jar.step(30.0);
    assert_eq!(jar.body_count(), 2);
    for _ in 0..20 {
        jar.step(FRAME_MS);
    }
    assert_eq!(jar.body_count(), 5);
    assert_eq!(jar.pending_count(), 0);
    assert!(!jar.is_draining());
}

#[test]
fn overlapping_cluster_separates_within_sixty_ticks() {
    let mut jar = JarCore::new(300.0, 300.0);
    let mut rng = SmallRng::seed_from_u64(42);
    for _ in 0..5 {
        let x = rng.gen_range(140.0..160.0);
        let y = rng.gen_range(90.0..110.0);
        drop_marble(&mut jar, x, y, 0.0, 0.0);
    }

    for _ in 0..60 {
        jar.step(FRAME_MS);
    }

    let bodies = jar.marbles().bodies();
    for (i, a) in bodies.iter().enumerate() {
        for b in &bodies[i + 1..] {
            let d = a.pos.distance(b.pos);
            assert!(d >= a.radius() + b.radius() - 0.5, "pair {} / {} at {}", a.key, b.key, d);
        }
    }
}

#[test]
fn single_marble_comes_to_rest_on_the_floor() {
    let mut jar = JarCore::new(300.0, 300.0);
    jar.apply_events(&[SpawnEvent::new("solo", "girl")], 300.0, 300.0);
    assert_eq!(jar.body_count(), 1);

    let mut settled_at = None;
    for tick in 0..600 {
        jar.step(FRAME_MS);
        if settled_at.is_none() && jar.is_settled() {
            settled_at = Some(tick);
        }
    }
    assert!(settled_at.is_some(), "marble never settled");

    let m = &jar.marbles().bodies()[0];
    assert_eq!(m.velocity, Vec2::ZERO);
    assert_eq!(m.pos.y, 300.0 - m.radius());

    // Stays put once resting.
    for _ in 0..60 {
        jar.step(FRAME_MS);
        let m = &jar.marbles().bodies()[0];
        assert!(m.is_resting());
        assert_eq!(m.pos.y, 288.0);
    }
}

#[test]
fn stacked_pile_settles_even_with_residual_velocity() {
    let mut jar = JarCore::new(150.0, 300.0);
    jar.apply_events(&events(0..30), 150.0, 300.0);

    for _ in 0..5000 {
        jar.step(FRAME_MS);
    }
    assert_eq!(jar.body_count(), 30);
    assert!(jar.is_settled(), "pile of 30 never settled");
}

#[test]
fn falling_marble_is_not_settled() {
    let mut jar = JarCore::new(300.0, 300.0);
    drop_marble(&mut jar, 150.0, 30.0, 0.0, 0.0);
    for _ in 0..10 {
        jar.step(FRAME_MS);
        assert!(!jar.is_settled());
    }
}

#[test]
fn lowered_capacity_keeps_marbles_until_reset() {
    let mut jar = JarCore::new(300.0, 300.0);
    jar.apply_events(&events(0..6), 300.0, 300.0);
    for _ in 0..20 {
        jar.step(FRAME_MS);
    }
    assert_eq!(jar.body_count(), 6);

    jar.load_config_json(r#"{"capacity": 3}"#).unwrap();
    assert_eq!(jar.body_count(), 6);
    let report = jar.apply_events(&events(6..8), 300.0, 300.0);
    assert_eq!(report.created, 0);
    assert_eq!(report.dropped, 2);

    jar.reset();
    let report = jar.apply_events(&events(0..5), 300.0, 300.0);
    assert_eq!(report.created, 3);
    assert!(jar.body_count() + jar.pending_count() <= 3);
}

#[test]
fn head_on_marbles_bounce_apart_slower() {
    let mut jar = JarCore::new(300.0, 300.0);
    let speed = 3.0;
    drop_marble(&mut jar, 139.0, 150.0, speed, 0.0);
    drop_marble(&mut jar, 161.0, 150.0, -speed, 0.0);
    let closing = 2.0 * speed;

    jar.step(FRAME_MS);

    let bodies = jar.marbles().bodies();
    let separating = bodies[1].velocity.x - bodies[0].velocity.x;
    let restitution = jar.config().restitution;
    assert!(separating > 0.0);
    assert!(separating <= (1.0 + restitution) / 2.0 * closing);
    assert!(bodies[0].pos.distance(bodies[1].pos) >= 24.0 - 1e-3);
}

#[test]
fn reset_clears_everything_and_allows_respawn() {
    let mut jar = JarCore::new(300.0, 300.0);
    jar.apply_events(&events(0..6), 300.0, 300.0);
    for _ in 0..10 {
        jar.step(FRAME_MS);
    }

    jar.reset();
    assert_eq!(jar.body_count(), 0);
    assert_eq!(jar.pending_count(), 0);
    assert_eq!(jar.displayed_count(), 0);
    assert_eq!(jar.frame(), 0);
    assert!(!jar.is_draining());
    assert!(jar.category_key(0).is_none());

    let report = jar.apply_events(&events(0..6), 300.0, 300.0);
    assert_eq!(report.created, 6);
}

#[test]
fn render_buffer_and_snapshot_agree() {
    let mut jar = JarCore::new(300.0, 300.0);
    jar.apply_events(
        &[SpawnEvent::new("a", "girl"), SpawnEvent::new("b", "boy")],
        300.0,
        300.0,
    );
    for _ in 0..5 {
        jar.step(FRAME_MS);
    }

    let count = jar.extract_render_buffer();
    assert_eq!(count, 2);
    let buf = jar.render_buffer();
    assert_eq!(buf.len(), 2 * RENDER_STRIDE);

    let snap = jar.snapshot();
    assert_eq!(snap.len(), 2);
    for (i, body) in snap.iter().enumerate() {
        let row = &buf[i * RENDER_STRIDE..(i + 1) * RENDER_STRIDE];
        assert_eq!(row[0], body.position.x);
        assert_eq!(row[1], body.position.y);
        assert_eq!(row[2], body.radius);
        assert_eq!(jar.category_key(row[3] as CategoryId), Some(body.category.as_str()));
    }
    assert_eq!(snap[0].id, "a");
    assert_eq!(snap[1].category, "boy");

    let json = jar.snapshot_json();
    assert!(json.contains("\"id\":\"a\""));
}

#[test]
fn pending_marbles_are_not_rendered() {
    let mut jar = JarCore::new(300.0, 300.0);
    jar.apply_events(&events(0..4), 300.0, 300.0);
    assert_eq!(jar.extract_render_buffer(), 1);
    assert_eq!(jar.snapshot().len(), 1);
}

#[test]
fn resize_moves_marbles_into_the_new_jar() {
    let mut jar = JarCore::new(400.0, 400.0);
    drop_marble(&mut jar, 380.0, 380.0, 0.0, 0.0);
    jar.set_container(200.0, 200.0);
    jar.step(FRAME_MS);
    assert_inside(&jar);
}

#[test]
fn degenerate_container_is_clamped() {
    let mut jar = JarCore::new(0.0, -5.0);
    assert_eq!(jar.width(), 1.0);
    assert_eq!(jar.height(), 1.0);
    jar.apply_events(&events(0..3), 0.0, 0.0);
    for _ in 0..10 {
        jar.step(FRAME_MS);
    }
    for m in jar.marbles().bodies() {
        assert!(m.pos.x.is_finite() && m.pos.y.is_finite());
    }
}

#[test]
fn apply_events_json_reports_parse_errors() {
    let mut jar = JarCore::new(300.0, 300.0);
    let report = jar
        .apply_events_json(r#"[{"id":"x","category":"girl"}]"#, 300.0, 300.0)
        .unwrap();
    assert_eq!(report.created, 1);

    let err = jar.apply_events_json("{not json", 300.0, 300.0).unwrap_err();
    assert!(matches!(err, JarError::EventParse(_)));
}

#[test]
fn invalid_config_is_rejected_and_old_one_kept() {
    let mut jar = JarCore::new(300.0, 300.0);
    let err = jar.load_config_json(r#"{"restitution": 3.0}"#).unwrap_err();
    assert!(matches!(err, JarError::InvalidConfig(_)));
    assert_eq!(jar.config().restitution, 0.4);

    jar.load_config_json(r#"{"gravity": 0.5, "capacity": 20}"#).unwrap();
    assert_eq!(jar.config().gravity, 0.5);
    assert_eq!(jar.config().capacity, 20);
}

#[test]
fn perf_stats_track_the_last_step() {
    let mut jar = JarCore::new(300.0, 300.0);
    jar.apply_events(&events(0..3), 300.0, 300.0);

    jar.step(FRAME_MS);
    assert_eq!(jar.get_perf_stats().body_count(), 0);

    jar.enable_perf_metrics(true);
    jar.step(60.0);
    let stats = jar.get_perf_stats();
    assert!(stats.step_ms() >= 0.0);
    assert_eq!(stats.body_count(), 2);
    assert_eq!(stats.promoted(), 1);
    assert_eq!(stats.pair_checks(), jar.config().solver_iterations);

    jar.enable_perf_metrics(false);
    assert_eq!(jar.get_perf_stats().body_count(), 0);
}

#[test]
fn frame_counts_steps() {
    let mut jar = JarCore::new(100.0, 100.0);
    for _ in 0..7 {
        jar.step(FRAME_MS);
    }
    assert_eq!(jar.frame(), 7);
}
