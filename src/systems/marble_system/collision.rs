use crate::domain::JarConfig;
use crate::marble::{Marble, Vec2};

use super::boundary::Container;

/// Axis used when two centers coincide exactly.
const FALLBACK_AXIS: Vec2 = Vec2 { x: 0.01, y: 0.01 };
const MIN_DISTANCE: f32 = 1e-4;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CollisionStats {
    pub pair_checks: u32,
    pub overlaps: u32,
    pub impulses: u32,
    /// Deepest overlap seen in the first relaxation iteration.
    pub max_penetration: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Contact {
    Apart,
    Overlap { penetration: f32, bounced: bool },
}

/// Gauss-Seidel relaxation over all pairs.
///
/// Each iteration walks every unordered pair once, then clamps positions back
/// into the jar so the boundary and the pairwise corrections converge together.
/// O(n²) per iteration.
pub(super) fn resolve_collisions(
    bodies: &mut [Marble],
    container: Container,
    config: &JarConfig,
) -> CollisionStats {
    let mut stats = CollisionStats::default();
    let n = bodies.len();

    for iteration in 0..config.solver_iterations {
        for i in 0..n {
            let (head, tail) = bodies.split_at_mut(i + 1);
            let a = &mut head[i];
            for b in tail.iter_mut() {
                stats.pair_checks += 1;
                if let Contact::Overlap { penetration, bounced } =
                    resolve_pair(a, b, config.restitution, config.collision_bias)
                {
                    stats.overlaps += 1;
                    if bounced {
                        stats.impulses += 1;
                    }
                    if iteration == 0 {
                        stats.max_penetration = stats.max_penetration.max(penetration);
                    }
                }
            }
        }

        for body in bodies.iter_mut() {
            container.clamp_position(body);
        }
    }

    stats
}

/// Separate one overlapping pair and, if they are closing, bounce them.
///
/// The normal points from `a` to `b`. Each body is pushed half the penetration
/// along it, except that `bias` of the correction moves from the lower body to
/// the higher one (smaller y) so piles do not sink into themselves.
fn resolve_pair(a: &mut Marble, b: &mut Marble, restitution: f32, bias: f32) -> Contact {
    let reach = a.radius() + b.radius();
    let mut axis = b.pos - a.pos;
    let mut dist_sq = axis.length_squared();
    if dist_sq >= reach * reach {
        return Contact::Apart;
    }
    if dist_sq < MIN_DISTANCE * MIN_DISTANCE {
        axis = FALLBACK_AXIS;
        dist_sq = axis.length_squared();
    }

    let dist = dist_sq.sqrt();
    let normal = axis * (1.0 / dist);
    let penetration = reach - dist;

    let (share_a, share_b) = if a.pos.y < b.pos.y {
        (0.5 + bias, 0.5 - bias)
    } else if b.pos.y < a.pos.y {
        (0.5 - bias, 0.5 + bias)
    } else {
        (0.5, 0.5)
    };
    a.pos -= normal * (penetration * share_a);
    b.pos += normal * (penetration * share_b);

    let closing = (b.velocity - a.velocity).dot(normal);
    if closing >= 0.0 {
        return Contact::Overlap { penetration, bounced: false };
    }

    // Unit masses: the impulse is split evenly between the two bodies.
    let j = -(1.0 + restitution) * closing * 0.5;
    a.apply_impulse(-(normal * j));
    b.apply_impulse(normal * j);

    Contact::Overlap { penetration, bounced: true }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marble(key: u32, x: f32, y: f32, vx: f32, vy: f32) -> Marble {
        let mut m = Marble::new(key, format!("r{}", key), 0, Vec2::new(x, y), 12.0);
        m.velocity = Vec2::new(vx, vy);
        m
    }

    #[test]
    fn head_on_pair_separates_with_reduced_speed() {
        let config = JarConfig::default();
        let container = Container::new(300.0, 300.0);
        let speed = 3.0;
        let mut bodies = vec![
            marble(1, 139.0, 150.0, speed, 0.0),
            marble(2, 161.0, 150.0, -speed, 0.0),
        ];
        let closing_before = 2.0 * speed;

        let stats = resolve_collisions(&mut bodies, container, &config);
        assert_eq!(stats.impulses, 1);

        let separating = bodies[1].velocity.x - bodies[0].velocity.x;
        assert!(separating > 0.0, "bodies should move apart, got {}", separating);
        assert!(separating <= (1.0 + config.restitution) / 2.0 * closing_before + 1e-4);
        assert!((separating - config.restitution * closing_before).abs() < 1e-4);
        assert!(bodies[0].pos.distance(bodies[1].pos) >= 24.0 - 1e-3);
    }

    #[test]
    fn separating_pair_gets_no_impulse() {
        let config = JarConfig::default();
        let container = Container::new(300.0, 300.0);
        let mut bodies = vec![
            marble(1, 140.0, 150.0, -1.0, 0.0),
            marble(2, 160.0, 150.0, 1.0, 0.0),
        ];
        let stats = resolve_collisions(&mut bodies, container, &config);
        assert_eq!(stats.impulses, 0);
        assert_eq!(bodies[0].velocity, Vec2::new(-1.0, 0.0));
        assert_eq!(bodies[1].velocity, Vec2::new(1.0, 0.0));
    }

    #[test]
    fn coincident_centers_are_pushed_apart() {
        let config = JarConfig::default();
        let container = Container::new(300.0, 300.0);
        let mut bodies = vec![marble(1, 150.0, 150.0, 0.0, 0.0), marble(2, 150.0, 150.0, 0.0, 0.0)];
        resolve_collisions(&mut bodies, container, &config);
        assert!(bodies[0].pos.x.is_finite() && bodies[1].pos.y.is_finite());
        assert!(bodies[0].pos.distance(bodies[1].pos) > 23.0);
    }

    #[test]
    fn higher_body_takes_the_larger_share() {
        let mut upper = marble(1, 100.0, 100.0, 0.0, 0.0);
        let mut lower = marble(2, 100.0, 120.0, 0.0, 0.0);
        resolve_pair(&mut upper, &mut lower, 0.4, 0.1);
        let up = 100.0 - upper.pos.y;
        let down = lower.pos.y - 120.0;
        assert!(up > down);
        assert!((up + down - 4.0).abs() < 1e-4);
    }

    #[test]
    fn positions_end_inside_the_jar() {
        let config = JarConfig::default();
        let container = Container::new(100.0, 100.0);
        let mut bodies = vec![marble(1, 12.0, 88.0, 0.0, 0.0), marble(2, 14.0, 86.0, 0.0, 0.0)];
        resolve_collisions(&mut bodies, container, &config);
        for b in &bodies {
            assert!(b.pos.x >= 12.0 && b.pos.x <= 88.0);
            assert!(b.pos.y >= 12.0 && b.pos.y <= 88.0);
        }
    }
}
