use crate::domain::JarConfig;
use crate::marble::{Marble, Vec2};

use super::boundary::Container;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Visual-stability passes for a settled pile. Returns true when the body
/// ends the tick resting.
#[inline]
fn stabilize_one(body: &mut Marble, container: Container, config: &JarConfig) -> bool {
    // Pressure compensation near the bottom of the jar.
    if body.pos.y > container.height * config.pressure_zone {
        body.velocity.y *= config.pressure_damping;
    }

    // Dynamic friction in the lower part of the jar.
    if body.pos.y > container.height * config.friction_zone {
        body.velocity *= config.zone_friction;
    }

    // Bottom-overlap prevention: a body about to sink into the floor lands on it.
    let floor = container.floor(body.radius());
    if body.velocity.y > 0.0 && body.pos.y >= floor - config.floor_tolerance {
        body.pos.y = floor;
        body.velocity.y = 0.0;
    }

    // Rest snap.
    if body.velocity.x.abs() < config.rest_epsilon && body.velocity.y.abs() < config.rest_epsilon {
        body.velocity = Vec2::ZERO;
        return true;
    }
    false
}

/// Returns the number of resting bodies.
pub(super) fn stabilize(bodies: &mut [Marble], container: Container, config: &JarConfig) -> u32 {
    #[cfg(feature = "parallel")]
    if bodies.len() >= super::integrate::PARALLEL_MIN_BODIES {
        return bodies
            .par_iter_mut()
            .map(|body| stabilize_one(body, container, config) as u32)
            .sum();
    }

    bodies
        .iter_mut()
        .map(|body| stabilize_one(body, container, config) as u32)
        .sum()
}
