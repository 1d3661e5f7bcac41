use crate::domain::JarConfig;
use crate::marble::Marble;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Below this many bodies the per-body passes stay on the calling thread.
#[cfg(feature = "parallel")]
pub(super) const PARALLEL_MIN_BODIES: usize = 512;

/// Semi-implicit Euler: gravity, friction and the velocity clamp update the
/// velocity first, then the position moves by the new velocity.
#[inline]
fn integrate_one(body: &mut Marble, config: &JarConfig) {
    body.velocity.y += config.gravity;
    body.velocity *= config.friction;
    body.velocity = body.velocity.clamp_components(config.max_velocity);
    body.pos += body.velocity;
}

pub(super) fn integrate(bodies: &mut [Marble], config: &JarConfig) {
    #[cfg(feature = "parallel")]
    if bodies.len() >= PARALLEL_MIN_BODIES {
        bodies.par_iter_mut().for_each(|body| integrate_one(body, config));
        return;
    }

    for body in bodies.iter_mut() {
        integrate_one(body, config);
    }
}
