use crate::marble::Marble;

/// Rectangular jar bounds, origin at the top-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Container {
    pub width: f32,
    pub height: f32,
}

impl Container {
    /// Non-finite and sub-pixel sizes are clamped to 1 rather than rejected.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: sanitize(width),
            height: sanitize(height),
        }
    }

    /// Allowed center range on the x axis for a disc of `radius`.
    /// Collapses to a single point when the jar is narrower than the disc.
    #[inline]
    pub fn x_range(&self, radius: f32) -> (f32, f32) {
        (radius, (self.width - radius).max(radius))
    }

    #[inline]
    pub fn y_range(&self, radius: f32) -> (f32, f32) {
        (radius, (self.height - radius).max(radius))
    }

    /// Resting line of a disc's center.
    #[inline]
    pub fn floor(&self, radius: f32) -> f32 {
        self.y_range(radius).1
    }

    /// Position-only clamp used between relaxation iterations.
    #[inline]
    pub fn clamp_position(&self, body: &mut Marble) {
        let r = body.radius();
        let (min_x, max_x) = self.x_range(r);
        let (min_y, max_y) = self.y_range(r);
        body.pos.x = body.pos.x.clamp(min_x, max_x);
        body.pos.y = body.pos.y.clamp(min_y, max_y);
    }
}

fn sanitize(v: f32) -> f32 {
    if v.is_finite() {
        v.max(1.0)
    } else {
        1.0
    }
}

/// Clamp every body into the jar and bounce it off the walls it touches.
///
/// Returns the number of wall contacts.
pub(super) fn constrain(bodies: &mut [Marble], container: Container, damping: f32) -> u32 {
    let mut contacts = 0u32;
    for body in bodies.iter_mut() {
        let r = body.radius();
        let (min_x, max_x) = container.x_range(r);
        let (min_y, max_y) = container.y_range(r);
        if reflect_axis(&mut body.pos.x, &mut body.velocity.x, min_x, max_x, damping) {
            contacts += 1;
        }
        if reflect_axis(&mut body.pos.y, &mut body.velocity.y, min_y, max_y, damping) {
            contacts += 1;
        }
    }
    contacts
}

/// A body beyond a wall, or sitting on it while still moving into it, is put
/// back on the wall with its velocity negated and damped.
#[inline]
fn reflect_axis(pos: &mut f32, vel: &mut f32, min: f32, max: f32, damping: f32) -> bool {
    if *pos < min || (*pos <= min && *vel < 0.0) {
        *pos = min;
        *vel = -*vel * damping;
        return true;
    }
    if *pos > max || (*pos >= max && *vel > 0.0) {
        *pos = max;
        *vel = -*vel * damping;
        return true;
    }
    false
}
