use serde::Serialize;

use crate::marble::Vec2;

use super::JarCore;

/// Floats per marble in the render buffer: `x, y, radius, category`.
pub const RENDER_STRIDE: usize = 4;

/// One active marble as the renderer sees it.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BodySnapshot {
    pub id: String,
    pub position: Vec2,
    pub radius: f32,
    pub category: String,
    pub resting: bool,
}

pub(super) fn snapshot(jar: &JarCore) -> Vec<BodySnapshot> {
    jar.marbles
        .bodies()
        .iter()
        .map(|m| BodySnapshot {
            id: m.record_id.clone(),
            position: m.pos,
            radius: m.radius(),
            category: jar.categories.key(m.category).unwrap_or_default().to_string(),
            resting: m.is_resting(),
        })
        .collect()
}

pub(super) fn snapshot_json(jar: &JarCore) -> String {
    serde_json::to_string(&snapshot(jar)).unwrap_or_else(|_| "[]".to_string())
}

/// Pending marbles are never written; only what the physics has touched.
pub(super) fn extract_render_buffer(jar: &mut JarCore) -> usize {
    let bodies = jar.marbles.bodies();
    jar.render_buffer.clear();
    jar.render_buffer.reserve(bodies.len() * RENDER_STRIDE);
    for m in bodies {
        jar.render_buffer
            .extend_from_slice(&[m.pos.x, m.pos.y, m.radius(), m.category as f32]);
    }
    bodies.len()
}
