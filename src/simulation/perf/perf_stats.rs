use wasm_bindgen::prelude::*;

#[wasm_bindgen]
#[derive(Clone, Debug, Default)]
pub struct PerfStats {
    pub(super) step_ms: f64,
    pub(super) spawn_ms: f64,
    pub(super) integrate_ms: f64,
    pub(super) collision_ms: f64,
    pub(super) boundary_ms: f64,
    pub(super) stabilize_ms: f64,

    pub(super) promoted: u32,
    pub(super) body_count: u32,
    pub(super) pending_count: u32,
    pub(super) resting_count: u32,
    pub(super) pair_checks: u32,
    pub(super) overlaps: u32,
    pub(super) impulses: u32,
    pub(super) wall_contacts: u32,
    pub(super) max_penetration: f32,
    /// Largest distance any marble moved this tick.
    pub(super) max_step: f32,
}

impl PerfStats {
    pub(crate) fn reset(&mut self) {
        *self = PerfStats::default();
    }
}

#[wasm_bindgen]
impl PerfStats {
    #[wasm_bindgen(getter)]
    pub fn step_ms(&self) -> f64 { self.step_ms }
    #[wasm_bindgen(getter)]
    pub fn spawn_ms(&self) -> f64 { self.spawn_ms }
    #[wasm_bindgen(getter)]
    pub fn integrate_ms(&self) -> f64 { self.integrate_ms }
    #[wasm_bindgen(getter)]
    pub fn collision_ms(&self) -> f64 { self.collision_ms }
    #[wasm_bindgen(getter)]
    pub fn boundary_ms(&self) -> f64 { self.boundary_ms }
    #[wasm_bindgen(getter)]
    pub fn stabilize_ms(&self) -> f64 { self.stabilize_ms }
    #[wasm_bindgen(getter)]
    pub fn promoted(&self) -> u32 { self.promoted }
    #[wasm_bindgen(getter)]
    pub fn body_count(&self) -> u32 { self.body_count }
    #[wasm_bindgen(getter)]
    pub fn pending_count(&self) -> u32 { self.pending_count }
    #[wasm_bindgen(getter)]
    pub fn resting_count(&self) -> u32 { self.resting_count }
    #[wasm_bindgen(getter)]
    pub fn pair_checks(&self) -> u32 { self.pair_checks }
    #[wasm_bindgen(getter)]
    pub fn overlaps(&self) -> u32 { self.overlaps }
    #[wasm_bindgen(getter)]
    pub fn impulses(&self) -> u32 { self.impulses }
    #[wasm_bindgen(getter)]
    pub fn wall_contacts(&self) -> u32 { self.wall_contacts }
    #[wasm_bindgen(getter)]
    pub fn max_penetration(&self) -> f32 { self.max_penetration }
    #[wasm_bindgen(getter)]
    pub fn max_step(&self) -> f32 { self.max_step }
}
