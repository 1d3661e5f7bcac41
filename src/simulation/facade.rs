use wasm_bindgen::prelude::*;

use super::perf_stats::PerfStats;
use super::{JarCore, RENDER_STRIDE};
use crate::domain::{JarConfig, SpawnEvent};

#[wasm_bindgen]
pub struct Jar {
    core: JarCore,
}

#[wasm_bindgen]
impl Jar {
    /// Create an empty jar with the default constants
    #[wasm_bindgen(constructor)]
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            core: JarCore::new(width, height),
        }
    }

    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(width: f32, height: f32, config_json: String) -> Result<Jar, JsValue> {
        let config = JarConfig::from_json(&config_json).map_err(to_js)?;
        let core = JarCore::with_config(width, height, config).map_err(to_js)?;
        Ok(Self { core })
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> f32 { self.core.width() }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> f32 { self.core.height() }

    #[wasm_bindgen(getter)]
    pub fn frame(&self) -> u64 { self.core.frame() }

    #[wasm_bindgen(getter)]
    pub fn body_count(&self) -> usize { self.core.body_count() }

    #[wasm_bindgen(getter)]
    pub fn pending_count(&self) -> usize { self.core.pending_count() }

    #[wasm_bindgen(getter)]
    pub fn resting_count(&self) -> usize { self.core.resting_count() }

    pub fn is_settled(&self) -> bool {
        self.core.is_settled()
    }

    pub fn set_container(&mut self, width: f32, height: f32) {
        self.core.set_container(width, height);
    }

    pub fn load_config(&mut self, json: String) -> Result<(), JsValue> {
        self.core.load_config_json(&json).map_err(to_js)
    }

    pub fn config_json(&self) -> String {
        self.core.config().to_json()
    }

    /// Apply the full record list (JSON array of `{id, category}`).
    /// Returns the number of marbles queued.
    #[wasm_bindgen(js_name = applyEventsJson)]
    pub fn apply_events_json(&mut self, json: String, width: f32, height: f32) -> Result<u32, JsValue> {
        let report = self.core.apply_events_json(&json, width, height).map_err(to_js)?;
        Ok(report.created)
    }

    /// Single-record variant for hosts that stream changes.
    #[wasm_bindgen(js_name = applyEvent)]
    pub fn apply_event(&mut self, id: String, category: String, width: f32, height: f32) -> bool {
        let report = self
            .core
            .apply_events(&[SpawnEvent { id, category }], width, height);
        report.created > 0
    }

    pub fn reset(&mut self) {
        self.core.reset()
    }

    /// Advance one tick; `dt_ms` is the frame delta
    pub fn step(&mut self, dt_ms: f64) {
        self.core.step(dt_ms);
    }

    /// Active marbles as `[{id, position, radius, category, resting}]`
    #[wasm_bindgen(js_name = snapshotJson)]
    pub fn snapshot_json(&self) -> String {
        self.core.snapshot_json()
    }

    /// Fill the render buffer and return the marble count
    pub fn extract_render_buffer(&mut self) -> usize {
        self.core.extract_render_buffer()
    }

    /// Get pointer to the render buffer (read through wasm memory)
    pub fn render_buffer_ptr(&self) -> *const f32 {
        self.core.render_buffer_ptr()
    }

    pub fn render_buffer_len(&self) -> usize {
        self.core.render_buffer().len()
    }

    pub fn render_stride(&self) -> usize {
        RENDER_STRIDE
    }

    pub fn category_key(&self, id: u16) -> Option<String> {
        self.core.category_key(id).map(str::to_string)
    }

    pub fn categories_manifest_json(&self) -> String {
        self.core.categories_manifest_json()
    }

    /// Enable or disable per-step perf metrics (adds timing overhead when enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        self.core.enable_perf_metrics(enabled);
    }

    /// Get last step perf snapshot (zeros when perf disabled)
    pub fn get_perf_stats(&self) -> PerfStats {
        self.core.get_perf_stats()
    }
}

fn to_js(err: crate::error::JarError) -> JsValue {
    JsValue::from_str(&err.to_string())
}
