/// Lap timer for the per-phase step metrics. `Instant` panics on
/// wasm32-unknown-unknown, so the browser clock is used there.
pub(crate) struct Stopwatch {
    #[cfg(target_arch = "wasm32")]
    last_ms: f64,
    #[cfg(not(target_arch = "wasm32"))]
    last: std::time::Instant,
}

impl Stopwatch {
    pub(crate) fn start() -> Self {
        #[cfg(target_arch = "wasm32")]
        {
            Stopwatch { last_ms: js_sys::Date::now() }
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            Stopwatch { last: std::time::Instant::now() }
        }
    }

    /// Milliseconds since `start` or the previous lap.
    pub(crate) fn lap_ms(&mut self) -> f64 {
        #[cfg(target_arch = "wasm32")]
        {
            let now = js_sys::Date::now();
            let elapsed = now - self.last_ms;
            self.last_ms = now;
            elapsed
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            let now = std::time::Instant::now();
            let elapsed = now.duration_since(self.last).as_secs_f64() * 1000.0;
            self.last = now;
            elapsed
        }
    }
}
