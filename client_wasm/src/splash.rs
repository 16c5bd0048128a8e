//! Splash screen progress for the page
//!
//! Wraps `field_core::SplashLoader`; the page calls `tick` from its own
//! animation frame with the frame timestamp.

use field_core::{LoadingState, SplashLoader};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg_attr(target_arch = "wasm32", wasm_bindgen(js_name = SplashLoader))]
pub struct SplashProgress {
    loader: SplashLoader,
    last_ms: Option<f64>,
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen(js_class = SplashLoader))]
impl SplashProgress {
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen(constructor))]
    pub fn new() -> Self {
        Self::with_loader(SplashLoader::new(seed()))
    }

    /// Start loading; false unless idle
    pub fn begin(&mut self) -> bool {
        let started = self.loader.begin();
        if started {
            self.last_ms = None;
        }
        started
    }

    /// Advance to frame timestamp `now_ms`, returning the shown percentage
    ///
    /// The first tick after `begin` only records the timestamp.
    pub fn tick(&mut self, now_ms: f64) -> u8 {
        let dt = match self.last_ms {
            Some(last) if now_ms >= last => ((now_ms - last) / 1000.0) as f32,
            _ => 0.0,
        };
        self.last_ms = Some(now_ms);
        self.loader.tick(dt);
        self.loader.percentage()
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen(getter))]
    pub fn percentage(&self) -> u8 {
        self.loader.percentage()
    }

    /// Current state as string (for JS interop)
    pub fn state_string(&self) -> String {
        match self.loader.state() {
            LoadingState::Idle => "Idle",
            LoadingState::Loading { .. } => "Loading",
            LoadingState::Complete => "Complete",
        }
        .to_string()
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen(getter, js_name = isComplete))]
    pub fn is_complete(&self) -> bool {
        self.loader.is_complete()
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen(getter, js_name = readyToLeave))]
    pub fn ready_to_leave(&self) -> bool {
        self.loader.ready_to_leave()
    }

    pub fn reset(&mut self) {
        self.loader.reset();
        self.last_ms = None;
    }
}

impl SplashProgress {
    pub fn with_loader(loader: SplashLoader) -> Self {
        Self {
            loader,
            last_ms: None,
        }
    }
}

impl Default for SplashProgress {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(target_arch = "wasm32")]
fn seed() -> u64 {
    (js_sys::Math::random() * u32::MAX as f64) as u64
}

#[cfg(not(target_arch = "wasm32"))]
fn seed() -> u64 {
    12345
}

#[cfg(test)]
mod tests {
    use super::*;

    fn progress() -> SplashProgress {
        SplashProgress::with_loader(SplashLoader::new(5))
    }

    #[test]
    fn test_starts_idle() {
        let splash = progress();
        assert_eq!(splash.state_string(), "Idle");
        assert_eq!(splash.percentage(), 0);
    }

    #[test]
    fn test_first_tick_records_timestamp() {
        let mut splash = progress();
        assert!(splash.begin());
        assert_eq!(splash.tick(50_000.0), 0);
        assert_eq!(splash.state_string(), "Loading");
    }

    #[test]
    fn test_runs_to_complete_on_frame_timestamps() {
        let mut splash = progress();
        splash.begin();

        let mut now = 1_000.0;
        let mut last = 0;
        while !splash.is_complete() {
            let pct = splash.tick(now);
            assert!(pct >= last);
            last = pct;
            now += 16.0;
            assert!(now < 120_000.0, "never completed");
        }
        assert_eq!(splash.state_string(), "Complete");
        assert!(!splash.ready_to_leave());

        splash.tick(now + 900.0);
        assert!(splash.ready_to_leave());
    }

    #[test]
    fn test_repeated_begin_keeps_frame_time() {
        let mut splash = progress();
        splash.begin();
        splash.tick(0.0);
        assert!(!splash.begin());

        // 20 s since the last frame: every step lands
        splash.tick(20_000.0);
        assert!(splash.is_complete());
    }

    #[test]
    fn test_timestamp_going_back_is_ignored() {
        let mut splash = progress();
        splash.begin();
        splash.tick(5_000.0);
        splash.tick(1_000.0);
        assert_eq!(splash.percentage(), 0);
    }

    #[test]
    fn test_reset_allows_begin_again() {
        let mut splash = progress();
        splash.begin();
        splash.tick(0.0);
        splash.tick(30_000.0);
        assert!(splash.is_complete());

        splash.reset();
        assert_eq!(splash.state_string(), "Idle");
        assert!(splash.begin());
    }
}
