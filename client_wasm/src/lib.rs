//! WebGPU particle background for the site
//!
//! wgpu 24.0 with the "webgpu" feature, a Canvas 2D fallback without links,
//! and a static CSS gradient when neither context is available.
//! Browser-only modules are compiled for wasm32 only.

pub mod instances;
pub mod mesh;
pub mod splash;
pub mod viewport;

#[cfg(target_arch = "wasm32")]
mod background;
#[cfg(target_arch = "wasm32")]
mod canvas2d;
#[cfg(target_arch = "wasm32")]
mod renderer;
#[cfg(target_arch = "wasm32")]
mod scheduler;

#[cfg(target_arch = "wasm32")]
pub use background::{start_background, ParticleBackground};
pub use splash::SplashProgress;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"logger already initialised".into());
    }
    log::info!("Particle background module loaded");
}
