//! JS-facing particle background
//!
//! The page owns one `ParticleBackground` per canvas; there is no global.

use crate::canvas2d::{FallbackSurface, StaticSurface};
use crate::renderer::PrimarySurface;
use crate::scheduler::{AnimationFrameScheduler, FrameCallback};
use field_core::{select_backend, FieldConfig, ParticleRenderer, Surface};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys::HtmlCanvasElement;

#[wasm_bindgen]
pub struct ParticleBackground {
    canvas: HtmlCanvasElement,
    renderer: Rc<RefCell<ParticleRenderer>>,
    callback: FrameCallback,
}

#[wasm_bindgen]
impl ParticleBackground {
    /// Size `canvas` to the viewport and pick the best surface for it
    ///
    /// Only rejects without a `window`; every surface failure degrades to a
    /// simpler one.
    pub async fn create(canvas: HtmlCanvasElement) -> Result<ParticleBackground, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        fit_to_viewport(&window, &canvas);

        let primary = PrimarySurface::new(canvas.clone())
            .await
            .map(|s| Box::new(s) as Box<dyn Surface>);
        let backend = select_backend(
            primary,
            || FallbackSurface::new(canvas.clone()).map(|s| Box::new(s) as Box<dyn Surface>),
            || Box::new(StaticSurface::new(canvas.clone())),
        );

        let callback: FrameCallback = Rc::new(RefCell::new(None));
        let scheduler = AnimationFrameScheduler::new(window, callback.clone());
        let renderer = Rc::new(RefCell::new(ParticleRenderer::new(
            backend,
            Box::new(scheduler),
        )));

        // Weak: the renderer owns the scheduler, which owns this closure
        let weak = Rc::downgrade(&renderer);
        *callback.borrow_mut() = Some(Closure::wrap(Box::new(move |now_ms: f64| {
            let Some(renderer) = weak.upgrade() else {
                return;
            };
            match renderer.try_borrow_mut() {
                Ok(mut renderer) => renderer.on_frame(now_ms),
                Err(_) => log::warn!("Particle background: frame skipped, renderer busy"),
            };
        }) as Box<dyn FnMut(f64)>));

        Ok(Self {
            canvas,
            renderer,
            callback,
        })
    }

    /// Begin (or restart) the animation; `config_json` keys are all optional
    pub fn start(&self, config_json: Option<String>) {
        let config = match config_json.as_deref() {
            None | Some("") => FieldConfig::default(),
            Some(json) => FieldConfig::from_json(json).unwrap_or_else(|e| {
                log::warn!("Particle background: {e}; using defaults");
                FieldConfig::default()
            }),
        };

        match self.renderer.try_borrow_mut() {
            Ok(mut renderer) => renderer.start(config, random_seed()),
            Err(_) => log::warn!("Particle background: start ignored, renderer busy"),
        }
    }

    /// Halt the loop; safe to call repeatedly
    pub fn stop(&self) {
        if let Ok(mut renderer) = self.renderer.try_borrow_mut() {
            renderer.stop();
        }
    }

    #[wasm_bindgen(js_name = onResize)]
    pub fn on_resize(&self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        if let Ok(mut renderer) = self.renderer.try_borrow_mut() {
            renderer.on_resize(width, height);
        }
    }

    /// Stop and release the frame closure; the instance is inert afterwards
    pub fn destroy(&self) {
        self.stop();
        self.callback.borrow_mut().take();
    }

    /// `"primary"`, `"fallback"` or `"static"`
    #[wasm_bindgen(getter)]
    pub fn mode(&self) -> String {
        self.renderer.borrow().mode().as_str().to_string()
    }

    #[wasm_bindgen(getter, js_name = isRunning)]
    pub fn is_running(&self) -> bool {
        self.renderer.borrow().is_running()
    }

    #[wasm_bindgen(getter, js_name = framesDrawn)]
    pub fn frames_drawn(&self) -> f64 {
        self.renderer.borrow().frames_drawn() as f64
    }
}

impl Drop for ParticleBackground {
    fn drop(&mut self) {
        self.destroy();
    }
}

/// `create` + `start` in one call
#[wasm_bindgen(js_name = startBackground)]
pub async fn start_background(
    canvas: HtmlCanvasElement,
    config_json: Option<String>,
) -> Result<ParticleBackground, JsValue> {
    let background = ParticleBackground::create(canvas).await?;
    background.start(config_json);
    Ok(background)
}

fn fit_to_viewport(window: &web_sys::Window, canvas: &HtmlCanvasElement) {
    let dimension = |v: Result<JsValue, JsValue>| {
        v.ok()
            .and_then(|v| v.as_f64())
            .filter(|v| *v >= 1.0)
            .map(|v| v as u32)
    };
    if let (Some(w), Some(h)) = (
        dimension(window.inner_width()),
        dimension(window.inner_height()),
    ) {
        canvas.set_width(w);
        canvas.set_height(h);
    }
}

fn random_seed() -> u64 {
    let high = (js_sys::Math::random() * u32::MAX as f64) as u64;
    let low = (js_sys::Math::random() * u32::MAX as f64) as u64;
    (high << 32) | low
}
