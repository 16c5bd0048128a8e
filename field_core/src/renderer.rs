//! Renderer lifecycle
//!
//! `ParticleRenderer` owns the field, the surface chosen at construction and
//! the pending frame handle. Hosts call `on_frame` from their frame callback;
//! everything else (`start`, `stop`, `on_resize`) is ordinary method calls on
//! the same thread.

use crate::{Bounds, FieldConfig, FrameScene, ParticleField, RenderError};

/// Which surface the renderer ended up with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// GPU surface: particles and links
    Primary,
    /// 2D canvas: particles only
    Fallback,
    /// One gradient, no animation
    Static,
}

impl RenderMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            RenderMode::Primary => "primary",
            RenderMode::Fallback => "fallback",
            RenderMode::Static => "static",
        }
    }

    pub fn animates(&self) -> bool {
        !matches!(self, RenderMode::Static)
    }

    /// The proximity-line step is skipped on the cheaper surfaces
    pub fn draws_links(&self) -> bool {
        matches!(self, RenderMode::Primary)
    }
}

/// Something a frame scene can be drawn onto
pub trait Surface {
    /// Current size in pixels
    fn size(&self) -> (u32, u32);

    fn resize(&mut self, width: u32, height: u32);

    /// Clear and draw one frame
    fn draw(&mut self, scene: &FrameScene) -> Result<(), RenderError>;
}

/// Host per-refresh callback registration
pub trait FrameScheduler {
    /// Ask for one callback on the next refresh; returns a cancel handle
    fn request_frame(&mut self) -> Result<i32, RenderError>;

    fn cancel_frame(&mut self, handle: i32);
}

/// The surface picked at construction and the mode it implies
pub struct Backend {
    mode: RenderMode,
    surface: Box<dyn Surface>,
}

impl Backend {
    pub fn new(mode: RenderMode, surface: Box<dyn Surface>) -> Self {
        Self { mode, surface }
    }

    pub fn mode(&self) -> RenderMode {
        self.mode
    }
}

/// Pick the best available surface
///
/// `fallback` is only tried when `primary` failed, and `fixed` only when both
/// did. Failures are logged, never returned.
pub fn select_backend(
    primary: Result<Box<dyn Surface>, RenderError>,
    fallback: impl FnOnce() -> Result<Box<dyn Surface>, RenderError>,
    fixed: impl FnOnce() -> Box<dyn Surface>,
) -> Backend {
    let primary_err = match primary {
        Ok(surface) => {
            log::info!("Particle background: GPU surface ready");
            return Backend::new(RenderMode::Primary, surface);
        }
        Err(e) => e,
    };
    log::warn!("Particle background: GPU surface unavailable ({primary_err}), trying 2D canvas");

    match fallback() {
        Ok(surface) => Backend::new(RenderMode::Fallback, surface),
        Err(e) => {
            log::warn!("Particle background: 2D canvas unavailable ({e}), painting static gradient");
            Backend::new(RenderMode::Static, fixed())
        }
    }
}

/// Drives one particle field on one surface
pub struct ParticleRenderer {
    backend: Backend,
    scheduler: Box<dyn FrameScheduler>,
    field: Option<ParticleField>,
    config: FieldConfig,
    pending_frame: Option<i32>,
    running: bool,
    frames_drawn: u64,
    last_now_ms: f64,
}

impl ParticleRenderer {
    pub fn new(backend: Backend, scheduler: Box<dyn FrameScheduler>) -> Self {
        Self {
            backend,
            scheduler,
            field: None,
            config: FieldConfig::default(),
            pending_frame: None,
            running: false,
            frames_drawn: 0,
            last_now_ms: 0.0,
        }
    }

    /// (Re)initialize the field and begin the loop
    ///
    /// Never fails: an invalid config falls back to defaults, a draw failure
    /// leaves the renderer stopped.
    pub fn start(&mut self, config: FieldConfig, seed: u64) {
        if self.running {
            self.stop();
        }

        self.config = config.or_default();
        let (width, height) = self.backend.surface.size();
        let bounds = Bounds::from_pixels(width, height).unwrap_or_else(|| {
            log::warn!("Particle background: empty surface {width}x{height}, waiting for resize");
            Bounds::UNIT
        });

        if !self.backend.mode.animates() {
            self.field = None;
            self.paint_static(bounds);
            return;
        }

        self.field = Some(ParticleField::new(self.config.clone(), bounds, seed));
        self.running = true;
        log::info!(
            "Particle background started: {} particles, {} mode",
            self.config.particle_count,
            self.backend.mode.as_str()
        );

        // First frame right away, the rest from the host
        let now_ms = self.last_now_ms;
        if self.draw_frame(now_ms) {
            self.schedule_next();
        }
    }

    /// Halt the loop and cancel any pending frame; idempotent
    pub fn stop(&mut self) {
        if let Some(handle) = self.pending_frame.take() {
            self.scheduler.cancel_frame(handle);
        }
        if self.running {
            log::info!("Particle background stopped after {} frames", self.frames_drawn);
        }
        self.running = false;
    }

    /// Host frame callback
    pub fn on_frame(&mut self, now_ms: f64) {
        self.pending_frame = None;
        if !self.running {
            return;
        }

        self.last_now_ms = now_ms;
        if self.draw_frame(now_ms) {
            self.schedule_next();
        }
    }

    /// New viewport size; zero-sized updates are ignored
    pub fn on_resize(&mut self, width: u32, height: u32) {
        let Some(bounds) = Bounds::from_pixels(width, height) else {
            log::debug!("Particle background: ignoring resize to {width}x{height}");
            return;
        };

        self.backend.surface.resize(width, height);
        if let Some(field) = self.field.as_mut() {
            field.resize(bounds);
        }

        // Resizing a canvas wipes it; the static gradient has no next frame
        if !self.backend.mode.animates() {
            self.paint_static(bounds);
        }
    }

    pub fn mode(&self) -> RenderMode {
        self.backend.mode
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn has_pending_frame(&self) -> bool {
        self.pending_frame.is_some()
    }

    /// Frames drawn since construction (static paints included)
    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }

    pub fn field(&self) -> Option<&ParticleField> {
        self.field.as_ref()
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    fn paint_static(&mut self, bounds: Bounds) {
        let scene = FrameScene::backdrop_only(bounds, &self.config);
        match self.backend.surface.draw(&scene) {
            Ok(()) => self.frames_drawn += 1,
            Err(e) => log::error!("Particle background: static paint failed: {e}"),
        }
    }

    /// Step, build and draw one frame; `false` ends the loop
    fn draw_frame(&mut self, now_ms: f64) -> bool {
        let Some(field) = self.field.as_mut() else {
            self.running = false;
            return false;
        };

        field.step(now_ms);
        let scene = field.scene(self.backend.mode.draws_links());

        match self.backend.surface.draw(&scene) {
            Ok(()) => {
                self.frames_drawn += 1;
                true
            }
            Err(e) => {
                log::error!("Particle background: {e}; stopping animation");
                self.running = false;
                false
            }
        }
    }

    fn schedule_next(&mut self) {
        match self.scheduler.request_frame() {
            Ok(handle) => self.pending_frame = Some(handle),
            Err(e) => {
                log::error!("Particle background: {e}; stopping animation");
                self.running = false;
            }
        }
    }
}

impl Drop for ParticleRenderer {
    fn drop(&mut self) {
        self.stop();
    }
}
