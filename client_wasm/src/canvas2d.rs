//! Canvas 2D surfaces: the animated fallback and the static gradient

use field_core::{Backdrop, FrameScene, RenderError, Surface};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

/// Particles on a 2D context; the fallback when WebGPU is missing
pub struct FallbackSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl FallbackSurface {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, RenderError> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| RenderError::Initialization(format!("get_context threw: {:?}", e)))?
            .ok_or_else(|| RenderError::Initialization("canvas has no 2d context".to_string()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| RenderError::Initialization("context is not 2d".to_string()))?;

        Ok(Self { canvas, ctx })
    }

    #[allow(deprecated)]
    fn paint(&self, scene: &FrameScene) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        let (w, h) = (scene.bounds.width as f64, scene.bounds.height as f64);

        ctx.clear_rect(0.0, 0.0, w, h);
        paint_backdrop(ctx, &scene.backdrop, w, h)?;

        for dot in &scene.dots {
            ctx.save();
            ctx.set_global_alpha(dot.alpha as f64);
            ctx.set_fill_style(&JsValue::from_str(&dot.color.to_css()));
            ctx.begin_path();
            ctx.arc(
                dot.pos.x as f64,
                dot.pos.y as f64,
                dot.radius as f64,
                0.0,
                std::f64::consts::TAU,
            )?;
            ctx.fill();
            ctx.restore();
        }

        for link in &scene.links {
            ctx.begin_path();
            ctx.set_stroke_style(&JsValue::from_str(
                &link.color.with_alpha_scaled(link.opacity).to_css(),
            ));
            ctx.set_line_width(link.width as f64);
            ctx.move_to(link.from.x as f64, link.from.y as f64);
            ctx.line_to(link.to.x as f64, link.to.y as f64);
            ctx.stroke();
        }

        Ok(())
    }
}

impl Surface for FallbackSurface {
    fn size(&self) -> (u32, u32) {
        (self.canvas.width(), self.canvas.height())
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }

    fn draw(&mut self, scene: &FrameScene) -> Result<(), RenderError> {
        self.paint(scene)
            .map_err(|e| RenderError::Draw(format!("{:?}", e)))
    }
}

#[allow(deprecated)]
fn paint_backdrop(
    ctx: &CanvasRenderingContext2d,
    backdrop: &Backdrop,
    w: f64,
    h: f64,
) -> Result<(), JsValue> {
    let (cx, cy) = (backdrop.center.x as f64, backdrop.center.y as f64);
    let gradient = ctx.create_radial_gradient(cx, cy, 0.0, cx, cy, backdrop.radius as f64)?;
    gradient.add_color_stop(0.0, &backdrop.inner.to_css())?;
    gradient.add_color_stop(1.0, &backdrop.outer.to_css())?;
    ctx.set_fill_style(&gradient);
    ctx.fill_rect(0.0, 0.0, w, h);
    Ok(())
}

/// Last resort: a CSS gradient on the canvas element itself
///
/// Works whatever context the canvas is stuck with; only the backdrop of a
/// scene is used.
pub struct StaticSurface {
    canvas: HtmlCanvasElement,
}

impl StaticSurface {
    pub fn new(canvas: HtmlCanvasElement) -> Self {
        Self { canvas }
    }
}

impl Surface for StaticSurface {
    fn size(&self) -> (u32, u32) {
        (self.canvas.width(), self.canvas.height())
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }

    fn draw(&mut self, scene: &FrameScene) -> Result<(), RenderError> {
        let css = format!(
            "radial-gradient(circle at center, {} 0%, {} 100%)",
            scene.backdrop.inner.to_css(),
            scene.backdrop.outer.to_css()
        );
        self.canvas
            .style()
            .set_property("background", &css)
            .map_err(|e| RenderError::Draw(format!("{:?}", e)))
    }
}
