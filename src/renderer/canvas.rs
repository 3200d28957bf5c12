//! Canvas 2D backend

use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::surface::{Paint, Surface};
use crate::error::{Error, Result};
use crate::Bounds;

/// `Surface` over an `HtmlCanvasElement`'s 2D context
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
    bounds: Bounds,
}

impl CanvasSurface {
    /// Size the canvas to the viewport and grab its 2D context.
    ///
    /// The size is fixed for the lifetime of the page.
    pub fn fit_to_window(canvas: &HtmlCanvasElement) -> Result<Self> {
        let window = web_sys::window().ok_or(Error::NoWindow)?;
        let width = window.inner_width()?.as_f64().unwrap_or(0.0) as u32;
        let height = window.inner_height()?.as_f64().unwrap_or(0.0) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let ctx = canvas
            .get_context("2d")?
            .ok_or(Error::NoContext)?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| Error::NoContext)?;

        Ok(Self {
            ctx,
            bounds: Bounds::new(width as f32, height as f32),
        })
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }
}

impl Surface for CanvasSurface {
    fn clear(&mut self) {
        self.ctx.clear_rect(
            0.0,
            0.0,
            self.bounds.width as f64,
            self.bounds.height as f64,
        );
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, paint: Paint) {
        let ctx = &self.ctx;
        ctx.set_fill_style_str(&paint.fill.to_css());
        if let Some(glow) = paint.glow {
            ctx.set_shadow_color(&glow.color.to_css());
            ctx.set_shadow_blur(glow.blur as f64);
        }
        ctx.begin_path();
        let _ = ctx.arc(
            center.x as f64,
            center.y as f64,
            radius as f64,
            0.0,
            std::f64::consts::TAU,
        );
        ctx.fill();
        if paint.glow.is_some() {
            ctx.set_shadow_blur(0.0);
        }
    }
}
