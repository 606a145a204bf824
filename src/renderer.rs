// Canvas 2D implementation of `Surface`. Holds the canvas element, the context
// acquired from it, and the config that decides the glyph font and link color.

use crate::config::FieldConfig;
use crate::error::SurfaceError;
use crate::surface::Surface;
use vecmath::Vector2;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

pub struct CanvasRenderer {
    pub canvas: HtmlCanvasElement,
    pub context: CanvasRenderingContext2d,
    style: FieldConfig,
}

impl CanvasRenderer {
    // Grabs the 2d context from the canvas. Any failure along the way, a throw,
    // a null context, or a context of the wrong type, means there is nothing
    // to draw on.
    pub fn new(canvas: HtmlCanvasElement, config: &FieldConfig) -> Result<Self, SurfaceError> {
        let context = canvas
            .get_context("2d")
            .map_err(|_| SurfaceError::ContextUnavailable)?
            .ok_or(SurfaceError::ContextUnavailable)?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| SurfaceError::ContextUnavailable)?;

        Ok(CanvasRenderer {
            canvas,
            context,
            style: config.clone(),
        })
    }

    /// Resizes the canvas backing store. This also resets the context state.
    pub fn fit_to(&self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }

    /// Pins the canvas behind the page and out of the way of the pointer.
    pub fn pin_behind_content(&self) -> Result<(), SurfaceError> {
        let style = self.canvas.style();
        style.set_property("position", "fixed")?;
        style.set_property("inset", "0")?;
        style.set_property("z-index", "-10")?;
        style.set_property("width", "100%")?;
        style.set_property("height", "100%")?;
        style.set_property("pointer-events", "none")?;
        Ok(())
    }

    fn fill_rotated_text(
        &self,
        glyph: &str,
        pos: Vector2<f64>,
        rotation: f64,
        size: f64,
    ) -> Result<(), JsValue> {
        self.context.translate(pos[0], pos[1])?;
        self.context.rotate(rotation)?;
        self.context
            .set_font(&format!("{}px {}", size, self.style.font_family));
        self.context.set_text_align("center");
        self.context.set_text_baseline("middle");
        self.context.fill_text(glyph, 0.0, 0.0)
    }
}

impl Surface for CanvasRenderer {
    fn clear(&mut self, width: f64, height: f64) -> Result<(), SurfaceError> {
        self.context.clear_rect(0.0, 0.0, width, height);
        Ok(())
    }

    fn draw_glyph(
        &mut self,
        glyph: &str,
        pos: Vector2<f64>,
        rotation: f64,
        size: f64,
    ) -> Result<(), SurfaceError> {
        self.context.save();
        let drawn = self.fill_rotated_text(glyph, pos, rotation, size);
        self.context.restore();
        Ok(drawn?)
    }

    #[allow(deprecated)]
    fn draw_link(
        &mut self,
        from: Vector2<f64>,
        to: Vector2<f64>,
        opacity: f64,
    ) -> Result<(), SurfaceError> {
        self.context.begin_path();
        self.context.move_to(from[0], from[1]);
        self.context.line_to(to[0], to[1]);
        self.context
            .set_stroke_style(&JsValue::from_str(&self.style.link_style(opacity)));
        self.context.set_line_width(1.0);
        self.context.stroke();
        Ok(())
    }
}
