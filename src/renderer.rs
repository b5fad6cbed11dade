// Renderer struct that draws the particle field onto a canvas element through its
// 2D context. Implements Surface so the animator never sees web_sys types.

use crate::color::Color;
use crate::surface::Surface;
use std::f64::consts::PI;
use vecmath::Vector2;
use wasm_bindgen::{ JsCast, JsValue };
use web_sys::{ CanvasRenderingContext2d, HtmlCanvasElement };

pub struct CanvasRenderer {
    pub canvas: HtmlCanvasElement,
    pub context: CanvasRenderingContext2d,
}

impl CanvasRenderer {
    // Grabs the 2D context from the canvas. A canvas that can't provide one yields None,
    // which the caller treats the same as a missing canvas.
    pub fn new(canvas: HtmlCanvasElement) -> Result<Option<Self>, JsValue> {
        let context = match canvas.get_context("2d")? {
            Some(context) => context,
            None => return Ok(None),
        };
        let context = match context.dyn_into::<CanvasRenderingContext2d>() {
            Ok(context) => context,
            Err(_) => return Ok(None),
        };
        Ok(Some(CanvasRenderer { canvas, context }))
    }
}

impl Surface for CanvasRenderer {
    fn set_size(&mut self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }

    fn clear(&mut self, width: u32, height: u32) {
        self.context.clear_rect(0.0, 0.0, width as f64, height as f64);
    }

    #[allow(deprecated)]
    fn fill_circle(&mut self, center: Vector2<f64>, radius: f64, color: Color, alpha: f64) {
        self.context.begin_path();
        // arc only fails for a negative radius
        let _ = self.context.arc(center[0], center[1], radius, 0.0, PI * 2.0);
        self.context.set_fill_style(&JsValue::from_str(&color.to_css_rgba(alpha)));
        self.context.fill();
    }

    #[allow(deprecated)]
    fn stroke_line(&mut self, from: Vector2<f64>, to: Vector2<f64>, color: Color, alpha: f64, width: f64) {
        self.context.begin_path();
        self.context.move_to(from[0], from[1]);
        self.context.line_to(to[0], to[1]);
        self.context.set_stroke_style(&JsValue::from_str(&color.to_css_rgba(alpha)));
        self.context.set_line_width(width);
        self.context.stroke();
    }
}
