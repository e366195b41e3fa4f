//! Canvas 2D implementation of [`PaintSurface`] via web-sys.

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::colormap::Rgb;
use crate::error::{HeatgridError, Result};

use super::surface::PaintSurface;

/// Drawing surface backed by an HTML canvas 2D context.
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Acquire the 2D context of `canvas`.
    ///
    /// # Errors
    /// Returns [`HeatgridError::Render`] when the context is unavailable
    /// (already claimed with another mode, or canvas detached).
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|_| HeatgridError::Render("failed to get 2d context".to_string()))?
            .ok_or_else(|| HeatgridError::Render("canvas has no 2d context".to_string()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| HeatgridError::Render("context is not 2d".to_string()))?;
        Ok(Self { ctx })
    }
}

impl PaintSurface for CanvasSurface {
    fn clear(&mut self, width: f64, height: f64) {
        self.ctx.clear_rect(0.0, 0.0, width, height);
    }

    fn fill_cell(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        fill: Rgb,
        alpha: f64,
        stroke_width: f64,
    ) {
        self.ctx.begin_path();
        self.ctx.set_fill_style_str(&fill.rgba(alpha));
        self.ctx.set_stroke_style_str("white");
        self.ctx.set_line_width(stroke_width);
        self.ctx.rect(x, y, width, height);
        self.ctx.fill();
        self.ctx.stroke();
        self.ctx.close_path();
    }

    fn cell_text(&mut self, text: &str, cx: f64, cy: f64, font_size: f64, color: Rgb, alpha: f64) {
        self.ctx.set_font(&format!("{font_size}px monospace"));
        self.ctx.set_text_baseline("middle");
        self.ctx.set_text_align("center");
        self.ctx.set_fill_style_str(&color.rgba(alpha));
        let _ = self.ctx.fill_text(text, cx, cy);
    }
}
