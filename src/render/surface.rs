//! Drawing surface abstraction.
//!
//! [`PaintSurface`] is the narrow set of operations a full repaint needs.
//! The Canvas 2D backend implements it for the browser; the recording
//! surface captures the op stream for headless use and tests.

use crate::colormap::Rgb;

/// Operations the render pipeline issues, in paint order.
pub trait PaintSurface {
    /// Clear the whole canvas region.
    fn clear(&mut self, width: f64, height: f64);

    /// One cell: a filled, white-stroked rectangle. The fill color is
    /// alpha-composited with `alpha` in the same draw, not a second pass.
    fn fill_cell(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        fill: Rgb,
        alpha: f64,
        stroke_width: f64,
    );

    /// Text centered on `(cx, cy)` in a monospace font.
    fn cell_text(&mut self, text: &str, cx: f64, cy: f64, font_size: f64, color: Rgb, alpha: f64);
}

/// One recorded surface operation.
#[derive(Debug, Clone, PartialEq)]
pub enum PaintOp {
    Clear {
        width: f64,
        height: f64,
    },
    Cell {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        fill: Rgb,
        alpha: f64,
        stroke_width: f64,
    },
    Text {
        text: String,
        cx: f64,
        cy: f64,
        font_size: f64,
        color: Rgb,
        alpha: f64,
    },
}

/// Surface that records its op stream instead of drawing.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RecordingSurface {
    pub ops: Vec<PaintOp>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded cell ops only, in paint order.
    pub fn cells(&self) -> impl Iterator<Item = &PaintOp> {
        self.ops
            .iter()
            .filter(|op| matches!(op, PaintOp::Cell { .. }))
    }

    /// Recorded text ops only, in paint order.
    pub fn texts(&self) -> impl Iterator<Item = &PaintOp> {
        self.ops
            .iter()
            .filter(|op| matches!(op, PaintOp::Text { .. }))
    }
}

impl PaintSurface for RecordingSurface {
    fn clear(&mut self, width: f64, height: f64) {
        self.ops.push(PaintOp::Clear { width, height });
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
        self.ops.push(PaintOp::Cell {
            x,
            y,
            width,
            height,
            fill,
            alpha,
            stroke_width,
        });
    }

    fn cell_text(&mut self, text: &str, cx: f64, cy: f64, font_size: f64, color: Rgb, alpha: f64) {
        self.ops.push(PaintOp::Text {
            text: text.to_string(),
            cx,
            cy,
            font_size,
            color,
            alpha,
        });
    }
}
