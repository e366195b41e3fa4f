//! Grid geometry derived from the viewport and matrix shape.
//!
//! Computed once per data load (not per repaint): cell size, canvas
//! dimensions, label margins, stroke width, and font sizes. Selection and
//! colormap changes never touch this.

use crate::scale::BandScale;

/// Margin reserved for a labelled axis, in logical pixels.
pub const LABEL_MARGIN: f64 = 120.0;

/// Smallest legible axis-label font, in pixels.
const AXIS_FONT_MIN: f64 = 8.0;
/// Largest axis-label font, so labels stay proportionate on sparse grids.
const AXIS_FONT_MAX: f64 = 14.0;

/// CSS px per pt, used to derive font sizes from the cell size.
const PT_PER_PX: f64 = 72.0 / 96.0;

/// Geometry for one grid render.
#[derive(Debug, Clone, PartialEq)]
pub struct GridLayout {
    pub cell_size: f64,
    pub margin_left: f64,
    pub margin_top: f64,
    /// Canvas pixel dimensions; always fit the requested viewport.
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub stroke_width: f64,
    /// Axis label font, clamped to stay legible.
    pub axis_font_size: f64,
    /// Cell value font, unclamped: it shrinks with the cells rather than
    /// overlapping its neighbors on dense matrices.
    pub cell_font_size: f64,
    pub x_scale: BandScale,
    pub y_scale: BandScale,
}

impl GridLayout {
    /// Compute the grid geometry, or `None` for degenerate input (zero
    /// rows/columns, or a viewport too small to hold a positive cell).
    pub fn compute(
        width: f64,
        height: f64,
        nrow: usize,
        ncol: usize,
        has_row_labels: bool,
        has_col_labels: bool,
    ) -> Option<Self> {
        Self::compute_with_margin(
            width,
            height,
            nrow,
            ncol,
            has_row_labels,
            has_col_labels,
            LABEL_MARGIN,
        )
    }

    /// Same as [`compute`](Self::compute) with a host-supplied label margin.
    #[allow(clippy::cast_precision_loss)]
    pub fn compute_with_margin(
        width: f64,
        height: f64,
        nrow: usize,
        ncol: usize,
        has_row_labels: bool,
        has_col_labels: bool,
        label_margin: f64,
    ) -> Option<Self> {
        if nrow == 0 || ncol == 0 || width <= 0.0 || height <= 0.0 {
            return None;
        }
        let margin_left = if has_row_labels { label_margin } else { 0.0 };
        let margin_top = if has_col_labels { label_margin } else { 0.0 };

        // Square cells that fill the grid: the wide case must fit both axes,
        // the tall (and tied) case fits rows and lets width follow.
        let nrow_f = nrow as f64;
        let ncol_f = ncol as f64;
        let cell_size = if ncol > nrow {
            ((height - margin_top) / nrow_f).min((width - margin_left) / ncol_f)
        } else {
            (height - margin_top) / nrow_f
        };
        if cell_size <= 0.0 || !cell_size.is_finite() {
            return None;
        }

        // Gridlines thin out with cell count but never fully vanish.
        let stroke_width = (1.0 - 0.000_09 * nrow_f * ncol_f).max(0.1);

        let label_pt = cell_size * PT_PER_PX / 5.0;
        let axis_font_size = label_pt.clamp(AXIS_FONT_MIN, AXIS_FONT_MAX);
        let cell_font_size = cell_size * PT_PER_PX / 2.5;

        Some(Self {
            cell_size,
            margin_left,
            margin_top,
            canvas_width: ncol_f * cell_size,
            canvas_height: nrow_f * cell_size,
            stroke_width,
            axis_font_size,
            cell_font_size,
            x_scale: BandScale::new(cell_size, ncol),
            y_scale: BandScale::new(cell_size, nrow),
        })
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_two_by_two_scenario() {
        let layout = GridLayout::compute(200.0, 200.0, 2, 2, false, false).unwrap();
        assert_eq!(layout.cell_size, 100.0);
        assert_eq!(layout.canvas_width, 200.0);
        assert_eq!(layout.canvas_height, 200.0);
        assert_eq!(layout.margin_left, 0.0);
        assert_eq!(layout.margin_top, 0.0);
        assert_eq!(layout.x_scale.position(1), 100.0);
        assert_eq!(layout.y_scale.position(1), 100.0);
    }

    #[test]
    fn test_labels_reserve_margins() {
        let layout = GridLayout::compute(400.0, 400.0, 2, 2, true, true).unwrap();
        assert_eq!(layout.margin_left, LABEL_MARGIN);
        assert_eq!(layout.margin_top, LABEL_MARGIN);
        assert_eq!(layout.cell_size, 140.0);
    }

    #[test]
    fn test_wide_matrix_fits_both_axes() {
        // 2 rows x 10 cols in 300x200: row fit would give 100px cells,
        // but 10 columns only fit at 30px.
        let layout = GridLayout::compute(300.0, 200.0, 2, 10, false, false).unwrap();
        assert_eq!(layout.cell_size, 30.0);
        assert!(layout.canvas_width <= 300.0);
    }

    #[test]
    fn test_square_tie_falls_to_row_branch() {
        // ncol == nrow: row-based sizing wins even if the grid overflows
        // horizontally less than it could.
        let layout = GridLayout::compute(100.0, 300.0, 3, 3, false, false).unwrap();
        assert_eq!(layout.cell_size, 100.0);
    }

    #[test_case(0, 5)]
    #[test_case(5, 0)]
    #[test_case(0, 0)]
    fn test_degenerate_shape_short_circuits(nrow: usize, ncol: usize) {
        assert!(GridLayout::compute(200.0, 200.0, nrow, ncol, false, false).is_none());
    }

    #[test_case(0.0, 200.0)]
    #[test_case(200.0, 0.0)]
    #[test_case(-10.0, 200.0)]
    fn test_degenerate_viewport_short_circuits(w: f64, h: f64) {
        assert!(GridLayout::compute(w, h, 2, 2, false, false).is_none());
    }

    #[test]
    fn test_viewport_smaller_than_margin_short_circuits() {
        assert!(GridLayout::compute(200.0, 100.0, 2, 2, true, true).is_none());
    }

    #[test]
    fn test_stroke_width_thins_but_never_vanishes() {
        let sparse = GridLayout::compute(200.0, 200.0, 2, 2, false, false).unwrap();
        let dense = GridLayout::compute(2000.0, 2000.0, 200, 200, false, false).unwrap();
        assert!(sparse.stroke_width > dense.stroke_width);
        assert_eq!(dense.stroke_width, 0.1);
        assert!(sparse.stroke_width <= 1.0);
    }

    #[test]
    fn test_axis_font_clamped_cell_font_not() {
        let dense = GridLayout::compute(400.0, 400.0, 100, 100, false, false).unwrap();
        assert_eq!(dense.axis_font_size, 8.0);
        assert!(dense.cell_font_size < 8.0);

        let sparse = GridLayout::compute(800.0, 800.0, 2, 2, false, false).unwrap();
        assert_eq!(sparse.axis_font_size, 14.0);
        assert!(sparse.cell_font_size > 14.0);
    }
}
