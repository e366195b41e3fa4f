//! The full-repaint pipeline.
//!
//! `paint` is pure over its inputs: it clears the surface and repaints
//! every cell from the current data, geometry, color scale, and selection.
//! Invoking it twice with unchanged state yields an identical op stream.
//! DOM label classes are not touched here; `sticky_labels` computes the
//! flags and the viewer applies them.

use crate::colormap::Rgb;
use crate::data::FormattedMatrix;
use crate::layout::GridLayout;
use crate::scale::ColorScale;
use crate::selection::SelectionState;

use super::surface::PaintSurface;

/// Dimmed value text recedes faster than its cell fill.
const DIM_TEXT_FACTOR: f64 = 5.0;

/// Sticky highlight flags for the axis labels, one per label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelHighlights {
    pub rows: Vec<bool>,
    pub cols: Vec<bool>,
}

/// Compute which labels carry the `selected-sticky` class.
pub fn sticky_labels(data: &FormattedMatrix, selection: &SelectionState) -> LabelHighlights {
    LabelHighlights {
        rows: (0..data.nrow).map(|i| selection.row_sticky(i)).collect(),
        cols: (0..data.ncol).map(|i| selection.col_sticky(i)).collect(),
    }
}

/// Repaint every cell (and value label, when enabled) onto `surface`.
pub fn paint<S: PaintSurface>(
    surface: &mut S,
    data: &FormattedMatrix,
    layout: &GridLayout,
    colors: &ColorScale,
    selection: &SelectionState,
    show_values: bool,
) {
    surface.clear(layout.canvas_width, layout.canvas_height);

    let band = layout.cell_size;
    let midpoint = data.zmin + (data.zmax - data.zmin) / 2.0;

    for entry in &data.entries {
        let opacity = selection.opacity(entry.x, entry.y);
        let x = layout.x_scale.position(entry.x);
        let y = layout.y_scale.position(entry.y);
        surface.fill_cell(
            x,
            y,
            band,
            band,
            colors.color(entry.z),
            opacity,
            layout.stroke_width,
        );

        if show_values {
            // Midpoint rule, ties to the black branch; dimmed cells dim
            // their text five times harder so labels recede first.
            let text_color = if entry.z <= midpoint {
                Rgb::BLACK
            } else {
                Rgb::WHITE
            };
            let text_alpha = if opacity < 1.0 {
                opacity / DIM_TEXT_FACTOR
            } else {
                opacity
            };
            surface.cell_text(
                &format_value(entry.z),
                x + band / 2.0,
                y + band / 2.0,
                layout.cell_font_size,
                text_color,
                text_alpha,
            );
        }
    }
}

/// Format a cell value the way the host language would print the number:
/// integral values without a decimal point, everything else shortest-form.
pub fn format_value(z: f64) -> String {
    if z.fract().abs() < f64::EPSILON && z.abs() < 1e15 {
        format!("{z:.0}")
    } else {
        format!("{z}")
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
    use crate::data::{format_data, RawMatrix};
    use crate::selection::{Axis, DIMMED_OPACITY};
    use crate::render::surface::{PaintOp, RecordingSurface};

    fn fixture() -> (FormattedMatrix, GridLayout, ColorScale) {
        let data = format_data(&RawMatrix {
            matrix: vec![vec![1.0, 2.0], vec![3.0, 4.0]],
            ..RawMatrix::default()
        })
        .unwrap();
        let layout = GridLayout::compute(200.0, 200.0, 2, 2, false, false).unwrap();
        let colors = ColorScale::new(data.zmin, data.zmax, "Purples");
        (data, layout, colors)
    }

    #[test]
    fn test_paint_is_idempotent() {
        let (data, layout, colors) = fixture();
        let selection = SelectionState::default();
        let mut first = RecordingSurface::new();
        let mut second = RecordingSurface::new();
        paint(&mut first, &data, &layout, &colors, &selection, true);
        paint(&mut second, &data, &layout, &colors, &selection, true);
        assert_eq!(first, second);
    }

    #[test]
    fn test_paint_clears_then_draws_every_cell() {
        let (data, layout, colors) = fixture();
        let mut surface = RecordingSurface::new();
        paint(
            &mut surface,
            &data,
            &layout,
            &colors,
            &SelectionState::default(),
            false,
        );
        assert_eq!(
            surface.ops.first(),
            Some(&PaintOp::Clear {
                width: 200.0,
                height: 200.0
            })
        );
        assert_eq!(surface.cells().count(), 4);
        assert_eq!(surface.texts().count(), 0);
    }

    #[test]
    fn test_cells_land_on_their_bands() {
        let (data, layout, colors) = fixture();
        let mut surface = RecordingSurface::new();
        paint(
            &mut surface,
            &data,
            &layout,
            &colors,
            &SelectionState::default(),
            false,
        );
        let positions: Vec<(f64, f64)> = surface
            .cells()
            .filter_map(|op| match op {
                PaintOp::Cell { x, y, .. } => Some((*x, *y)),
                _ => None,
            })
            .collect();
        assert_eq!(
            positions,
            vec![(0.0, 0.0), (100.0, 0.0), (0.0, 100.0), (100.0, 100.0)]
        );
    }

    #[test]
    fn test_column_selection_dims_other_columns() {
        let (data, layout, colors) = fixture();
        let mut selection = SelectionState::default();
        selection.toggle(Axis::Column, 1);
        let mut surface = RecordingSurface::new();
        paint(&mut surface, &data, &layout, &colors, &selection, false);
        for (entry, op) in data.entries.iter().zip(surface.cells()) {
            let PaintOp::Cell { alpha, .. } = op else {
                continue;
            };
            let expected = if entry.x == 1 { 1.0 } else { DIMMED_OPACITY };
            assert_eq!(*alpha, expected, "entry ({}, {})", entry.x, entry.y);
        }
    }

    #[test]
    fn test_value_text_midpoint_rule_ties_black() {
        // zmin=1, zmax=4, midpoint 2.5; z=2.5 would tie to black.
        let (data, layout, colors) = fixture();
        let mut surface = RecordingSurface::new();
        paint(
            &mut surface,
            &data,
            &layout,
            &colors,
            &SelectionState::default(),
            true,
        );
        let text_colors: Vec<Rgb> = surface
            .texts()
            .filter_map(|op| match op {
                PaintOp::Text { color, .. } => Some(*color),
                _ => None,
            })
            .collect();
        assert_eq!(
            text_colors,
            vec![Rgb::BLACK, Rgb::BLACK, Rgb::WHITE, Rgb::WHITE]
        );
    }

    #[test]
    fn test_dimmed_text_recedes_faster_than_fill() {
        let (data, layout, colors) = fixture();
        let mut selection = SelectionState::default();
        selection.toggle(Axis::Row, 0);
        let mut surface = RecordingSurface::new();
        paint(&mut surface, &data, &layout, &colors, &selection, true);
        let alphas: Vec<f64> = surface
            .texts()
            .filter_map(|op| match op {
                PaintOp::Text { alpha, .. } => Some(*alpha),
                _ => None,
            })
            .collect();
        // Row 0 lit, row 1 dimmed to opacity/5.
        let dim = DIMMED_OPACITY / DIM_TEXT_FACTOR;
        assert_eq!(alphas, vec![1.0, 1.0, dim, dim]);
    }

    #[test]
    fn test_text_centered_in_cells() {
        let (data, layout, colors) = fixture();
        let mut surface = RecordingSurface::new();
        paint(
            &mut surface,
            &data,
            &layout,
            &colors,
            &SelectionState::default(),
            true,
        );
        let first = surface.texts().next().unwrap();
        assert_eq!(
            first,
            &PaintOp::Text {
                text: "1".to_string(),
                cx: 50.0,
                cy: 50.0,
                font_size: layout.cell_font_size,
                color: Rgb::BLACK,
                alpha: 1.0,
            }
        );
    }

    #[test]
    fn test_sticky_labels_follow_selection() {
        let (data, _, _) = fixture();
        let mut selection = SelectionState::default();
        selection.toggle(Axis::Row, 1);
        let flags = sticky_labels(&data, &selection);
        assert_eq!(flags.rows, vec![false, true]);
        assert_eq!(flags.cols, vec![false, false]);
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(4.0), "4");
        assert_eq!(format_value(-2.0), "-2");
        assert_eq!(format_value(2.5), "2.5");
    }
}
