//! End-to-end scenarios for heatgrid
//!
//! Drive the full format -> layout -> interact -> paint pipeline through
//! `ViewState` with a recording surface, the way the browser shell drives
//! it with a canvas.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use heatgrid::colormap::{swatches, PALETTE_NAMES};
use heatgrid::controller::{Key, ZOOM_MAX, ZOOM_MIN};
use heatgrid::data::{format_data, RawMatrix};
use heatgrid::render::{PaintOp, RecordingSurface};
use heatgrid::selection::{Axis, DIMMED_OPACITY};
use heatgrid::{ViewOptions, ViewState};
use test_case::test_case;

fn raw(matrix: Vec<Vec<f64>>) -> RawMatrix {
    RawMatrix {
        matrix,
        ..RawMatrix::default()
    }
}

fn view(matrix: Vec<Vec<f64>>) -> ViewState {
    ViewState::new(
        format_data(&raw(matrix)).unwrap(),
        200.0,
        200.0,
        ViewOptions::default(),
    )
}

fn painted(view: &ViewState) -> RecordingSurface {
    let mut surface = RecordingSurface::new();
    assert!(view.repaint_into(&mut surface));
    surface
}

fn cell_alphas(surface: &RecordingSurface) -> Vec<f64> {
    surface
        .cells()
        .filter_map(|op| match op {
            PaintOp::Cell { alpha, .. } => Some(*alpha),
            _ => None,
        })
        .collect()
}

#[test]
fn two_by_two_scenario() {
    // [[1,2],[3,4]] in a 200x200 viewport: 100px cells, extrema 1..4,
    // entries in row-major order with x as the column index.
    let v = view(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
    let data = v.data();
    assert_eq!((data.nrow, data.ncol), (2, 2));
    assert_eq!((data.zmin, data.zmax), (1.0, 4.0));
    let layout = v.layout().unwrap();
    assert_eq!(layout.cell_size, 100.0);

    let surface = painted(&v);
    let ramp = swatches("Purples");
    let fills: Vec<_> = surface
        .cells()
        .filter_map(|op| match op {
            PaintOp::Cell { x, y, fill, .. } => Some((*x, *y, *fill)),
            _ => None,
        })
        .collect();
    assert_eq!(fills.len(), 4);
    // zmin maps to the first swatch, zmax to the last.
    assert_eq!(fills[0], (0.0, 0.0, ramp[0]));
    assert_eq!(fills[3], (100.0, 100.0, ramp[8]));
}

#[test]
fn column_select_dims_everything_else() {
    let mut v = view(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
    assert!(v.label_click(Axis::Column, 1));
    let surface = painted(&v);
    // Entries are row-major: x runs 0,1,0,1.
    assert_eq!(
        cell_alphas(&surface),
        vec![DIMMED_OPACITY, 1.0, DIMMED_OPACITY, 1.0]
    );
}

#[test]
fn row_click_twice_restores_full_opacity() {
    let mut v = view(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
    v.label_click(Axis::Row, 0);
    v.label_click(Axis::Row, 0);
    assert!(v.controller().selection.is_empty());
    assert_eq!(cell_alphas(&painted(&v)), vec![1.0; 4]);
}

#[test]
fn selecting_another_row_replaces_the_first() {
    let mut v = view(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
    v.label_click(Axis::Row, 0);
    v.label_click(Axis::Row, 1);
    assert_eq!(v.controller().selection.selected_row(), Some(1));
    assert_eq!(cell_alphas(&painted(&v)), vec![0.2, 0.2, 1.0, 1.0]);
}

#[test]
fn reset_clears_row_and_column() {
    let mut v = view(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
    v.label_click(Axis::Row, 0);
    v.label_click(Axis::Column, 1);
    assert!(v.reset());
    assert!(v.controller().selection.is_empty());
    assert_eq!(cell_alphas(&painted(&v)), vec![1.0; 4]);
}

#[test]
fn sticky_flags_mirror_selection() {
    let data = format_data(&RawMatrix {
        matrix: vec![vec![1.0, 2.0], vec![3.0, 4.0]],
        rows: Some(vec!["r0".to_string(), "r1".to_string()]),
        columns: Some(vec!["c0".to_string(), "c1".to_string()]),
        ..RawMatrix::default()
    })
    .unwrap();
    let mut v = ViewState::new(data, 600.0, 600.0, ViewOptions::default());
    v.label_click(Axis::Column, 0);
    let flags = v.sticky();
    assert_eq!(flags.cols, vec![true, false]);
    assert_eq!(flags.rows, vec![false, false]);
}

#[test]
fn repeated_keys_hold_the_zoom_clamps() {
    let mut v = view(vec![vec![0.0, 10.0]]);
    for _ in 0..50 {
        assert!(v.key(Key::ArrowUp));
    }
    assert_eq!(v.controller().zoom(), ZOOM_MAX);
    for _ in 0..200 {
        v.key(Key::ArrowDown);
    }
    assert_eq!(v.controller().zoom(), ZOOM_MIN);
}

#[test_case(Key::ArrowRight; "cycling right")]
#[test_case(Key::ArrowLeft; "cycling left")]
fn full_palette_cycle_returns_to_start(key: Key) {
    let mut v = view(vec![vec![1.0, 2.0]]);
    let start = v.controller().palette_name().to_string();
    for _ in 0..PALETTE_NAMES.len() {
        v.key(key);
    }
    assert_eq!(v.controller().palette_name(), start);
}

#[test]
fn rapid_mixed_input_yields_final_state_consistent_paint() {
    // No debouncing: a burst of key and click events must land on a paint
    // identical to one computed from the final state alone.
    let mut v = view(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
    for _ in 0..10 {
        v.key(Key::ArrowUp);
    }
    for _ in 0..7 {
        v.key(Key::ArrowRight);
        v.label_click(Axis::Row, 0);
    }
    let burst = painted(&v);

    // Ten up-arrows saturate the zoom clamp; seven rights wrap to one;
    // seven toggles of the same label land on "selected".
    let mut reference = view(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
    for _ in 0..10 {
        reference.key(Key::ArrowUp);
    }
    reference.key(Key::ArrowRight);
    reference.label_click(Axis::Row, 0);
    assert_eq!(painted(&reference), burst);
}

#[test]
fn render_is_idempotent_after_interaction() {
    let mut v = view(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
    v.key(Key::ArrowRight);
    v.label_click(Axis::Column, 0);
    assert_eq!(painted(&v), painted(&v));
}

#[test]
fn update_replaces_wholesale() {
    let mut v = view(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
    v.key(Key::ArrowRight);
    v.set_data(format_data(&raw(vec![vec![7.0]])).unwrap());
    assert_eq!(v.data().entries.len(), 1);
    assert_eq!(v.controller().palette_name(), "Purples");
    let surface = painted(&v);
    assert_eq!(surface.cells().count(), 1);
}

#[test]
fn append_grows_the_grid_below() {
    let mut v = view(vec![vec![1.0, 2.0]]);
    v.append_data(format_data(&raw(vec![vec![3.0, 4.0], vec![5.0, 6.0]])).unwrap())
        .unwrap();
    assert_eq!(v.data().nrow, 3);
    assert_eq!(painted(&v).cells().count(), 6);
    assert_eq!(v.data().zmax, 6.0);
}

#[test]
fn json_boundary_round_trips() {
    let json = heatgrid::format_data_json(r#"{"matrix": [[1, 2], [3, 4]], "colormap": "Blues"}"#)
        .unwrap();
    let formatted: heatgrid::FormattedMatrix = serde_json::from_str(&json).unwrap();
    assert_eq!(formatted.nrow, 2);
    assert_eq!(formatted.colormap.as_deref(), Some("Blues"));
    assert!(heatgrid::format_data_json("{\"matrix\": []}").is_err());
    assert!(heatgrid::format_data_json("not json").is_err());
}

#[test]
fn format_data_rejects_malformed_input() {
    assert!(format_data(&raw(vec![])).is_err());
    assert!(format_data(&raw(vec![vec![1.0], vec![1.0, 2.0]])).is_err());
    let bad_labels = RawMatrix {
        matrix: vec![vec![1.0]],
        columns: Some(vec!["a".to_string(), "b".to_string()]),
        ..RawMatrix::default()
    };
    assert!(format_data(&bad_labels).is_err());
}
