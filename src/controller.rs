//! Interaction state machine: keyboard contrast/palette control, label
//! clicks, and the reset gesture.
//!
//! The controller owns every piece of view state that user input can
//! mutate (selection, contrast zoom, palette index, color scale) and is
//! plain data, so the full keyboard/pointer protocol is testable without a
//! DOM. The wasm viewer translates raw events into calls here and repaints
//! when a call reports a change.

use crate::colormap::{palette_index, palette_name, DEFAULT_PALETTE, PALETTE_NAMES};
use crate::data::FormattedMatrix;
use crate::scale::ColorScale;
use crate::selection::{Axis, SelectionState};

/// Contrast zoom step per arrow press.
pub const ZOOM_STEP: f64 = 0.05;
/// Narrowing stops here; past 0.5 the domain would invert.
pub const ZOOM_MAX: f64 = 0.4;
/// Widening floor.
pub const ZOOM_MIN: f64 = -3.0;

/// Keyboard inputs the controller understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value. Unrecognized keys are `None`
    /// and must not be consumed (no `preventDefault`).
    pub fn from_dom(key: &str) -> Option<Self> {
        match key {
            "ArrowUp" => Some(Self::ArrowUp),
            "ArrowDown" => Some(Self::ArrowDown),
            "ArrowLeft" => Some(Self::ArrowLeft),
            "ArrowRight" => Some(Self::ArrowRight),
            _ => None,
        }
    }
}

/// Mutable view state driven by user interaction.
#[derive(Debug, Clone, PartialEq)]
pub struct Controller {
    pub selection: SelectionState,
    colors: ColorScale,
    zoom: f64,
    palette: usize,
    zmin: f64,
    zmax: f64,
}

impl Controller {
    /// Fresh controller for a data set: empty selection, zero zoom, palette
    /// taken from the data (falling back to the default for unknown names).
    pub fn new(data: &FormattedMatrix) -> Self {
        let name = data.colormap.as_deref().unwrap_or(DEFAULT_PALETTE);
        let palette = palette_index(name).unwrap_or(0);
        Self {
            selection: SelectionState::default(),
            colors: ColorScale::new(data.zmin, data.zmax, palette_name(palette)),
            zoom: 0.0,
            palette,
            zmin: data.zmin,
            zmax: data.zmax,
        }
    }

    /// Re-derive the color domain for new extrema (after an append),
    /// keeping the current zoom, palette, and any still-valid selection.
    pub fn rebind(&mut self, data: &FormattedMatrix) {
        self.zmin = data.zmin;
        self.zmax = data.zmax;
        self.colors.set_contrast(self.zmin, self.zmax, self.zoom);
        let row_ok = self.selection.selected_row().is_none_or(|r| r < data.nrow);
        let col_ok = self.selection.selected_col().is_none_or(|c| c < data.ncol);
        if !row_ok || !col_ok {
            self.selection.clear();
        }
    }

    /// Apply a key press. Returns true when the key was consumed (and a
    /// repaint is needed); the caller suppresses page scroll for those.
    pub fn key(&mut self, key: Key) -> bool {
        match key {
            Key::ArrowUp => self.step_zoom(ZOOM_STEP),
            Key::ArrowDown => self.step_zoom(-ZOOM_STEP),
            Key::ArrowLeft => self.cycle_palette(-1),
            Key::ArrowRight => self.cycle_palette(1),
        }
        true
    }

    /// Toggle the selection slot for a clicked label. Always repaints.
    pub fn label_click(&mut self, axis: Axis, index: usize) -> bool {
        self.selection.toggle(axis, index);
        true
    }

    /// Clear both selection slots (background double-click). Always repaints.
    pub fn reset(&mut self) -> bool {
        self.selection.clear();
        true
    }

    fn step_zoom(&mut self, delta: f64) {
        self.zoom = (self.zoom + delta).clamp(ZOOM_MIN, ZOOM_MAX);
        self.colors.set_contrast(self.zmin, self.zmax, self.zoom);
    }

    #[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
    fn cycle_palette(&mut self, step: isize) {
        let len = PALETTE_NAMES.len() as isize;
        let next = (self.palette as isize + step).rem_euclid(len);
        self.palette = next as usize;
        self.colors.set_palette(palette_name(self.palette));
    }

    pub fn colors(&self) -> &ColorScale {
        &self.colors
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn palette_name(&self) -> &'static str {
        palette_name(self.palette)
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

    fn controller() -> Controller {
        let data = format_data(&RawMatrix {
            matrix: vec![vec![0.0, 5.0], vec![10.0, 2.0]],
            ..RawMatrix::default()
        })
        .unwrap();
        Controller::new(&data)
    }

    #[test]
    fn test_zoom_clamps_at_upper_bound() {
        let mut c = controller();
        // 0.4 / 0.05 = 8 presses reach the cap; keep going well past it.
        for _ in 0..20 {
            assert!(c.key(Key::ArrowUp));
        }
        assert_eq!(c.zoom(), ZOOM_MAX);
        // Domain narrowed around the data center: [4, 6] over [0, 10].
        assert_eq!(c.colors().domain()[0], 4.0);
        assert_eq!(c.colors().domain()[8], 6.0);
    }

    #[test]
    fn test_zoom_clamps_at_floor() {
        let mut c = controller();
        for _ in 0..100 {
            c.key(Key::ArrowDown);
        }
        assert_eq!(c.zoom(), ZOOM_MIN);
    }

    #[test]
    fn test_zoom_steps_accumulate() {
        let mut c = controller();
        c.key(Key::ArrowUp);
        c.key(Key::ArrowUp);
        c.key(Key::ArrowDown);
        assert!((c.zoom() - ZOOM_STEP).abs() < 1e-12);
    }

    #[test]
    fn test_palette_cycle_wraps_right() {
        let mut c = controller();
        let start = c.palette_name();
        for _ in 0..PALETTE_NAMES.len() {
            c.key(Key::ArrowRight);
        }
        assert_eq!(c.palette_name(), start);
    }

    #[test]
    fn test_palette_cycle_wraps_left_from_zero() {
        let mut c = controller();
        assert_eq!(c.palette_name(), "Purples");
        c.key(Key::ArrowLeft);
        assert_eq!(c.palette_name(), "Greys");
    }

    #[test]
    fn test_palette_swap_preserves_contrast() {
        let mut c = controller();
        c.key(Key::ArrowUp);
        let domain = *c.colors().domain();
        c.key(Key::ArrowRight);
        assert_eq!(*c.colors().domain(), domain);
    }

    #[test]
    fn test_named_colormap_selects_start_palette() {
        let data = format_data(&RawMatrix {
            matrix: vec![vec![1.0]],
            colormap: Some("Reds".to_string()),
            ..RawMatrix::default()
        })
        .unwrap();
        let c = Controller::new(&data);
        assert_eq!(c.palette_name(), "Reds");
    }

    #[test]
    fn test_unknown_colormap_falls_back() {
        let data = format_data(&RawMatrix {
            matrix: vec![vec![1.0]],
            colormap: Some("Viridis".to_string()),
            ..RawMatrix::default()
        })
        .unwrap();
        assert_eq!(Controller::new(&data).palette_name(), "Purples");
    }

    #[test]
    fn test_unrecognized_key_not_consumed() {
        assert_eq!(Key::from_dom("PageDown"), None);
        assert_eq!(Key::from_dom("a"), None);
        assert_eq!(Key::from_dom("ArrowLeft"), Some(Key::ArrowLeft));
    }

    #[test]
    fn test_rebind_keeps_zoom_drops_stale_selection() {
        let mut c = controller();
        c.key(Key::ArrowUp);
        c.label_click(Axis::Row, 1);
        let bigger = format_data(&RawMatrix {
            matrix: vec![vec![0.0, 20.0], vec![1.0, 2.0], vec![3.0, 4.0]],
            ..RawMatrix::default()
        })
        .unwrap();
        c.rebind(&bigger);
        assert_eq!(c.zoom(), ZOOM_STEP);
        assert_eq!(c.selection.selected_row(), Some(1));
        assert_eq!(c.colors().domain()[8], 20.0 - 20.0 * ZOOM_STEP);

        let mut c2 = controller();
        c2.label_click(Axis::Row, 1);
        let one_row = format_data(&RawMatrix {
            matrix: vec![vec![1.0, 2.0]],
            ..RawMatrix::default()
        })
        .unwrap();
        c2.rebind(&one_row);
        assert!(c2.selection.is_empty());
    }
}
