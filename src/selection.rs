//! Row/column selection state and the spotlight opacity rule.
//!
//! At most one row and one column can be selected at a time. Clicking a
//! label toggles its slot; clicking a different label replaces the slot.
//! Selected rows/columns spotlight their cells, everything else dims.

/// Opacity of cells outside the spotlight when a selection is active.
pub const DIMMED_OPACITY: f64 = 0.2;

/// Which axis a label belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Row,
    Column,
}

/// Single-slot row and column selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectionState {
    row: Option<usize>,
    col: Option<usize>,
}

impl SelectionState {
    /// Toggle the slot for `axis`: same index deselects, a different index
    /// replaces (slot capacity is one).
    pub fn toggle(&mut self, axis: Axis, index: usize) {
        let slot = match axis {
            Axis::Row => &mut self.row,
            Axis::Column => &mut self.col,
        };
        *slot = if *slot == Some(index) {
            None
        } else {
            Some(index)
        };
    }

    /// Clear both slots (the reset gesture).
    pub fn clear(&mut self) {
        self.row = None;
        self.col = None;
    }

    pub fn is_empty(&self) -> bool {
        self.row.is_none() && self.col.is_none()
    }

    pub fn selected_row(&self) -> Option<usize> {
        self.row
    }

    pub fn selected_col(&self) -> Option<usize> {
        self.col
    }

    /// Spotlight opacity for the cell at column `x`, row `y`.
    ///
    /// With no selection every cell is full opacity. Otherwise a cell is
    /// lit when its column OR its row is selected (a selected row lights
    /// the whole row regardless of any column selection), and dimmed
    /// otherwise.
    pub fn opacity(&self, x: usize, y: usize) -> f64 {
        if self.is_empty() || self.col == Some(x) || self.row == Some(y) {
            1.0
        } else {
            DIMMED_OPACITY
        }
    }

    /// Whether the row label at `index` carries the sticky highlight.
    pub fn row_sticky(&self, index: usize) -> bool {
        self.row == Some(index)
    }

    /// Whether the column label at `index` carries the sticky highlight.
    pub fn col_sticky(&self, index: usize) -> bool {
        self.col == Some(index)
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

    #[test]
    fn test_toggle_same_index_deselects() {
        let mut sel = SelectionState::default();
        sel.toggle(Axis::Row, 3);
        assert_eq!(sel.selected_row(), Some(3));
        sel.toggle(Axis::Row, 3);
        assert_eq!(sel.selected_row(), None);
    }

    #[test]
    fn test_toggle_other_index_replaces() {
        let mut sel = SelectionState::default();
        sel.toggle(Axis::Row, 1);
        sel.toggle(Axis::Row, 2);
        assert_eq!(sel.selected_row(), Some(2));
    }

    #[test]
    fn test_axes_are_independent() {
        let mut sel = SelectionState::default();
        sel.toggle(Axis::Row, 1);
        sel.toggle(Axis::Column, 4);
        assert_eq!(sel.selected_row(), Some(1));
        assert_eq!(sel.selected_col(), Some(4));
        sel.toggle(Axis::Column, 4);
        assert_eq!(sel.selected_row(), Some(1));
        assert_eq!(sel.selected_col(), None);
    }

    #[test]
    fn test_clear_resets_both() {
        let mut sel = SelectionState::default();
        sel.toggle(Axis::Row, 0);
        sel.toggle(Axis::Column, 0);
        sel.clear();
        assert!(sel.is_empty());
    }

    #[test]
    fn test_opacity_empty_selection_is_full() {
        let sel = SelectionState::default();
        assert_eq!(sel.opacity(5, 7), 1.0);
    }

    #[test]
    fn test_opacity_is_row_or_column_union() {
        let mut sel = SelectionState::default();
        sel.toggle(Axis::Row, 1);
        sel.toggle(Axis::Column, 2);
        // Entire selected row lights up, regardless of the column selection.
        assert_eq!(sel.opacity(0, 1), 1.0);
        assert_eq!(sel.opacity(2, 0), 1.0);
        assert_eq!(sel.opacity(0, 0), DIMMED_OPACITY);
    }

    #[test]
    fn test_sticky_flags_track_selection() {
        let mut sel = SelectionState::default();
        assert!(!sel.row_sticky(0));
        sel.toggle(Axis::Column, 2);
        assert!(sel.col_sticky(2));
        assert!(!sel.col_sticky(1));
    }
}
