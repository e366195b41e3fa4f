//! Matrix data model and the raw-input formatting step.
//!
//! `format_data` turns a raw row-major matrix plus optional labels into the
//! dense entry list the renderer consumes. Malformed input (empty matrix,
//! ragged rows, mismatched label lengths) fails fast here so no `NaN`
//! geometry can reach the layout stage.

use serde::{Deserialize, Serialize};

use crate::error::{HeatgridError, Result};

/// Raw input as supplied by the host: a row-major matrix with optional
/// row/column labels and a colormap name.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawMatrix {
    pub matrix: Vec<Vec<f64>>,
    #[serde(default)]
    pub rows: Option<Vec<String>>,
    #[serde(default)]
    pub columns: Option<Vec<String>>,
    #[serde(default)]
    pub colormap: Option<String>,
}

/// One matrix cell. `x` is the column index, `y` the row index, both dense
/// and zero-based.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatrixEntry {
    pub x: usize,
    pub y: usize,
    pub z: f64,
    #[serde(rename = "rowLabel", default, skip_serializing_if = "Option::is_none")]
    pub row_label: Option<String>,
    #[serde(rename = "colLabel", default, skip_serializing_if = "Option::is_none")]
    pub col_label: Option<String>,
}

/// Formatted matrix data, owned by the visualization instance.
///
/// Replaced wholesale on update, extended (never patched) on append.
/// Invariants: `entries.len() == nrow * ncol`; `zmin`/`zmax` are the true
/// extrema; label vectors match their dimension when present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormattedMatrix {
    pub entries: Vec<MatrixEntry>,
    pub nrow: usize,
    pub ncol: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rows: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columns: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colormap: Option<String>,
    pub zmin: f64,
    pub zmax: f64,
}

/// Format raw input into a [`FormattedMatrix`].
///
/// # Errors
/// Returns [`HeatgridError::Format`] for an empty matrix, ragged rows, or
/// label arrays whose length does not match the matrix shape.
pub fn format_data(raw: &RawMatrix) -> Result<FormattedMatrix> {
    let nrow = raw.matrix.len();
    let ncol = raw.matrix.first().map_or(0, Vec::len);
    if nrow == 0 || ncol == 0 {
        return Err(HeatgridError::Format("matrix is empty".to_string()));
    }
    for (i, row) in raw.matrix.iter().enumerate() {
        if row.len() != ncol {
            return Err(HeatgridError::Format(format!(
                "ragged matrix: row {i} has {} columns, expected {ncol}",
                row.len()
            )));
        }
    }
    if let Some(rows) = &raw.rows {
        if rows.len() != nrow {
            return Err(HeatgridError::Format(format!(
                "{} row labels for {nrow} rows",
                rows.len()
            )));
        }
    }
    if let Some(columns) = &raw.columns {
        if columns.len() != ncol {
            return Err(HeatgridError::Format(format!(
                "{} column labels for {ncol} columns",
                columns.len()
            )));
        }
    }

    let mut entries = Vec::with_capacity(nrow * ncol);
    let mut zmin = f64::INFINITY;
    let mut zmax = f64::NEG_INFINITY;
    for (y, row) in raw.matrix.iter().enumerate() {
        for (x, &z) in row.iter().enumerate() {
            zmin = zmin.min(z);
            zmax = zmax.max(z);
            entries.push(MatrixEntry {
                x,
                y,
                z,
                row_label: raw.rows.as_ref().and_then(|r| r.get(y).cloned()),
                col_label: raw.columns.as_ref().and_then(|c| c.get(x).cloned()),
            });
        }
    }

    Ok(FormattedMatrix {
        entries,
        nrow,
        ncol,
        rows: raw.rows.clone(),
        columns: raw.columns.clone(),
        colormap: raw.colormap.clone(),
        zmin,
        zmax,
    })
}

impl FormattedMatrix {
    /// Append another formatted matrix below this one as additional rows.
    ///
    /// The column count must match, column labels (when present) must agree,
    /// and row-label presence must be consistent across both halves. Entry
    /// indices of the appended rows are rebased and the extrema recomputed.
    ///
    /// # Errors
    /// Returns [`HeatgridError::Format`] when the shapes or labels disagree.
    pub fn append(&mut self, more: FormattedMatrix) -> Result<()> {
        if more.ncol != self.ncol {
            return Err(HeatgridError::Format(format!(
                "appended rows have {} columns, expected {}",
                more.ncol, self.ncol
            )));
        }
        if self.columns != more.columns {
            return Err(HeatgridError::Format(
                "appended column labels do not match".to_string(),
            ));
        }
        if self.rows.is_some() != more.rows.is_some() {
            return Err(HeatgridError::Format(
                "row label presence differs between appended halves".to_string(),
            ));
        }

        let offset = self.nrow;
        self.entries.extend(more.entries.into_iter().map(|mut e| {
            e.y += offset;
            e
        }));
        if let (Some(rows), Some(more_rows)) = (&mut self.rows, more.rows) {
            rows.extend(more_rows);
        }
        self.nrow += more.nrow;
        self.zmin = self.zmin.min(more.zmin);
        self.zmax = self.zmax.max(more.zmax);
        Ok(())
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

    fn raw(matrix: Vec<Vec<f64>>) -> RawMatrix {
        RawMatrix {
            matrix,
            ..RawMatrix::default()
        }
    }

    #[test]
    fn test_format_two_by_two() {
        let data = format_data(&raw(vec![vec![1.0, 2.0], vec![3.0, 4.0]])).unwrap();
        assert_eq!(data.nrow, 2);
        assert_eq!(data.ncol, 2);
        assert_eq!(data.zmin, 1.0);
        assert_eq!(data.zmax, 4.0);
        let coords: Vec<(usize, usize, f64)> =
            data.entries.iter().map(|e| (e.x, e.y, e.z)).collect();
        assert_eq!(
            coords,
            vec![(0, 0, 1.0), (1, 0, 2.0), (0, 1, 3.0), (1, 1, 4.0)]
        );
    }

    #[test]
    fn test_labels_attach_to_entries() {
        let data = format_data(&RawMatrix {
            matrix: vec![vec![1.0, 2.0]],
            rows: Some(vec!["a".to_string()]),
            columns: Some(vec!["p".to_string(), "q".to_string()]),
            colormap: Some("Reds".to_string()),
        })
        .unwrap();
        assert_eq!(data.entries[1].row_label.as_deref(), Some("a"));
        assert_eq!(data.entries[1].col_label.as_deref(), Some("q"));
        assert_eq!(data.colormap.as_deref(), Some("Reds"));
    }

    #[test]
    fn test_empty_matrix_rejected() {
        assert!(format_data(&raw(vec![])).is_err());
        assert!(format_data(&raw(vec![vec![]])).is_err());
    }

    #[test]
    fn test_ragged_matrix_rejected() {
        let err = format_data(&raw(vec![vec![1.0, 2.0], vec![3.0]])).unwrap_err();
        assert!(err.to_string().contains("ragged"));
    }

    #[test]
    fn test_label_length_mismatch_rejected() {
        let bad_rows = RawMatrix {
            matrix: vec![vec![1.0]],
            rows: Some(vec!["a".to_string(), "b".to_string()]),
            ..RawMatrix::default()
        };
        assert!(format_data(&bad_rows).is_err());

        let bad_cols = RawMatrix {
            matrix: vec![vec![1.0]],
            columns: Some(vec![]),
            ..RawMatrix::default()
        };
        assert!(format_data(&bad_cols).is_err());
    }

    #[test]
    fn test_append_rebases_rows_and_extrema() {
        let mut data = format_data(&raw(vec![vec![1.0, 2.0]])).unwrap();
        let more = format_data(&raw(vec![vec![9.0, 0.5]])).unwrap();
        data.append(more).unwrap();
        assert_eq!(data.nrow, 2);
        assert_eq!(data.entries.len(), 4);
        assert_eq!(data.entries[2].y, 1);
        assert_eq!(data.zmin, 0.5);
        assert_eq!(data.zmax, 9.0);
    }

    #[test]
    fn test_append_rejects_shape_mismatch() {
        let mut data = format_data(&raw(vec![vec![1.0, 2.0]])).unwrap();
        let more = format_data(&raw(vec![vec![1.0, 2.0, 3.0]])).unwrap();
        assert!(data.append(more).is_err());
    }

    #[test]
    fn test_append_rejects_label_mismatch() {
        let mut data = format_data(&RawMatrix {
            matrix: vec![vec![1.0]],
            columns: Some(vec!["p".to_string()]),
            ..RawMatrix::default()
        })
        .unwrap();
        let more = format_data(&RawMatrix {
            matrix: vec![vec![2.0]],
            columns: Some(vec!["q".to_string()]),
            ..RawMatrix::default()
        })
        .unwrap();
        assert!(data.append(more).is_err());
    }
}
