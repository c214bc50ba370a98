//! Dense 2D matrices of averaged contact values

use serde::Deserialize;
use serde_json::Value;

/// A dense row-major matrix whose cells may be missing
///
/// Missing cells come from `null` entries in the input and are rendered the
/// same way as values that cannot be log-scaled.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    values: Vec<Option<f64>>,
}

impl Matrix {
    /// Build a matrix from rows, rejecting empty and ragged input
    pub fn from_rows(rows: Vec<Vec<Option<f64>>>) -> Result<Self, String> {
        let n_rows = rows.len();
        let n_cols = rows.first().map(|r| r.len()).unwrap_or(0);
        if n_rows == 0 || n_cols == 0 {
            return Err("matrix is empty".to_string());
        }
        if let Some((i, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != n_cols) {
            return Err(format!(
                "row {} has {} columns, expected {}",
                i,
                row.len(),
                n_cols
            ));
        }

        Ok(Self {
            rows: n_rows,
            cols: n_cols,
            values: rows.into_iter().flatten().collect(),
        })
    }

    /// Parse the JSON value stored under `label`
    pub fn from_json(label: &str, value: &Value) -> Result<Self, String> {
        let rows = Vec::<Vec<Option<f64>>>::deserialize(value)
            .map_err(|e| format!("matrix '{}' is not a 2D numeric array: {}", label, e))?;
        Self::from_rows(rows).map_err(|reason| format!("matrix '{}': {}", label, reason))
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Cell value at `(row, col)`; `None` when missing or out of range
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.values[row * self.cols + col]
    }

    /// Iterate over `(row, col, value)` in row-major order
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, Option<f64>)> + '_ {
        let cols = self.cols;
        self.values
            .iter()
            .enumerate()
            .map(move |(i, v)| (i / cols, i % cols, *v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_square() {
        let m = Matrix::from_json("A", &json!([[1.0, 2.0], [3.0, 4.5]])).unwrap();
        assert_eq!(m.shape(), (2, 2));
        assert_eq!(m.get(1, 1), Some(4.5));
        assert_eq!(m.get(2, 0), None);
    }

    #[test]
    fn test_null_cells_are_missing() {
        let m = Matrix::from_json("A", &json!([[1, null], [null, 2]])).unwrap();
        assert_eq!(m.get(0, 0), Some(1.0));
        assert_eq!(m.get(0, 1), None);
    }

    #[test]
    fn test_ragged_rejected() {
        let err = Matrix::from_json("B", &json!([[1.0, 2.0], [3.0]])).unwrap_err();
        assert_eq!(err, "matrix 'B': row 1 has 1 columns, expected 2");
    }

    #[test]
    fn test_empty_rejected() {
        assert!(Matrix::from_json("B", &json!([])).is_err());
        assert!(Matrix::from_json("B", &json!([[]])).is_err());
    }

    #[test]
    fn test_non_numeric_rejected() {
        let err = Matrix::from_json("AB", &json!([["x"]])).unwrap_err();
        assert!(err.starts_with("matrix 'AB' is not a 2D numeric array"));
        assert!(Matrix::from_json("n_pairs", &json!(1234)).is_err());
    }

    #[test]
    fn test_cells_row_major() {
        let m = Matrix::from_rows(vec![vec![Some(1.0), Some(2.0)], vec![Some(3.0), None]]).unwrap();
        let cells: Vec<_> = m.cells().collect();
        assert_eq!(
            cells,
            vec![(0, 0, Some(1.0)), (0, 1, Some(2.0)), (1, 0, Some(3.0)), (1, 1, None)]
        );
    }
}
