//! Error types for the layout engine

use thiserror::Error;

use crate::document::DataType;

/// Errors that can occur during layout computation
#[derive(Debug, Error, PartialEq)]
pub enum LayoutError {
    /// A label required by the layout template is absent from the document
    #[error("{data_type} document has no matrix labeled '{label}'{}", format_available(available))]
    MissingLabel {
        data_type: DataType,
        label: String,
        available: Vec<String>,
    },

    /// Panels of one figure must share their dimensions
    #[error("matrix '{label}' is {found_rows}x{found_cols}, expected {rows}x{cols} like '{reference}'")]
    ShapeMismatch {
        label: String,
        found_rows: usize,
        found_cols: usize,
        reference: String,
        rows: usize,
        cols: usize,
    },

    /// A placed entry is not a usable matrix
    #[error("malformed document: {message}")]
    InvalidMatrix { message: String },

    /// The template produced no panels
    #[error("nothing to draw: {reason}")]
    EmptyGrid { reason: String },

    /// Resolution that cannot size a canvas
    #[error("invalid dpi {dpi} (expected a finite value greater than 0)")]
    InvalidDpi { dpi: f64 },
}

impl LayoutError {
    /// Create a missing label error
    pub fn missing_label<'a>(
        data_type: DataType,
        label: impl Into<String>,
        available: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        Self::MissingLabel {
            data_type,
            label: label.into(),
            available: available.into_iter().map(String::from).collect(),
        }
    }

    /// Create an invalid matrix error
    pub fn invalid_matrix(message: impl Into<String>) -> Self {
        Self::InvalidMatrix {
            message: message.into(),
        }
    }

    /// Create an empty grid error
    pub fn empty(reason: impl Into<String>) -> Self {
        Self::EmptyGrid {
            reason: reason.into(),
        }
    }
}

fn format_available(available: &[String]) -> String {
    if available.is_empty() {
        String::new()
    } else {
        format!(" (found: {})", available.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_label_display() {
        let err = LayoutError::missing_label(DataType::Trans, "AB", ["A", "B"]);
        insta::assert_snapshot!(
            err.to_string(),
            @"trans document has no matrix labeled 'AB' (found: A, B)"
        );
    }

    #[test]
    fn test_missing_label_without_candidates() {
        let err = LayoutError::missing_label(DataType::Cis, "Long-range B", []);
        assert_eq!(
            err.to_string(),
            "cis document has no matrix labeled 'Long-range B'"
        );
    }

    #[test]
    fn test_invalid_dpi_display() {
        let err = LayoutError::InvalidDpi { dpi: -100.0 };
        insta::assert_snapshot!(
            err.to_string(),
            @"invalid dpi -100 (expected a finite value greater than 0)"
        );
    }

    #[test]
    fn test_shape_mismatch_display() {
        let err = LayoutError::ShapeMismatch {
            label: "B".to_string(),
            found_rows: 3,
            found_cols: 3,
            reference: "A".to_string(),
            rows: 5,
            cols: 5,
        };
        assert_eq!(
            err.to_string(),
            "matrix 'B' is 3x3, expected 5x5 like 'A'"
        );
    }
}
