//! Fixed figure templates for each document type
//!
//! A template decides the grid size, the canvas size, where each matrix goes
//! and the text sizes. `cis` and `trans` are fixed grids; `dist` grows one
//! column per distance interval.
//!
//! Only the entries a template places are converted to matrices.

use serde_json::Value;

use crate::document::{DataType, DistanceBin, Document, Matrix, PanelSet, COMPARTMENT_LABELS};

use super::error::LayoutError;
use super::types::GridCell;

/// Grid position of each pentad panel in the 3x3 `cis` grid
///
/// Long-range B sits on top, the short-range panels form the left and bottom
/// arms, and the between-compartment panel sits in the center:
///
/// ```text
///  .              Long-range B     .
///  Short-range A  Between A and B  Long-range A
///  .              Short-range B    .
/// ```
pub const CIS_PLACEMENT: [(&str, GridCell); 5] = [
    ("Short-range A", GridCell::new(1, 0)),
    ("Short-range B", GridCell::new(2, 1)),
    ("Long-range A", GridCell::new(1, 2)),
    ("Long-range B", GridCell::new(0, 1)),
    ("Between A and B", GridCell::new(1, 1)),
];

/// Canvas width per `dist` column, in inches
pub const DIST_COLUMN_WIDTH: f64 = 4.0;

/// Canvas height of `dist` figures, in inches
pub const DIST_HEIGHT: f64 = 12.0;

/// A matrix assigned to a grid cell
#[derive(Debug, Clone)]
pub struct Placement {
    pub title: String,
    pub cell: GridCell,
    pub matrix: Matrix,
}

/// Everything the engine needs to lay out one document
#[derive(Debug, Clone)]
pub struct Template {
    /// Grid dimensions: (rows, cols)
    pub grid: (usize, usize),
    /// Canvas size in inches: (width, height)
    pub figsize: (f64, f64),
    /// Super-title anchor (top center) as figure fractions, y measured from the bottom
    pub suptitle_anchor: (f64, f64),
    /// Panel title font size, in points
    pub title_font_size: f64,
    /// Colorbar rectangle as figure fractions: [left, bottom, width, height]
    pub colorbar_rect: [f64; 4],
    pub placements: Vec<Placement>,
}

impl Template {
    /// Select and fill the template for `doc`
    pub fn for_document(doc: &Document, closed: bool) -> Result<Self, LayoutError> {
        match doc {
            Document::Cis(panels) => Self::cis(panels),
            Document::Trans(panels) => Self::trans(panels),
            Document::Dist(bins) => Self::dist(bins, closed),
        }
    }

    fn cis(panels: &PanelSet) -> Result<Self, LayoutError> {
        let placements = CIS_PLACEMENT
            .iter()
            .map(|(label, cell)| {
                Ok(Placement {
                    title: label.to_string(),
                    cell: *cell,
                    matrix: lookup(panels, DataType::Cis, label)?,
                })
            })
            .collect::<Result<Vec<_>, LayoutError>>()?;

        Ok(Self {
            grid: (3, 3),
            figsize: (10.0, 10.0),
            suptitle_anchor: (0.5125, 0.98),
            title_font_size: 15.0,
            colorbar_rect: [0.95, 0.25, 0.02, 0.5],
            placements,
        })
    }

    fn trans(panels: &PanelSet) -> Result<Self, LayoutError> {
        let placements = COMPARTMENT_LABELS
            .iter()
            .enumerate()
            .map(|(col, label)| {
                Ok(Placement {
                    title: label.to_string(),
                    cell: GridCell::new(0, col),
                    matrix: lookup(panels, DataType::Trans, label)?,
                })
            })
            .collect::<Result<Vec<_>, LayoutError>>()?;

        Ok(Self {
            grid: (1, 3),
            figsize: (12.0, 4.0),
            suptitle_anchor: (0.5125, 1.02),
            title_font_size: 15.0,
            colorbar_rect: [0.95, 0.15, 0.02, 0.7],
            placements,
        })
    }

    fn dist(bins: &[DistanceBin], closed: bool) -> Result<Self, LayoutError> {
        // With closed intervals the last bin is the open-ended catch-all
        let columns = if closed {
            bins.len().saturating_sub(1)
        } else {
            bins.len()
        };
        if columns == 0 {
            return Err(LayoutError::empty(format!(
                "dist document has {} distance interval(s){}",
                bins.len(),
                if closed { " and --closed drops the last one" } else { "" }
            )));
        }

        let mut placements = Vec::with_capacity(columns * COMPARTMENT_LABELS.len());
        for (col, bin) in bins.iter().take(columns).enumerate() {
            for (row, label) in COMPARTMENT_LABELS.iter().enumerate() {
                let title = format!("{} {}", bin.label, label);
                let value = bin.panels.get(label).ok_or_else(|| {
                    LayoutError::missing_label(DataType::Dist, title.clone(), bin.panels.labels())
                })?;
                let matrix = to_matrix(&title, value)?;
                placements.push(Placement {
                    title,
                    cell: GridCell::new(row, col),
                    matrix,
                });
            }
        }

        Ok(Self {
            grid: (COMPARTMENT_LABELS.len(), columns),
            figsize: (columns as f64 * DIST_COLUMN_WIDTH, DIST_HEIGHT),
            suptitle_anchor: (0.5125, 0.98),
            title_font_size: 20.0,
            colorbar_rect: [0.95, 0.25, 0.02, 0.5],
            placements,
        })
    }
}

fn lookup(panels: &PanelSet, data_type: DataType, label: &str) -> Result<Matrix, LayoutError> {
    let value = panels
        .get(label)
        .ok_or_else(|| LayoutError::missing_label(data_type, label, panels.labels()))?;
    to_matrix(label, value)
}

fn to_matrix(title: &str, value: &Value) -> Result<Matrix, LayoutError> {
    Matrix::from_json(title, value).map_err(LayoutError::invalid_matrix)
}
