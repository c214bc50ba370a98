//! Figure layout computation
//!
//! Turns a document into a [`Figure`]: pixel geometry for every panel, its
//! title, the shared colorbar and the optional super-title, plus the tight
//! bounding box used to crop the output.

use tracing::debug;

use crate::document::Document;

use super::config::LayoutConfig;
use super::error::LayoutError;
use super::template::{Placement, Template};
use super::types::{
    BoundingBox, ColorbarLayout, ColorbarTick, Figure, FigureOptions, GridCell, PanelLayout,
    Point, TextAnchor, TextLayout, ASCENT_RATIO,
};

/// Vertical offset of a tick label baseline below its tick, as a share of font size
const TICK_LABEL_BASELINE: f64 = 0.35;

/// Gap between a colorbar tick and its label, in points
const TICK_LABEL_PAD: f64 = 3.5;

/// Compute the layout of `doc`
pub fn compute(
    doc: &Document,
    options: &FigureOptions,
    config: &LayoutConfig,
) -> Result<Figure, LayoutError> {
    config.validate()?;

    let Template {
        grid,
        figsize,
        suptitle_anchor,
        title_font_size,
        colorbar_rect,
        placements,
    } = Template::for_document(doc, options.closed)?;

    check_shapes(&placements)?;

    let width = config.inches(figsize.0);
    let height = config.inches(figsize.1);
    let title_size = config.points(title_font_size);
    let title_pad = config.points(config.title_pad);

    let panels: Vec<PanelLayout> = placements
        .into_iter()
        .map(|placement| {
            let cell = cell_bounds(placement.cell, grid, width, height, config);
            let bounds = fit_aspect(cell, placement.matrix.rows(), placement.matrix.cols());
            let title = TextLayout {
                text: placement.title,
                position: Point::new(bounds.center().x, bounds.y - title_pad),
                anchor: TextAnchor::Middle,
                font_size: title_size,
            };
            PanelLayout {
                cell: placement.cell,
                bounds,
                title,
                matrix: placement.matrix,
            }
        })
        .collect();

    let suptitle = if options.title.is_empty() {
        None
    } else {
        let font_size = config.points(config.suptitle_font_size);
        // The anchor is the top edge of the text
        let top = (1.0 - suptitle_anchor.1) * height;
        Some(TextLayout {
            text: options.title.clone(),
            position: Point::new(
                suptitle_anchor.0 * width,
                top + font_size * ASCENT_RATIO,
            ),
            anchor: TextAnchor::Middle,
            font_size,
        })
    };

    let colorbar = colorbar_layout(colorbar_rect, width, height, options, config);
    let bounds = tight_bounds(&panels, suptitle.as_ref(), &colorbar, config);

    debug!(
        data_type = %doc.data_type(),
        rows = grid.0,
        cols = grid.1,
        panels = panels.len(),
        width = bounds.width,
        height = bounds.height,
        "computed figure layout"
    );

    Ok(Figure {
        data_type: doc.data_type(),
        width,
        height,
        grid,
        norm: options.norm,
        suptitle,
        panels,
        colorbar,
        bounds,
    })
}

/// All panels of a figure must share one matrix shape
fn check_shapes(placements: &[Placement]) -> Result<(), LayoutError> {
    let Some(reference) = placements.first() else {
        return Ok(());
    };
    let (rows, cols) = reference.matrix.shape();
    for placement in &placements[1..] {
        let (found_rows, found_cols) = placement.matrix.shape();
        if (found_rows, found_cols) != (rows, cols) {
            return Err(LayoutError::ShapeMismatch {
                label: placement.title.clone(),
                found_rows,
                found_cols,
                reference: reference.title.clone(),
                rows,
                cols,
            });
        }
    }
    Ok(())
}

/// Pixel bounds of a grid cell
fn cell_bounds(
    cell: GridCell,
    grid: (usize, usize),
    width: f64,
    height: f64,
    config: &LayoutConfig,
) -> BoundingBox {
    let (rows, cols) = (grid.0 as f64, grid.1 as f64);
    let (left, right, bottom, top) = config.subplot_extent;

    let cell_w = (right - left) * width / (cols + config.wspace * (cols - 1.0));
    let cell_h = (top - bottom) * height / (rows + config.hspace * (rows - 1.0));
    let step_x = cell_w * (1.0 + config.wspace);
    let step_y = cell_h * (1.0 + config.hspace);

    BoundingBox::new(
        left * width + cell.col as f64 * step_x,
        (1.0 - top) * height + cell.row as f64 * step_y,
        cell_w,
        cell_h,
    )
}

/// Largest box with the matrix's aspect ratio centered inside `cell`
fn fit_aspect(cell: BoundingBox, rows: usize, cols: usize) -> BoundingBox {
    let aspect = rows as f64 / cols as f64;
    if cell.height / cell.width > aspect {
        let h = cell.width * aspect;
        BoundingBox::new(cell.x, cell.y + (cell.height - h) / 2.0, cell.width, h)
    } else {
        let w = cell.height / aspect;
        BoundingBox::new(cell.x + (cell.width - w) / 2.0, cell.y, w, cell.height)
    }
}

fn colorbar_layout(
    rect: [f64; 4],
    width: f64,
    height: f64,
    options: &FigureOptions,
    config: &LayoutConfig,
) -> ColorbarLayout {
    let [left, bottom, w, h] = rect;
    // Figure fractions measure y from the bottom edge
    let bounds = BoundingBox::new(left * width, (1.0 - bottom - h) * height, w * width, h * height);
    let tick_length = config.points(config.tick_length);
    let font_size = config.points(config.tick_font_size);
    let label_x = bounds.right() + tick_length + config.points(TICK_LABEL_PAD);

    let ticks = options
        .norm
        .ticks()
        .into_iter()
        .map(|value| {
            let t = options.norm.normalize(value).unwrap_or(0.0);
            let y = bounds.bottom() - t * bounds.height;
            ColorbarTick {
                value,
                y,
                label: TextLayout {
                    text: format_tick(value),
                    position: Point::new(label_x, y + font_size * TICK_LABEL_BASELINE),
                    anchor: TextAnchor::Start,
                    font_size,
                },
            }
        })
        .collect();

    ColorbarLayout {
        bounds,
        ticks,
        tick_length,
    }
}

fn format_tick(value: f64) -> String {
    format!("{}", value)
}

/// Bounding box of everything drawn, padded and snapped to whole pixels
fn tight_bounds(
    panels: &[PanelLayout],
    suptitle: Option<&TextLayout>,
    colorbar: &ColorbarLayout,
    config: &LayoutConfig,
) -> BoundingBox {
    let ratio = config.char_width_ratio;

    let mut bounds = colorbar.bounds;
    bounds.width += colorbar.tick_length;
    for tick in &colorbar.ticks {
        bounds = bounds.union(&tick.label.extent(ratio));
    }
    for panel in panels {
        bounds = bounds.union(&panel.bounds);
        bounds = bounds.union(&panel.title.extent(ratio));
    }
    if let Some(title) = suptitle {
        bounds = bounds.union(&title.extent(ratio));
    }

    bounds.inflate(config.inches(config.pad_inches)).snap_outward()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::LogNorm;
    use crate::document::{DistanceBin, PanelSet, CIS_LABELS, COMPARTMENT_LABELS};
    use serde_json::{json, Value};

    fn square(n: usize) -> Value {
        json!(vec![vec![1.0; n]; n])
    }

    fn panel_set(labels: &[&str], n: usize) -> PanelSet {
        labels.iter().map(|l| (l.to_string(), square(n))).collect()
    }

    fn options(title: &str) -> FigureOptions {
        FigureOptions {
            title: title.to_string(),
            closed: false,
            norm: LogNorm::new(0.5, 2.0).unwrap(),
        }
    }

    #[test]
    fn test_trans_panels_share_a_row() {
        let doc = Document::Trans(panel_set(&COMPARTMENT_LABELS, 4));
        let figure = compute(&doc, &options(""), &LayoutConfig::default()).unwrap();

        assert_eq!(figure.grid, (1, 3));
        assert_eq!(figure.panels.len(), 3);
        let y = figure.panels[0].bounds.y;
        assert!(figure.panels.iter().all(|p| p.bounds.y == y));
        assert!(figure.panels[0].bounds.x < figure.panels[1].bounds.x);
        assert!(figure.panels[1].bounds.x < figure.panels[2].bounds.x);
    }

    #[test]
    fn test_rejects_unusable_dpi() {
        let doc = Document::Trans(panel_set(&COMPARTMENT_LABELS, 2));
        for dpi in [0.0, -100.0, f64::NAN] {
            let config = LayoutConfig::default().with_dpi(dpi);
            let err = compute(&doc, &options(""), &config).unwrap_err();
            assert!(matches!(err, LayoutError::InvalidDpi { .. }), "dpi {}", dpi);
        }
    }

    #[test]
    fn test_cis_canvas_and_colorbar() {
        let doc = Document::Cis(panel_set(&CIS_LABELS, 5));
        let figure = compute(&doc, &options(""), &LayoutConfig::default()).unwrap();

        assert_eq!((figure.width, figure.height), (1000.0, 1000.0));
        assert_eq!(
            figure.colorbar.bounds,
            BoundingBox::new(950.0, 250.0, 20.0, 500.0)
        );
        assert!(figure.suptitle.is_none());
    }

    #[test]
    fn test_cis_pentad_shape() {
        let doc = Document::Cis(panel_set(&CIS_LABELS, 5));
        let figure = compute(&doc, &options(""), &LayoutConfig::default()).unwrap();

        let top = figure.panel("Long-range B").unwrap().bounds;
        let center = figure.panel("Between A and B").unwrap().bounds;
        let bottom = figure.panel("Short-range B").unwrap().bounds;
        let left = figure.panel("Short-range A").unwrap().bounds;
        let right = figure.panel("Long-range A").unwrap().bounds;

        // vertical arm
        assert_eq!(top.x, center.x);
        assert_eq!(bottom.x, center.x);
        assert!(top.y < center.y && center.y < bottom.y);
        // horizontal arm
        assert_eq!(left.y, center.y);
        assert_eq!(right.y, center.y);
        assert!(left.x < center.x && center.x < right.x);
    }

    #[test]
    fn test_square_matrices_fill_square_boxes() {
        let doc = Document::Cis(panel_set(&CIS_LABELS, 7));
        let figure = compute(&doc, &options(""), &LayoutConfig::default()).unwrap();
        for panel in &figure.panels {
            assert!((panel.bounds.width - panel.bounds.height).abs() < 1e-9);
        }
    }

    #[test]
    fn test_wide_matrix_is_width_limited() {
        let cell = BoundingBox::new(0.0, 0.0, 100.0, 100.0);
        let fitted = fit_aspect(cell, 1, 4);
        assert_eq!(fitted, BoundingBox::new(0.0, 37.5, 100.0, 25.0));
        let fitted = fit_aspect(cell, 4, 1);
        assert_eq!(fitted, BoundingBox::new(37.5, 0.0, 25.0, 100.0));
    }

    #[test]
    fn test_colorbar_ticks() {
        let doc = Document::Cis(panel_set(&CIS_LABELS, 3));
        let figure = compute(&doc, &options(""), &LayoutConfig::default()).unwrap();

        let labels: Vec<&str> = figure
            .colorbar
            .ticks
            .iter()
            .map(|t| t.label.text.as_str())
            .collect();
        assert_eq!(labels, vec!["0.5", "1", "2"]);

        let ys: Vec<f64> = figure.colorbar.ticks.iter().map(|t| t.y).collect();
        assert!((ys[0] - 750.0).abs() < 1e-9);
        assert!((ys[1] - 500.0).abs() < 1e-9);
        assert!((ys[2] - 250.0).abs() < 1e-9);
    }

    #[test]
    fn test_trans_suptitle_above_canvas_is_kept() {
        let doc = Document::Trans(panel_set(&COMPARTMENT_LABELS, 3));
        let figure = compute(&doc, &options("Trans contacts"), &LayoutConfig::default()).unwrap();

        let suptitle = figure.suptitle.as_ref().unwrap();
        assert_eq!(suptitle.text, "Trans contacts");
        // anchored above the top edge of the canvas, still inside the crop
        assert!(suptitle.position.y < suptitle.font_size);
        assert!(figure.bounds.y < 0.0);
        assert!(figure.bounds.contains(suptitle.position));
    }

    #[test]
    fn test_bounds_cover_everything() {
        let doc = Document::Cis(panel_set(&CIS_LABELS, 3));
        let figure = compute(&doc, &options("Pentad"), &LayoutConfig::default()).unwrap();
        let b = figure.bounds;

        assert_eq!(b.x.fract(), 0.0);
        assert_eq!(b.width.fract(), 0.0);
        for panel in &figure.panels {
            let title = panel.title.extent(0.6);
            assert!(b.x <= panel.bounds.x && panel.bounds.right() <= b.right());
            assert!(b.y <= title.y && panel.bounds.bottom() <= b.bottom());
        }
        for tick in &figure.colorbar.ticks {
            assert!(tick.label.extent(0.6).right() <= b.right());
        }
        let suptitle = figure.suptitle.as_ref().unwrap().extent(0.6);
        assert!(b.y <= suptitle.y);
    }

    #[test]
    fn test_dist_canvas_scales_with_columns() {
        let bins: Vec<DistanceBin> = ["0-1Mb", "1-2Mb", "2-5Mb", "5Mb+"]
            .iter()
            .map(|l| DistanceBin {
                label: l.to_string(),
                panels: panel_set(&COMPARTMENT_LABELS, 3),
            })
            .collect();
        let doc = Document::Dist(bins);

        let figure = compute(&doc, &options(""), &LayoutConfig::default()).unwrap();
        assert_eq!(figure.columns(), 4);
        assert_eq!((figure.width, figure.height), (1600.0, 1200.0));

        let closed = FigureOptions {
            closed: true,
            ..options("")
        };
        let figure = compute(&doc, &closed, &LayoutConfig::default()).unwrap();
        assert_eq!(figure.columns(), 3);
        assert_eq!(figure.width, 1200.0);
        assert!(figure.panel("5Mb+ A").is_none());
        assert_eq!(figure.panel("2-5Mb AB").unwrap().cell, GridCell::new(2, 2));
    }

    #[test]
    fn test_shape_mismatch() {
        let mut panels = panel_set(&COMPARTMENT_LABELS[..2], 4);
        panels.insert("AB", square(3));
        let doc = Document::Trans(panels);
        let err = compute(&doc, &options(""), &LayoutConfig::default()).unwrap_err();
        assert_eq!(
            err,
            LayoutError::ShapeMismatch {
                label: "AB".to_string(),
                found_rows: 3,
                found_cols: 3,
                reference: "A".to_string(),
                rows: 4,
                cols: 4,
            }
        );
    }
}
