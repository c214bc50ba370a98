//! Pentad Plot - heatmap grids of averaged Hi-C compartment contacts
//!
//! This library loads averaged compartment-contact matrices from JSON, lays
//! them out according to the document type (`cis` pentad, `trans` row or
//! `dist` grid) and renders log-normalized heatmaps with a shared colorbar
//! to SVG or PNG.
//!
//! # Example
//!
//! ```rust
//! use pentad_plot::{document, render_svg_document, RenderConfig};
//!
//! let doc = document::parse(
//!     r#"{"type": "trans", "data": {"A": [[1.0]], "B": [[2.0]], "AB": [[0.5]]}}"#,
//! ).unwrap();
//!
//! let svg = render_svg_document(&doc, &RenderConfig::default()).unwrap();
//! assert!(svg.contains("<svg"));
//! ```

pub mod color;
pub mod document;
pub mod error;
pub mod layout;
pub mod palette;
pub mod renderer;

pub use color::{ColorError, Colormap, LogNorm, Rgb};
pub use document::{DataType, Document, Matrix};
pub use error::DocumentError;
pub use layout::{FigureOptions, LayoutConfig, LayoutError};
pub use palette::{Palette, PaletteError};
pub use renderer::{render_svg, Backend, OutputError, OutputFormat, SvgConfig};

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur during the render pipeline
#[derive(Debug, Error)]
pub enum RenderError {
    /// Error while reading or validating the input document
    #[error(transparent)]
    Document(#[from] DocumentError),

    /// Error while laying out the figure
    #[error(transparent)]
    Layout(#[from] LayoutError),

    /// Bad normalization bounds or colormap
    #[error(transparent)]
    Color(#[from] ColorError),

    /// Error while loading user colormaps
    #[error(transparent)]
    Palette(#[from] PaletteError),

    /// Error while encoding or writing the image
    #[error(transparent)]
    Output(#[from] OutputError),
}

/// Configuration for the complete render pipeline
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Lower bound of the log normalization
    pub vmin: f64,
    /// Upper bound of the log normalization
    pub vmax: f64,
    /// Colormap name, resolved through `palette`
    pub cmap: String,
    /// Figure super-title; empty for none
    pub title: String,
    /// `dist` only: drop the last distance interval
    pub closed: bool,
    /// Output path without extension
    pub out_pref: String,
    /// Output format name, also used as the file extension
    pub format: String,
    /// Layout configuration
    pub layout: LayoutConfig,
    /// SVG output configuration
    pub svg: SvgConfig,
    /// Colormaps available to `cmap`
    pub palette: Palette,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            vmin: 0.5,
            vmax: 2.0,
            cmap: "coolwarm".to_string(),
            title: String::new(),
            closed: false,
            out_pref: "pentad".to_string(),
            format: "png".to_string(),
            layout: LayoutConfig::default(),
            svg: SvgConfig::default(),
            palette: Palette::default(),
        }
    }
}

impl RenderConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the log normalization bounds
    pub fn with_range(mut self, vmin: f64, vmax: f64) -> Self {
        self.vmin = vmin;
        self.vmax = vmax;
        self
    }

    /// Set the colormap name
    pub fn with_cmap(mut self, cmap: impl Into<String>) -> Self {
        self.cmap = cmap.into();
        self
    }

    /// Set the figure super-title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Drop the last distance interval of `dist` documents
    pub fn with_closed(mut self, closed: bool) -> Self {
        self.closed = closed;
        self
    }

    /// Set the output path prefix
    pub fn with_out_pref(mut self, out_pref: impl Into<String>) -> Self {
        self.out_pref = out_pref.into();
        self
    }

    /// Set the output format
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = format.into();
        self
    }

    /// Set the layout configuration
    pub fn with_layout(mut self, config: LayoutConfig) -> Self {
        self.layout = config;
        self
    }

    /// Set the SVG configuration
    pub fn with_svg(mut self, config: SvgConfig) -> Self {
        self.svg = config;
        self
    }

    /// Set the colormap palette
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    /// `<out_pref>.<format>`
    pub fn output_path(&self) -> PathBuf {
        renderer::output_path(&self.out_pref, &self.format)
    }

    /// Parsed output format
    pub fn output_format(&self) -> Result<OutputFormat, OutputError> {
        self.format.parse()
    }

    /// Log normalization for `[vmin, vmax]`
    pub fn norm(&self) -> Result<LogNorm, ColorError> {
        LogNorm::new(self.vmin, self.vmax)
    }

    /// The configured colormap
    pub fn colormap(&self) -> Result<Colormap, ColorError> {
        self.palette.get(&self.cmap)
    }
}

/// Render a loaded document to an SVG string
pub fn render_svg_document(doc: &Document, config: &RenderConfig) -> Result<String, RenderError> {
    let norm = config.norm()?;
    let cmap = config.colormap()?;
    draw(doc, norm, &cmap, config)
}

/// Render a loaded document to the bytes of the configured output format
pub fn render_document(
    doc: &Document,
    config: &RenderConfig,
    backend: &Backend,
) -> Result<Vec<u8>, RenderError> {
    let format = config.output_format()?;
    let svg = render_svg_document(doc, config)?;
    Ok(backend.encode(svg, format)?)
}

/// Load the document at `path`, render it and write `<out_pref>.<format>`
///
/// Options are validated before the document is read. The image is encoded
/// completely in memory, so no file is created when any step fails.
/// Returns the path of the written file.
pub fn run(path: &Path, config: &RenderConfig, backend: &Backend) -> Result<PathBuf, RenderError> {
    let format = config.output_format()?;
    let norm = config.norm()?;
    let cmap = config.colormap()?;
    config.layout.validate()?;

    let doc = document::load(path)?;
    let svg = draw(&doc, norm, &cmap, config)?;
    let bytes = backend.encode(svg, format)?;

    let out = config.output_path();
    renderer::write_file(&out, &bytes)?;
    info!(path = %out.display(), bytes = bytes.len(), %format, "figure written");

    Ok(out)
}

fn draw(
    doc: &Document,
    norm: LogNorm,
    cmap: &Colormap,
    config: &RenderConfig,
) -> Result<String, RenderError> {
    let options = FigureOptions {
        title: config.title.clone(),
        closed: config.closed,
        norm,
    };
    let figure = layout::compute(doc, &options, &config.layout)?;
    let svg = render_svg(&figure, cmap, &config.svg);
    debug!(cmap = cmap.name(), bytes = svg.len(), "rendered SVG");

    // release the figure before encoding
    drop(figure);
    Ok(svg)
}
