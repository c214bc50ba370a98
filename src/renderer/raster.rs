//! PNG rasterization of the generated SVG

use resvg::{tiny_skia, usvg};
use tracing::{debug, info};

use super::output::{OutputError, OutputFormat};

/// Fallback family when none of the SVG's font families is installed
const DEFAULT_FONT_FAMILY: &str = "DejaVu Sans";

/// The rasterization backend
///
/// Holds the font database used to draw text. Initialize it once per process
/// with [`Backend::init`] and pass it down; no rendering state lives in
/// globals.
pub struct Backend {
    options: usvg::Options<'static>,
}

impl Backend {
    /// Create a backend with the system fonts loaded
    pub fn init() -> Self {
        let mut backend = Self::without_system_fonts();
        backend.options.fontdb_mut().load_system_fonts();
        info!(faces = backend.font_count(), "rendering backend initialized");
        backend
    }

    /// Create a backend with an empty font database
    ///
    /// Text is skipped when rasterizing; SVG output is unaffected.
    pub fn without_system_fonts() -> Self {
        let mut options = usvg::Options::default();
        options.font_family = DEFAULT_FONT_FAMILY.to_string();
        Self { options }
    }

    /// Number of font faces available to the backend
    pub fn font_count(&self) -> usize {
        self.options.fontdb.len()
    }

    /// Encode an SVG document into the bytes of the requested format
    pub fn encode(&self, svg: String, format: OutputFormat) -> Result<Vec<u8>, OutputError> {
        match format {
            OutputFormat::Svg => Ok(svg.into_bytes()),
            OutputFormat::Png => self.rasterize(&svg),
        }
    }

    /// Rasterize an SVG document to PNG bytes, one pixel per user unit
    pub fn rasterize(&self, svg: &str) -> Result<Vec<u8>, OutputError> {
        let tree = usvg::Tree::from_str(svg, &self.options)?;

        let size = tree.size().to_int_size();
        let (width, height) = (size.width(), size.height());
        let mut pixmap =
            tiny_skia::Pixmap::new(width, height).ok_or(OutputError::Allocation { width, height })?;

        resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());
        debug!(width, height, "rasterized figure");

        pixmap
            .encode_png()
            .map_err(|e| OutputError::Encode(e.to_string()))
    }
}
