//! Configuration for the layout engine

use super::error::LayoutError;

/// Configuration options for figure geometry
///
/// Lengths given in points are converted to pixels at `dpi / 72`; figure
/// sizes from the templates are in inches and scale with `dpi`.
#[derive(Debug, Clone)]
pub struct LayoutConfig {
    /// Pixels per inch
    pub dpi: f64,

    /// Subplot grid extent as figure fractions: (left, right, bottom, top)
    pub subplot_extent: (f64, f64, f64, f64),

    /// Horizontal space between grid cells, as a fraction of cell width
    pub wspace: f64,

    /// Vertical space between grid cells, as a fraction of cell height
    pub hspace: f64,

    /// Padding around the tight bounding box, in inches
    pub pad_inches: f64,

    /// Font size of the figure super-title, in points
    pub suptitle_font_size: f64,

    /// Font size of colorbar tick labels, in points
    pub tick_font_size: f64,

    /// Gap between a panel and its title, in points
    pub title_pad: f64,

    /// Length of colorbar ticks, in points
    pub tick_length: f64,

    /// Average glyph advance as a fraction of the font size
    pub char_width_ratio: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            dpi: 100.0,
            subplot_extent: (0.125, 0.9, 0.11, 0.88),
            wspace: 0.2,
            hspace: 0.2,
            pad_inches: 0.1,
            suptitle_font_size: 22.0,
            tick_font_size: 20.0,
            title_pad: 6.0,
            tick_length: 7.0,
            char_width_ratio: 0.6,
        }
    }
}

impl LayoutConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the resolution in pixels per inch
    pub fn with_dpi(mut self, dpi: f64) -> Self {
        self.dpi = dpi;
        self
    }

    /// Set the spacing between grid cells
    pub fn with_spacing(mut self, wspace: f64, hspace: f64) -> Self {
        self.wspace = wspace;
        self.hspace = hspace;
        self
    }

    /// Set the tight bounding box padding
    pub fn with_pad_inches(mut self, pad: f64) -> Self {
        self.pad_inches = pad;
        self
    }

    /// Check that the configuration can size a canvas
    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.dpi.is_finite() && self.dpi > 0.0 {
            Ok(())
        } else {
            Err(LayoutError::InvalidDpi { dpi: self.dpi })
        }
    }

    /// Convert a length in points to pixels
    pub fn points(&self, pt: f64) -> f64 {
        pt * self.dpi / 72.0
    }

    /// Convert a length in inches to pixels
    pub fn inches(&self, inches: f64) -> f64 {
        inches * self.dpi
    }
}
