//! Color primitives for heatmap rendering
//!
//! This module provides the RGB color type, sampled colormaps and the
//! logarithmic normalization that maps matrix values onto a colormap.

pub mod colormap;
pub mod norm;

pub use colormap::{Colormap, LUT_SIZE};
pub use norm::LogNorm;

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Errors raised while building colormaps or normalizations
#[derive(Debug, Error, PartialEq)]
pub enum ColorError {
    /// A color string that is not `#rgb` or `#rrggbb`
    #[error("invalid color '{0}' (expected #rgb or #rrggbb)")]
    InvalidColor(String),

    /// Colormap stops that cannot be interpolated
    #[error("invalid colormap '{name}': {reason}")]
    InvalidColormap { name: String, reason: String },

    /// Colormap name not present in the palette
    #[error("unknown colormap '{name}' (available: {available})")]
    UnknownColormap { name: String, available: String },

    /// Normalization bounds unusable on a log scale
    #[error("invalid log normalization bounds: vmin={vmin}, vmax={vmax} ({reason})")]
    InvalidNorm { vmin: f64, vmax: f64, reason: String },
}

impl ColorError {
    /// Create an invalid colormap error
    pub fn invalid_colormap(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidColormap {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

/// An opaque 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Linear interpolation between two colors, `t` in `[0, 1]`
    pub fn lerp(self, other: Rgb, t: f64) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| -> u8 {
            (a as f64 + (b as f64 - a as f64) * t)
                .round()
                .clamp(0.0, 255.0) as u8
        };
        Rgb::new(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }

    /// Lowercase `#rrggbb` form
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ColorError::InvalidColor(s.to_string());
        let hex = s.trim().strip_prefix('#').ok_or_else(invalid)?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let channel = |i: usize, len: usize| -> Result<u8, ColorError> {
            u8::from_str_radix(&hex[i..i + len], 16).map_err(|_| invalid())
        };

        match hex.len() {
            3 => {
                // #abc is shorthand for #aabbcc
                let r = channel(0, 1)?;
                let g = channel(1, 1)?;
                let b = channel(2, 1)?;
                Ok(Rgb::new(r * 17, g * 17, b * 17))
            }
            6 => Ok(Rgb::new(channel(0, 2)?, channel(2, 2)?, channel(4, 2)?)),
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}
