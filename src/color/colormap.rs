//! Colormaps sampled into fixed-size lookup tables

use super::{ColorError, Rgb};

/// Number of entries every colormap is sampled into
pub const LUT_SIZE: usize = 256;

/// A named colormap backed by a `LUT_SIZE`-entry lookup table
///
/// Values are looked up the way a quantized colormap is indexed:
/// `t` in `[0, 1]` selects entry `floor(t * LUT_SIZE)`, with `t == 1.0`
/// landing on the last entry. Values below zero or above one saturate to the
/// first or last entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Colormap {
    name: String,
    lut: Vec<Rgb>,
}

impl Colormap {
    /// Build a colormap by linear interpolation between positioned stops
    ///
    /// Stop positions must start at 0.0, end at 1.0 and be non-decreasing.
    pub fn from_stops(name: impl Into<String>, stops: &[(f64, Rgb)]) -> Result<Self, ColorError> {
        let name = name.into();
        if stops.len() < 2 {
            return Err(ColorError::invalid_colormap(name, "at least two colors are required"));
        }
        let first = stops[0].0;
        let last = stops[stops.len() - 1].0;
        if first != 0.0 || last != 1.0 {
            return Err(ColorError::invalid_colormap(
                name,
                "positions must start at 0.0 and end at 1.0",
            ));
        }
        if stops.windows(2).any(|w| !(w[0].0 <= w[1].0)) {
            return Err(ColorError::invalid_colormap(
                name,
                "positions must be non-decreasing",
            ));
        }

        let lut = (0..LUT_SIZE)
            .map(|i| sample_stops(stops, i as f64 / (LUT_SIZE - 1) as f64))
            .collect();

        Ok(Self { name, lut })
    }

    /// Build a colormap from evenly spaced colors
    pub fn from_colors(name: impl Into<String>, colors: &[Rgb]) -> Result<Self, ColorError> {
        let n = colors.len();
        let stops: Vec<(f64, Rgb)> = colors
            .iter()
            .enumerate()
            .map(|(i, c)| {
                let pos = if n > 1 { i as f64 / (n - 1) as f64 } else { 0.0 };
                (pos, *c)
            })
            .collect();
        Self::from_stops(name, &stops)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The sampled lookup table, lowest value first
    pub fn lut(&self) -> &[Rgb] {
        &self.lut
    }

    /// The same colormap running in the opposite direction, named `<name>_r`
    pub fn reversed(&self) -> Self {
        let mut lut = self.lut.clone();
        lut.reverse();
        Self {
            name: format!("{}_r", self.name),
            lut,
        }
    }

    /// Map a normalized value to a color
    pub fn map(&self, t: f64) -> Rgb {
        let n = self.lut.len();
        let index = (t * n as f64).floor();
        let index = if index.is_nan() || index < 0.0 {
            0
        } else {
            (index as usize).min(n - 1)
        };
        self.lut[index]
    }
}

/// Color at position `x` along piecewise-linear stops
fn sample_stops(stops: &[(f64, Rgb)], x: f64) -> Rgb {
    for pair in stops.windows(2) {
        let (x0, c0) = pair[0];
        let (x1, c1) = pair[1];
        if x <= x1 {
            if x1 == x0 {
                return c1;
            }
            return c0.lerp(c1, (x - x0) / (x1 - x0));
        }
    }
    stops[stops.len() - 1].1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn black_to_white() -> Colormap {
        Colormap::from_colors("gray", &[Rgb::BLACK, Rgb::WHITE]).unwrap()
    }

    #[test]
    fn test_lut_endpoints() {
        let cmap = black_to_white();
        assert_eq!(cmap.lut().len(), LUT_SIZE);
        assert_eq!(cmap.lut()[0], Rgb::BLACK);
        assert_eq!(cmap.lut()[LUT_SIZE - 1], Rgb::WHITE);
    }

    #[test]
    fn test_map_saturates() {
        let cmap = black_to_white();
        assert_eq!(cmap.map(-3.0), Rgb::BLACK);
        assert_eq!(cmap.map(0.0), Rgb::BLACK);
        assert_eq!(cmap.map(1.0), Rgb::WHITE);
        assert_eq!(cmap.map(7.5), Rgb::WHITE);
    }

    #[test]
    fn test_map_quantizes() {
        let cmap = black_to_white();
        // 0.5 * 256 = 128, entry 128 of a 0..=255 ramp
        assert_eq!(cmap.map(0.5), Rgb::new(128, 128, 128));
    }

    #[test]
    fn test_reversed() {
        let cmap = black_to_white().reversed();
        assert_eq!(cmap.name(), "gray_r");
        assert_eq!(cmap.map(0.0), Rgb::WHITE);
        assert_eq!(cmap.map(1.0), Rgb::BLACK);
    }

    #[test]
    fn test_hard_edge_stops() {
        let stops = [
            (0.0, Rgb::BLACK),
            (0.5, Rgb::BLACK),
            (0.5, Rgb::WHITE),
            (1.0, Rgb::WHITE),
        ];
        let cmap = Colormap::from_stops("step", &stops).unwrap();
        assert_eq!(cmap.map(0.25), Rgb::BLACK);
        assert_eq!(cmap.map(0.75), Rgb::WHITE);
    }

    #[test]
    fn test_rejects_bad_stops() {
        assert!(Colormap::from_colors("one", &[Rgb::BLACK]).is_err());
        let unordered = [(0.0, Rgb::BLACK), (0.7, Rgb::WHITE), (0.3, Rgb::BLACK), (1.0, Rgb::WHITE)];
        assert!(Colormap::from_stops("bad", &unordered).is_err());
        let short = [(0.0, Rgb::BLACK), (0.9, Rgb::WHITE)];
        assert!(Colormap::from_stops("short", &short).is_err());
    }
}
