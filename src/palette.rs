//! Colormap palette with TOML-defined entries
//!
//! A palette maps colormap names to sampled [`Colormap`]s. The built-in maps
//! are themselves described in TOML, and users can load additional maps (or
//! override built-ins) from a file with the same layout.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::color::{ColorError, Colormap, Rgb};

/// Errors that can occur when loading or parsing palettes
#[derive(Error, Debug)]
pub enum PaletteError {
    #[error("Failed to read colormap file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse colormap TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error(transparent)]
    Color(#[from] ColorError),
}

/// A set of named colormaps
#[derive(Debug, Clone)]
pub struct Palette {
    /// Optional name for the palette
    pub name: Option<String>,
    /// Optional description
    pub description: Option<String>,
    colormaps: HashMap<String, Colormap>,
}

/// TOML structure for deserializing palettes
#[derive(Deserialize)]
struct TomlPalette {
    metadata: Option<TomlMetadata>,
    #[serde(default)]
    colormaps: HashMap<String, TomlColormap>,
}

#[derive(Deserialize)]
struct TomlMetadata {
    name: Option<String>,
    description: Option<String>,
}

#[derive(Deserialize)]
struct TomlColormap {
    colors: Vec<String>,
    positions: Option<Vec<f64>>,
}

/// Built-in colormaps, sampled from the usual scientific plotting palettes
const BUILTIN_COLORMAPS: &str = r##"
[metadata]
name = "builtin"
description = "Standard scientific colormaps"

# Moreland diverging map
[colormaps.coolwarm]
colors = [
    "#3b4cc0", "#445acc", "#4d68d7", "#5775e1", "#6282ea", "#6c8ef1", "#779af7", "#82a5fb",
    "#8db0fe", "#98b9ff", "#a3c2ff", "#aec9fd", "#b8d0f9", "#c2d5f4", "#ccd9ee", "#d5dbe6",
    "#dddddd", "#e5d8d1", "#ecd3c5", "#f1ccb9", "#f5c4ad", "#f7bba0", "#f7b194", "#f7a687",
    "#f49a7b", "#f18d6f", "#ec7f63", "#e57058", "#de604d", "#d55042", "#cb3e38", "#c0282f",
    "#b40426",
]

[colormaps.viridis]
colors = ["#440154", "#472c7a", "#3b518b", "#2c718e", "#21908d", "#27ad81", "#5cc863", "#aadc32", "#fde725"]

[colormaps.magma]
colors = ["#000004", "#1c1044", "#4f127b", "#812581", "#b5367a", "#e55964", "#fb8761", "#fec287", "#fcfdbf"]

[colormaps.inferno]
colors = ["#000004", "#1f0c48", "#550f6d", "#88226a", "#ba3655", "#e35933", "#f98c0a", "#f9c932", "#fcffa4"]

[colormaps.plasma]
colors = ["#0d0887", "#4c02a1", "#7e03a8", "#a92395", "#cc4778", "#e56b5d", "#f89441", "#fdc328", "#f0f921"]

[colormaps.bwr]
colors = ["#0000ff", "#ffffff", "#ff0000"]

[colormaps.seismic]
colors = ["#00004d", "#0000ff", "#ffffff", "#ff0000", "#800000"]

[colormaps.RdBu]
colors = [
    "#67001f", "#b2182b", "#d6604d", "#f4a582", "#fddbc7", "#f7f7f7",
    "#d1e5f0", "#92c5de", "#4393c3", "#2166ac", "#053061",
]

[colormaps.Reds]
colors = ["#fff5f0", "#fee0d2", "#fcbba1", "#fc9272", "#fb6a4a", "#ef3b2c", "#cb181d", "#a50f15", "#67000d"]

[colormaps.Blues]
colors = ["#f7fbff", "#deebf7", "#c6dbef", "#9ecae1", "#6baed6", "#4292c6", "#2171b5", "#08519c", "#08306b"]

[colormaps.YlOrRd]
colors = ["#ffffcc", "#ffeda0", "#fed976", "#feb24c", "#fd8d3c", "#fc4e2a", "#e31a1c", "#bd0026", "#800026"]

[colormaps.Greys]
colors = ["#ffffff", "#000000"]

[colormaps.gray]
colors = ["#000000", "#ffffff"]

[colormaps.hot]
colors = ["#0b0000", "#ff0000", "#ffff00", "#ffffff"]
positions = [0.0, 0.365079, 0.746032, 1.0]

[colormaps.afmhot]
colors = ["#000000", "#ff0000", "#ffff00", "#ffffff"]
positions = [0.0, 0.5, 0.75, 1.0]
"##;

impl Palette {
    /// Load palette from TOML file
    pub fn from_file(path: &Path) -> Result<Self, PaletteError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load palette from TOML string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, PaletteError> {
        let parsed: TomlPalette = toml::from_str(content)?;

        let mut colormaps = HashMap::with_capacity(parsed.colormaps.len());
        for (name, entry) in parsed.colormaps {
            let cmap = build_colormap(&name, &entry)?;
            colormaps.insert(name, cmap);
        }

        Ok(Palette {
            name: parsed.metadata.as_ref().and_then(|m| m.name.clone()),
            description: parsed.metadata.as_ref().and_then(|m| m.description.clone()),
            colormaps,
        })
    }

    /// Add every colormap of `other`, replacing same-named entries
    pub fn merge(mut self, other: Palette) -> Self {
        self.colormaps.extend(other.colormaps);
        self
    }

    /// Resolve a colormap by name
    ///
    /// Lookup order:
    /// 1. Exact name
    /// 2. `<name>_r` resolves to the reverse of `<name>`
    pub fn get(&self, name: &str) -> Result<Colormap, ColorError> {
        if let Some(cmap) = self.colormaps.get(name) {
            return Ok(cmap.clone());
        }
        if let Some(base) = name.strip_suffix("_r") {
            if let Some(cmap) = self.colormaps.get(base) {
                return Ok(cmap.reversed());
            }
        }
        Err(ColorError::UnknownColormap {
            name: name.to_string(),
            available: self.names().join(", "),
        })
    }

    /// Colormap names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.colormaps.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::from_str(BUILTIN_COLORMAPS).expect("Built-in colormaps should be valid TOML")
    }
}

fn build_colormap(name: &str, entry: &TomlColormap) -> Result<Colormap, ColorError> {
    let colors = entry
        .colors
        .iter()
        .map(|c| c.parse::<Rgb>())
        .collect::<Result<Vec<_>, _>>()?;

    match &entry.positions {
        None => Colormap::from_colors(name, &colors),
        Some(positions) => {
            if positions.len() != colors.len() {
                return Err(ColorError::invalid_colormap(
                    name,
                    format!(
                        "{} positions given for {} colors",
                        positions.len(),
                        colors.len()
                    ),
                ));
            }
            let stops: Vec<(f64, Rgb)> = positions.iter().copied().zip(colors).collect();
            Colormap::from_stops(name, &stops)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_palette() {
        let palette = Palette::default();
        assert_eq!(palette.name.as_deref(), Some("builtin"));
        for name in ["coolwarm", "viridis", "RdBu", "Reds", "gray", "hot"] {
            assert!(palette.get(name).is_ok(), "missing builtin {}", name);
        }
    }

    #[test]
    fn test_coolwarm_endpoints() {
        let cmap = Palette::default().get("coolwarm").unwrap();
        assert_eq!(cmap.map(0.0), Rgb::new(59, 76, 192));
        assert_eq!(cmap.map(1.0), Rgb::new(180, 4, 38));
    }

    #[test]
    fn test_reversed_lookup() {
        let palette = Palette::default();
        let cmap = palette.get("coolwarm_r").unwrap();
        assert_eq!(cmap.name(), "coolwarm_r");
        assert_eq!(cmap.map(0.0), Rgb::new(180, 4, 38));
    }

    #[test]
    fn test_unknown_colormap() {
        let err = Palette::default().get("jet").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("unknown colormap 'jet'"));
        assert!(msg.contains("coolwarm"));
    }

    #[test]
    fn test_parse_toml_with_metadata() {
        let toml_str = r##"
[metadata]
name = "Lab Maps"
description = "Contact enrichment"

[colormaps.fall]
colors = ["#ffffff", "#ffff00", "#ff0000", "#000000"]
"##;
        let palette = Palette::from_str(toml_str).expect("Should parse");
        assert_eq!(palette.name, Some("Lab Maps".to_string()));
        assert_eq!(palette.description, Some("Contact enrichment".to_string()));
        let cmap = palette.get("fall").unwrap();
        assert_eq!(cmap.map(0.0), Rgb::WHITE);
        assert_eq!(cmap.map(1.0), Rgb::BLACK);
    }

    #[test]
    fn test_parse_toml_with_positions() {
        let toml_str = r##"
[colormaps.skewed]
colors = ["#000000", "#ff0000", "#ffffff"]
positions = [0.0, 0.1, 1.0]
"##;
        let palette = Palette::from_str(toml_str).expect("Should parse");
        assert_eq!(palette.name, None);
        assert!(palette.get("skewed").is_ok());
    }

    #[test]
    fn test_merge_overrides_builtin() {
        let user = Palette::from_str(
            r##"
[colormaps.coolwarm]
colors = ["#000000", "#ffffff"]
"##,
        )
        .unwrap();
        let palette = Palette::default().merge(user);
        let cmap = palette.get("coolwarm").unwrap();
        assert_eq!(cmap.map(0.0), Rgb::BLACK);
        // untouched builtins survive
        assert!(palette.get("viridis").is_ok());
    }

    #[test]
    fn test_position_count_mismatch() {
        let result = Palette::from_str(
            r##"
[colormaps.broken]
colors = ["#000000", "#ffffff"]
positions = [0.0, 0.5, 1.0]
"##,
        );
        assert!(matches!(result, Err(PaletteError::Color(_))));
    }

    #[test]
    fn test_invalid_toml_error() {
        let invalid = "this is not valid toml {{{{";
        let result = Palette::from_str(invalid);
        assert!(matches!(result, Err(PaletteError::ParseError(_))));
    }
}
