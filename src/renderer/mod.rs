//! Renderer producing the final image from a laid-out figure
//!
//! A [`Figure`](crate::layout::Figure) is first turned into an SVG string;
//! PNG output rasterizes that SVG with resvg.

pub mod config;
pub mod output;
pub mod raster;
pub mod svg;

pub use config::SvgConfig;
pub use output::{output_path, write_file, OutputError, OutputFormat};
pub use raster::Backend;
pub use svg::render_svg;
