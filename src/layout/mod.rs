//! Layout engine for computing figure geometry
//!
//! This module takes a loaded document, picks the template for its type and
//! produces a [`Figure`] with positioned panels, titles and colorbar.

pub mod config;
pub mod engine;
pub mod error;
pub mod template;
pub mod types;

pub use config::LayoutConfig;
pub use engine::compute;
pub use error::LayoutError;
pub use template::{Template, CIS_PLACEMENT};
pub use types::*;
