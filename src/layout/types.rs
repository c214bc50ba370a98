//! Core types for the layout engine

use crate::color::LogNorm;
use crate::document::{DataType, Matrix};

/// Share of the font size above the text baseline
pub const ASCENT_RATIO: f64 = 0.8;

/// Share of the font size below the text baseline
pub const DESCENT_RATIO: f64 = 0.2;

/// A 2D point in pixel coordinates, y growing downwards
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A bounding box representing the spatial extent of an element
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a zero-sized bounding box at the origin
    pub fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }

    /// Right edge x-coordinate
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge y-coordinate
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Center point of the bounding box
    pub fn center(&self) -> Point {
        Point {
            x: self.x + self.width / 2.0,
            y: self.y + self.height / 2.0,
        }
    }

    /// Check if this bounding box contains a point
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x <= self.right()
            && point.y >= self.y
            && point.y <= self.bottom()
    }

    /// Compute the union of two bounding boxes (smallest box containing both)
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        BoundingBox::new(x, y, right - x, bottom - y)
    }

    /// Grow the box by `pad` on every side
    pub fn inflate(&self, pad: f64) -> BoundingBox {
        BoundingBox::new(
            self.x - pad,
            self.y - pad,
            self.width + 2.0 * pad,
            self.height + 2.0 * pad,
        )
    }

    /// Smallest box with integer edges containing this one
    pub fn snap_outward(&self) -> BoundingBox {
        let x = self.x.floor();
        let y = self.y.floor();
        BoundingBox::new(x, y, (self.right() - x).ceil(), (self.bottom() - y).ceil())
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::zero()
    }
}

/// Text anchor position for labels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

/// A single line of text placed on the canvas
#[derive(Debug, Clone, PartialEq)]
pub struct TextLayout {
    pub text: String,
    /// Anchor point on the baseline
    pub position: Point,
    pub anchor: TextAnchor,
    /// Font size in pixels
    pub font_size: f64,
}

impl TextLayout {
    /// Estimated extent of the rendered text
    pub fn extent(&self, char_width_ratio: f64) -> BoundingBox {
        let width = self.text.chars().count() as f64 * self.font_size * char_width_ratio;
        let left = match self.anchor {
            TextAnchor::Start => self.position.x,
            TextAnchor::Middle => self.position.x - width / 2.0,
            TextAnchor::End => self.position.x - width,
        };
        let top = self.position.y - self.font_size * ASCENT_RATIO;
        BoundingBox::new(
            left,
            top,
            width,
            self.font_size * (ASCENT_RATIO + DESCENT_RATIO),
        )
    }
}

/// A cell of the subplot grid, zero-indexed from the top-left
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridCell {
    pub row: usize,
    pub col: usize,
}

impl GridCell {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// A heatmap panel placed in the grid
#[derive(Debug, Clone)]
pub struct PanelLayout {
    pub cell: GridCell,
    /// Area covered by the heatmap image (equal-aspect fit inside the cell)
    pub bounds: BoundingBox,
    pub title: TextLayout,
    pub matrix: Matrix,
}

/// A labeled tick on the colorbar
#[derive(Debug, Clone, PartialEq)]
pub struct ColorbarTick {
    pub value: f64,
    /// Vertical pixel position of the tick
    pub y: f64,
    pub label: TextLayout,
}

/// The shared colorbar
#[derive(Debug, Clone, PartialEq)]
pub struct ColorbarLayout {
    pub bounds: BoundingBox,
    pub ticks: Vec<ColorbarTick>,
    /// Tick length in pixels
    pub tick_length: f64,
}

/// What the layout engine needs besides the document
#[derive(Debug, Clone)]
pub struct FigureOptions {
    /// Figure super-title; empty for none
    pub title: String,
    /// Drop the last distance interval of `dist` documents
    pub closed: bool,
    pub norm: LogNorm,
}

/// A fully laid-out figure, ready to be rendered
#[derive(Debug, Clone)]
pub struct Figure {
    pub data_type: DataType,
    /// Canvas size in pixels
    pub width: f64,
    pub height: f64,
    /// Grid dimensions: (rows, cols)
    pub grid: (usize, usize),
    pub norm: LogNorm,
    pub suptitle: Option<TextLayout>,
    pub panels: Vec<PanelLayout>,
    pub colorbar: ColorbarLayout,
    /// Tight bounding box of everything drawn, padded and snapped to whole pixels
    pub bounds: BoundingBox,
}

impl Figure {
    pub fn rows(&self) -> usize {
        self.grid.0
    }

    pub fn columns(&self) -> usize {
        self.grid.1
    }

    /// Find a panel by its title
    pub fn panel(&self, title: &str) -> Option<&PanelLayout> {
        self.panels.iter().find(|p| p.title.text == title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_union() {
        let a = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
        let b = BoundingBox::new(5.0, -5.0, 10.0, 10.0);
        assert_eq!(a.union(&b), BoundingBox::new(0.0, -5.0, 15.0, 15.0));
    }

    #[test]
    fn test_inflate_and_snap() {
        let b = BoundingBox::new(0.5, 1.5, 10.25, 3.25).inflate(1.0);
        assert_eq!(b, BoundingBox::new(-0.5, 0.5, 12.25, 5.25));
        let snapped = b.snap_outward();
        assert_eq!(snapped, BoundingBox::new(-1.0, 0.0, 13.0, 6.0));
    }

    #[test]
    fn test_contains() {
        let b = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
        assert!(b.contains(b.center()));
        assert!(!b.contains(Point::new(11.0, 5.0)));
    }

    #[test]
    fn test_text_extent_anchors() {
        let mut text = TextLayout {
            text: "AB".to_string(),
            position: Point::new(100.0, 50.0),
            anchor: TextAnchor::Middle,
            font_size: 10.0,
        };
        let extent = text.extent(0.5);
        assert_eq!(extent.x, 95.0);
        assert_eq!(extent.width, 10.0);
        assert_eq!(extent.y, 42.0);
        assert_eq!(extent.height, 10.0);

        text.anchor = TextAnchor::Start;
        assert_eq!(text.extent(0.5).x, 100.0);
        text.anchor = TextAnchor::End;
        assert_eq!(text.extent(0.5).x, 90.0);
    }
}
