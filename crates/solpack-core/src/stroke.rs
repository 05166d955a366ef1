//! Outline definitions for circles and links.
//!
//! Snapshots only ever draw solid outlines, so a [`Stroke`] is a color and a
//! width. The [`apply_stroke!`](crate::apply_stroke!) macro writes both onto
//! an SVG element.
//!
//! ```
//! use solpack_core::{color::Color, stroke::Stroke};
//! use svg::node::element as svg_element;
//!
//! let stroke = Stroke::solid(Color::new("white").unwrap(), 0.5);
//! let circle = svg_element::Circle::new().set("r", 10);
//! let circle = solpack_core::apply_stroke!(circle, &stroke);
//! ```

use crate::color::Color;

/// A solid outline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    color: Color,
    width: f32,
}

impl Stroke {
    pub fn solid(color: Color, width: f32) -> Self {
        Self { color, width }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn with_width(mut self, width: f32) -> Self {
        self.width = width;
        self
    }
}

impl Default for Stroke {
    /// Black, one pixel wide
    fn default() -> Self {
        Self::solid(Color::default(), 1.0)
    }
}

/// Sets `stroke`, `stroke-opacity` and `stroke-width` on an SVG element.
#[macro_export]
macro_rules! apply_stroke {
    ($element:expr, $stroke:expr) => {{
        $element
            .set("stroke", $stroke.color().to_string())
            .set("stroke-opacity", $stroke.color().alpha())
            .set("stroke-width", $stroke.width())
    }};
}
