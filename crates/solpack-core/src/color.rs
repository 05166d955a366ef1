//! Color handling for solpack snapshots
//!
//! This module provides the [`Color`] type which wraps the `DynamicColor` type
//! from the color crate, and [`OrdinalPalette`], which hands out palette colors
//! to body names in first-seen order.

use std::{collections::HashMap, str::FromStr};

use color::DynamicColor;

use crate::identifier::Id;

/// Ten categorical colors, in the classic "category10" order.
pub const CATEGORY10: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf",
];

/// Ten categorical colors, in the "tableau10" order.
pub const TABLEAU10: [&str; 10] = [
    "#4e79a7", "#f28e2c", "#e15759", "#76b7b2", "#59a14f", "#edc949", "#af7aa1", "#ff9da7",
    "#9c755f", "#bab0ab",
];

/// Twelve pastel categorical colors, in the "set3" order.
pub const SET3: [&str; 12] = [
    "#8dd3c7", "#ffffb3", "#bebada", "#fb8072", "#80b1d3", "#fdb462", "#b3de69", "#fccde5",
    "#d9d9d9", "#bc80bd", "#ccebc5", "#ffed6f",
];

/// Wrapper around the `DynamicColor` type from the color crate
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Color {
    color: DynamicColor,
}

impl Color {
    /// Create a new `Color` from a CSS color string such as `"#ff0000"`,
    /// `"rgb(255, 0, 0)"` or `"red"`.
    ///
    /// # Examples
    ///
    /// ```
    /// use solpack_core::color::Color;
    ///
    /// let sun = Color::new("#FDB813").unwrap();
    /// let space = Color::new("black").unwrap();
    /// ```
    pub fn new(color_str: &str) -> Result<Self, String> {
        match DynamicColor::from_str(color_str) {
            Ok(color) => Ok(Self { color }),
            Err(err) => Err(format!("invalid color `{color_str}`: {err}")),
        }
    }

    /// Creates a new color with the specified alpha value.
    pub fn with_alpha(self, alpha: f32) -> Self {
        Color {
            color: self.color.with_alpha(alpha),
        }
    }

    /// Returns the alpha component of this color, between 0.0 and 1.0.
    pub fn alpha(&self) -> f32 {
        self.color.components[3]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::new("black").expect("'black' is a valid CSS color")
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.color)
    }
}

impl From<&Color> for svg::node::Value {
    fn from(color: &Color) -> Self {
        Self::from(color.to_string())
    }
}

/// Assigns palette colors to ids in the order they are first requested,
/// wrapping around once the palette is exhausted.
///
/// # Examples
///
/// ```
/// use solpack_core::{color::{OrdinalPalette, CATEGORY10}, identifier::Id};
///
/// let mut palette = OrdinalPalette::new(&CATEGORY10);
/// let earth = palette.color(Id::new("Earth"));
/// assert_eq!(earth, palette.color(Id::new("Earth")));
/// ```
#[derive(Debug, Clone)]
pub struct OrdinalPalette {
    colors: Vec<Color>,
    assigned: HashMap<Id, usize>,
}

impl OrdinalPalette {
    /// Creates a palette from CSS color strings.
    ///
    /// # Panics
    ///
    /// Panics if a color string cannot be parsed; palettes are built from the
    /// constants in this module.
    pub fn new(colors: &[&str]) -> Self {
        Self::from_colors(
            colors
                .iter()
                .map(|c| Color::new(c).expect("palette colors are valid CSS colors"))
                .collect(),
        )
    }

    /// Creates a palette from already parsed colors.
    pub fn from_colors(colors: Vec<Color>) -> Self {
        Self {
            colors,
            assigned: HashMap::new(),
        }
    }

    /// Pre-assigns colors to ids in the given order.
    pub fn with_domain(mut self, domain: impl IntoIterator<Item = Id>) -> Self {
        for id in domain {
            self.color(id);
        }
        self
    }

    /// Returns the color assigned to `id`, assigning the next one if needed.
    pub fn color(&mut self, id: Id) -> Color {
        if self.colors.is_empty() {
            return Color::default();
        }
        let next = self.assigned.len();
        let idx = *self.assigned.entry(id).or_insert(next);
        self.colors[idx % self.colors.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_new_valid() {
        assert!(Color::new("#FDB813").is_ok());
        assert!(Color::new("yellow").is_ok());
        assert!(Color::new("rgba(0, 0, 0, 0.82)").is_ok());
    }

    #[test]
    fn test_color_new_invalid() {
        let err = Color::new("not-a-color").unwrap_err();
        assert!(err.contains("not-a-color"));
    }

    #[test]
    fn test_with_alpha() {
        let c = Color::new("white").unwrap().with_alpha(0.5);
        assert_eq!(c.alpha(), 0.5);
    }

    #[test]
    fn test_ordinal_palette_is_stable_and_wraps() {
        let mut palette = OrdinalPalette::new(&["red", "blue"]);
        let a = palette.color(Id::new("palette-a"));
        let b = palette.color(Id::new("palette-b"));
        let c = palette.color(Id::new("palette-c"));

        assert_ne!(a, b);
        assert_eq!(a, c);
        assert_eq!(palette.color(Id::new("palette-b")), b);
    }

    #[test]
    fn test_ordinal_palette_domain_order() {
        let mut palette = OrdinalPalette::new(&TABLEAU10)
            .with_domain([Id::new("domain-jupiter"), Id::new("domain-saturn")]);

        assert_eq!(
            palette.color(Id::new("domain-saturn")),
            Color::new(TABLEAU10[1]).unwrap()
        );
    }
}
