//! The positioned, sized entity being laid out.
//!
//! A [`Body`] is built fresh from catalog rows for every draw. It carries its
//! identity, the physical magnitude it was sized from, the derived render
//! radius and its current position. Optional fields describe a pinned anchor
//! and the body it orbits.

use serde::Deserialize;

use crate::{geometry::Point, identifier::Id, scale::RadiusLaw};

/// Which physical quantity sizes a body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Magnitude {
    #[default]
    Volume,
    Mass,
    MeanRadius,
}

impl Magnitude {
    /// Column name in the body dataset
    pub fn column(self) -> &'static str {
        match self {
            Self::Volume => "volume",
            Self::Mass => "mass_kg",
            Self::MeanRadius => "meanRadius",
        }
    }

    /// Human readable name used in hover text
    pub fn label(self) -> &'static str {
        match self {
            Self::Volume => "volume",
            Self::Mass => "mass",
            Self::MeanRadius => "radius",
        }
    }
}

/// How a body relates to the hierarchy it belongs to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum OrbitType {
    /// The central body everything else hangs from
    Root,
    /// Orbits the root directly
    #[default]
    Primary,
    /// Orbits a primary
    Secondary,
}

impl OrbitType {
    /// Depth in the orbit hierarchy
    pub fn depth(self) -> usize {
        match self {
            Self::Root => 0,
            Self::Primary => 1,
            Self::Secondary => 2,
        }
    }
}

/// A single body positioned in the plane.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    id: Id,
    magnitude: f64,
    radius: f32,
    position: Point,
    anchor: Option<Point>,
    parent: Option<Id>,
    orbit_type: OrbitType,
}

impl Body {
    /// Creates a body with an explicit render radius at the origin.
    pub fn new(id: Id, magnitude: f64, radius: f32) -> Self {
        Self {
            id,
            magnitude,
            radius,
            position: Point::default(),
            anchor: None,
            parent: None,
            orbit_type: OrbitType::default(),
        }
    }

    /// Creates a body whose radius is derived from its magnitude.
    pub fn sized(id: Id, magnitude: f64, law: &RadiusLaw) -> Self {
        Self::new(id, magnitude, law.radius(magnitude))
    }

    /// Sets the initial position
    pub fn with_position(mut self, position: Point) -> Self {
        self.position = position;
        self
    }

    /// Pins the body to a fixed position; the engine never moves it.
    pub fn with_anchor(mut self, anchor: Point) -> Self {
        self.position = anchor;
        self.anchor = Some(anchor);
        self
    }

    /// Sets the body this one orbits.
    pub fn with_parent(mut self, parent: Id) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Sets the place of the body in the orbit hierarchy.
    pub fn with_orbit_type(mut self, orbit_type: OrbitType) -> Self {
        self.orbit_type = orbit_type;
        self
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn magnitude(&self) -> f64 {
        self.magnitude
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn position(&self) -> Point {
        self.position
    }

    /// Fixed position, if the body is pinned
    pub fn anchor(&self) -> Option<Point> {
        self.anchor
    }

    pub fn parent(&self) -> Option<Id> {
        self.parent
    }

    pub fn orbit_type(&self) -> OrbitType {
        self.orbit_type
    }

    /// Depth in the orbit hierarchy (0 for the root)
    pub fn depth(&self) -> usize {
        self.orbit_type.depth()
    }

    pub fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    /// Whether the body satisfies the engine's input contract: finite
    /// position and a strictly positive, finite radius.
    pub fn is_layout_ready(&self) -> bool {
        self.radius.is_finite() && self.radius > 0.0 && self.position.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sized_body_uses_law() {
        let law = RadiusLaw::CubeRoot {
            reference: 8.0,
            scale: 10.0,
        };
        let body = Body::sized(Id::new("body-sized"), 1.0, &law);
        assert_eq!(body.radius(), 5.0);
        assert_eq!(body.magnitude(), 1.0);
    }

    #[test]
    fn test_with_anchor_moves_and_pins() {
        let anchor = Point::new(80.0, 325.0);
        let body = Body::new(Id::new("body-root"), 1.0, 14.0)
            .with_anchor(anchor)
            .with_orbit_type(OrbitType::Root);
        assert_eq!(body.position(), anchor);
        assert_eq!(body.anchor(), Some(anchor));
        assert_eq!(body.depth(), 0);
    }

    #[test]
    fn test_layout_ready() {
        assert!(Body::new(Id::new("body-ok"), 1.0, 3.0).is_layout_ready());
        assert!(!Body::new(Id::new("body-zero"), 1.0, 0.0).is_layout_ready());
        assert!(
            !Body::new(Id::new("body-nan"), 1.0, 3.0)
                .with_position(Point::new(f32::NAN, 0.0))
                .is_layout_ready()
        );
    }

    #[test]
    fn test_magnitude_columns() {
        assert_eq!(Magnitude::Volume.column(), "volume");
        assert_eq!(Magnitude::Mass.column(), "mass_kg");
        assert_eq!(Magnitude::MeanRadius.column(), "meanRadius");
    }
}
