//! Planets thrown from a launch point, landing by surface gravity.
//!
//! Surface gravity `g = G * M / r²` is computed from each planet's mass and
//! mean radius. A linear scale maps the gravity extent onto the ground so the
//! weakest pull lands farthest right and the strongest closest to the
//! thrower. Every throw follows a quadratic arc of constant height, and each
//! planet can land only once.

use indexmap::IndexSet;
use log::{debug, info};

use solpack_core::{
    color::{CATEGORY10, Color},
    geometry::{Bounds, Point},
    identifier::Id,
    scale::{ContinuousScale, ScaleError},
};
use solpack_data::Catalog;

/// Gravitational constant in m³ kg⁻¹ s⁻²
pub const GRAVITATIONAL_CONSTANT: f64 = 6.6743e-11;

const CANVAS_WIDTH: f32 = 1100.0;
const CANVAS_HEIGHT: f32 = 520.0;
const GROUND_Y: f32 = 380.0;
const LAUNCH: Point = Point::new(120.0, 190.0);
const ARC_HEIGHT: f32 = 150.0;
/// The strongest pull lands this far past the launch point
const NEAREST_LANDING: f32 = 220.0;
/// The weakest pull lands this far from the right edge
const FARTHEST_LANDING_MARGIN: f32 = 90.0;
/// Arcs end this far above the landed body
const ARC_END_LIFT: f32 = 10.0;

const PLANET_RADIUS: f32 = 16.0;
const LARGE_PLANET_RADIUS: f32 = 22.0;
const LARGE_PLANET: &str = "Jupiter";
const RINGED_PLANET: &str = "Saturn";
const RING_EXTENT: f32 = 25.0;
const RING_HEIGHT: f32 = 6.0;

/// Drawn with a solid white arc, every other throw is dashed
const REFERENCE_PLANET: &str = "Earth";
const REFERENCE_ARC_COLOR: &str = "white";

const LABEL_OFFSET: f32 = 35.0;
const LABEL_STEP: f32 = 14.0;
const LABEL_LEVELS: usize = 5;

/// Surface gravity in m/s² from a mass in kg and a mean radius in km.
///
/// `None` unless both are finite and positive.
pub fn surface_gravity(mass_kg: f64, mean_radius_km: f64) -> Option<f64> {
    let valid = |v: f64| v.is_finite() && v > 0.0;
    if !valid(mass_kg) || !valid(mean_radius_km) {
        return None;
    }
    let radius_m = mean_radius_km * 1000.0;
    Some(GRAVITATIONAL_CONSTANT * mass_kg / (radius_m * radius_m))
}

/// Quadratic Bézier from the launch point to just above the landing spot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThrowArc {
    start: Point,
    control: Point,
    end: Point,
}

impl ThrowArc {
    fn new(landing_x: f32, body_y: f32) -> Self {
        Self {
            start: LAUNCH,
            control: Point::new((LAUNCH.x() + landing_x) / 2.0, LAUNCH.y() - ARC_HEIGHT),
            end: Point::new(landing_x, body_y - ARC_END_LIFT),
        }
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn control(&self) -> Point {
        self.control
    }

    pub fn end(&self) -> Point {
        self.end
    }

    /// Point on the arc at `t` in `[0, 1]`.
    pub fn point_at(&self, t: f32) -> Point {
        let t = t.clamp(0.0, 1.0);
        let u = 1.0 - t;
        self.start
            .scale(u * u)
            .add_point(self.control.scale(2.0 * u * t))
            .add_point(self.end.scale(t * t))
    }

    /// SVG path data, `M x,y Q cx,cy x,y`.
    pub fn path_data(&self) -> String {
        format!(
            "M {},{} Q {},{} {},{}",
            self.start.x(),
            self.start.y(),
            self.control.x(),
            self.control.y(),
            self.end.x(),
            self.end.y()
        )
    }
}

/// Where and how one planet lands.
#[derive(Debug, Clone, PartialEq)]
pub struct ThrowTarget {
    body: Id,
    gravity: f64,
    landing: Point,
    radius: f32,
    label: Point,
    arc: ThrowArc,
    arc_color: Color,
    dashed: bool,
    ring: Option<(f32, f32)>,
}

impl ThrowTarget {
    pub fn body(&self) -> Id {
        self.body
    }

    /// Surface gravity in m/s²
    pub fn gravity(&self) -> f64 {
        self.gravity
    }

    /// Center of the planet once it rests on the ground
    pub fn landing(&self) -> Point {
        self.landing
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Anchor of the centered label under the planet
    pub fn label(&self) -> Point {
        self.label
    }

    pub fn arc(&self) -> &ThrowArc {
        &self.arc
    }

    pub fn arc_color(&self) -> Color {
        self.arc_color
    }

    pub fn is_dashed(&self) -> bool {
        self.dashed
    }

    /// Ring radii `(rx, ry)` drawn behind a ringed planet
    pub fn ring(&self) -> Option<(f32, f32)> {
        self.ring
    }
}

/// The gravity throw sketch.
#[derive(Debug, Clone)]
pub struct GravityThrow {
    targets: Vec<ThrowTarget>,
    placed: IndexSet<Id>,
}

impl GravityThrow {
    /// Computes the landing spot of every planet with a usable mass and
    /// mean radius, strongest gravity first.
    ///
    /// # Errors
    ///
    /// Returns [`ScaleError`] when the gravity extent cannot form a scale.
    pub fn from_catalog(catalog: &Catalog) -> Result<Self, ScaleError> {
        let mut planets: Vec<(Id, f64)> = catalog
            .records()
            .iter()
            .filter(|record| record.is_planet())
            .filter_map(|record| {
                let gravity = surface_gravity(record.mass_kg()?, record.mean_radius()?)?;
                Some((record.id(), gravity))
            })
            .collect();
        planets.sort_by(|a, b| b.1.total_cmp(&a.1));

        let (Some(strongest), Some(weakest)) = (planets.first(), planets.last()) else {
            debug!("No planet has a usable surface gravity");
            return Ok(Self {
                targets: Vec::new(),
                placed: IndexSet::new(),
            });
        };

        let landing_scale = ContinuousScale::linear(
            (weakest.1, strongest.1),
            (
                CANVAS_WIDTH - FARTHEST_LANDING_MARGIN,
                LAUNCH.x() + NEAREST_LANDING,
            ),
        )?;

        let targets = planets
            .iter()
            .enumerate()
            .map(|(idx, &(body, gravity))| {
                let x = landing_scale.map(gravity);
                let radius = if body == LARGE_PLANET {
                    LARGE_PLANET_RADIUS
                } else {
                    PLANET_RADIUS
                };
                let landing = Point::new(x, GROUND_Y - radius);
                let level = (idx % LABEL_LEVELS) as f32;
                let (arc_color, dashed) = if body == REFERENCE_PLANET {
                    (Color::new(REFERENCE_ARC_COLOR), false)
                } else {
                    (Color::new(CATEGORY10[idx % CATEGORY10.len()]), true)
                };

                ThrowTarget {
                    body,
                    gravity,
                    landing,
                    radius,
                    label: Point::new(x, GROUND_Y + LABEL_OFFSET + level * LABEL_STEP),
                    arc: ThrowArc::new(x, landing.y()),
                    arc_color: arc_color.unwrap_or_default(),
                    dashed,
                    ring: (body == RINGED_PLANET).then_some((radius + RING_EXTENT, RING_HEIGHT)),
                }
            })
            .collect::<Vec<_>>();

        info!(planets = targets.len(); "Gravity throw built");
        Ok(Self {
            targets,
            placed: IndexSet::new(),
        })
    }

    /// Drawing surface of the sketch
    pub fn canvas(&self) -> Bounds {
        Bounds::from_size(CANVAS_WIDTH, CANVAS_HEIGHT)
    }

    pub fn ground_y(&self) -> f32 {
        GROUND_Y
    }

    /// Every throwable planet, strongest gravity first.
    pub fn targets(&self) -> &[ThrowTarget] {
        &self.targets
    }

    pub fn target(&self, body: Id) -> Option<&ThrowTarget> {
        self.targets.iter().find(|target| target.body == body)
    }

    /// Planets still waiting to be thrown, in menu order.
    pub fn choices(&self) -> Vec<Id> {
        self.targets
            .iter()
            .map(ThrowTarget::body)
            .filter(|body| !self.placed.contains(body))
            .collect()
    }

    /// Landed planets in throw order.
    pub fn placed(&self) -> impl Iterator<Item = &ThrowTarget> + '_ {
        self.placed.iter().filter_map(|&body| self.target(body))
    }

    /// Throws `name` and returns where it lands. Unknown planets and
    /// planets that already landed return `None` and change nothing.
    pub fn throw_body(&mut self, name: &str) -> Option<&ThrowTarget> {
        let idx = self
            .targets
            .iter()
            .position(|target| target.body == name)?;
        let body = self.targets[idx].body;
        if !self.placed.insert(body) {
            debug!(body:% = body; "Planet already landed");
            return None;
        }
        debug!(body:% = body, x = self.targets[idx].landing.x(); "Planet thrown");
        Some(&self.targets[idx])
    }

    /// Clears the ground.
    pub fn reset(&mut self) {
        self.placed.clear();
    }
}
