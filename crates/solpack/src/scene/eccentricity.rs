//! Orbit ellipses of the most eccentric bodies.
//!
//! The five bodies with the largest eccentricity, plus Earth as a reference,
//! are drawn around the body they orbit. Each central body gets a square
//! panel; the `i`-th orbiter in a panel traces an ellipse with semi-major
//! axis `60 + 35 * i` whose focus sits on the central body.

use log::debug;

use solpack_core::{
    color::{Color, OrdinalPalette, TABLEAU10},
    geometry::Point,
    identifier::Id,
    scale::ContinuousScale,
};
use solpack_data::{BodyRecord, Catalog};

/// Side of a square panel
pub const PANEL_SIZE: f32 = 400.0;
/// Number of bodies taken from the top of the eccentricity ranking
const RANKED: usize = 5;
const REFERENCE_BODY: &str = "Earth";
/// `orbits` value of bodies circling the root
const ROOT_PARENT: &str = "NA";
const BASE_SEMI_MAJOR: f32 = 60.0;
const SEMI_MAJOR_STEP: f32 = 35.0;
const CENTRAL_RADIUS_RANGE: (f32, f32) = (4.0, 18.0);
/// Orbiters are drawn at this share of their central body's radius
const ORBITER_RADIUS_RATIO: f32 = 0.25;

/// Central bodies with their panel slot (column, row) and fill.
const PANELS: [(&str, (f32, f32), &str); 4] = [
    ("Sun", (0.0, 0.0), "yellow"),
    ("Saturn", (1.0, 0.0), "#dbcd4e"),
    ("Neptune", (0.0, 1.0), "#4e79a7"),
    ("Uranus", (1.0, 1.0), "#59a14f"),
];

/// One orbit drawn in a panel, in panel-local coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitEllipse {
    body: Id,
    eccentricity: f64,
    center: Point,
    semi_major: f32,
    semi_minor: f32,
    orbiter: Point,
    orbiter_radius: f32,
    color: Color,
}

/// A central body and the ranked bodies orbiting it.
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    central: Id,
    origin: Point,
    central_radius: f32,
    central_color: Color,
    orbits: Vec<OrbitEllipse>,
}

/// The full eccentricity sketch.
#[derive(Debug, Clone, PartialEq)]
pub struct EccentricityPanels {
    ranking: Vec<Id>,
    panels: Vec<Panel>,
}

impl EccentricityPanels {
    /// Ranks the catalog by eccentricity and lays out the panels. Bodies
    /// without an eccentricity are never ranked; a panel whose central body
    /// is not in the catalog is skipped.
    pub fn build(catalog: &Catalog) -> Self {
        let mut ranked: Vec<&BodyRecord> = catalog
            .records()
            .iter()
            .filter(|record| record.eccentricity().is_some_and(f64::is_finite))
            .collect();
        ranked.sort_by(|a, b| {
            let (a, b) = (a.eccentricity().unwrap_or(0.0), b.eccentricity().unwrap_or(0.0));
            b.total_cmp(&a)
        });

        let mut selection: Vec<&BodyRecord> = ranked.iter().take(RANKED).copied().collect();
        if !selection.iter().any(|record| record.id() == REFERENCE_BODY) {
            let reference = ranked
                .iter()
                .copied()
                .find(|record| record.id() == REFERENCE_BODY);
            selection.extend(reference);
        }

        let largest_radius = catalog
            .records()
            .iter()
            .filter_map(BodyRecord::mean_radius)
            .filter(|r| r.is_finite())
            .fold(0.0, f64::max);
        let radius_scale = ContinuousScale::sqrt((0.0, largest_radius), CENTRAL_RADIUS_RANGE).ok();

        let mut palette = OrdinalPalette::new(&TABLEAU10)
            .with_domain(ranked.iter().take(RANKED).map(|record| record.id()));

        let panels: Vec<Panel> = PANELS
            .iter()
            .filter_map(|&(name, (column, row), fill)| {
                let central = catalog.find(name)?;
                let central_radius = radius_scale.map_or(CENTRAL_RADIUS_RANGE.0, |scale| {
                    scale.map(central.mean_radius().unwrap_or(0.0))
                });
                let parent = if name == PANELS[0].0 { ROOT_PARENT } else { name };

                let orbits = selection
                    .iter()
                    .filter(|record| record.orbits() == Some(parent))
                    .enumerate()
                    .map(|(i, record)| {
                        OrbitEllipse::new(
                            record,
                            i,
                            central_radius * ORBITER_RADIUS_RATIO,
                            palette.color(record.id()),
                        )
                    })
                    .collect();

                Some(Panel {
                    central: central.id(),
                    origin: Point::new(column * PANEL_SIZE, row * PANEL_SIZE),
                    central_radius,
                    central_color: Color::new(fill).unwrap_or_default(),
                    orbits,
                })
            })
            .collect();

        debug!(ranked = selection.len(), panels = panels.len(); "Eccentricity panels built");
        Self {
            ranking: selection.iter().map(|record| record.id()).collect(),
            panels,
        }
    }

    /// Drawn bodies, most eccentric first, with the reference body last
    pub fn ranking(&self) -> &[Id] {
        &self.ranking
    }

    pub fn panels(&self) -> &[Panel] {
        &self.panels
    }

    pub fn panel(&self, central: &str) -> Option<&Panel> {
        self.panels.iter().find(|panel| panel.central == central)
    }
}

impl Panel {
    pub fn central(&self) -> Id {
        self.central
    }

    /// Top-left corner of the panel on the sheet
    pub fn origin(&self) -> Point {
        self.origin
    }

    /// Centre of the panel, where the central body is drawn
    pub fn center(&self) -> Point {
        Point::new(PANEL_SIZE / 2.0, PANEL_SIZE / 2.0)
    }

    pub fn central_radius(&self) -> f32 {
        self.central_radius
    }

    pub fn central_color(&self) -> Color {
        self.central_color
    }

    pub fn orbits(&self) -> &[OrbitEllipse] {
        &self.orbits
    }
}

impl OrbitEllipse {
    fn new(record: &BodyRecord, slot: usize, orbiter_radius: f32, color: Color) -> Self {
        let eccentricity = record.eccentricity().unwrap_or(0.0);
        let e = eccentricity as f32;
        let a = BASE_SEMI_MAJOR + SEMI_MAJOR_STEP * slot as f32;
        let c = a * e;
        // open orbits collapse to a segment
        let b = a * (1.0 - e * e).max(0.0).sqrt();

        let focus = Point::new(PANEL_SIZE / 2.0, PANEL_SIZE / 2.0);
        let center = focus.with_x(focus.x() - c);
        Self {
            body: record.id(),
            eccentricity,
            center,
            semi_major: a,
            semi_minor: b,
            orbiter: center.with_x(center.x() + a),
            orbiter_radius,
            color,
        }
    }

    pub fn body(&self) -> Id {
        self.body
    }

    pub fn eccentricity(&self) -> f64 {
        self.eccentricity
    }

    /// Centre of the ellipse; the central body sits on its focus.
    pub fn center(&self) -> Point {
        self.center
    }

    pub fn semi_major(&self) -> f32 {
        self.semi_major
    }

    pub fn semi_minor(&self) -> f32 {
        self.semi_minor
    }

    /// Position of the orbiter, at periapsis
    pub fn orbiter(&self) -> Point {
        self.orbiter
    }

    pub fn orbiter_radius(&self) -> f32 {
        self.orbiter_radius
    }

    pub fn color(&self) -> Color {
        self.color
    }
}
