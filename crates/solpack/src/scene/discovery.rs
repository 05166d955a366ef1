//! Planets spread out by distance, with their moons and a discovery timeline.
//!
//! Planets are placed along x by a power scale (exponent 0.7) of their
//! semi-major axis in AU and fanned out vertically. Moons are scattered
//! around their host by normally distributed offsets, resampled while they
//! land inside a planet's or label's safe zone. A bar of discovery-year
//! sections on top picks out the bodies discovered in each band.

use std::collections::HashMap;

use log::{debug, info};
use rand::{Rng, SeedableRng, rngs::StdRng};

use solpack_core::{
    body::OrbitType,
    color::Color,
    geometry::{Bounds, Point},
    identifier::Id,
    scale::{ContinuousScale, ScaleError},
};
use solpack_data::{BodyRecord, Catalog};

/// Kilometres per astronomical unit
pub const KM_PER_AU: f64 = 149_597_870.0;

const CANVAS_WIDTH: f32 = 1000.0;
const CANVAS_HEIGHT: f32 = 700.0;
const SUN_CENTER: Point = Point::new(40.0, CANVAS_HEIGHT / 2.0);
const SUN_RADIUS: f32 = 30.0;

const DISTANCE_EXPONENT: f64 = 0.7;
const DISTANCE_RANGE: (f32, f32) = (120.0, CANVAS_WIDTH - 100.0);
/// Planets sit this far left of their scaled distance
const PLANET_X_SHIFT: f32 = 35.0;
/// Vertical fan-out per planet index
const PLANET_SPREAD: f32 = 20.0;
const PLANET_RADIUS: f32 = 8.0;
const MOON_RADIUS: f32 = 2.0;

/// Hand-tuned vertical nudges keyed by id-safe name.
const PLANET_SHIFTS: [(&str, f32); 7] = [
    ("Mercury", -40.0),
    ("Venus", 150.0),
    ("Earth", -120.0),
    ("Mars", 75.0),
    ("Uranus", 35.0),
    ("136472-Makemake", -20.0),
    ("136199-Eris", -15.0),
];

const RINGED_PLANET: &str = "Saturn";
/// Ring tilt in degrees
pub const RING_TILT: f32 = -20.0;

const MOONLESS_LABEL_GAP: f32 = 12.0;
const LABEL_GAP: f32 = 15.0;
const LABEL_BASELINE_DROP: f32 = 5.0;
/// Estimated glyph advance and line box of an 11px label
const LABEL_CHAR_WIDTH: f32 = 6.5;
const LABEL_ASCENT: f32 = 11.0;
const LABEL_DESCENT: f32 = 3.0;

const PLANET_SAFE_RADIUS: f32 = 30.0;
const LABEL_PADDING: f32 = 4.0;
const MAX_PLACEMENT_TRIES: usize = 100;

const TIME_PERIODS: usize = 5;
const TIMELINE_ORIGIN: Point = Point::new(50.0, 50.0);
const TIMELINE_WIDTH: f32 = 800.0;
const TIMELINE_HEIGHT: f32 = 10.0;
const TIMELINE_COLORS: [&str; TIME_PERIODS + 1] = [
    "#074665", "#1670a1", "#3dafd2", "#4fcadd", "#6cdae0", "#a4f1f1",
];

/// Which side of its anchor a label grows toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelAnchor {
    Start,
    End,
}

/// A planet with its label.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscoveryPlanet {
    body: Id,
    name: String,
    position: Point,
    moon_count: usize,
    label: Point,
    label_anchor: LabelAnchor,
    ring: Option<(f32, f32)>,
}

impl DiscoveryPlanet {
    pub fn body(&self) -> Id {
        self.body
    }

    /// Label text, the display name
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn radius(&self) -> f32 {
        PLANET_RADIUS
    }

    pub fn moon_count(&self) -> usize {
        self.moon_count
    }

    pub fn label(&self) -> Point {
        self.label
    }

    /// Moonless planets label to the right, others to the left
    pub fn label_anchor(&self) -> LabelAnchor {
        self.label_anchor
    }

    /// Ring radii `(rx, ry)`, tilted by [`RING_TILT`]
    pub fn ring(&self) -> Option<(f32, f32)> {
        self.ring
    }

    /// Estimated label box grown by the label padding.
    fn label_zone(&self) -> Bounds {
        let width = self.name.chars().count() as f32 * LABEL_CHAR_WIDTH;
        let (left, right) = match self.label_anchor {
            LabelAnchor::Start => (self.label.x(), self.label.x() + width),
            LabelAnchor::End => (self.label.x() - width, self.label.x()),
        };
        Bounds::from_corners(
            Point::new(left - LABEL_PADDING, self.label.y() - LABEL_ASCENT - LABEL_PADDING),
            Point::new(right + LABEL_PADDING, self.label.y() + LABEL_DESCENT + LABEL_PADDING),
        )
    }
}

/// A moon scattered around its host planet.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscoveryMoon {
    body: Id,
    host: Id,
    position: Point,
    clear: bool,
}

impl DiscoveryMoon {
    pub fn body(&self) -> Id {
        self.body
    }

    pub fn host(&self) -> Id {
        self.host
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn radius(&self) -> f32 {
        MOON_RADIUS
    }

    /// Whether placement ended outside every safe zone. A moon that is not
    /// clear keeps its last sample.
    pub fn is_clear(&self) -> bool {
        self.clear
    }
}

/// One band of discovery years on the timeline bar.
///
/// A body falls in the band when `lower < year <= upper`.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineSection {
    bounds: Bounds,
    color: Color,
    lower: f64,
    upper: f64,
}

impl TimelineSection {
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Exclusive lower year
    pub fn lower(&self) -> f64 {
        self.lower
    }

    /// Inclusive upper year
    pub fn upper(&self) -> f64 {
        self.upper
    }

    pub fn contains(&self, year: i32) -> bool {
        let year = f64::from(year);
        self.lower < year && year <= self.upper
    }
}

/// Circles around planets and boxes around labels that moons avoid.
struct SafeZones {
    circles: Vec<Point>,
    labels: Vec<Bounds>,
}

impl SafeZones {
    fn new(planets: &[DiscoveryPlanet]) -> Self {
        Self {
            circles: planets.iter().map(DiscoveryPlanet::position).collect(),
            labels: planets.iter().map(DiscoveryPlanet::label_zone).collect(),
        }
    }

    fn contains(&self, point: Point) -> bool {
        self.circles
            .iter()
            .any(|center| center.distance(point) < PLANET_SAFE_RADIUS)
            || self.labels.iter().any(|zone| {
                (zone.min_x()..=zone.max_x()).contains(&point.x())
                    && (zone.min_y()..=zone.max_y()).contains(&point.y())
            })
    }
}

/// Samples a normal distribution with the Box-Muller transform.
fn normal(rng: &mut StdRng, mean: f32, std_dev: f32) -> f32 {
    // `random` is in [0, 1); flip it so the logarithm never sees zero
    let u = 1.0 - rng.random::<f64>();
    let v = 1.0 - rng.random::<f64>();
    let standard = (-2.0 * u.ln()).sqrt() * (std::f64::consts::TAU * v).cos();
    mean + std_dev * standard as f32
}

/// The discovery timeline sketch.
#[derive(Debug, Clone)]
pub struct DiscoveryTimeline {
    planets: Vec<DiscoveryPlanet>,
    moons: Vec<DiscoveryMoon>,
    sections: Vec<TimelineSection>,
    years: HashMap<Id, i32>,
}

impl DiscoveryTimeline {
    /// Places every planet with a known semi-major axis, scatters their
    /// moons with a generator seeded by `seed`, and splits the discovery
    /// years of the whole catalog into timeline sections.
    ///
    /// # Errors
    ///
    /// Returns [`ScaleError`] when the planet distances cannot form a scale.
    pub fn build(catalog: &Catalog, seed: u64) -> Result<Self, ScaleError> {
        let planet_records: Vec<(&BodyRecord, f64)> = catalog
            .records()
            .iter()
            .filter(|record| record.is_planet())
            .filter_map(|record| {
                let au = record.semimajor_axis_km()? / KM_PER_AU;
                (au.is_finite() && au > 0.0).then_some((record, au))
            })
            .collect();

        let planets = place_planets(catalog, &planet_records)?;
        let moons = scatter_moons(catalog, &planets, seed);
        let sections = timeline_sections(catalog);

        let years = planets
            .iter()
            .map(DiscoveryPlanet::body)
            .chain(moons.iter().map(DiscoveryMoon::body))
            .filter_map(|body| {
                let year = catalog.get(body)?.discovery_year()?;
                Some((body, year))
            })
            .collect();

        info!(
            planets = planets.len(),
            moons = moons.len(),
            sections = sections.len();
            "Discovery timeline built"
        );
        Ok(Self {
            planets,
            moons,
            sections,
            years,
        })
    }

    /// Drawing surface of the sketch
    pub fn canvas(&self) -> Bounds {
        Bounds::from_size(CANVAS_WIDTH, CANVAS_HEIGHT)
    }

    /// Center and radius of the sun
    pub fn sun(&self) -> (Point, f32) {
        (SUN_CENTER, SUN_RADIUS)
    }

    pub fn planets(&self) -> &[DiscoveryPlanet] {
        &self.planets
    }

    pub fn planet(&self, body: Id) -> Option<&DiscoveryPlanet> {
        self.planets.iter().find(|planet| planet.body == body)
    }

    pub fn moons(&self) -> &[DiscoveryMoon] {
        &self.moons
    }

    /// Line segments from the sun to every planet, then from every host to
    /// its moons.
    pub fn links(&self) -> Vec<(Point, Point)> {
        let to_planets = self
            .planets
            .iter()
            .map(|planet| (SUN_CENTER, planet.position));
        let to_moons = self.moons.iter().filter_map(|moon| {
            self.planet(moon.host)
                .map(|host| (host.position, moon.position))
        });
        to_planets.chain(to_moons).collect()
    }

    pub fn sections(&self) -> &[TimelineSection] {
        &self.sections
    }

    /// Drawn bodies discovered within the band of section `index`.
    pub fn highlighted(&self, index: usize) -> Vec<Id> {
        let Some(section) = self.sections.get(index) else {
            return Vec::new();
        };
        self.planets
            .iter()
            .map(DiscoveryPlanet::body)
            .chain(self.moons.iter().map(DiscoveryMoon::body))
            .filter(|body| self.years.get(body).is_some_and(|&y| section.contains(y)))
            .collect()
    }
}

fn place_planets(
    catalog: &Catalog,
    records: &[(&BodyRecord, f64)],
) -> Result<Vec<DiscoveryPlanet>, ScaleError> {
    let nearest = records.iter().map(|(_, au)| *au).reduce(f64::min);
    let farthest = records.iter().map(|(_, au)| *au).reduce(f64::max);
    let (Some(nearest), Some(farthest)) = (nearest, farthest) else {
        debug!("No planet has a usable semi-major axis");
        return Ok(Vec::new());
    };
    let scale = ContinuousScale::pow(DISTANCE_EXPONENT, (nearest, farthest), DISTANCE_RANGE)?;

    let planets = records
        .iter()
        .enumerate()
        .map(|(idx, &(record, au))| {
            let fan = if idx % 2 == 0 { -(idx as f32) } else { idx as f32 };
            let shift = PLANET_SHIFTS
                .iter()
                .find(|(slug, _)| *slug == record.slug())
                .map_or(0.0, |(_, shift)| *shift);
            let x = scale.map(au) - PLANET_X_SHIFT;
            let au = au as f32;
            let position = Point::new(
                x,
                au + CANVAS_HEIGHT / 2.0 + fan * PLANET_SPREAD * au.min(1.0) + shift,
            );

            let moon_count = catalog
                .records()
                .iter()
                .filter(|other| !other.is_planet() && other.orbits() == Some(record.name()))
                .count();
            let (label, label_anchor) = if moon_count == 0 {
                (
                    Point::new(position.x() + MOONLESS_LABEL_GAP, position.y() + LABEL_BASELINE_DROP),
                    LabelAnchor::Start,
                )
            } else {
                (
                    Point::new(position.x() - LABEL_GAP, position.y() + LABEL_BASELINE_DROP),
                    LabelAnchor::End,
                )
            };

            DiscoveryPlanet {
                body: record.id(),
                name: record.name().to_string(),
                position,
                moon_count,
                label,
                label_anchor,
                ring: (record.id() == RINGED_PLANET)
                    .then_some((PLANET_RADIUS * 3.0, PLANET_RADIUS * 1.5)),
            }
        })
        .collect();
    Ok(planets)
}

fn scatter_moons(catalog: &Catalog, planets: &[DiscoveryPlanet], seed: u64) -> Vec<DiscoveryMoon> {
    let zones = SafeZones::new(planets);
    let mut rng = StdRng::seed_from_u64(seed);

    catalog
        .records()
        .iter()
        .filter(|record| !record.is_planet() && record.orbit_type() != Some(OrbitType::Primary))
        .filter_map(|record| {
            let host = planets
                .iter()
                .find(|planet| record.orbits() == Some(planet.name.as_str()))?;
            let count = host.moon_count as f32;

            let mut position = host.position;
            let mut clear = false;
            for _ in 0..MAX_PLACEMENT_TRIES {
                let dx = normal(&mut rng, count + 30.0, count * 0.4 + 10.0);
                let dy = normal(&mut rng, 0.0, count * 0.3 + 10.0);
                position = host.position.add_point(Point::new(dx, dy));
                if !zones.contains(position) {
                    clear = true;
                    break;
                }
            }
            if !clear {
                debug!(moon = record.name(), host = host.name.as_str(); "Moon kept inside a safe zone");
            }

            Some(DiscoveryMoon {
                body: record.id(),
                host: host.body,
                position,
                clear,
            })
        })
        .collect()
}

fn timeline_sections(catalog: &Catalog) -> Vec<TimelineSection> {
    let years = move || catalog.records().iter().filter_map(BodyRecord::discovery_year);
    let (Some(first), Some(last)) = (years().min(), years().max()) else {
        debug!("No discovery years, timeline left empty");
        return Vec::new();
    };
    let step = f64::from(last - first) / TIME_PERIODS as f64;
    let width = TIMELINE_WIDTH / TIME_PERIODS as f32;

    TIMELINE_COLORS
        .iter()
        .enumerate()
        .map(|(idx, color)| {
            let origin = TIMELINE_ORIGIN.add_point(Point::new(idx as f32 * width, 0.0));
            TimelineSection {
                bounds: Bounds::from_corners(
                    origin,
                    origin.add_point(Point::new(width, TIMELINE_HEIGHT)),
                ),
                color: Color::new(color).unwrap_or_default(),
                lower: f64::from(first) + (idx as f64 - 1.0) * step,
                upper: f64::from(first) + idx as f64 * step,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    const SYSTEM: &str = "\
eName,isPlanet,orbit_type,orbits,semimajorAxis,discoveryDate
Sun,FALSE,,,,
Mercury,TRUE,Primary,NA,57909227,
Earth,TRUE,Primary,NA,149598262,
Moon,FALSE,Secondary,Earth,384400,
Mars,TRUE,Primary,NA,227943824,
Phobos,FALSE,Secondary,Mars,9377,8/18/1877
Deimos,FALSE,Secondary,Mars,23460,8/12/1877
Neptune,TRUE,Primary,NA,4498396441,9/23/1846
Triton,FALSE,Secondary,Neptune,354759,10/10/1846
Eris,FALSE,Primary,NA,10125000000,1/5/2005
Dysnomia,FALSE,Secondary,Eris,37350,9/10/2005
";

    fn timeline() -> DiscoveryTimeline {
        DiscoveryTimeline::build(&solpack_data::parse(SYSTEM).unwrap(), 7).unwrap()
    }

    fn ids(names: &[&str]) -> Vec<Id> {
        names.iter().copied().map(Id::new).collect()
    }

    #[test]
    fn test_planets_follow_distance_scale() {
        let timeline = timeline();
        let order: Vec<Id> = timeline.planets().iter().map(DiscoveryPlanet::body).collect();
        assert_eq!(order, ids(&["Mercury", "Earth", "Mars", "Neptune"]));

        let mercury = timeline.planet(Id::new("Mercury")).unwrap();
        assert_approx_eq!(f32, mercury.position().x(), 85.0, epsilon = 1e-3);
        // first planet is not fanned out, only nudged
        assert_approx_eq!(f32, mercury.position().y(), 310.387, epsilon = 1e-3);

        let neptune = timeline.planet(Id::new("Neptune")).unwrap();
        assert_approx_eq!(f32, neptune.position().x(), 865.0, epsilon = 1e-3);
    }

    #[test]
    fn test_moon_counts_pick_label_side() {
        let timeline = timeline();
        let mercury = timeline.planet(Id::new("Mercury")).unwrap();
        assert_eq!(mercury.moon_count(), 0);
        assert_eq!(mercury.label_anchor(), LabelAnchor::Start);
        assert_approx_eq!(f32, mercury.label().x(), 97.0, epsilon = 1e-3);

        let mars = timeline.planet(Id::new("Mars")).unwrap();
        assert_eq!(mars.moon_count(), 2);
        assert_eq!(mars.label_anchor(), LabelAnchor::End);
        assert_approx_eq!(f32, mars.label().x(), mars.position().x() - 15.0);
    }

    #[test]
    fn test_moons_only_around_drawn_planets() {
        let timeline = timeline();
        let moons: Vec<Id> = timeline.moons().iter().map(DiscoveryMoon::body).collect();
        assert_eq!(moons, ids(&["Moon", "Phobos", "Deimos", "Triton"]));
        assert_eq!(timeline.moons()[1].host(), Id::new("Mars"));
        assert_eq!(timeline.links().len(), 8);
    }

    #[test]
    fn test_moons_avoid_safe_zones() {
        let timeline = timeline();
        let zones = SafeZones::new(timeline.planets());
        for moon in timeline.moons() {
            assert!(moon.is_clear(), "{} landed in a safe zone", moon.body());
            assert!(!zones.contains(moon.position()));
        }
    }

    #[test]
    fn test_same_seed_same_scatter() {
        let catalog = solpack_data::parse(SYSTEM).unwrap();
        let a = DiscoveryTimeline::build(&catalog, 11).unwrap();
        let b = DiscoveryTimeline::build(&catalog, 11).unwrap();
        assert_eq!(a.moons(), b.moons());
    }

    #[test]
    fn test_timeline_sections() {
        let timeline = timeline();
        assert_eq!(timeline.sections().len(), 6);

        let last = &timeline.sections()[5];
        assert_approx_eq!(f32, last.bounds().min_x(), 850.0);
        assert_approx_eq!(f32, last.bounds().width(), 160.0);
        assert_approx_eq!(f64, last.upper(), 2005.0, epsilon = 1e-9);
    }

    #[test]
    fn test_highlighted_bodies_per_band() {
        let timeline = timeline();
        // the first band holds only the earliest year
        assert_eq!(timeline.highlighted(0), ids(&["Neptune", "Triton"]));
        assert_eq!(timeline.highlighted(1), ids(&["Phobos", "Deimos"]));
        // Eris and Dysnomia are in the last band but not drawn
        assert!(timeline.highlighted(5).is_empty());
        assert!(timeline.highlighted(9).is_empty());
    }

    #[test]
    fn test_no_discovery_years() {
        let catalog =
            solpack_data::parse("eName,isPlanet,semimajorAxis\nEarth,TRUE,149598262\n").unwrap();
        let timeline = DiscoveryTimeline::build(&catalog, 1).unwrap();
        assert_eq!(timeline.planets().len(), 1);
        assert!(timeline.sections().is_empty());
    }
}
