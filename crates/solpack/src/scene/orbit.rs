//! The orbit hierarchy spread out by distance.
//!
//! The root is pinned at the left margin, half way down. Primaries are pulled
//! toward an x given by a clamped log scale of their semi-major axis (in AU
//! when enough AU values are known, else in km). Satellites hang off their
//! parent at a clamped square-root distance of their own semi-major axis.

use log::{debug, info};
use rand::{Rng, SeedableRng, rngs::StdRng};

use solpack_core::{
    body::{Body, OrbitType},
    color::{Color, OrdinalPalette, SET3, TABLEAU10},
    geometry::Point,
    identifier::Id,
    scale::{ContinuousScale, ScaleError},
    stroke::Stroke,
};
use solpack_data::{BodyRecord, Catalog};

use super::{LinkLine, Scene, SceneStyle};
use crate::{
    config::{LabelPolicy, OrbitConfig},
    layout::{
        Relaxation, RelaxationSettings,
        presets::{OrbitGraph, OrbitTarget},
    },
    structure::{OrbitTree, TreeNode},
};

/// Primaries need at least this many usable AU values to be placed in AU.
const MIN_AU_VALUES: usize = 5;
/// Smallest semi-major axis on the log scale
const MIN_DISTANCE: f64 = 1e-6;
/// Gap between the root and the closest primary
const ROOT_GAP: f32 = 80.0;
const MIN_ROOT_LINK: f32 = 30.0;
const SATELLITE_RANGE: (f32, f32) = (12.0, 70.0);
const DEFAULT_SATELLITE_DISTANCE: f32 = 25.0;
/// Share of the satellite distance used as the x pull offset
const SATELLITE_PULL: f32 = 0.25;

const PRIMARY_JITTER: f32 = 125.0;
const SATELLITE_JITTER: f32 = 30.0;

const ROOT_RADIUS: f32 = 14.0;
const PLANET_RADIUS: f32 = 7.0;
const PARENT_RADIUS: f32 = 6.0;
const PRIMARY_RADIUS: f32 = 4.0;
const SATELLITE_RADIUS: f32 = 3.5;

const ROOT_COLOR: &str = "#FDB813";
const ORPHAN_COLOR: &str = "#999";

/// The orbit graph sketch.
#[derive(Debug, Clone)]
pub struct OrbitScene {
    tree: OrbitTree,
    uses_au: bool,
    preset: OrbitGraph,
    bodies: Vec<Body>,
    style: SceneStyle,
}

/// Maps dataset distances to x positions and spring lengths.
struct DistanceScales {
    uses_au: bool,
    primary: ContinuousScale,
    satellite: ContinuousScale,
}

impl DistanceScales {
    fn new(catalog: &Catalog, tree: &OrbitTree, config: &OrbitConfig) -> Result<Self, ScaleError> {
        let au: Vec<f64> = records_at(catalog, tree, 1)
            .filter_map(|r| positive(r.semimajor_axis_au()))
            .collect();
        let uses_au = au.len() >= MIN_AU_VALUES;
        let primary_values = if uses_au {
            au
        } else {
            records_at(catalog, tree, 1)
                .filter_map(|r| positive(r.semimajor_axis_km()))
                .collect()
        };
        let satellite_values: Vec<f64> = records_at(catalog, tree, 2)
            .filter_map(|r| positive(r.semimajor_axis_km()))
            .collect();

        let root_x = config.margins().left();
        let (lo, hi) = extent(&primary_values).unwrap_or((MIN_DISTANCE, 1.0));
        let primary = ContinuousScale::log(
            (lo.max(MIN_DISTANCE), hi),
            (root_x + ROOT_GAP, config.canvas().width() - config.margins().right()),
        )?
        .with_clamp(true);

        let satellite = ContinuousScale::sqrt(
            extent(&satellite_values).unwrap_or((1.0, 1.0)),
            SATELLITE_RANGE,
        )?
        .with_clamp(true);

        debug!(
            uses_au = uses_au,
            primaries = primary_values.len(),
            satellites = satellite_values.len();
            "Orbit distance scales"
        );
        Ok(Self {
            uses_au,
            primary,
            satellite,
        })
    }

    /// Target x of a primary
    fn primary_x(&self, record: Option<&BodyRecord>) -> f32 {
        let distance = record.and_then(|r| {
            if self.uses_au {
                r.semimajor_axis_au()
            } else {
                r.semimajor_axis_km()
            }
        });
        let fallback = if self.uses_au { MIN_DISTANCE } else { 1.0 };
        self.primary
            .map(distance.filter(|d| *d > 0.0).unwrap_or(fallback))
    }

    /// Distance of a satellite from its parent, if its semi-major axis is known
    fn satellite_distance(&self, record: Option<&BodyRecord>) -> Option<f32> {
        record
            .and_then(BodyRecord::semimajor_axis_km)
            .filter(|km| *km > 0.0)
            .map(|km| self.satellite.map(km))
    }
}

/// Catalog records of the tree nodes at `depth`
fn records_at<'a>(
    catalog: &'a Catalog,
    tree: &'a OrbitTree,
    depth: usize,
) -> impl Iterator<Item = &'a BodyRecord> + 'a {
    tree.nodes()
        .filter(move |node| node.depth() == depth)
        .filter_map(move |node| catalog.get(node.id()))
}

fn positive(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v > 0.0)
}

fn extent(values: &[f64]) -> Option<(f64, f64)> {
    values.iter().fold(None, |acc, &v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

impl OrbitScene {
    /// Builds the orbit graph of every catalog body.
    ///
    /// `seed` drives the initial vertical jitter.
    ///
    /// # Errors
    ///
    /// Returns a [`ScaleError`] when the distance columns cannot form a scale.
    pub fn build(catalog: &Catalog, config: &OrbitConfig, seed: u64) -> Result<Self, ScaleError> {
        let root = Id::new(config.root());
        let tree = OrbitTree::from_catalog(catalog, root);
        let scales = DistanceScales::new(catalog, &tree, config)?;

        let root_position = Point::new(config.margins().left(), config.canvas().height() / 2.0);
        let mut rng = StdRng::seed_from_u64(seed);
        let mut preset = OrbitGraph::new(root_position, config.plot_bounds());

        let mut palette = OrdinalPalette::new(&[TABLEAU10.as_slice(), SET3.as_slice()].concat())
            .with_domain(tree.nodes().filter(|n| n.depth() == 1).map(TreeNode::id));
        let mut style = SceneStyle::new(config.canvas().bounds())
            .with_body_stroke(Stroke::solid(parse_color("rgba(0, 0, 0, 0.25)"), 1.0))
            .with_label_color(parse_color("rgba(20, 20, 20, 0.92)"));

        let mut bodies = Vec::with_capacity(tree.len());
        let mut primaries = Vec::new();
        let mut satellites = Vec::new();
        for node in tree.nodes() {
            let record = catalog.get(node.id());
            let radius = node_radius(node, record, &tree);
            let magnitude = record.and_then(BodyRecord::mean_radius).unwrap_or(0.0);
            let mut body = Body::new(node.id(), magnitude, radius).with_orbit_type(node.orbit_type());
            if let Some(parent) = node.parent() {
                body = body.with_parent(parent);
            }

            match node.orbit_type() {
                OrbitType::Root => {
                    body = body.with_anchor(root_position);
                    preset.set_target(node.id(), OrbitTarget::Root);
                    style.set_fill(node.id(), parse_color(ROOT_COLOR));
                }
                OrbitType::Primary => {
                    let x = scales.primary_x(record);
                    preset.set_target(node.id(), OrbitTarget::Primary { x });
                    style.set_fill(node.id(), palette.color(node.id()));
                    primaries.push(bodies.len());
                }
                OrbitType::Secondary => {
                    let offset = scales
                        .satellite_distance(record)
                        .map(|d| d * SATELLITE_PULL);
                    preset.set_target(node.id(), OrbitTarget::Secondary { offset });
                    let color = match node.parent() {
                        Some(parent) => palette.color(parent),
                        None => parse_color(ORPHAN_COLOR),
                    };
                    style.set_fill(node.id(), color);
                    satellites.push(bodies.len());
                }
            }

            if is_labeled(config.labels(), node, record, &tree) {
                style.add_label(node.id());
            }
            bodies.push(body);
        }

        for &idx in &primaries {
            let x = scales.primary_x(catalog.get(bodies[idx].id()));
            let y = root_position.y() + rng.random_range(-PRIMARY_JITTER..PRIMARY_JITTER);
            bodies[idx].set_position(Point::new(x, y));
        }
        for &idx in &satellites {
            let record = catalog.get(bodies[idx].id());
            let dx = scales
                .satellite_distance(record)
                .unwrap_or(DEFAULT_SATELLITE_DISTANCE);
            let anchor = bodies[idx]
                .parent()
                .and_then(|p| bodies.iter().find(|b| b.id() == p))
                .map_or(root_position, Body::position);
            let dy = rng.random_range(-SATELLITE_JITTER..SATELLITE_JITTER);
            bodies[idx].set_position(Point::new(anchor.x() + dx, anchor.y() + dy));
        }

        let root_link = Stroke::solid(parse_color("rgba(60, 60, 60, 0.65)"), 1.6);
        let link = Stroke::solid(parse_color("rgba(80, 80, 80, 0.45)"), 1.1);
        for edge in tree.edges() {
            let record = catalog.get(edge.child());
            let to_root = edge.parent() == root;
            let distance = if to_root {
                (scales.primary_x(record) - root_position.x()).max(MIN_ROOT_LINK)
            } else {
                scales
                    .satellite_distance(record)
                    .unwrap_or(DEFAULT_SATELLITE_DISTANCE)
            };
            preset.add_link(edge.child(), edge.parent(), distance, to_root);
            style.add_link(LinkLine::new(
                edge.child(),
                edge.parent(),
                if to_root { root_link } else { link },
            ));
        }

        info!(
            bodies = bodies.len(),
            links = tree.edges().len(),
            uses_au = scales.uses_au;
            "Orbit scene built"
        );

        Ok(Self {
            tree,
            uses_au: scales.uses_au,
            preset,
            bodies,
            style,
        })
    }

    pub fn tree(&self) -> &OrbitTree {
        &self.tree
    }

    /// Whether primaries are placed by their AU semi-major axis
    pub fn uses_au(&self) -> bool {
        self.uses_au
    }

    pub fn root(&self) -> Point {
        self.preset.root()
    }
}

impl Scene for OrbitScene {
    fn name(&self) -> &'static str {
        "orbit"
    }

    fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    fn relaxation(&self, settings: RelaxationSettings) -> Relaxation {
        self.preset.relaxation(&self.bodies, settings)
    }

    fn style(&self) -> &SceneStyle {
        &self.style
    }
}

fn node_radius(node: &TreeNode, record: Option<&BodyRecord>, tree: &OrbitTree) -> f32 {
    match node.orbit_type() {
        OrbitType::Root => ROOT_RADIUS,
        _ if record.is_some_and(BodyRecord::is_planet) => PLANET_RADIUS,
        OrbitType::Primary if tree.child_count(node.id()) > 0 => PARENT_RADIUS,
        OrbitType::Primary => PRIMARY_RADIUS,
        OrbitType::Secondary => SATELLITE_RADIUS,
    }
}

fn is_labeled(
    policy: LabelPolicy,
    node: &TreeNode,
    record: Option<&BodyRecord>,
    tree: &OrbitTree,
) -> bool {
    match policy {
        LabelPolicy::None => false,
        LabelPolicy::All => node.orbit_type() != OrbitType::Root,
        LabelPolicy::Major => {
            node.orbit_type() == OrbitType::Root
                || record.is_some_and(BodyRecord::is_planet)
                || (node.depth() == 1 && tree.child_count(node.id()) > 0)
        }
    }
}

fn parse_color(color: &str) -> Color {
    Color::new(color).unwrap_or_default()
}
