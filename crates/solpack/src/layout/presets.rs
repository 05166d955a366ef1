//! Named force tunings for the individual sketches.
//!
//! The sketches tune the same relaxation with different constants and
//! boundary rules. They are kept side by side as presets instead of being
//! folded into one behavior.

use std::collections::HashMap;

use log::debug;

use solpack_core::{
    body::Body,
    geometry::{Boundary, Bounds, Point},
    identifier::Id,
};

use super::{
    engine::{Relaxation, RelaxationSettings},
    forces::{Anchor, Link, LinkSpec, ManyBody, Separation},
};

/// A named bundle of force constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// Bodies packed inside a containing circle.
    SunPacking,
    /// Bodies hung off their parents in an orbit hierarchy.
    OrbitGraph,
}

impl Preset {
    pub fn name(self) -> &'static str {
        match self {
            Self::SunPacking => "sun-packing",
            Self::OrbitGraph => "orbit-graph",
        }
    }

    /// Applies the preset's cooling schedule on top of `base`.
    pub fn settings(self, base: RelaxationSettings) -> RelaxationSettings {
        let mut settings = base;
        if self == Self::OrbitGraph {
            settings.set_alpha_decay(orbit_graph::ALPHA_DECAY);
        }
        settings
    }
}

/// Constants of [`Preset::SunPacking`].
pub mod sun_packing {
    /// Strength of the pull toward the container centre on each axis
    pub const ANCHOR_STRENGTH: f32 = 0.1;
    /// Gap between two packed bodies
    pub const SEPARATION_MARGIN: f32 = 2.0;
}

/// Constants of [`Preset::OrbitGraph`].
pub mod orbit_graph {
    pub const ALPHA_DECAY: f32 = 0.04;
    pub const CHARGE: f32 = -70.0;
    pub const SEPARATION_MARGIN: f32 = 4.0;

    pub const ROOT_LINK_STRENGTH: f32 = 0.25;
    pub const LINK_STRENGTH: f32 = 0.55;

    pub const PRIMARY_X_STRENGTH: f32 = 0.18;
    pub const SECONDARY_X_STRENGTH: f32 = 0.35;
    pub const PRIMARY_Y_STRENGTH: f32 = 0.06;
    pub const SECONDARY_Y_STRENGTH: f32 = 0.25;

    /// Offset from the parent used when a satellite has no known distance
    pub const DEFAULT_SATELLITE_OFFSET: f32 = 12.0;
}

/// Packs bodies toward the centre of a circular container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SunPacking {
    center: Point,
    container_radius: f32,
}

impl SunPacking {
    pub fn new(center: Point, container_radius: f32) -> Self {
        Self {
            center,
            container_radius,
        }
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn container_radius(&self) -> f32 {
        self.container_radius
    }

    pub fn boundary(&self) -> Boundary {
        Boundary::circle(self.center, self.container_radius)
    }

    pub fn relaxation(&self, settings: RelaxationSettings) -> Relaxation {
        let (x, y) = (self.center.x(), self.center.y());
        let mut relaxation = Relaxation::with_settings(Preset::SunPacking.settings(settings));
        relaxation
            .add_force(Anchor::x(move |_, _| x).with_strength(sun_packing::ANCHOR_STRENGTH))
            .add_force(Anchor::y(move |_, _| y).with_strength(sun_packing::ANCHOR_STRENGTH))
            .set_separation(Separation::radii_plus(sun_packing::SEPARATION_MARGIN))
            .set_boundary(self.boundary());
        relaxation
    }
}

/// Where an orbit graph body wants to sit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OrbitTarget {
    /// Pinned root
    Root,
    /// A body orbiting the root, pulled toward an absolute x.
    Primary { x: f32 },
    /// A body orbiting a primary, pulled toward its parent's x plus an offset.
    Secondary { offset: Option<f32> },
}

/// Link springs, axis anchors and charge of the orbit hierarchy.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitGraph {
    root: Point,
    plot: Bounds,
    targets: HashMap<Id, OrbitTarget>,
    links: Vec<LinkSpec>,
}

impl OrbitGraph {
    /// Creates an orbit graph pinned at `root` and clamped into `plot`.
    pub fn new(root: Point, plot: Bounds) -> Self {
        Self {
            root,
            plot,
            targets: HashMap::new(),
            links: Vec::new(),
        }
    }

    /// Sets the anchor target of a body.
    pub fn set_target(&mut self, id: Id, target: OrbitTarget) -> &mut Self {
        self.targets.insert(id, target);
        self
    }

    /// Adds the spring from `child` to `parent`.
    ///
    /// Links ending at the root use the weaker root strength.
    pub fn add_link(&mut self, child: Id, parent: Id, distance: f32, to_root: bool) -> &mut Self {
        let strength = if to_root {
            orbit_graph::ROOT_LINK_STRENGTH
        } else {
            orbit_graph::LINK_STRENGTH
        };
        self.links.push(LinkSpec::new(child, parent, distance, strength));
        self
    }

    pub fn root(&self) -> Point {
        self.root
    }

    pub fn plot(&self) -> Bounds {
        self.plot
    }

    pub fn links(&self) -> &[LinkSpec] {
        &self.links
    }

    /// Builds the relaxation. `bodies` must be in the order the simulation
    /// state is built from.
    pub fn relaxation(&self, bodies: &[Body], settings: RelaxationSettings) -> Relaxation {
        let root = self.root;
        let x_targets = self.targets.clone();

        let link = Link::new(self.links.iter().copied(), bodies);
        debug!(links = link.len(), bodies = bodies.len(); "Building orbit graph relaxation");

        let mut charge = ManyBody::new(orbit_graph::CHARGE);
        charge.set_distance_min(1.0);

        let mut relaxation = Relaxation::with_settings(Preset::OrbitGraph.settings(settings));
        relaxation
            .add_force(link)
            .add_force(
                Anchor::x(move |node, nodes| match x_targets.get(&node.id()) {
                    Some(OrbitTarget::Primary { x }) => *x,
                    Some(OrbitTarget::Secondary { offset }) => {
                        let parent_x = node.parent().map_or(root.x(), |p| nodes[p].position().x());
                        parent_x + offset.unwrap_or(orbit_graph::DEFAULT_SATELLITE_OFFSET)
                    }
                    Some(OrbitTarget::Root) | None => root.x(),
                })
                .with_strength_fn(|node, _| {
                    if node.depth() == 1 {
                        orbit_graph::PRIMARY_X_STRENGTH
                    } else {
                        orbit_graph::SECONDARY_X_STRENGTH
                    }
                }),
            )
            .add_force(
                Anchor::y(move |node, nodes| match node.parent() {
                    Some(p) if node.depth() == 2 => nodes[p].position().y(),
                    _ => root.y(),
                })
                .with_strength_fn(|node, _| {
                    if node.depth() == 2 {
                        orbit_graph::SECONDARY_Y_STRENGTH
                    } else {
                        orbit_graph::PRIMARY_Y_STRENGTH
                    }
                }),
            )
            .add_force(charge)
            .set_separation(Separation::radii_plus(orbit_graph::SEPARATION_MARGIN))
            .set_boundary(Boundary::rect_centers(self.plot));
        relaxation
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use solpack_core::body::OrbitType;

    use super::*;
    use crate::layout::SimulationState;

    #[test]
    fn test_orbit_graph_decays_faster() {
        let base = RelaxationSettings::default();
        let settings = Preset::OrbitGraph.settings(base);
        assert_approx_eq!(f32, settings.alpha_decay(), 0.04);
        assert_eq!(Preset::SunPacking.settings(base), base);
    }

    #[test]
    fn test_sun_packing_keeps_bodies_in_container() {
        let center = Point::new(250.0, 250.0);
        let bodies: Vec<Body> = (0..12)
            .map(|i| {
                Body::new(Id::new(&format!("packed-{i}")), 1.0, 8.0 + i as f32)
                    .with_position(center)
            })
            .collect();

        let preset = SunPacking::new(center, 200.0);
        let outcome = preset
            .relaxation(RelaxationSettings::default())
            .run(SimulationState::from_bodies(&bodies));

        let boundary = preset.boundary();
        let nodes = outcome.state.nodes();
        for (i, node) in nodes.iter().enumerate() {
            assert!(boundary.contains(node.position(), node.radius(), 1e-3));
            for other in &nodes[i + 1..] {
                let min = node.radius() + other.radius() + sun_packing::SEPARATION_MARGIN;
                assert!(node.position().distance(other.position()) >= min - 0.1);
            }
        }
    }

    #[test]
    fn test_orbit_graph_pins_root_and_orders_primaries() {
        let root_id = Id::new("graph-sun");
        let near = Id::new("graph-near");
        let far = Id::new("graph-far");
        let moon = Id::new("graph-moon");

        let root = Point::new(80.0, 325.0);
        let plot = Bounds::from_corners(Point::new(80.0, 30.0), Point::new(1070.0, 620.0));
        let bodies = [
            Body::new(root_id, 1.0, 14.0)
                .with_anchor(root)
                .with_orbit_type(OrbitType::Root),
            Body::new(near, 1.0, 7.0)
                .with_parent(root_id)
                .with_position(Point::new(200.0, 300.0)),
            Body::new(far, 1.0, 7.0)
                .with_parent(root_id)
                .with_position(Point::new(900.0, 350.0)),
            Body::new(moon, 1.0, 3.5)
                .with_parent(far)
                .with_orbit_type(OrbitType::Secondary)
                .with_position(Point::new(930.0, 340.0)),
        ];

        let mut graph = OrbitGraph::new(root, plot);
        graph
            .set_target(root_id, OrbitTarget::Root)
            .set_target(near, OrbitTarget::Primary { x: 200.0 })
            .set_target(far, OrbitTarget::Primary { x: 900.0 })
            .set_target(moon, OrbitTarget::Secondary { offset: Some(10.0) })
            .add_link(near, root_id, 120.0, true)
            .add_link(far, root_id, 820.0, true)
            .add_link(moon, far, 40.0, false);

        let outcome = graph
            .relaxation(&bodies, RelaxationSettings::default())
            .run(SimulationState::from_bodies(&bodies));
        let nodes = outcome.state.nodes();

        assert_eq!(nodes[0].position(), root);
        assert!(nodes[1].position().x() < nodes[2].position().x());
        for node in &nodes[1..] {
            assert!(Boundary::rect_centers(plot).contains(node.position(), node.radius(), 1e-3));
        }
    }
}
