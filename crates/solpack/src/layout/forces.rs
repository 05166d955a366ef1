//! Velocity impulses applied at the start of every relaxation step.
//!
//! Each [`Force`] reads the current node positions and adds to the per-node
//! velocity buffer. Impulses are scaled by the cooling `alpha`, so their
//! influence fades as a run settles. Overlap resolution is not a force: it
//! is a position projection owned by the engine, see [`Separation`].

use std::{collections::HashMap, fmt};

use log::warn;

use solpack_core::{body::Body, geometry::Point, identifier::Id};

use super::engine::Node;

/// Per-node value computed from the node and the whole node set.
pub type NodeFn = Box<dyn Fn(&Node, &[Node]) -> f32>;

/// Per-pair value, such as a minimum centre distance.
pub type PairFn = Box<dyn Fn(&Node, &Node) -> f32>;

/// A source of velocity impulses.
pub trait Force {
    /// Adds this force's impulses for the current `alpha` to `velocities`,
    /// which is indexed like `nodes`.
    fn apply(&self, nodes: &[Node], alpha: f32, velocities: &mut [Point]);

    /// Short name used in logs
    fn name(&self) -> &'static str;
}

impl fmt::Debug for dyn Force {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Coordinate an [`Anchor`] pulls on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// Pulls every body toward a target coordinate on one axis.
///
/// The impulse is `(target - position) * strength * alpha`. Both the target
/// and the strength are computed per node; targets may read other nodes,
/// which lets a satellite follow its parent.
pub struct Anchor {
    axis: Axis,
    target: NodeFn,
    strength: NodeFn,
}

impl Anchor {
    /// Anchor on the x axis with a strength of `0.1`.
    pub fn x(target: impl Fn(&Node, &[Node]) -> f32 + 'static) -> Self {
        Self::new(Axis::X, target)
    }

    /// Anchor on the y axis with a strength of `0.1`.
    pub fn y(target: impl Fn(&Node, &[Node]) -> f32 + 'static) -> Self {
        Self::new(Axis::Y, target)
    }

    fn new(axis: Axis, target: impl Fn(&Node, &[Node]) -> f32 + 'static) -> Self {
        Self {
            axis,
            target: Box::new(target),
            strength: Box::new(|_, _| 0.1),
        }
    }

    /// Uses the same strength for every node.
    pub fn with_strength(self, strength: f32) -> Self {
        self.with_strength_fn(move |_, _| strength)
    }

    /// Computes the strength per node. Results are clamped to `0.0..=1.0`.
    pub fn with_strength_fn(mut self, strength: impl Fn(&Node, &[Node]) -> f32 + 'static) -> Self {
        self.strength = Box::new(strength);
        self
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }
}

impl Force for Anchor {
    fn apply(&self, nodes: &[Node], alpha: f32, velocities: &mut [Point]) {
        for (node, velocity) in nodes.iter().zip(velocities.iter_mut()) {
            if node.is_fixed() {
                continue;
            }
            let target = (self.target)(node, nodes);
            let strength = (self.strength)(node, nodes).clamp(0.0, 1.0);
            let pull = strength * alpha;
            *velocity = match self.axis {
                Axis::X => velocity.with_x(velocity.x() + (target - node.position().x()) * pull),
                Axis::Y => velocity.with_y(velocity.y() + (target - node.position().y()) * pull),
            };
        }
    }

    fn name(&self) -> &'static str {
        match self.axis {
            Axis::X => "anchor-x",
            Axis::Y => "anchor-y",
        }
    }
}

/// Pairwise charge between all bodies: `strength / distance²` along the line
/// between them. Negative strengths repel.
///
/// Distances below `distance_min` are softened to avoid runaway impulses;
/// coincident pairs are left to the separation pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ManyBody {
    strength: f32,
    distance_min: f32,
    distance_max: f32,
}

impl ManyBody {
    pub fn new(strength: f32) -> Self {
        Self {
            strength,
            distance_min: 1.0,
            distance_max: f32::INFINITY,
        }
    }

    /// Sets the distance below which the charge stops growing.
    pub fn set_distance_min(&mut self, distance: f32) -> &mut Self {
        self.distance_min = distance;
        self
    }

    /// Sets the distance beyond which bodies do not interact.
    pub fn set_distance_max(&mut self, distance: f32) -> &mut Self {
        self.distance_max = distance;
        self
    }

    pub fn strength(&self) -> f32 {
        self.strength
    }
}

impl Force for ManyBody {
    fn apply(&self, nodes: &[Node], alpha: f32, velocities: &mut [Point]) {
        let min2 = self.distance_min * self.distance_min;
        let max2 = self.distance_max * self.distance_max;

        for (i, node) in nodes.iter().enumerate() {
            let mut impulse = Point::default();
            for (j, other) in nodes.iter().enumerate() {
                if i == j {
                    continue;
                }
                let offset = other.position().sub_point(node.position());
                let mut l2 = offset.x() * offset.x() + offset.y() * offset.y();
                if l2 == 0.0 || l2 >= max2 {
                    continue;
                }
                if l2 < min2 {
                    l2 = (min2 * l2).sqrt();
                }
                impulse = impulse.add_point(offset.scale(self.strength * alpha / l2));
            }
            velocities[i] = velocities[i].add_point(impulse);
        }
    }

    fn name(&self) -> &'static str {
        "many-body"
    }
}

/// A spring between two bodies, by id.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinkSpec {
    source: Id,
    target: Id,
    distance: f32,
    strength: f32,
}

impl LinkSpec {
    pub fn new(source: Id, target: Id, distance: f32, strength: f32) -> Self {
        Self {
            source,
            target,
            distance,
            strength,
        }
    }

    pub fn source(&self) -> Id {
        self.source
    }

    pub fn target(&self) -> Id {
        self.target
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn strength(&self) -> f32 {
        self.strength
    }
}

#[derive(Debug, Clone, Copy)]
struct ResolvedLink {
    source: usize,
    target: usize,
    distance: f32,
    strength: f32,
    /// Share of the correction taken by the target.
    bias: f32,
}

/// Springs pulling linked bodies toward a rest distance.
///
/// The correction of each link is split by degree: the endpoint with more
/// links moves less.
#[derive(Debug, Clone)]
pub struct Link {
    links: Vec<ResolvedLink>,
}

impl Link {
    /// Resolves link endpoints against the body order used to build the
    /// simulation state. Links naming an unknown body are dropped.
    pub fn new(specs: impl IntoIterator<Item = LinkSpec>, bodies: &[Body]) -> Self {
        let index: HashMap<Id, usize> = bodies
            .iter()
            .enumerate()
            .map(|(idx, body)| (body.id(), idx))
            .collect();

        let mut resolved = Vec::new();
        for spec in specs {
            match (index.get(&spec.source), index.get(&spec.target)) {
                (Some(&source), Some(&target)) if source != target => {
                    resolved.push(ResolvedLink {
                        source,
                        target,
                        distance: spec.distance,
                        strength: spec.strength,
                        bias: 0.0,
                    });
                }
                _ => {
                    warn!(source:% = spec.source, target:% = spec.target; "Dropping link with unknown endpoint");
                }
            }
        }

        let mut degree = vec![0usize; bodies.len()];
        for link in &resolved {
            degree[link.source] += 1;
            degree[link.target] += 1;
        }
        for link in &mut resolved {
            let source = degree[link.source] as f32;
            let target = degree[link.target] as f32;
            link.bias = source / (source + target);
        }

        Self { links: resolved }
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

impl Force for Link {
    fn apply(&self, nodes: &[Node], alpha: f32, velocities: &mut [Point]) {
        for link in &self.links {
            let source = nodes[link.source]
                .position()
                .add_point(velocities[link.source]);
            let target = nodes[link.target]
                .position()
                .add_point(velocities[link.target]);
            let offset = target.sub_point(source);
            let length = offset.hypot();
            if length == 0.0 {
                continue;
            }
            let correction =
                offset.scale((length - link.distance) / length * alpha * link.strength);

            velocities[link.target] =
                velocities[link.target].sub_point(correction.scale(link.bias));
            velocities[link.source] =
                velocities[link.source].add_point(correction.scale(1.0 - link.bias));
        }
    }

    fn name(&self) -> &'static str {
        "link"
    }
}

/// Minimum centre distance between every pair of bodies, enforced by
/// projection after integration.
pub struct Separation {
    min_separation: PairFn,
}

impl Separation {
    pub fn new(min_separation: impl Fn(&Node, &Node) -> f32 + 'static) -> Self {
        Self {
            min_separation: Box::new(min_separation),
        }
    }

    /// `radius_a + radius_b + margin`
    pub fn radii_plus(margin: f32) -> Self {
        Self::new(move |a, b| a.radius() + b.radius() + margin)
    }

    pub fn min_separation(&self, a: &Node, b: &Node) -> f32 {
        (self.min_separation)(a, b)
    }
}

impl fmt::Debug for Separation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Separation").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;
    use crate::layout::SimulationState;

    fn state(bodies: &[Body]) -> SimulationState {
        SimulationState::from_bodies(bodies)
    }

    #[test]
    fn test_anchor_pulls_toward_target() {
        let bodies = [Body::new(Id::new("anchor-a"), 1.0, 2.0).with_position(Point::new(10.0, 0.0))];
        let state = state(&bodies);
        let mut velocities = vec![Point::default()];

        Anchor::x(|_, _| 0.0)
            .with_strength(0.5)
            .apply(state.nodes(), 1.0, &mut velocities);

        assert_approx_eq!(f32, velocities[0].x(), -5.0);
        assert_approx_eq!(f32, velocities[0].y(), 0.0);
    }

    #[test]
    fn test_anchor_strength_is_clamped_and_scaled_by_alpha() {
        let bodies = [Body::new(Id::new("anchor-b"), 1.0, 2.0).with_position(Point::new(0.0, 4.0))];
        let state = state(&bodies);
        let mut velocities = vec![Point::default()];

        Anchor::y(|_, _| 0.0)
            .with_strength(3.0)
            .apply(state.nodes(), 0.5, &mut velocities);

        assert_approx_eq!(f32, velocities[0].y(), -2.0);
    }

    #[test]
    fn test_anchor_skips_pinned_nodes() {
        let bodies = [Body::new(Id::new("anchor-pinned"), 1.0, 2.0).with_anchor(Point::new(5.0, 5.0))];
        let state = state(&bodies);
        let mut velocities = vec![Point::default()];

        Anchor::x(|_, _| 100.0).apply(state.nodes(), 1.0, &mut velocities);

        assert!(velocities[0].is_zero());
    }

    #[test]
    fn test_anchor_follows_parent() {
        let bodies = [
            Body::new(Id::new("follow-parent"), 1.0, 5.0).with_position(Point::new(40.0, 0.0)),
            Body::new(Id::new("follow-child"), 1.0, 1.0)
                .with_position(Point::new(0.0, 0.0))
                .with_parent(Id::new("follow-parent")),
        ];
        let state = state(&bodies);
        let mut velocities = vec![Point::default(); 2];

        Anchor::x(|node, nodes| {
            node.parent()
                .map_or(0.0, |p| nodes[p].position().x() + 10.0)
        })
        .with_strength(1.0)
        .apply(state.nodes(), 1.0, &mut velocities);

        assert_approx_eq!(f32, velocities[0].x(), -40.0);
        assert_approx_eq!(f32, velocities[1].x(), 50.0);
    }

    #[test]
    fn test_many_body_repels_with_negative_strength() {
        let bodies = [
            Body::new(Id::new("charge-a"), 1.0, 1.0).with_position(Point::new(0.0, 0.0)),
            Body::new(Id::new("charge-b"), 1.0, 1.0).with_position(Point::new(10.0, 0.0)),
        ];
        let state = state(&bodies);
        let mut velocities = vec![Point::default(); 2];

        ManyBody::new(-70.0).apply(state.nodes(), 1.0, &mut velocities);

        assert_approx_eq!(f32, velocities[0].x(), -7.0);
        assert_approx_eq!(f32, velocities[1].x(), 7.0);
    }

    #[test]
    fn test_many_body_ignores_coincident_and_distant_pairs() {
        let bodies = [
            Body::new(Id::new("charge-c"), 1.0, 1.0),
            Body::new(Id::new("charge-d"), 1.0, 1.0),
            Body::new(Id::new("charge-e"), 1.0, 1.0).with_position(Point::new(500.0, 0.0)),
        ];
        let state = state(&bodies);
        let mut velocities = vec![Point::default(); 3];

        let mut force = ManyBody::new(-70.0);
        force.set_distance_max(100.0);
        force.apply(state.nodes(), 1.0, &mut velocities);

        assert!(velocities.iter().all(|v| v.is_zero()));
    }

    #[test]
    fn test_link_pulls_toward_rest_distance() {
        let bodies = [
            Body::new(Id::new("link-a"), 1.0, 1.0).with_position(Point::new(0.0, 0.0)),
            Body::new(Id::new("link-b"), 1.0, 1.0).with_position(Point::new(20.0, 0.0)),
        ];
        let link = Link::new(
            [LinkSpec::new(Id::new("link-b"), Id::new("link-a"), 10.0, 1.0)],
            &bodies,
        );
        let state = state(&bodies);
        let mut velocities = vec![Point::default(); 2];

        link.apply(state.nodes(), 1.0, &mut velocities);

        // Equal degree: the 10px excess is split evenly.
        assert_approx_eq!(f32, velocities[0].x(), 5.0);
        assert_approx_eq!(f32, velocities[1].x(), -5.0);
    }

    #[test]
    fn test_link_bias_favours_hub() {
        let bodies = [
            Body::new(Id::new("hub"), 1.0, 1.0),
            Body::new(Id::new("spoke-a"), 1.0, 1.0).with_position(Point::new(20.0, 0.0)),
            Body::new(Id::new("spoke-b"), 1.0, 1.0).with_position(Point::new(0.0, 20.0)),
        ];
        let link = Link::new(
            [
                LinkSpec::new(Id::new("spoke-a"), Id::new("hub"), 10.0, 1.0),
                LinkSpec::new(Id::new("spoke-b"), Id::new("hub"), 10.0, 1.0),
            ],
            &bodies,
        );
        let state = state(&bodies);
        let mut velocities = vec![Point::default(); 3];

        link.apply(state.nodes(), 1.0, &mut velocities);

        // The hub has degree 2 and takes a third of each correction.
        assert!(velocities[1].x().abs() > velocities[0].x().abs());
        assert_approx_eq!(f32, velocities[1].x(), -10.0 * 2.0 / 3.0, epsilon = 1e-5);
    }

    #[test]
    fn test_link_drops_unknown_endpoints() {
        let bodies = [Body::new(Id::new("link-known"), 1.0, 1.0)];
        let link = Link::new(
            [LinkSpec::new(Id::new("link-known"), Id::new("link-missing"), 10.0, 1.0)],
            &bodies,
        );
        assert!(link.is_empty());
    }

    #[test]
    fn test_separation_radii_plus() {
        let bodies = [
            Body::new(Id::new("sep-a"), 1.0, 10.0),
            Body::new(Id::new("sep-b"), 1.0, 3.0),
        ];
        let state = state(&bodies);
        let separation = Separation::radii_plus(1.0);
        assert_approx_eq!(
            f32,
            separation.min_separation(&state.nodes()[0], &state.nodes()[1]),
            14.0
        );
    }
}
