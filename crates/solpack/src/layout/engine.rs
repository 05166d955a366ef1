//! Iterative relaxation of circular bodies.
//!
//! A [`Relaxation`] holds the forces, the separation rule and the optional
//! boundary of one layout. [`Relaxation::step`] is pure: it maps one
//! [`SimulationState`] to the next and never touches caller data. Each step
//!
//! 1. cools `alpha` toward `alpha_target`,
//! 2. lets every [`Force`] add its impulses to the node velocities,
//! 3. damps the velocities and integrates positions (pinned nodes stay put),
//! 4. projects overlapping pairs apart until no pair is closer than its
//!    minimum separation or the pass limit is hit,
//! 5. clamps every free node into the boundary,
//! 6. stores the realized displacement of each node as its new velocity.
//!
//! A run stops when the total displacement of a step drops below the
//! convergence threshold, or at the step cap.

use std::{collections::HashMap, f32::consts::TAU, fmt};

use log::{debug, info, trace};
use rand::{Rng, SeedableRng, rngs::StdRng};

use solpack_core::{
    body::Body,
    geometry::{Boundary, Point},
    identifier::Id,
};

use super::forces::{Force, Separation};

/// Overlaps smaller than this are treated as resolved.
const SEPARATION_EPSILON: f32 = 1e-4;

/// One body as seen by the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    id: Id,
    radius: f32,
    depth: usize,
    position: Point,
    velocity: Point,
    fixed: Option<Point>,
    parent: Option<usize>,
}

impl Node {
    pub fn id(&self) -> Id {
        self.id
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Depth in the orbit hierarchy (0 for the root)
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn position(&self) -> Point {
        self.position
    }

    /// Displacement realized by the previous step
    pub fn velocity(&self) -> Point {
        self.velocity
    }

    /// Whether the node is pinned to a fixed position
    pub fn is_fixed(&self) -> bool {
        self.fixed.is_some()
    }

    /// Index of the parent node in the same state, if any
    pub fn parent(&self) -> Option<usize> {
        self.parent
    }
}

/// Positions, velocities and cooling of one relaxation run.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationState {
    nodes: Vec<Node>,
    alpha: f32,
    step: usize,
    displacement: f32,
}

impl SimulationState {
    /// Builds a state from bodies, keeping their order.
    ///
    /// Anchored bodies become pinned nodes; parents are resolved by id among
    /// the given bodies and ignored when absent.
    pub fn from_bodies(bodies: &[Body]) -> Self {
        let index: HashMap<Id, usize> = bodies
            .iter()
            .enumerate()
            .map(|(idx, body)| (body.id(), idx))
            .collect();

        let nodes = bodies
            .iter()
            .map(|body| Node {
                id: body.id(),
                radius: body.radius(),
                depth: body.depth(),
                position: body.anchor().unwrap_or(body.position()),
                velocity: Point::default(),
                fixed: body.anchor(),
                parent: body.parent().and_then(|p| index.get(&p).copied()),
            })
            .collect();

        Self {
            nodes,
            alpha: 1.0,
            step: 0,
            displacement: f32::INFINITY,
        }
    }

    /// Sets the starting `alpha`.
    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node(&self, id: Id) -> Option<&Node> {
        self.nodes.iter().find(|node| node.id == id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Current cooling factor
    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    /// Number of steps taken to reach this state
    pub fn step(&self) -> usize {
        self.step
    }

    /// Total displacement of the step that produced this state
    pub fn displacement(&self) -> f32 {
        self.displacement
    }

    /// Positions in node order
    pub fn positions(&self) -> impl Iterator<Item = (Id, Point)> + '_ {
        self.nodes.iter().map(|node| (node.id, node.position))
    }

    /// Writes node positions back onto bodies with the same id.
    pub fn apply_to(&self, bodies: &mut [Body]) {
        let positions: HashMap<Id, Point> = self.positions().collect();
        for body in bodies {
            if let Some(&position) = positions.get(&body.id()) {
                body.set_position(position);
            }
        }
    }
}

/// Cooling, damping and termination settings of a [`Relaxation`].
///
/// Defaults follow the usual force simulation schedule: `alpha` decays from 1
/// to `alpha_min` in about 300 steps and velocities lose 40% per step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RelaxationSettings {
    max_steps: usize,
    convergence_threshold: f32,
    velocity_decay: f32,
    alpha_min: f32,
    alpha_decay: f32,
    alpha_target: f32,
    separation_iterations: usize,
    seed: u64,
}

impl Default for RelaxationSettings {
    fn default() -> Self {
        let alpha_min = 0.001;
        Self {
            max_steps: 300,
            convergence_threshold: 0.05,
            velocity_decay: 0.4,
            alpha_min,
            alpha_decay: 1.0 - alpha_min.powf(1.0 / 300.0),
            alpha_target: 0.0,
            separation_iterations: 8,
            seed: 0x5eed,
        }
    }
}

impl RelaxationSettings {
    pub fn max_steps(&self) -> usize {
        self.max_steps
    }

    pub fn convergence_threshold(&self) -> f32 {
        self.convergence_threshold
    }

    pub fn velocity_decay(&self) -> f32 {
        self.velocity_decay
    }

    pub fn alpha_min(&self) -> f32 {
        self.alpha_min
    }

    pub fn alpha_decay(&self) -> f32 {
        self.alpha_decay
    }

    pub fn alpha_target(&self) -> f32 {
        self.alpha_target
    }

    pub fn separation_iterations(&self) -> usize {
        self.separation_iterations
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Set the hard cap on steps per run
    pub fn set_max_steps(&mut self, steps: usize) -> &mut Self {
        self.max_steps = steps;
        self
    }

    /// Set the total displacement below which a run has converged
    pub fn set_convergence_threshold(&mut self, threshold: f32) -> &mut Self {
        self.convergence_threshold = threshold;
        self
    }

    /// Set the fraction of velocity lost every step
    pub fn set_velocity_decay(&mut self, decay: f32) -> &mut Self {
        self.velocity_decay = decay.clamp(0.0, 1.0);
        self
    }

    /// Set the alpha below which forces stop acting
    pub fn set_alpha_min(&mut self, alpha_min: f32) -> &mut Self {
        self.alpha_min = alpha_min;
        self
    }

    /// Set the rate at which alpha approaches its target
    pub fn set_alpha_decay(&mut self, decay: f32) -> &mut Self {
        self.alpha_decay = decay.clamp(0.0, 1.0);
        self
    }

    /// Set the value alpha cools toward
    pub fn set_alpha_target(&mut self, target: f32) -> &mut Self {
        self.alpha_target = target;
        self
    }

    /// Set the maximum number of overlap resolution passes per step
    pub fn set_separation_iterations(&mut self, iterations: usize) -> &mut Self {
        self.separation_iterations = iterations;
        self
    }

    /// Set the seed of the coincident-pair jiggle
    pub fn set_seed(&mut self, seed: u64) -> &mut Self {
        self.seed = seed;
        self
    }
}

/// Summary of one step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepReport {
    pub step: usize,
    pub alpha: f32,
    pub displacement: f32,
}

/// Result of running a relaxation to completion.
#[derive(Debug, Clone, PartialEq)]
pub struct RunOutcome {
    /// Steps taken by this run
    pub steps: usize,
    /// Whether the run stopped below the convergence threshold rather than
    /// at the step cap
    pub converged: bool,
    pub state: SimulationState,
}

/// Forces, constraints and settings of one layout.
///
/// # Examples
///
/// ```
/// use solpack::layout::{Relaxation, Separation, SimulationState};
/// use solpack_core::{body::Body, identifier::Id};
///
/// let bodies = [
///     Body::new(Id::new("Earth"), 1.0, 10.0),
///     Body::new(Id::new("Moon"), 1.0, 3.0),
/// ];
///
/// let mut relaxation = Relaxation::new();
/// relaxation.set_separation(Separation::radii_plus(1.0));
///
/// let outcome = relaxation.run(SimulationState::from_bodies(&bodies));
/// let earth = outcome.state.nodes()[0].position();
/// let moon = outcome.state.nodes()[1].position();
/// assert!(earth.distance(moon) >= 14.0 - 1e-3);
/// ```
pub struct Relaxation {
    forces: Vec<Box<dyn Force>>,
    separation: Option<Separation>,
    boundary: Option<Boundary>,
    settings: RelaxationSettings,
}

impl fmt::Debug for Relaxation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Relaxation")
            .field("forces", &self.forces)
            .field("separation", &self.separation)
            .field("boundary", &self.boundary)
            .field("settings", &self.settings)
            .finish()
    }
}

impl Default for Relaxation {
    fn default() -> Self {
        Self::new()
    }
}

impl Relaxation {
    /// Create a relaxation with no forces and default settings
    pub fn new() -> Self {
        Self::with_settings(RelaxationSettings::default())
    }

    pub fn with_settings(settings: RelaxationSettings) -> Self {
        Self {
            forces: Vec::new(),
            separation: None,
            boundary: None,
            settings,
        }
    }

    /// Add a force; forces apply in insertion order
    pub fn add_force(&mut self, force: impl Force + 'static) -> &mut Self {
        self.forces.push(Box::new(force));
        self
    }

    /// Set the minimum distance rule between bodies
    pub fn set_separation(&mut self, separation: Separation) -> &mut Self {
        self.separation = Some(separation);
        self
    }

    /// Set the containing shape
    pub fn set_boundary(&mut self, boundary: Boundary) -> &mut Self {
        self.boundary = Some(boundary);
        self
    }

    pub fn settings(&self) -> &RelaxationSettings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut RelaxationSettings {
        &mut self.settings
    }

    pub fn boundary(&self) -> Option<&Boundary> {
        self.boundary.as_ref()
    }

    pub fn separation(&self) -> Option<&Separation> {
        self.separation.as_ref()
    }

    /// Computes the state after one step. The input state is not modified.
    pub fn step(&self, state: &SimulationState) -> SimulationState {
        let settings = &self.settings;
        let alpha = state.alpha + (settings.alpha_target - state.alpha) * settings.alpha_decay;
        let mut nodes = state.nodes.clone();
        let previous: Vec<Point> = nodes.iter().map(|node| node.position).collect();

        let mut velocities: Vec<Point> = nodes.iter().map(|node| node.velocity).collect();
        if alpha >= settings.alpha_min {
            for force in &self.forces {
                force.apply(&nodes, alpha, &mut velocities);
            }
        }

        let retain = 1.0 - settings.velocity_decay;
        for (node, velocity) in nodes.iter_mut().zip(&velocities) {
            match node.fixed {
                Some(fixed) => node.position = fixed,
                None => node.position = node.position.add_point(velocity.scale(retain)),
            }
        }

        if let Some(separation) = &self.separation {
            self.separate(&mut nodes, separation, state.step);
        }

        if let Some(boundary) = &self.boundary {
            for node in nodes.iter_mut().filter(|node| node.fixed.is_none()) {
                node.position = boundary.clamp(node.position, node.radius);
            }
        }

        let mut displacement = 0.0;
        for (node, before) in nodes.iter_mut().zip(previous) {
            let moved = node.position.sub_point(before);
            displacement += moved.hypot();
            node.velocity = if node.fixed.is_some() {
                Point::default()
            } else {
                moved
            };
        }

        trace!(step = state.step + 1, alpha = alpha, displacement = displacement; "Relaxation step");

        SimulationState {
            nodes,
            alpha,
            step: state.step + 1,
            displacement,
        }
    }

    /// Steps until the total displacement drops below the convergence
    /// threshold or the step cap is reached.
    ///
    /// Empty and single-body states converge without stepping.
    pub fn run(&self, state: SimulationState) -> RunOutcome {
        if state.len() <= 1 {
            debug!(bodies = state.len(); "Trivial relaxation, nothing to do");
            return RunOutcome {
                steps: 0,
                converged: true,
                state,
            };
        }

        let mut state = state;
        let mut steps = 0;
        let mut converged = false;
        while steps < self.settings.max_steps {
            state = self.step(&state);
            steps += 1;
            if self.is_converged(&state) {
                converged = true;
                break;
            }
        }

        info!(
            bodies = state.len(),
            steps = steps,
            converged = converged,
            displacement = state.displacement;
            "Relaxation finished"
        );

        RunOutcome {
            steps,
            converged,
            state,
        }
    }

    fn is_converged(&self, state: &SimulationState) -> bool {
        state.displacement < self.settings.convergence_threshold
    }

    /// Projects overlapping pairs apart, pass by pass, in index order.
    ///
    /// Each violating pair is pushed to exactly its minimum separation along
    /// the line between the centres; a pinned node takes none of the
    /// correction. Coincident pairs get a seeded random direction.
    fn separate(&self, nodes: &mut [Node], separation: &Separation, step: usize) {
        let mut rng = StdRng::seed_from_u64(self.settings.seed ^ step as u64);

        for pass in 0..self.settings.separation_iterations {
            let mut corrected = false;
            for i in 0..nodes.len() {
                for j in (i + 1)..nodes.len() {
                    let (head, tail) = nodes.split_at_mut(j);
                    let (a, b) = (&mut head[i], &mut tail[0]);

                    let weight_a = if a.fixed.is_some() { 0.0 } else { 1.0 };
                    let weight_b = if b.fixed.is_some() { 0.0 } else { 1.0 };
                    if weight_a + weight_b == 0.0 {
                        continue;
                    }

                    let min = separation.min_separation(a, b);
                    let offset = b.position.sub_point(a.position);
                    let distance = offset.hypot();
                    if distance >= min - SEPARATION_EPSILON {
                        continue;
                    }

                    let direction = if distance > 0.0 {
                        offset.scale(1.0 / distance)
                    } else {
                        Point::default().polar_offset(rng.random_range(0.0..TAU), 1.0)
                    };
                    let overlap = min - distance;
                    let total = weight_a + weight_b;

                    a.position = a
                        .position
                        .sub_point(direction.scale(overlap * weight_a / total));
                    b.position = b
                        .position
                        .add_point(direction.scale(overlap * weight_b / total));
                    corrected = true;
                }
            }
            if !corrected {
                trace!(step = step, passes = pass; "Separation resolved");
                return;
            }
        }
    }
}

/// A relaxation driven one step at a time, for per-frame rendering.
///
/// Dropping a `Simulation` abandons the run; there is nothing to cancel.
#[derive(Debug)]
pub struct Simulation {
    relaxation: Relaxation,
    state: SimulationState,
    steps: usize,
    settled: bool,
    converged: bool,
}

impl Simulation {
    pub fn new(relaxation: Relaxation, state: SimulationState) -> Self {
        let trivial = state.len() <= 1;
        Self {
            relaxation,
            state,
            steps: 0,
            settled: trivial,
            converged: trivial,
        }
    }

    /// Advances one step. Returns `None` once the run has settled.
    pub fn tick(&mut self) -> Option<StepReport> {
        if self.settled {
            return None;
        }

        self.state = self.relaxation.step(&self.state);
        self.steps += 1;

        if self.relaxation.is_converged(&self.state) {
            self.settled = true;
            self.converged = true;
        } else if self.steps >= self.relaxation.settings.max_steps {
            self.settled = true;
        }

        Some(StepReport {
            step: self.state.step,
            alpha: self.state.alpha,
            displacement: self.state.displacement,
        })
    }

    /// Current positions in body order
    pub fn positions(&self) -> impl Iterator<Item = (Id, Point)> + '_ {
        self.state.positions()
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn relaxation(&self) -> &Relaxation {
        &self.relaxation
    }

    pub fn is_settled(&self) -> bool {
        self.settled
    }

    /// Runs the remaining steps and returns the outcome.
    pub fn finish(mut self) -> RunOutcome {
        while self.tick().is_some() {}
        RunOutcome {
            steps: self.steps,
            converged: self.converged,
            state: self.state,
        }
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;
    use crate::layout::forces::Anchor;

    fn body(name: &str, radius: f32, x: f32, y: f32) -> Body {
        Body::new(Id::new(name), 1.0, radius).with_position(Point::new(x, y))
    }

    fn min_gap(state: &SimulationState, margin: f32) -> f32 {
        let nodes = state.nodes();
        let mut gap = f32::INFINITY;
        for i in 0..nodes.len() {
            for j in (i + 1)..nodes.len() {
                let distance = nodes[i].position().distance(nodes[j].position());
                let min = nodes[i].radius() + nodes[j].radius() + margin;
                gap = gap.min(distance - min);
            }
        }
        gap
    }

    #[test]
    fn test_default_settings_cool_in_300_steps() {
        let settings = RelaxationSettings::default();
        let mut alpha = 1.0f32;
        for _ in 0..300 {
            alpha += (0.0 - alpha) * settings.alpha_decay();
        }
        assert_approx_eq!(f32, alpha, settings.alpha_min(), epsilon = 1e-5);
    }

    #[test]
    fn test_from_bodies_resolves_parents_and_pins() {
        let bodies = [
            Body::new(Id::new("state-root"), 1.0, 14.0).with_anchor(Point::new(80.0, 325.0)),
            Body::new(Id::new("state-child"), 1.0, 4.0).with_parent(Id::new("state-root")),
            Body::new(Id::new("state-orphan"), 1.0, 4.0).with_parent(Id::new("state-nobody")),
        ];
        let state = SimulationState::from_bodies(&bodies);

        assert!(state.nodes()[0].is_fixed());
        assert_eq!(state.nodes()[1].parent(), Some(0));
        assert_eq!(state.nodes()[2].parent(), None);
        assert_eq!(state.alpha(), 1.0);
        assert_eq!(state.step(), 0);
    }

    #[test]
    fn test_step_is_pure() {
        let bodies = [body("pure-a", 5.0, 0.0, 0.0), body("pure-b", 5.0, 1.0, 0.0)];
        let mut relaxation = Relaxation::new();
        relaxation.set_separation(Separation::radii_plus(0.0));

        let state = SimulationState::from_bodies(&bodies);
        let snapshot = state.clone();
        let next = relaxation.step(&state);

        assert_eq!(state, snapshot);
        assert_eq!(next.step(), 1);
        assert!(next.alpha() < state.alpha());
        assert!(min_gap(&next, 0.0) >= -1e-3);
    }

    #[test]
    fn test_empty_and_single_converge_without_steps() {
        let relaxation = Relaxation::new();

        let outcome = relaxation.run(SimulationState::from_bodies(&[]));
        assert_eq!(outcome.steps, 0);
        assert!(outcome.converged);

        let single = [body("lonely", 3.0, 4.0, 4.0)];
        let outcome = relaxation.run(SimulationState::from_bodies(&single));
        assert_eq!(outcome.steps, 0);
        assert!(outcome.converged);
        assert_eq!(outcome.state.nodes()[0].position(), Point::new(4.0, 4.0));
    }

    #[test]
    fn test_coincident_bodies_are_separated() {
        let bodies = [
            body("coincident-a", 4.0, 50.0, 50.0),
            body("coincident-b", 4.0, 50.0, 50.0),
            body("coincident-c", 4.0, 50.0, 50.0),
        ];
        let mut relaxation = Relaxation::new();
        relaxation.set_separation(Separation::radii_plus(2.0));
        relaxation.settings_mut().set_separation_iterations(32);

        let outcome = relaxation.run(SimulationState::from_bodies(&bodies));
        assert!(min_gap(&outcome.state, 2.0) >= -1e-2);
    }

    #[test]
    fn test_pinned_node_never_moves() {
        let anchor = Point::new(10.0, 10.0);
        let bodies = [
            Body::new(Id::new("pin-root"), 1.0, 10.0).with_anchor(anchor),
            body("pin-free", 5.0, 12.0, 10.0),
        ];
        let mut relaxation = Relaxation::new();
        relaxation.set_separation(Separation::radii_plus(0.0));

        let outcome = relaxation.run(SimulationState::from_bodies(&bodies));
        assert_eq!(outcome.state.nodes()[0].position(), anchor);
        assert!(
            outcome.state.nodes()[1]
                .position()
                .distance(anchor)
                >= 15.0 - 1e-3
        );
    }

    #[test]
    fn test_boundary_clamps_free_nodes() {
        let bodies = [body("clamped", 5.0, 300.0, 0.0), body("inside", 5.0, 0.0, 0.0)];
        let boundary = Boundary::circle(Point::default(), 50.0);
        let mut relaxation = Relaxation::new();
        relaxation.set_boundary(boundary);

        let next = relaxation.step(&SimulationState::from_bodies(&bodies));
        let clamped = next.nodes()[0].position();
        assert_approx_eq!(f32, clamped.x(), 45.0, epsilon = 1e-4);
        assert_approx_eq!(f32, clamped.y(), 0.0, epsilon = 1e-4);
    }

    #[test]
    fn test_anchor_run_reaches_target() {
        let bodies = [body("target-a", 2.0, 100.0, 0.0), body("target-b", 2.0, -100.0, 0.0)];
        let mut relaxation = Relaxation::new();
        relaxation
            .add_force(Anchor::x(|_, _| 0.0).with_strength(0.3))
            .add_force(Anchor::y(|_, _| 0.0).with_strength(0.3))
            .set_separation(Separation::radii_plus(1.0));
        relaxation.settings_mut().set_convergence_threshold(1e-3);

        let outcome = relaxation.run(SimulationState::from_bodies(&bodies));
        let a = outcome.state.nodes()[0].position();
        let b = outcome.state.nodes()[1].position();
        assert!(a.distance(Point::default()) < 10.0);
        assert!(b.distance(Point::default()) < 10.0);
        assert!(a.distance(b) >= 5.0 - 1e-3);
    }

    #[test]
    fn test_run_respects_step_cap() {
        let bodies = [body("cap-a", 2.0, 100.0, 0.0), body("cap-b", 2.0, -100.0, 0.0)];
        let mut relaxation = Relaxation::new();
        relaxation.add_force(Anchor::x(|_, _| 0.0).with_strength(0.3));
        relaxation
            .settings_mut()
            .set_max_steps(5)
            .set_convergence_threshold(0.0);

        let outcome = relaxation.run(SimulationState::from_bodies(&bodies));
        assert_eq!(outcome.steps, 5);
        assert!(!outcome.converged);
        assert_eq!(outcome.state.step(), 5);
    }

    #[test]
    fn test_simulation_matches_run() {
        let bodies = [
            body("sim-a", 3.0, 0.0, 0.0),
            body("sim-b", 3.0, 1.0, 0.0),
            body("sim-c", 3.0, 0.0, 1.0),
        ];
        let build = || {
            let mut relaxation = Relaxation::new();
            relaxation
                .add_force(Anchor::x(|_, _| 0.0))
                .add_force(Anchor::y(|_, _| 0.0))
                .set_separation(Separation::radii_plus(1.0));
            relaxation
        };

        let expected = build().run(SimulationState::from_bodies(&bodies));

        let mut simulation = Simulation::new(build(), SimulationState::from_bodies(&bodies));
        let mut ticks = 0;
        while let Some(report) = simulation.tick() {
            ticks += 1;
            assert_eq!(report.step, ticks);
        }
        assert!(simulation.is_settled());
        assert_eq!(simulation.tick(), None);

        let outcome = simulation.finish();
        assert_eq!(outcome.steps, expected.steps);
        assert_eq!(outcome.converged, expected.converged);
        assert_eq!(outcome.state, expected.state);
    }

    #[test]
    fn test_apply_to_writes_positions_back() {
        let mut bodies = vec![body("apply-a", 2.0, 0.0, 0.0), body("apply-b", 2.0, 0.0, 0.0)];
        let mut relaxation = Relaxation::new();
        relaxation.set_separation(Separation::radii_plus(0.0));

        let outcome = relaxation.run(SimulationState::from_bodies(&bodies));
        outcome.state.apply_to(&mut bodies);

        assert!(bodies[0].position().distance(bodies[1].position()) >= 4.0 - 1e-3);
    }
}
