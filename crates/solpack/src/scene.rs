//! Scenes: body sets built from a catalog, ready to relax.
//!
//! Each sketch is a [`Scene`]. A scene owns fresh [`Body`] values, knows
//! which relaxation positions them and how the settled result is drawn.
//! Running a scene yields a [`Layout`], the flat snapshot handed to export.
//!
//! - [`packing`] - bodies packed by volume inside a container body
//! - [`orbit`] - the orbit hierarchy spread out by semi-major axis
//! - [`balance`] - a two-pan mass balance (no relaxation)
//! - [`eccentricity`] - orbit ellipses of the most eccentric bodies (no relaxation)
//! - [`gravity`] - planets thrown onto the ground by surface gravity (no relaxation)
//! - [`discovery`] - planets, scattered moons and a discovery-year timeline (no relaxation)

pub mod balance;
pub mod discovery;
pub mod eccentricity;
pub mod gravity;
pub mod orbit;
pub mod packing;

use std::collections::HashMap;

use indexmap::IndexSet;
use log::info;

use solpack_core::{
    body::Body,
    color::Color,
    geometry::{Bounds, Point},
    identifier::Id,
    stroke::Stroke,
};

use crate::layout::{Relaxation, RelaxationSettings, Simulation, SimulationState};

pub use orbit::OrbitScene;
pub use packing::PackingScene;

/// A body set together with the relaxation that places it.
pub trait Scene {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Bodies in the order the relaxation sees them
    fn bodies(&self) -> &[Body];

    /// Builds the forces, separation and boundary of this scene.
    fn relaxation(&self, settings: RelaxationSettings) -> Relaxation;

    fn style(&self) -> &SceneStyle;

    /// Starts a relaxation to be driven step by step.
    fn simulation(&self, settings: RelaxationSettings) -> Simulation {
        Simulation::new(
            self.relaxation(settings),
            SimulationState::from_bodies(self.bodies()),
        )
    }

    /// Relaxes to completion and captures the result.
    fn settle(&self, settings: RelaxationSettings) -> Layout {
        let outcome = self
            .relaxation(settings)
            .run(SimulationState::from_bodies(self.bodies()));

        let mut bodies = self.bodies().to_vec();
        outcome.state.apply_to(&mut bodies);

        info!(
            scene = self.name(),
            bodies = bodies.len(),
            steps = outcome.steps,
            converged = outcome.converged;
            "Scene settled"
        );

        Layout {
            bodies,
            style: self.style().clone(),
            steps: outcome.steps,
            converged: outcome.converged,
        }
    }
}

/// A filled, outlined circle drawn behind the bodies.
#[derive(Debug, Clone, PartialEq)]
pub struct Backdrop {
    center: Point,
    radius: f32,
    fill: Color,
    stroke: Stroke,
}

impl Backdrop {
    pub fn new(center: Point, radius: f32, fill: Color, stroke: Stroke) -> Self {
        Self {
            center,
            radius,
            fill,
            stroke,
        }
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn fill(&self) -> Color {
        self.fill
    }

    pub fn stroke(&self) -> &Stroke {
        &self.stroke
    }
}

/// A line between two bodies.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkLine {
    source: Id,
    target: Id,
    stroke: Stroke,
}

impl LinkLine {
    pub fn new(source: Id, target: Id, stroke: Stroke) -> Self {
        Self {
            source,
            target,
            stroke,
        }
    }

    pub fn source(&self) -> Id {
        self.source
    }

    pub fn target(&self) -> Id {
        self.target
    }

    pub fn stroke(&self) -> &Stroke {
        &self.stroke
    }
}

/// Centered text below the drawing, such as the hover prompt.
#[derive(Debug, Clone, PartialEq)]
pub struct Caption {
    text: String,
    position: Point,
    color: Color,
    font_size: f32,
}

impl Caption {
    pub fn new(text: impl Into<String>, position: Point, color: Color, font_size: f32) -> Self {
        Self {
            text: text.into(),
            position,
            color,
            font_size,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }
}

/// How a settled scene is drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneStyle {
    canvas: Bounds,
    background: Option<Color>,
    backdrop: Option<Backdrop>,
    fills: HashMap<Id, Color>,
    body_stroke: Stroke,
    labels: IndexSet<Id>,
    label_color: Color,
    links: Vec<LinkLine>,
    caption: Option<Caption>,
}

impl SceneStyle {
    /// An empty style covering `canvas`.
    pub fn new(canvas: Bounds) -> Self {
        Self {
            canvas,
            background: None,
            backdrop: None,
            fills: HashMap::new(),
            body_stroke: Stroke::default(),
            labels: IndexSet::new(),
            label_color: Color::default(),
            links: Vec::new(),
            caption: None,
        }
    }

    pub fn with_background(mut self, background: Option<Color>) -> Self {
        self.background = background;
        self
    }

    pub fn with_backdrop(mut self, backdrop: Backdrop) -> Self {
        self.backdrop = Some(backdrop);
        self
    }

    pub fn with_body_stroke(mut self, stroke: Stroke) -> Self {
        self.body_stroke = stroke;
        self
    }

    pub fn with_label_color(mut self, color: Color) -> Self {
        self.label_color = color;
        self
    }

    pub fn with_caption(mut self, caption: Caption) -> Self {
        self.caption = Some(caption);
        self
    }

    pub fn set_fill(&mut self, id: Id, color: Color) {
        self.fills.insert(id, color);
    }

    pub fn add_label(&mut self, id: Id) {
        self.labels.insert(id);
    }

    pub fn add_link(&mut self, link: LinkLine) {
        self.links.push(link);
    }

    pub fn set_background(&mut self, background: Option<Color>) {
        self.background = background;
    }

    pub fn canvas(&self) -> Bounds {
        self.canvas
    }

    pub fn background(&self) -> Option<Color> {
        self.background
    }

    pub fn backdrop(&self) -> Option<&Backdrop> {
        self.backdrop.as_ref()
    }

    /// Fill of a body; bodies without one are drawn in the default color.
    pub fn fill(&self, id: Id) -> Color {
        self.fills.get(&id).copied().unwrap_or_default()
    }

    pub fn body_stroke(&self) -> &Stroke {
        &self.body_stroke
    }

    pub fn is_labeled(&self, id: Id) -> bool {
        self.labels.contains(&id)
    }

    pub fn labels(&self) -> impl Iterator<Item = Id> + '_ {
        self.labels.iter().copied()
    }

    pub fn label_color(&self) -> Color {
        self.label_color
    }

    pub fn links(&self) -> &[LinkLine] {
        &self.links
    }

    pub fn caption(&self) -> Option<&Caption> {
        self.caption.as_ref()
    }

    pub fn caption_mut(&mut self) -> Option<&mut Caption> {
        self.caption.as_mut()
    }
}

/// A settled scene: final body positions plus drawing style.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    bodies: Vec<Body>,
    style: SceneStyle,
    steps: usize,
    converged: bool,
}

impl Layout {
    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn body(&self, id: Id) -> Option<&Body> {
        self.bodies.iter().find(|body| body.id() == id)
    }

    pub fn style(&self) -> &SceneStyle {
        &self.style
    }

    pub fn style_mut(&mut self) -> &mut SceneStyle {
        &mut self.style
    }

    /// Relaxation steps taken
    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn converged(&self) -> bool {
        self.converged
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_defaults_for_unstyled_body() {
        let mut style = SceneStyle::new(Bounds::from_size(500.0, 500.0));
        let red = Color::new("red").unwrap();
        style.set_fill(Id::new("style-mars"), red);

        assert_eq!(style.fill(Id::new("style-mars")), red);
        assert_eq!(style.fill(Id::new("style-ceres")), Color::default());
    }

    #[test]
    fn test_labels_keep_insertion_order() {
        let mut style = SceneStyle::new(Bounds::from_size(100.0, 100.0));
        style.add_label(Id::new("style-saturn"));
        style.add_label(Id::new("style-earth"));
        style.add_label(Id::new("style-saturn"));

        let labels: Vec<Id> = style.labels().collect();
        assert_eq!(labels, [Id::new("style-saturn"), Id::new("style-earth")]);
        assert!(style.is_labeled(Id::new("style-earth")));
        assert!(!style.is_labeled(Id::new("style-venus")));
    }

    #[test]
    fn test_caption_text_updates_in_place() {
        let caption = Caption::new(
            "Hover over a body",
            Point::new(250.0, 480.0),
            Color::default(),
            12.0,
        );
        let mut style = SceneStyle::new(Bounds::from_size(500.0, 500.0)).with_caption(caption);

        if let Some(caption) = style.caption_mut() {
            caption.set_text("Moon");
        }
        assert_eq!(style.caption().map(Caption::text), Some("Moon"));
    }
}
