//! Bodies packed by volume inside a container body.
//!
//! Every body except the root and the container is sized relative to the
//! container's magnitude: `percent = m / m_container * 100` and
//! `radius = cbrt(percent / 100) * container_radius`. Only bodies smaller
//! than half the container radius are packed; they all start at the centre.

use std::collections::HashMap;

use log::{debug, info};

use solpack_core::{
    body::{Body, Magnitude},
    color::{CATEGORY10, Color, OrdinalPalette},
    geometry::Point,
    identifier::Id,
    scale::RadiusLaw,
    stroke::Stroke,
};
use solpack_data::{Catalog, error::ParseError};

use super::{Backdrop, Caption, Scene, SceneStyle};
use crate::{
    config::PackingConfig,
    layout::{Relaxation, RelaxationSettings, presets::SunPacking},
};

const CONTAINER_FILL: &str = "#FFD966";
const CONTAINER_STROKE: &str = "#E6A800";
const CONTAINER_STROKE_WIDTH: f32 = 4.0;
const BODY_STROKE_WIDTH: f32 = 0.5;
const CAPTION_FONT_SIZE: f32 = 14.0;
/// Distance of the caption baseline from the bottom edge
const CAPTION_OFFSET: f32 = 20.0;
/// Packed bodies must be smaller than this share of the container radius
const MAX_RADIUS_RATIO: f32 = 0.5;

/// The packing sketch for one container.
#[derive(Debug, Clone)]
pub struct PackingScene {
    container: Id,
    magnitude: Magnitude,
    preset: SunPacking,
    bodies: Vec<Body>,
    percents: HashMap<Id, f64>,
    excluded: Vec<Id>,
    style: SceneStyle,
}

impl PackingScene {
    /// Builds the scene packed inside `container`.
    ///
    /// # Errors
    ///
    /// E300 when `container` is not in the catalog, E301 when its magnitude
    /// is missing, zero, negative or not finite.
    pub fn build(
        catalog: &Catalog,
        container: &str,
        config: &PackingConfig,
    ) -> Result<Self, ParseError> {
        let magnitude = config.magnitude();
        let (container_record, container_magnitude) =
            catalog.require_magnitude(container, magnitude)?;
        let container = container_record.id();
        let root = Id::new(config.root());

        let canvas = config.canvas();
        let center = canvas.center();
        let container_radius = config.container_radius();
        let law = RadiusLaw::CubeRoot {
            reference: container_magnitude,
            scale: container_radius,
        };

        let candidates: Vec<(Id, f64)> = catalog
            .records()
            .iter()
            .filter(|record| record.id() != root && record.id() != container)
            .filter_map(|record| {
                record
                    .positive_magnitude(magnitude)
                    .map(|m| (record.id(), m))
            })
            .collect();

        let mut palette =
            OrdinalPalette::new(&CATEGORY10).with_domain(candidates.iter().map(|(id, _)| *id));

        let mut style = SceneStyle::new(canvas.bounds())
            .with_background(Color::new("black").ok())
            .with_backdrop(Backdrop::new(
                center,
                container_radius,
                parse_color(CONTAINER_FILL),
                Stroke::solid(parse_color(CONTAINER_STROKE), CONTAINER_STROKE_WIDTH),
            ))
            .with_body_stroke(Stroke::solid(parse_color("white"), BODY_STROKE_WIDTH))
            .with_caption(Caption::new(
                prompt(container, magnitude),
                Point::new(center.x(), canvas.height() - CAPTION_OFFSET),
                parse_color("white"),
                CAPTION_FONT_SIZE,
            ));

        let mut bodies = Vec::new();
        let mut percents = HashMap::new();
        let mut excluded = Vec::new();
        for (id, m) in candidates {
            let radius = law.radius(m);
            if radius < MAX_RADIUS_RATIO * container_radius {
                bodies.push(Body::sized(id, m, &law).with_position(center));
                style.set_fill(id, palette.color(id));
                percents.insert(id, m / container_magnitude * 100.0);
            } else {
                debug!(body:% = id, radius = radius; "Body too large for the container, not packed");
                excluded.push(id);
            }
        }

        info!(
            container:% = container,
            packed = bodies.len(),
            excluded = excluded.len();
            "Packing scene built"
        );

        Ok(Self {
            container,
            magnitude,
            preset: SunPacking::new(center, container_radius),
            bodies,
            percents,
            excluded,
            style,
        })
    }

    pub fn container(&self) -> Id {
        self.container
    }

    pub fn magnitude(&self) -> Magnitude {
        self.magnitude
    }

    /// Magnitude of a packed body as a percentage of the container's
    pub fn percent(&self, id: Id) -> Option<f64> {
        self.percents.get(&id).copied()
    }

    /// Bodies left out because they are too large for the container
    pub fn excluded(&self) -> &[Id] {
        &self.excluded
    }

    /// Caption for the hovered body, or the prompt when nothing is hovered
    /// or the body is not packed.
    pub fn hover_text(&self, hovered: Option<Id>) -> String {
        match hovered.and_then(|id| self.percent(id).map(|pct| (id, pct))) {
            Some((id, pct)) => format!(
                "{id}: {pct:.4}% of {} {}",
                self.container,
                self.magnitude.label()
            ),
            None => prompt(self.container, self.magnitude),
        }
    }
}

impl Scene for PackingScene {
    fn name(&self) -> &'static str {
        "packing"
    }

    fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    fn relaxation(&self, settings: RelaxationSettings) -> Relaxation {
        self.preset.relaxation(settings)
    }

    fn style(&self) -> &SceneStyle {
        &self.style
    }
}

fn prompt(container: Id, magnitude: Magnitude) -> String {
    format!(
        "Hover over a body to see {} relative to {container}",
        magnitude.label()
    )
}

fn parse_color(color: &str) -> Color {
    Color::new(color).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;
    use solpack_data::error::ErrorCode;

    use super::*;

    const SYSTEM: &str = "\
eName,isPlanet,volume
Sun,FALSE,1000000
Jupiter,TRUE,1000
Earth,TRUE,1
Moon,FALSE,0.02
Comet,FALSE,
Giant,FALSE,200000
";

    fn catalog() -> Catalog {
        solpack_data::parse(SYSTEM).unwrap()
    }

    #[test]
    fn test_radii_follow_cube_root_of_share() {
        let scene = PackingScene::build(&catalog(), "Sun", &PackingConfig::default()).unwrap();

        let jupiter = scene
            .bodies()
            .iter()
            .find(|b| b.id() == Id::new("Jupiter"))
            .unwrap();
        assert_approx_eq!(f32, jupiter.radius(), 20.0, epsilon = 1e-3);
        assert_eq!(jupiter.position(), Point::new(250.0, 250.0));
        assert_approx_eq!(f64, scene.percent(Id::new("Jupiter")).unwrap(), 0.1);
    }

    #[test]
    fn test_root_missing_and_large_bodies_are_left_out() {
        let scene = PackingScene::build(&catalog(), "Sun", &PackingConfig::default()).unwrap();
        let names: Vec<String> = scene.bodies().iter().map(|b| b.id().name()).collect();

        assert_eq!(names, ["Jupiter", "Earth", "Moon"]);
        // cbrt(0.2) * 200 is about 117, above half the container radius
        assert_eq!(scene.excluded(), [Id::new("Giant")]);
    }

    #[test]
    fn test_container_is_excluded_from_its_own_packing() {
        let scene = PackingScene::build(&catalog(), "Jupiter", &PackingConfig::default()).unwrap();
        assert!(scene.bodies().iter().all(|b| b.id() != Id::new("Jupiter")));
        assert!(scene.bodies().iter().all(|b| b.id() != Id::new("Sun")));
        assert_approx_eq!(f64, scene.percent(Id::new("Earth")).unwrap(), 0.1);
    }

    #[test]
    fn test_hover_text() {
        let scene = PackingScene::build(&catalog(), "Sun", &PackingConfig::default()).unwrap();
        assert_eq!(
            scene.hover_text(Some(Id::new("Earth"))),
            "Earth: 0.0001% of Sun volume"
        );
        assert_eq!(
            scene.hover_text(None),
            "Hover over a body to see volume relative to Sun"
        );
        assert_eq!(scene.hover_text(Some(Id::new("Giant"))), scene.hover_text(None));
    }

    #[test]
    fn test_missing_container_is_an_error() {
        let err = PackingScene::build(&catalog(), "Vulcan", &PackingConfig::default()).unwrap_err();
        assert_eq!(err.diagnostics()[0].code(), Some(ErrorCode::E300));

        let err = PackingScene::build(&catalog(), "Comet", &PackingConfig::default()).unwrap_err();
        assert_eq!(err.diagnostics()[0].code(), Some(ErrorCode::E301));
    }

    #[test]
    fn test_settled_bodies_stay_inside_container() {
        let scene = PackingScene::build(&catalog(), "Sun", &PackingConfig::default()).unwrap();
        let layout = scene.settle(RelaxationSettings::default());
        let backdrop = layout.style().backdrop().unwrap();

        for body in layout.bodies() {
            let reach = body.position().distance(backdrop.center()) + body.radius();
            assert!(reach <= backdrop.radius() + 1e-3);
        }
    }
}
