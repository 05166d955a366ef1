//! Integration tests for the SceneBuilder API
//!
//! These tests verify that the public API works and is usable.

use solpack::{SceneBuilder, SolpackError, config::AppConfig, identifier::Id};

const SYSTEM: &str = "\
eName,isPlanet,orbit_type,orbits,semimajorAxis,eccentricity,meanRadius,mass_kg,volume
Sun,FALSE,,,,,695508,1.989e30,1.412e18
Mercury,TRUE,Primary,NA,57909227,0.2056,2439.7,3.301e23,6.083e10
Earth,TRUE,Primary,NA,149598262,0.0167,6371,5.972e24,1.08321e12
Jupiter,TRUE,Primary,NA,778340821,0.0489,69911,1.898e27,1.43128e15
Moon,FALSE,Secondary,Earth,384400,0.0549,1737.1,7.342e22,2.1958e10
Io,FALSE,Secondary,Jupiter,421700,0.0041,1821.6,8.932e22,2.53e10
Europa,FALSE,Secondary,Jupiter,671034,0.009,1560.8,4.8e22,1.593e10
";

#[test]
fn test_builder_api_exists() {
    let _builder = SceneBuilder::default();
}

#[test]
fn test_parse_dataset() {
    let builder = SceneBuilder::default();
    let dataset = builder.parse(SYSTEM).expect("Failed to parse dataset");
    assert_eq!(dataset.catalog().len(), 7);
    assert_eq!(dataset.source(), SYSTEM);
}

#[test]
fn test_parse_empty_input_returns_error() {
    let builder = SceneBuilder::default();
    let result = builder.parse("");
    assert!(matches!(result, Err(SolpackError::Parse { .. })));
}

#[test]
fn test_render_packing_scene() {
    let builder = SceneBuilder::default();
    let dataset = builder.parse(SYSTEM).expect("Failed to parse dataset");
    let scene = builder.packing(&dataset, "Sun").expect("Failed to build scene");
    let layout = builder.relax(&scene).expect("Failed to relax");

    let svg = builder.render_svg(&layout).expect("Failed to render");
    assert!(svg.contains("<svg"), "Output should contain SVG tag");
    assert!(svg.contains("</svg>"), "Output should be complete SVG");
    assert!(svg.contains("data-name=\"Earth\""));
}

#[test]
fn test_unknown_container_keeps_source() {
    let builder = SceneBuilder::default();
    let dataset = builder.parse(SYSTEM).expect("Failed to parse dataset");

    match builder.packing(&dataset, "Vulcan") {
        Err(SolpackError::Parse { src, .. }) => assert_eq!(src, SYSTEM),
        other => panic!("expected a parse error, got {other:?}"),
    }
}

#[test]
fn test_render_orbit_graph() {
    let builder = SceneBuilder::default();
    let dataset = builder.parse(SYSTEM).expect("Failed to parse dataset");
    let scene = builder.orbit_graph(&dataset).expect("Failed to build scene");
    let layout = builder.relax(&scene).expect("Failed to relax");

    let svg = builder.render_svg(&layout).expect("Failed to render");
    // one line per child: three primaries and three satellites
    assert_eq!(svg.matches("<line").count(), 6);
}

#[test]
fn test_background_override() {
    let config: AppConfig = toml::from_str(
        r##"
        [style]
        background_color = "#102030"
        "##,
    )
    .unwrap();
    let builder = SceneBuilder::new(config);
    let dataset = builder.parse(SYSTEM).expect("Failed to parse dataset");
    let scene = builder.orbit_graph(&dataset).expect("Failed to build scene");

    let layout = builder.relax(&scene).expect("Failed to relax");
    assert!(layout.style().background().is_some());
}

#[test]
fn test_invalid_background_is_a_layout_error() {
    let config: AppConfig = toml::from_str(
        r#"
        [style]
        background_color = "not-a-color"
        "#,
    )
    .unwrap();
    let builder = SceneBuilder::new(config);
    let dataset = builder.parse(SYSTEM).expect("Failed to parse dataset");
    let scene = builder.packing(&dataset, "Sun").expect("Failed to build scene");

    assert!(matches!(builder.relax(&scene), Err(SolpackError::Layout(_))));
}

#[test]
fn test_balance_and_eccentricity() {
    let builder = SceneBuilder::default();
    let dataset = builder.parse(SYSTEM).expect("Failed to parse dataset");

    let balance = builder.balance(&dataset).expect("Failed to weigh");
    assert_eq!(balance.default_selection(), Some(Id::new("Jupiter")));

    let panels = builder.eccentricity(&dataset);
    assert_eq!(panels.ranking()[0], Id::new("Mercury"));
}

#[test]
fn test_balance_without_masses_is_an_error() {
    let builder = SceneBuilder::default();
    let dataset = builder.parse("eName,volume\nEarth,1\n").expect("Failed to parse dataset");
    assert!(matches!(builder.balance(&dataset), Err(SolpackError::Dataset(_))));
}

#[test]
fn test_builder_reusability() {
    let builder = SceneBuilder::default();
    let dataset = builder.parse(SYSTEM).expect("Failed to parse dataset");

    let sun = builder.packing(&dataset, "Sun").expect("Failed to build scene");
    let jupiter = builder.packing(&dataset, "Jupiter").expect("Failed to build scene");

    let svg1 = builder.render_svg(&builder.relax(&sun).unwrap()).unwrap();
    let svg2 = builder.render_svg(&builder.relax(&jupiter).unwrap()).unwrap();
    assert_ne!(svg1, svg2, "Different containers should produce different SVGs");
}

#[test]
fn test_gravity_throw() {
    let builder = SceneBuilder::default();
    let dataset = builder.parse(SYSTEM).expect("Failed to parse dataset");
    let mut throw = builder.gravity_throw(&dataset).expect("Failed to build throw");

    assert_eq!(throw.targets()[0].body(), Id::new("Jupiter"));
    assert_eq!(throw.choices().len(), 3);
    assert!(throw.throw_body("Earth").is_some());
    assert!(throw.throw_body("Earth").is_none());
}

#[test]
fn test_gravity_throw_without_radii_is_dataset_error() {
    let builder = SceneBuilder::default();
    let dataset = builder
        .parse("eName,isPlanet,mass_kg\nEarth,TRUE,5.972e24\n")
        .expect("Failed to parse dataset");
    assert!(matches!(
        builder.gravity_throw(&dataset),
        Err(SolpackError::Dataset(_))
    ));
}

#[test]
fn test_discovery_timeline() {
    let builder = SceneBuilder::default();
    let dataset = builder.parse(SYSTEM).expect("Failed to parse dataset");
    let timeline = builder.discovery(&dataset).expect("Failed to build timeline");

    assert_eq!(timeline.planets().len(), 3);
    assert_eq!(timeline.moons().len(), 3);
    // the dataset has no discovery dates
    assert!(timeline.sections().is_empty());
}
