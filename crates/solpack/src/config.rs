//! Configuration types for solpack layouts.
//!
//! This module provides configuration structures that control how scenes
//! are built, relaxed and styled. All types implement [`serde::Deserialize`]
//! for loading from external sources; every field has a default, so an empty
//! document is a valid configuration.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining every section.
//! - [`LayoutConfig`] - Step cap, convergence threshold and seed of the relaxation engine.
//! - [`PackingConfig`] - Canvas and container of the volume packing scene.
//! - [`OrbitConfig`] - Canvas, margins and label policy of the orbit graph scene.
//! - [`StyleConfig`] - Visual styling options such as background color.
//!
//! # Example
//!
//! ```
//! # use solpack::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.layout().max_steps(), 300);
//! assert_eq!(config.packing().root(), "Sun");
//! assert!(config.style().background_color().is_ok());
//! ```

use serde::Deserialize;

use solpack_core::{
    body::Magnitude,
    color::Color,
    geometry::{Bounds, Insets, Point},
};

use crate::layout::RelaxationSettings;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Relaxation engine section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Volume packing section.
    #[serde(default)]
    packing: PackingConfig,

    /// Orbit graph section.
    #[serde(default)]
    orbit: OrbitConfig,

    /// Style section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(
        layout: LayoutConfig,
        packing: PackingConfig,
        orbit: OrbitConfig,
        style: StyleConfig,
    ) -> Self {
        Self {
            layout,
            packing,
            orbit,
            style,
        }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the packing configuration.
    pub fn packing(&self) -> &PackingConfig {
        &self.packing
    }

    /// Returns the orbit configuration.
    pub fn orbit(&self) -> &OrbitConfig {
        &self.orbit
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Returns a copy with the relaxation seed replaced.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.layout.seed = seed;
        self
    }
}

/// Relaxation engine limits shared by every scene.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Hard cap on relaxation steps.
    max_steps: usize,

    /// Total displacement below which a run counts as converged.
    convergence_threshold: f32,

    /// Maximum overlap resolution passes per step.
    separation_iterations: usize,

    /// Seed for the jiggle that separates coincident bodies and for initial
    /// jitter.
    seed: u64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        let settings = RelaxationSettings::default();
        Self {
            max_steps: settings.max_steps(),
            convergence_threshold: settings.convergence_threshold(),
            separation_iterations: settings.separation_iterations(),
            seed: settings.seed(),
        }
    }
}

impl LayoutConfig {
    /// Creates a new [`LayoutConfig`].
    pub fn new(
        max_steps: usize,
        convergence_threshold: f32,
        separation_iterations: usize,
        seed: u64,
    ) -> Self {
        Self {
            max_steps,
            convergence_threshold,
            separation_iterations,
            seed,
        }
    }

    pub fn max_steps(&self) -> usize {
        self.max_steps
    }

    pub fn convergence_threshold(&self) -> f32 {
        self.convergence_threshold
    }

    pub fn separation_iterations(&self) -> usize {
        self.separation_iterations
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Engine settings with these limits applied on top of the defaults.
    pub fn settings(&self) -> RelaxationSettings {
        let mut settings = RelaxationSettings::default();
        settings
            .set_max_steps(self.max_steps)
            .set_convergence_threshold(self.convergence_threshold)
            .set_separation_iterations(self.separation_iterations)
            .set_seed(self.seed);
        settings
    }
}

/// Size of a drawing surface in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct CanvasSize {
    width: f32,
    height: f32,
}

impl CanvasSize {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    /// Bounds anchored at the origin
    pub fn bounds(&self) -> Bounds {
        Bounds::from_size(self.width, self.height)
    }

    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Settings of the volume packing scene.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PackingConfig {
    /// Quantity that sizes the packed bodies.
    magnitude: Magnitude,

    /// Square drawing surface.
    canvas: CanvasSize,

    /// Drawn radius of the container circle.
    container_radius: f32,

    /// Central body, never packed and the container after a reset.
    root: String,
}

impl Default for PackingConfig {
    fn default() -> Self {
        Self {
            magnitude: Magnitude::Volume,
            canvas: CanvasSize::new(500.0, 500.0),
            container_radius: 200.0,
            root: "Sun".to_string(),
        }
    }
}

impl PackingConfig {
    pub fn magnitude(&self) -> Magnitude {
        self.magnitude
    }

    pub fn canvas(&self) -> CanvasSize {
        self.canvas
    }

    pub fn container_radius(&self) -> f32 {
        self.container_radius
    }

    pub fn root(&self) -> &str {
        &self.root
    }
}

/// Which bodies of the orbit graph carry a text label.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelPolicy {
    /// The root, planets and primaries that have satellites
    #[default]
    Major,
    /// Every body except the root
    All,
    None,
}

/// Margins around a canvas, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Margins {
    top: f32,
    right: f32,
    bottom: f32,
    left: f32,
}

impl Margins {
    pub fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    pub fn top(&self) -> f32 {
        self.top
    }

    pub fn right(&self) -> f32 {
        self.right
    }

    pub fn bottom(&self) -> f32 {
        self.bottom
    }

    pub fn left(&self) -> f32 {
        self.left
    }

    pub fn insets(&self) -> Insets {
        Insets::new(self.top, self.right, self.bottom, self.left)
    }
}

/// Settings of the orbit graph scene.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OrbitConfig {
    canvas: CanvasSize,
    margins: Margins,
    labels: LabelPolicy,

    /// Implicit root every primary hangs from.
    root: String,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            canvas: CanvasSize::new(1100.0, 650.0),
            margins: Margins::new(30.0, 30.0, 30.0, 80.0),
            labels: LabelPolicy::default(),
            root: "Sun".to_string(),
        }
    }
}

impl OrbitConfig {
    pub fn canvas(&self) -> CanvasSize {
        self.canvas
    }

    pub fn margins(&self) -> Margins {
        self.margins
    }

    pub fn labels(&self) -> LabelPolicy {
        self.labels
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    /// The area body centres are kept in.
    pub fn plot_bounds(&self) -> Bounds {
        self.canvas.bounds().inset(self.margins.insets())
    }
}

/// Visual styling configuration for rendered snapshots.
///
/// Fields that are not set fall back to the scene's own defaults.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct StyleConfig {
    /// Background [`Color`] for snapshots, as a color string.
    #[serde(default)]
    background_color: Option<String>,
}

impl StyleConfig {
    /// Returns the parsed background [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed
    /// into a valid [`Color`].
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        self.background_color
            .as_ref()
            .map(|color| Color::new(color))
            .transpose()
            .map_err(|err| format!("Invalid background color in config: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.layout().max_steps(), 300);
        assert_eq!(config.packing().container_radius(), 200.0);
        assert_eq!(config.orbit().labels(), LabelPolicy::Major);
        assert_eq!(config.style().background_color(), Ok(None));
    }

    #[test]
    fn test_partial_sections() {
        let config: AppConfig = toml::from_str(
            r##"
            [layout]
            max_steps = 120
            seed = 7

            [packing]
            magnitude = "mass"
            root = "Jupiter"

            [orbit]
            labels = "all"
            margins = { top = 10.0, right = 10.0, bottom = 10.0, left = 40.0 }

            [style]
            background_color = "#000000"
            "##,
        )
        .unwrap();

        assert_eq!(config.layout().max_steps(), 120);
        assert_eq!(config.layout().seed(), 7);
        assert_eq!(
            config.layout().separation_iterations(),
            LayoutConfig::default().separation_iterations()
        );
        assert_eq!(config.packing().magnitude(), Magnitude::Mass);
        assert_eq!(config.packing().root(), "Jupiter");
        assert_eq!(config.packing().canvas(), CanvasSize::new(500.0, 500.0));
        assert_eq!(config.orbit().labels(), LabelPolicy::All);
        assert_eq!(config.orbit().margins().left(), 40.0);
        assert!(config.style().background_color().unwrap().is_some());
    }

    #[test]
    fn test_invalid_background_color() {
        let config: AppConfig =
            toml::from_str("[style]\nbackground_color = \"not-a-color\"").unwrap();
        assert!(config.style().background_color().is_err());
    }

    #[test]
    fn test_plot_bounds() {
        let bounds = OrbitConfig::default().plot_bounds();
        assert_eq!(bounds.min_x(), 80.0);
        assert_eq!(bounds.max_x(), 1070.0);
        assert_eq!(bounds.min_y(), 30.0);
        assert_eq!(bounds.max_y(), 620.0);
    }

    #[test]
    fn test_settings_carry_limits() {
        let settings = LayoutConfig::new(50, 0.5, 3, 9).settings();
        assert_eq!(settings.max_steps(), 50);
        assert_eq!(settings.convergence_threshold(), 0.5);
        assert_eq!(settings.separation_iterations(), 3);
        assert_eq!(settings.seed(), 9);
    }
}
