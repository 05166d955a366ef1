//! solpack - relaxation layouts for solar-system sketches.
//!
//! Bodies read from a celestial-body dataset are sized from a physical
//! magnitude and positioned by an iterative relaxation: soft forces pull
//! them toward targets while hard separation and boundary constraints keep
//! them apart and inside the drawing. Settled layouts can be exported as a
//! flat SVG snapshot.
//!
//! # Pipeline
//!
//! ```text
//! Dataset text
//!     ↓ parse (solpack-data)
//! Catalog
//!     ↓ scene
//! Bodies + Relaxation
//!     ↓ relax
//! Layout
//!     ↓ export
//! SVG
//! ```

pub mod app;
pub mod config;
pub mod layout;
pub mod scene;
pub mod structure;

mod error;
mod export;

pub use solpack_core::{body, color, geometry, identifier, scale, stroke};
pub use solpack_data::Catalog;

pub use error::SolpackError;
pub use export::{Error as ExportError, Exporter, svg::Svg};

use log::{debug, info, trace};

use config::AppConfig;
use scene::{
    Layout, OrbitScene, PackingScene, Scene,
    balance::MassBalance,
    discovery::DiscoveryTimeline,
    eccentricity::EccentricityPanels,
    gravity::GravityThrow,
};

/// A parsed dataset together with its source text.
///
/// The source is kept so that later errors about a row can still point into
/// the text it came from.
#[derive(Debug, Clone)]
pub struct Dataset {
    catalog: Catalog,
    source: String,
}

impl Dataset {
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn source(&self) -> &str {
        &self.source
    }
}

/// Builder for parsing datasets, building scenes and rendering them.
///
/// # Examples
///
/// ```rust,no_run
/// use solpack::{SceneBuilder, config::AppConfig};
///
/// let source = "eName,volume\nSun,1.412e18\nEarth,1.08321e12\nMoon,2.1958e10\n";
///
/// let builder = SceneBuilder::new(AppConfig::default());
///
/// // Parse the dataset
/// let dataset = builder.parse(source)
///     .expect("Failed to parse");
///
/// // Pack every body into the Sun and relax
/// let scene = builder.packing(&dataset, "Sun")
///     .expect("Failed to build scene");
/// let layout = builder.relax(&scene)
///     .expect("Failed to relax");
///
/// // Render the settled layout to SVG
/// let svg = builder.render_svg(&layout)
///     .expect("Failed to render");
///
/// // Or use default config
/// let builder = SceneBuilder::default();
/// ```
#[derive(Debug, Default)]
pub struct SceneBuilder {
    config: AppConfig,
}

impl SceneBuilder {
    /// Create a new scene builder with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Application configuration including engine limits, scene
    ///   geometry and style settings
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse dataset text into a catalog of body records.
    ///
    /// # Errors
    ///
    /// Returns `SolpackError::Parse` for malformed CSV, a missing `eName`
    /// column or an empty input.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use solpack::SceneBuilder;
    ///
    /// let dataset = SceneBuilder::default()
    ///     .parse("eName,volume\nEarth,1.08321e12\n")
    ///     .expect("Failed to parse dataset");
    /// assert_eq!(dataset.catalog().len(), 1);
    /// ```
    pub fn parse(&self, source: &str) -> Result<Dataset, SolpackError> {
        info!("Parsing dataset");

        let catalog = solpack_data::parse(source)
            .map_err(|err| SolpackError::new_parse_error(err, source))?;

        debug!(bodies = catalog.len(); "Dataset parsed successfully");
        trace!(catalog:? = catalog; "Parsed catalog");

        Ok(Dataset {
            catalog,
            source: source.to_string(),
        })
    }

    /// Build the packing scene with `container` as the enclosing body.
    ///
    /// # Errors
    ///
    /// Returns `SolpackError::Parse` pointing at the container's row when it
    /// is missing or has no usable magnitude.
    pub fn packing(&self, dataset: &Dataset, container: &str) -> Result<PackingScene, SolpackError> {
        info!(container = container; "Building packing scene");
        PackingScene::build(&dataset.catalog, container, self.config.packing())
            .map_err(|err| SolpackError::new_parse_error(err, dataset.source.as_str()))
    }

    /// Build the orbit graph scene.
    ///
    /// # Errors
    ///
    /// Returns `SolpackError::Layout` when the distance scales cannot be
    /// built from the dataset.
    pub fn orbit_graph(&self, dataset: &Dataset) -> Result<OrbitScene, SolpackError> {
        info!("Building orbit graph scene");
        let scene = OrbitScene::build(
            &dataset.catalog,
            self.config.orbit(),
            self.config.layout().seed(),
        )?;
        Ok(scene)
    }

    /// Weigh the bodies of the dataset on a two-pan balance.
    ///
    /// # Errors
    ///
    /// Returns `SolpackError::Dataset` when no body has a usable mass.
    pub fn balance(&self, dataset: &Dataset) -> Result<MassBalance, SolpackError> {
        let balance = MassBalance::from_catalog(&dataset.catalog, self.config.packing().root());
        if balance.is_empty() {
            return Err(SolpackError::Dataset(
                "no body has a finite, positive `mass_kg`".to_string(),
            ));
        }
        Ok(balance)
    }

    /// Lay out the orbit ellipses of the most eccentric bodies.
    pub fn eccentricity(&self, dataset: &Dataset) -> EccentricityPanels {
        EccentricityPanels::build(&dataset.catalog)
    }

    /// Compute where each planet lands when thrown, by surface gravity.
    ///
    /// # Errors
    ///
    /// Returns `SolpackError::Dataset` when no planet has both a usable mass
    /// and mean radius.
    pub fn gravity_throw(&self, dataset: &Dataset) -> Result<GravityThrow, SolpackError> {
        let throw = GravityThrow::from_catalog(&dataset.catalog)?;
        if throw.targets().is_empty() {
            return Err(SolpackError::Dataset(
                "no planet has a finite, positive `mass_kg` and `meanRadius`".to_string(),
            ));
        }
        Ok(throw)
    }

    /// Place planets and their moons along the discovery timeline, scattering
    /// moons with the configured seed.
    ///
    /// # Errors
    ///
    /// Returns `SolpackError::Layout` when the planet distances cannot be
    /// scaled.
    pub fn discovery(&self, dataset: &Dataset) -> Result<DiscoveryTimeline, SolpackError> {
        let timeline = DiscoveryTimeline::build(&dataset.catalog, self.config.layout().seed())?;
        Ok(timeline)
    }

    /// Relax a scene to completion with the configured engine limits.
    ///
    /// A background color from the style configuration replaces the scene's.
    ///
    /// # Errors
    ///
    /// Returns `SolpackError::Layout` when the configured background color
    /// is invalid.
    pub fn relax(&self, scene: &impl Scene) -> Result<Layout, SolpackError> {
        let background = self
            .config
            .style()
            .background_color()
            .map_err(SolpackError::Layout)?;

        let mut layout = scene.settle(self.config.layout().settings());
        if background.is_some() {
            layout.style_mut().set_background(background);
        }

        info!(steps = layout.steps(), converged = layout.converged(); "Layout calculated");
        Ok(layout)
    }

    /// Render a settled layout to an SVG string.
    ///
    /// # Errors
    ///
    /// Returns `SolpackError::Export` when a body ended up at a non-finite
    /// position.
    pub fn render_svg(&self, layout: &Layout) -> Result<String, SolpackError> {
        if layout.bodies().iter().any(|body| !body.position().is_finite()) {
            return Err(ExportError::Render("layout has non-finite positions".to_string()).into());
        }

        let svg_string = Svg::render_layout(layout).to_string();
        info!("SVG rendered successfully");
        Ok(svg_string)
    }
}
