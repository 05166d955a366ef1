//! Interactive control of the packing sketch.
//!
//! [`PackingController`] owns the whole interaction state in an explicit
//! [`AppState`]. Each user command returns a [`Notification`] for the view:
//! either a fresh [`Simulation`] to drive, or new caption text. Selecting a
//! container rebuilds the body set and starts a new relaxation; the previous
//! simulation is simply dropped by the view.

use log::{debug, info};

use solpack_core::identifier::Id;
use solpack_data::{BodyRecord, Catalog, error::ParseError};

use crate::{
    config::PackingConfig,
    layout::{RelaxationSettings, Simulation},
    scene::{PackingScene, Scene},
};

/// Interaction state of the packing sketch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppState {
    container: Id,
    hovered: Option<Id>,
}

impl AppState {
    /// Body the others are packed into
    pub fn container(&self) -> Id {
        self.container
    }

    /// Body under the pointer, if any
    pub fn hovered(&self) -> Option<Id> {
        self.hovered
    }
}

/// What the view has to do after a command.
#[derive(Debug)]
pub enum Notification {
    /// Replace the running simulation with this one.
    Relayout(Simulation),
    /// Replace the caption text.
    HoverText(String),
}

/// Drives the packing sketch from user commands.
#[derive(Debug)]
pub struct PackingController<'a> {
    catalog: &'a Catalog,
    config: PackingConfig,
    settings: RelaxationSettings,
    state: AppState,
    scene: PackingScene,
}

impl<'a> PackingController<'a> {
    /// Creates a controller packing into the configured root.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] when the root is missing from the catalog or
    /// has no usable magnitude.
    pub fn new(
        catalog: &'a Catalog,
        config: PackingConfig,
        settings: RelaxationSettings,
    ) -> Result<Self, ParseError> {
        let scene = PackingScene::build(catalog, config.root(), &config)?;
        let state = AppState {
            container: scene.container(),
            hovered: None,
        };
        Ok(Self {
            catalog,
            config,
            settings,
            state,
            scene,
        })
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Scene of the current container
    pub fn scene(&self) -> &PackingScene {
        &self.scene
    }

    /// Simulation of the current scene, for the first draw.
    pub fn start(&self) -> Notification {
        Notification::Relayout(self.scene.simulation(self.settings))
    }

    /// Packs the other bodies into `name`.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] when `name` is not a usable container. The
    /// state and the current scene are left untouched.
    pub fn on_body_selected(&mut self, name: &str) -> Result<Notification, ParseError> {
        let scene = PackingScene::build(self.catalog, name, &self.config)?;
        info!(container:% = scene.container(); "Container selected");

        self.state = AppState {
            container: scene.container(),
            hovered: None,
        };
        self.scene = scene;
        Ok(self.start())
    }

    /// Updates the caption for the body under the pointer. Names missing
    /// from the catalog count as hovering nothing.
    pub fn on_hover_changed(&mut self, name: Option<&str>) -> Notification {
        self.state.hovered = name
            .and_then(|name| self.catalog.find(name))
            .map(BodyRecord::id);
        debug!(hovered:? = name; "Hover changed");
        Notification::HoverText(self.scene.hover_text(self.state.hovered))
    }

    /// Goes back to packing into the root.
    ///
    /// # Errors
    ///
    /// Same as [`Self::on_body_selected`] for the configured root.
    pub fn on_reset(&mut self) -> Result<Notification, ParseError> {
        let root = self.config.root().to_string();
        self.on_body_selected(&root)
    }
}
