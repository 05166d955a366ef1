//! CLI logic for the solpack layout tool.
//!
//! This module reads a body dataset, builds the requested scene, relaxes it
//! and writes the settled layout as an SVG snapshot.

pub mod error_adapter;

mod args;
mod config;

pub use args::{Args, SceneKind};

use std::fs;

use log::info;

use solpack::{Exporter, SceneBuilder, SolpackError, Svg};

/// Run the solpack CLI application
///
/// This function processes the input dataset through the solpack pipeline
/// and writes the resulting SVG to the output file.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `SolpackError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Dataset errors, including an unusable container body
/// - Layout errors
/// - Export errors
pub fn run(args: &Args) -> Result<(), SolpackError> {
    info!(
        input_path = args.input,
        output_path = args.output,
        scene:? = args.scene;
        "Processing dataset"
    );

    let mut app_config = config::load_config(args.config.as_ref())?;
    if let Some(seed) = args.seed {
        app_config = app_config.with_seed(seed);
    }

    let source = fs::read_to_string(&args.input)?;

    let builder = SceneBuilder::new(app_config);
    let dataset = builder.parse(&source)?;
    let layout = match args.scene {
        SceneKind::Packing => {
            let container = args
                .container
                .clone()
                .unwrap_or_else(|| builder.config().packing().root().to_string());
            let scene = builder.packing(&dataset, &container)?;
            builder.relax(&scene)?
        }
        SceneKind::Orbit => {
            let scene = builder.orbit_graph(&dataset)?;
            builder.relax(&scene)?
        }
    };

    let mut exporter = Svg::new(&args.output);
    exporter.export_layout(&layout)?;

    info!(output_file = args.output; "SVG exported successfully");

    Ok(())
}
