//! Command-line argument definitions for the solpack CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, configuration file
//! selection, the scene to draw and logging verbosity.

use clap::{Parser, ValueEnum};

/// Which sketch to relax and export
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SceneKind {
    /// Bodies packed by volume inside a container body
    #[default]
    Packing,
    /// The orbit hierarchy spread out by semi-major axis
    Orbit,
}

/// Command-line arguments for the solpack layout tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input body dataset (CSV)
    #[arg(help = "Path to the input file")]
    pub input: String,

    /// Path to the output SVG file
    #[arg(short, long, default_value = "out.svg")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Scene to draw
    #[arg(long, value_enum, default_value_t = SceneKind::Packing)]
    pub scene: SceneKind,

    /// Container body of the packing scene; defaults to the configured root
    #[arg(long)]
    pub container: Option<String>,

    /// Seed of the relaxation's random choices, overriding the configuration
    #[arg(long)]
    pub seed: Option<u64>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
