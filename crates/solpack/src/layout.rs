//! Iterative relaxation layout of circular bodies.

mod engine;
pub mod forces;
pub mod presets;

pub use engine::{
    Node, Relaxation, RelaxationSettings, RunOutcome, Simulation, SimulationState, StepReport,
};
pub use forces::{Anchor, Axis, Force, Link, LinkSpec, ManyBody, Separation};
pub use presets::{OrbitGraph, OrbitTarget, Preset, SunPacking};
