//! Solpack Core Types and Definitions
//!
//! This crate provides the foundational types shared by the solpack crates.
//! It includes:
//!
//! - **Identifiers**: Efficient string-interned body names ([`identifier::Id`])
//! - **Colors**: Color handling with CSS color support and ordinal palettes ([`color`])
//! - **Geometry**: Points, bounds and containing boundaries ([`geometry`] module)
//! - **Scales**: Continuous scales mapping physical quantities to pixels ([`scale`] module)
//! - **Strokes**: Solid outlines for snapshot export ([`stroke`] module)
//! - **Bodies**: The positioned, sized entity being laid out ([`body`] module)

pub mod body;
pub mod color;
pub mod geometry;
pub mod identifier;
pub mod scale;
pub mod stroke;
