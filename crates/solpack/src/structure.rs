//! Relationships between bodies that are not positions.
//!
//! The [`OrbitTree`] records which body orbits which, rooted at a central
//! body. Scenes read it to derive link springs, axis targets and labels.

mod orbit_tree;

pub use orbit_tree::{OrbitEdge, OrbitTree, TreeNode};
