//! The root / primary / secondary hierarchy of a dataset.
//!
//! Parent rule: a `Primary` orbits the root, anything else orbits the body
//! named in its `orbits` column. The root itself is implicit and never read
//! from the dataset. Edges whose parent is not part of the tree are dropped.

use std::collections::HashMap;

use indexmap::IndexMap;
use log::{debug, warn};

use solpack_core::{body::OrbitType, identifier::Id};
use solpack_data::Catalog;

/// A body in the orbit tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeNode {
    id: Id,
    orbit_type: OrbitType,
    parent: Option<Id>,
}

impl TreeNode {
    pub fn id(&self) -> Id {
        self.id
    }

    pub fn orbit_type(&self) -> OrbitType {
        self.orbit_type
    }

    /// Depth in the tree: 0 for the root, 1 for primaries, 2 otherwise.
    pub fn depth(&self) -> usize {
        self.orbit_type.depth()
    }

    /// Parent, when the parent is part of the tree
    pub fn parent(&self) -> Option<Id> {
        self.parent
    }
}

/// A `child -> parent` edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrbitEdge {
    child: Id,
    parent: Id,
}

impl OrbitEdge {
    pub fn child(&self) -> Id {
        self.child
    }

    pub fn parent(&self) -> Id {
        self.parent
    }
}

/// Orbit hierarchy in dataset order, root first.
#[derive(Debug, Clone)]
pub struct OrbitTree {
    root: Id,
    nodes: IndexMap<Id, TreeNode>,
    edges: Vec<OrbitEdge>,
    children: HashMap<Id, Vec<usize>>,
}

impl OrbitTree {
    /// Builds the tree of every catalog body under `root`.
    ///
    /// A dataset row named like the root is skipped.
    pub fn from_catalog(catalog: &Catalog, root: Id) -> Self {
        let mut nodes = IndexMap::with_capacity(catalog.len() + 1);
        nodes.insert(
            root,
            TreeNode {
                id: root,
                orbit_type: OrbitType::Root,
                parent: None,
            },
        );

        let mut declared = Vec::with_capacity(catalog.len());
        for record in catalog.records() {
            if record.id() == root {
                debug!(root:% = root; "Skipping dataset row for the implicit root");
                continue;
            }
            let (orbit_type, parent) = match record.orbit_type() {
                Some(OrbitType::Primary) => (OrbitType::Primary, Some(root)),
                _ => (OrbitType::Secondary, record.orbits().map(Id::new)),
            };
            nodes.insert(
                record.id(),
                TreeNode {
                    id: record.id(),
                    orbit_type,
                    parent: None,
                },
            );
            declared.push((record.id(), parent));
        }

        let mut tree = Self {
            root,
            nodes,
            edges: Vec::new(),
            children: HashMap::new(),
        };

        for (child, parent) in declared {
            match parent {
                Some(parent) if tree.nodes.contains_key(&parent) && parent != child => {
                    tree.add_edge(child, parent);
                }
                Some(parent) => {
                    warn!(body:% = child, parent:% = parent; "Parent not found, dropping orbit link");
                }
                None => {
                    warn!(body:% = child; "Body has no parent, dropping orbit link");
                }
            }
        }

        debug!(nodes = tree.nodes.len(), edges = tree.edges.len(); "Orbit tree built");
        tree
    }

    fn add_edge(&mut self, child: Id, parent: Id) {
        if let Some(node) = self.nodes.get_mut(&child) {
            node.parent = Some(parent);
        }
        self.edges.push(OrbitEdge { child, parent });
        self.children
            .entry(parent)
            .or_default()
            .push(self.edges.len() - 1);
    }

    pub fn root(&self) -> Id {
        self.root
    }

    pub fn node(&self, id: Id) -> Option<&TreeNode> {
        self.nodes.get(&id)
    }

    /// Nodes in dataset order, root first
    pub fn nodes(&self) -> impl Iterator<Item = &TreeNode> {
        self.nodes.values()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Edges in dataset order
    pub fn edges(&self) -> &[OrbitEdge] {
        &self.edges
    }

    pub fn parent(&self, id: Id) -> Option<Id> {
        self.node(id).and_then(TreeNode::parent)
    }

    pub fn depth(&self, id: Id) -> Option<usize> {
        self.node(id).map(TreeNode::depth)
    }

    /// Direct children of `id`, in dataset order.
    pub fn children(&self, id: Id) -> impl Iterator<Item = Id> + '_ {
        self.children
            .get(&id)
            .into_iter()
            .flatten()
            .map(|&idx| self.edges[idx].child)
    }

    pub fn child_count(&self, id: Id) -> usize {
        self.children.get(&id).map_or(0, Vec::len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SYSTEM: &str = "\
eName,isPlanet,orbit_type,orbits
Sun,FALSE,,
Earth,TRUE,Primary,NA
Moon,FALSE,Secondary,Earth
Jupiter,TRUE,Primary,NA
Io,FALSE,Secondary,Jupiter
Europa,FALSE,Secondary,Jupiter
Charon,FALSE,Secondary,Pluto
";

    fn tree() -> OrbitTree {
        let catalog = solpack_data::parse(SYSTEM).unwrap();
        OrbitTree::from_catalog(&catalog, Id::new("Sun"))
    }

    #[test]
    fn test_root_is_implicit_and_first() {
        let tree = tree();
        let first = tree.nodes().next().unwrap();
        assert_eq!(first.id(), Id::new("Sun"));
        assert_eq!(first.depth(), 0);
        // Sun row is skipped, so six bodies plus the root
        assert_eq!(tree.len(), 7);
    }

    #[test]
    fn test_parent_rule() {
        let tree = tree();
        assert_eq!(tree.parent(Id::new("Earth")), Some(Id::new("Sun")));
        assert_eq!(tree.parent(Id::new("Moon")), Some(Id::new("Earth")));
        assert_eq!(tree.depth(Id::new("Io")), Some(2));
        assert_eq!(tree.depth(Id::new("Jupiter")), Some(1));
    }

    #[test]
    fn test_unknown_parent_is_dropped() {
        let tree = tree();
        let charon = tree.node(Id::new("Charon")).unwrap();
        assert_eq!(charon.parent(), None);
        assert_eq!(charon.depth(), 2);
        assert!(tree.edges().iter().all(|e| e.child() != Id::new("Charon")));
    }

    #[test]
    fn test_children_and_counts() {
        let tree = tree();
        let moons: Vec<Id> = tree.children(Id::new("Jupiter")).collect();
        assert_eq!(moons, [Id::new("Io"), Id::new("Europa")]);
        assert_eq!(tree.child_count(Id::new("Sun")), 2);
        assert_eq!(tree.child_count(Id::new("Io")), 0);
        assert_eq!(tree.edges().len(), 5);
    }
}
