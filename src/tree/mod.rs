//! Tree data model
//!
//! Nodes live in an [`indextree::Arena`]; the tree owns them top-down and the
//! arena's parent links serve only path reconstruction and up-navigation.
//!
//! # Module Structure
//!
//! - `descriptor` - caller-facing child shapes and lazy resolvers
//! - `node` - per-node state (openness, visibility, validity, preparation)
//! - `loader` - materializes a node's immediate children

mod descriptor;
mod loader;
mod node;

use indextree::{Arena, NodeId};

pub use descriptor::{lazy, lazy_sync, Branch, Descriptor, Entry, Resolved, Resolver};
pub use loader::{Loader, LoaderPolicy};
pub use node::{Children, Node, Validity};

/// Arena-backed tree with a synthetic, never-displayed root
pub struct Tree {
    arena: Arena<Node>,
    root: NodeId,
}

impl Tree {
    /// Create a tree whose root holds `children` (static or lazy).
    pub fn new(children: impl Into<Branch>) -> Self {
        let mut arena = Arena::new();
        let root = arena.new_node(Node::root(children.into()));
        Self { arena, root }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &Node {
        self.arena[id].get()
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node {
        self.arena[id].get_mut()
    }

    /// Parent of `id`; `None` only for the root
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.arena[id].parent()
    }

    pub fn is_root(&self, id: NodeId) -> bool {
        id == self.root
    }

    /// True when `id` sits directly under the synthetic root
    pub fn is_top_level(&self, id: NodeId) -> bool {
        self.parent(id) == Some(self.root)
    }

    /// Materialized children in order
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        id.children(&self.arena)
    }

    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.arena[id].first_child()
    }

    /// Number of known children: materialized or pending descriptors.
    /// An unresolved lazy branch reports zero.
    pub fn child_count(&self, id: NodeId) -> usize {
        match &self.node(id).children {
            Children::Loaded => self.children(id).count(),
            Children::Pending(descriptors) => descriptors.len(),
            Children::None | Children::Lazy(_) => 0,
        }
    }

    pub(crate) fn append(&mut self, parent: NodeId, node: Node) -> NodeId {
        let id = self.arena.new_node(node);
        parent.append(id, &mut self.arena);
        id
    }

    /// Every node below the root, depth-first
    pub fn descendants(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.root.descendants(&self.arena).skip(1)
    }

    /// First node (depth-first) satisfying `predicate`
    pub fn find(&self, mut predicate: impl FnMut(&Node) -> bool) -> Option<NodeId> {
        self.descendants().find(|&id| predicate(self.node(id)))
    }

    /// Lookup by display name, mainly for hosts and tests
    pub fn find_by_name(&self, name: &str) -> Option<NodeId> {
        self.find(|node| node.name() == Some(name))
    }

    /// Ancestors from `id` (exclusive of the root) up to the top level
    pub fn lineage(&self, id: NodeId) -> Vec<NodeId> {
        id.ancestors(&self.arena)
            .take_while(|&ancestor| ancestor != self.root)
            .collect()
    }
}
