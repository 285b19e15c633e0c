//! Incremental path search.
//!
//! Matching is case-insensitive substring over a node's full path. A node
//! stays visible when its own path matches or when any descendant's path
//! does; declared-but-unmaterialized children count as descendants, an
//! unresolved lazy branch has none.

use std::mem;

use indextree::NodeId;

use crate::labels::{Labels, PATH_SEPARATOR};
use crate::tree::{Branch, Children, Descriptor, Tree};

/// Search-mode state: the live query and the one before the last edit
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchState {
    active: bool,
    query: String,
    previous: String,
}

impl SearchState {
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn previous_query(&self) -> &str {
        &self.previous
    }

    /// Switch search mode on with an empty query. Returns false when already on.
    pub fn enter(&mut self) -> bool {
        if self.active {
            return false;
        }
        self.active = true;
        self.set_query(String::new());
        true
    }

    pub fn exit(&mut self) {
        self.active = false;
        self.set_query(String::new());
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.previous = mem::replace(&mut self.query, query.into());
    }

    pub fn push(&mut self, c: char) {
        let mut query = self.query.clone();
        query.push(c);
        self.set_query(query);
    }

    pub fn pop(&mut self) {
        let mut query = self.query.clone();
        query.pop();
        self.set_query(query);
    }

    /// The last edit kept or lengthened the query
    pub fn grew(&self) -> bool {
        self.previous.chars().count() <= self.query.chars().count()
    }
}

/// Recompute the `hidden` flag of every materialized node against `query`.
///
/// The walk is post-order and visits every node, so no flag is left stale
/// from a previous query.
pub fn apply_filter(tree: &mut Tree, labels: &Labels, query: &str) {
    let needle = query.to_lowercase();
    let root = tree.root();
    let top_level: Vec<NodeId> = tree.children(root).collect();
    for id in top_level {
        filter_node(tree, labels, id, "", &needle);
    }
}

fn filter_node(tree: &mut Tree, labels: &Labels, id: NodeId, parent_path: &str, needle: &str) -> bool {
    let path = join_path(parent_path, &labels.name_for(tree.node(id), false));
    let matches = path.to_lowercase().contains(needle);

    let descendant_visible = if matches!(tree.node(id).children, Children::Loaded) {
        let children: Vec<NodeId> = tree.children(id).collect();
        let mut any = false;
        for child in children {
            any |= filter_node(tree, labels, child, &path, needle);
        }
        any
    } else if let Children::Pending(descriptors) = &tree.node(id).children {
        descriptors
            .iter()
            .any(|d| descriptor_matches(labels, d, &path, needle))
    } else {
        false
    };

    let hidden = !(matches || descendant_visible);
    tree.node_mut(id).hidden = hidden;
    !hidden
}

fn descriptor_matches(labels: &Labels, descriptor: &Descriptor, parent_path: &str, needle: &str) -> bool {
    let (name, value, children) = match descriptor {
        Descriptor::Scalar(value) => (None, value, None),
        Descriptor::Entry(entry) => (entry.name.as_deref(), &entry.value, entry.children.as_ref()),
    };
    let path = join_path(parent_path, &labels.label(name, value, false));
    if path.to_lowercase().contains(needle) {
        return true;
    }
    match children {
        Some(Branch::Static(children)) => children
            .iter()
            .any(|child| descriptor_matches(labels, child, &path, needle)),
        Some(Branch::Lazy(_)) | None => false,
    }
}

fn join_path(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{parent}{PATH_SEPARATOR}{name}")
    }
}

/// `relative` anchored under `root_directory`, when one is configured
pub fn absolute(root_directory: Option<&str>, relative: &str) -> String {
    match root_directory {
        Some(root) if !root.is_empty() => {
            format!("{}{PATH_SEPARATOR}{relative}", root.trim_end_matches(PATH_SEPARATOR))
        }
        _ => relative.to_string(),
    }
}

/// Absolute path of a node as used for auto-focus; branches end with a separator.
pub fn absolute_path_of(tree: &Tree, labels: &Labels, root_directory: Option<&str>, id: NodeId) -> String {
    let mut path = absolute(root_directory, &labels.path_of(tree, id));
    if tree.node(id).is_branch() {
        path.push(PATH_SEPARATOR);
    }
    path
}

/// Visible nodes whose absolute path starts with the absolute query, in display order.
pub fn focus_candidates(
    tree: &Tree,
    labels: &Labels,
    shown: &[NodeId],
    root_directory: Option<&str>,
    query: &str,
) -> Vec<NodeId> {
    let target = absolute(root_directory, &query.to_lowercase()).to_lowercase();
    shown
        .iter()
        .copied()
        .filter(|&id| {
            absolute_path_of(tree, labels, root_directory, id)
                .to_lowercase()
                .starts_with(&target)
        })
        .collect()
}
