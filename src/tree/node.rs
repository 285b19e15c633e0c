//! Node data stored in the tree arena.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use super::descriptor::{Branch, Descriptor, Entry, Resolver};

/// Memoized outcome of the node validator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Validity {
    #[default]
    Unknown,
    Valid,
    Invalid,
}

impl Validity {
    pub fn is_valid(self) -> bool {
        self == Validity::Valid
    }
}

/// Where a node's children currently live
#[derive(Clone, Default)]
pub enum Children {
    /// Leaf
    #[default]
    None,
    /// Declared statically but not yet materialized in the arena
    Pending(Vec<Descriptor>),
    /// Unexpanded branch
    Lazy(Arc<dyn Resolver>),
    /// Materialized: the arena holds the children
    Loaded,
}

impl fmt::Debug for Children {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Children::None => f.write_str("None"),
            Children::Pending(d) => write!(f, "Pending({} descriptors)", d.len()),
            Children::Lazy(_) => f.write_str("Lazy(<resolver>)"),
            Children::Loaded => f.write_str("Loaded"),
        }
    }
}

impl From<Option<Branch>> for Children {
    fn from(branch: Option<Branch>) -> Self {
        match branch {
            None => Children::None,
            Some(Branch::Static(children)) => Children::Pending(children),
            Some(Branch::Lazy(resolver)) => Children::Lazy(resolver),
        }
    }
}

/// One tree entry
#[derive(Debug, Clone, Default)]
pub struct Node {
    pub(crate) value: Value,
    pub(crate) name: Option<String>,
    pub(crate) short: Option<String>,
    pub(crate) children: Children,
    pub(crate) open: bool,
    pub(crate) hidden: bool,
    pub(crate) validity: Validity,
    pub(crate) prepared: bool,
}

impl Node {
    /// Synthetic root holding the top-level children
    pub(crate) fn root(children: Branch) -> Self {
        Self {
            children: Children::from(Some(children)),
            open: true,
            ..Self::default()
        }
    }

    pub(crate) fn from_entry(entry: Entry) -> Self {
        Self {
            value: entry.value,
            name: entry.name,
            short: entry.short,
            children: Children::from(entry.children),
            open: entry.open,
            ..Self::default()
        }
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn short(&self) -> Option<&str> {
        self.short.as_deref()
    }

    /// True for anything that has or may have children
    pub fn is_branch(&self) -> bool {
        !matches!(self.children, Children::None)
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn is_prepared(&self) -> bool {
        self.prepared
    }

    pub fn validity(&self) -> Validity {
        self.validity
    }

    pub fn children_state(&self) -> &Children {
        &self.children
    }
}
