//! Child descriptors and lazy resolvers.
//!
//! A descriptor is what callers hand the picker: either a bare scalar value or
//! an entry with optional `name`, `value`, `short` and `children`. Children are
//! a static sequence or a [`Resolver`] invoked the first time the branch is
//! prepared. Descriptors are owned values, so the picker never mutates the
//! caller's data.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

/// Produces the children of a branch on demand.
///
/// Returning an error is not fatal: the branch is shown without children.
#[async_trait]
pub trait Resolver: Send + Sync {
    async fn resolve(&self) -> anyhow::Result<Resolved>;
}

/// Result of a resolver invocation
#[derive(Debug, Clone)]
pub enum Resolved {
    /// Plain ordered child sequence
    Children(Vec<Descriptor>),
    /// Renames the node being expanded and supplies its children.
    ///
    /// `children: None` turns the node into a leaf.
    Node {
        name: Option<String>,
        value: Value,
        short: Option<String>,
        children: Option<Vec<Descriptor>>,
    },
}

impl From<Vec<Descriptor>> for Resolved {
    fn from(children: Vec<Descriptor>) -> Self {
        Resolved::Children(children)
    }
}

/// Children of a descriptor before they are materialized in the tree
#[derive(Clone)]
pub enum Branch {
    Static(Vec<Descriptor>),
    Lazy(Arc<dyn Resolver>),
}

impl fmt::Debug for Branch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Branch::Static(children) => f.debug_tuple("Static").field(children).finish(),
            Branch::Lazy(_) => f.write_str("Lazy(<resolver>)"),
        }
    }
}

impl From<Vec<Descriptor>> for Branch {
    fn from(children: Vec<Descriptor>) -> Self {
        Branch::Static(children)
    }
}

impl From<Arc<dyn Resolver>> for Branch {
    fn from(resolver: Arc<dyn Resolver>) -> Self {
        Branch::Lazy(resolver)
    }
}

/// An entry with explicit fields
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(from = "EntryDe")]
pub struct Entry {
    pub name: Option<String>,
    pub value: Value,
    pub short: Option<String>,
    pub children: Option<Branch>,
    pub open: bool,
}

#[derive(Deserialize)]
struct EntryDe {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    value: Value,
    #[serde(default)]
    short: Option<String>,
    #[serde(default)]
    children: Option<Vec<Descriptor>>,
    #[serde(default)]
    open: bool,
}

impl From<EntryDe> for Entry {
    fn from(de: EntryDe) -> Self {
        Self {
            name: de.name,
            value: de.value,
            short: de.short,
            children: de.children.map(Branch::Static),
            open: de.open,
        }
    }
}

/// A child as supplied by the caller or a resolver
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Descriptor {
    Entry(Entry),
    Scalar(Value),
}

impl Descriptor {
    /// A leaf identified by `value`
    pub fn leaf(value: impl Into<Value>) -> Self {
        Descriptor::Scalar(value.into())
    }

    /// A leaf with a display name distinct from its value
    pub fn named(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Descriptor::Entry(Entry {
            name: Some(name.into()),
            value: value.into(),
            ..Entry::default()
        })
    }

    /// A branch whose children are already known
    pub fn branch(name: impl Into<String>, children: Vec<Descriptor>) -> Self {
        Descriptor::named(name, Value::Null).with_children(children)
    }

    pub fn with_children(self, children: Vec<Descriptor>) -> Self {
        self.map_entry(|entry| entry.children = Some(Branch::Static(children)))
    }

    pub fn with_resolver(self, resolver: Arc<dyn Resolver>) -> Self {
        self.map_entry(|entry| entry.children = Some(Branch::Lazy(resolver)))
    }

    pub fn with_short(self, short: impl Into<String>) -> Self {
        self.map_entry(|entry| entry.short = Some(short.into()))
    }

    pub fn with_value(self, value: impl Into<Value>) -> Self {
        self.map_entry(|entry| entry.value = value.into())
    }

    /// Mark the branch as already expanded
    pub fn opened(self) -> Self {
        self.map_entry(|entry| entry.open = true)
    }

    /// Normalize into an entry; scalars become `{ value: scalar }`.
    pub fn into_entry(self) -> Entry {
        match self {
            Descriptor::Entry(entry) => entry,
            Descriptor::Scalar(value) => Entry {
                value,
                ..Entry::default()
            },
        }
    }

    fn map_entry(self, f: impl FnOnce(&mut Entry)) -> Self {
        let mut entry = self.into_entry();
        f(&mut entry);
        Descriptor::Entry(entry)
    }
}

impl From<&str> for Descriptor {
    fn from(value: &str) -> Self {
        Descriptor::Scalar(Value::String(value.to_string()))
    }
}

impl From<String> for Descriptor {
    fn from(value: String) -> Self {
        Descriptor::Scalar(Value::String(value))
    }
}

impl From<Value> for Descriptor {
    fn from(value: Value) -> Self {
        Descriptor::Scalar(value)
    }
}

struct AsyncFnResolver<F>(F);

#[async_trait]
impl<F, Fut> Resolver for AsyncFnResolver<F>
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = anyhow::Result<Resolved>> + Send,
{
    async fn resolve(&self) -> anyhow::Result<Resolved> {
        (self.0)().await
    }
}

struct SyncFnResolver<F>(F);

#[async_trait]
impl<F> Resolver for SyncFnResolver<F>
where
    F: Fn() -> anyhow::Result<Resolved> + Send + Sync,
{
    async fn resolve(&self) -> anyhow::Result<Resolved> {
        (self.0)()
    }
}

/// Wrap an async closure as a resolver
pub fn lazy<F, Fut>(f: F) -> Arc<dyn Resolver>
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = anyhow::Result<Resolved>> + Send + 'static,
{
    Arc::new(AsyncFnResolver(f))
}

/// Wrap a synchronous closure as a resolver
pub fn lazy_sync<F>(f: F) -> Arc<dyn Resolver>
where
    F: Fn() -> anyhow::Result<Resolved> + Send + Sync + 'static,
{
    Arc::new(SyncFnResolver(f))
}
