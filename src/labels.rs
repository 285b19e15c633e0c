//! Name, short label and value resolution shared by the loader, the search
//! engine and the content builder.

use std::fmt;
use std::sync::Arc;

use indextree::NodeId;
use serde_json::{Map, Value};

use crate::tree::{Node, Tree};

/// Answers collected by the host before this prompt ran
pub type Answers = Map<String, Value>;

/// Separator between path segments, for display and for matching
pub const PATH_SEPARATOR: char = '/';

/// Extra context handed to a [`Transformer`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TransformContext {
    /// True once the prompt has been answered
    pub is_final: bool,
}

/// Maps a raw value to a display name
pub type Transformer = Arc<dyn Fn(&Value, &Answers, TransformContext) -> String + Send + Sync>;

#[derive(Clone, Default)]
pub struct Labels {
    transformer: Option<Transformer>,
    answers: Answers,
}

impl fmt::Debug for Labels {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Labels")
            .field("transformer", &self.transformer.is_some())
            .field("answers", &self.answers)
            .finish()
    }
}

impl Labels {
    pub fn new(transformer: Option<Transformer>, answers: Answers) -> Self {
        Self {
            transformer,
            answers,
        }
    }

    pub fn answers(&self) -> &Answers {
        &self.answers
    }

    /// Display name: explicit name, then transformer, then the value itself.
    pub fn name_for(&self, node: &Node, is_final: bool) -> String {
        self.label(node.name(), node.value(), is_final)
    }

    /// Compact label used once the prompt is answered
    pub fn short_for(&self, node: &Node, is_final: bool) -> String {
        match node.short() {
            Some(short) => short.to_string(),
            None => self.name_for(node, is_final),
        }
    }

    /// Same resolution as [`Labels::name_for`] for data that is not in the tree yet
    pub(crate) fn label(&self, name: Option<&str>, value: &Value, is_final: bool) -> String {
        if let Some(name) = name {
            return name.to_string();
        }
        if let Some(transformer) = &self.transformer {
            return transformer(value, &self.answers, TransformContext { is_final });
        }
        display_value(value)
    }

    /// Names from the top level down to `id`, joined by [`PATH_SEPARATOR`].
    /// The root's path is empty.
    pub fn path_of(&self, tree: &Tree, id: NodeId) -> String {
        let mut segments: Vec<String> = tree
            .lineage(id)
            .into_iter()
            .map(|ancestor| self.name_for(tree.node(ancestor), false))
            .collect();
        segments.reverse();
        segments.join(&PATH_SEPARATOR.to_string())
    }
}

/// The value a node resolves to; falls back to its name when the value is absent.
pub fn value_for(node: &Node) -> Value {
    match (node.value(), node.name()) {
        (Value::Null, Some(name)) => Value::String(name.to_string()),
        (value, _) => value.clone(),
    }
}

/// Render a value as plain text (strings without quotes)
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
