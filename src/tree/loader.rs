//! Materializes a node's immediate children.
//!
//! Preparation runs at most once per node (`prepared` is set before the
//! resolver is awaited), computes each child's validity, applies the pruning
//! policies and cascades into children that are already marked open.

use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt};
use indextree::NodeId;

use crate::labels::{value_for, Answers};
use crate::validate::NodeValidator;

use super::descriptor::{Descriptor, Resolved};
use super::node::{Children, Node, Validity};
use super::Tree;

/// Pruning applied while children are materialized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoaderPolicy {
    /// Drop invalid leaves entirely
    pub only_show_valid: bool,
    /// Valid nodes lose their children and display as leaves
    pub hide_children_of_valid: bool,
}

#[derive(Clone, Default)]
pub struct Loader {
    validator: Option<Arc<dyn NodeValidator>>,
    policy: LoaderPolicy,
    answers: Answers,
}

impl Loader {
    pub fn new(
        validator: Option<Arc<dyn NodeValidator>>,
        policy: LoaderPolicy,
        answers: Answers,
    ) -> Self {
        Self {
            validator,
            policy,
            answers,
        }
    }

    pub fn policy(&self) -> LoaderPolicy {
        self.policy
    }

    /// Ensure the immediate children of `id` are ready for display.
    /// A no-op on nodes that were already prepared.
    pub fn prepare<'a>(&'a self, tree: &'a mut Tree, id: NodeId) -> BoxFuture<'a, ()> {
        async move {
            if tree.node(id).prepared {
                return;
            }
            tree.node_mut(id).prepared = true;

            let Some(descriptors) = self.take_descriptors(tree, id).await else {
                return;
            };
            tree.node_mut(id).children = Children::Loaded;

            let mut kept = 0usize;
            for descriptor in descriptors {
                let mut child = Node::from_entry(descriptor.into_entry());
                child.validity = self.validity_of(&child).await;

                if self.policy.hide_children_of_valid && child.validity.is_valid() {
                    child.children = Children::None;
                }
                if self.policy.only_show_valid && !child.validity.is_valid() && !child.is_branch() {
                    continue;
                }

                let open = child.open;
                let child_id = tree.append(id, child);
                kept += 1;
                if open {
                    self.prepare(tree, child_id).await;
                }
            }
            tracing::trace!(children = kept, "prepared node");
        }
        .boxed()
    }

    /// Pull the raw child descriptors out of the node, invoking its resolver if
    /// needed. `None` leaves the node without children.
    async fn take_descriptors(&self, tree: &mut Tree, id: NodeId) -> Option<Vec<Descriptor>> {
        match std::mem::take(&mut tree.node_mut(id).children) {
            Children::None => None,
            Children::Loaded => {
                tree.node_mut(id).children = Children::Loaded;
                None
            }
            Children::Pending(descriptors) => Some(descriptors),
            Children::Lazy(resolver) => match resolver.resolve().await {
                Ok(Resolved::Children(descriptors)) => Some(descriptors),
                // The synthetic root has no identity of its own.
                Ok(Resolved::Node { children, .. }) if tree.is_root(id) => children,
                Ok(Resolved::Node {
                    name,
                    value,
                    short,
                    children,
                }) => {
                    let node = tree.node_mut(id);
                    node.name = name;
                    node.value = value;
                    node.short = short;
                    node.validity = Validity::Unknown;

                    let validity = self.validity_of(tree.node(id)).await;
                    tree.node_mut(id).validity = validity;
                    children
                }
                Err(err) => {
                    tracing::debug!(error = %err, "resolver failed; branch shown without children");
                    None
                }
            },
        }
    }

    async fn validity_of(&self, node: &Node) -> Validity {
        if node.validity != Validity::Unknown {
            return node.validity;
        }
        let Some(validator) = &self.validator else {
            return Validity::Valid;
        };

        match validator.validate(&value_for(node), &self.answers).await {
            Ok(true) => Validity::Valid,
            Ok(false) => Validity::Invalid,
            Err(err) => {
                tracing::warn!(error = %err, "node validator failed; marking node invalid");
                Validity::Invalid
            }
        }
    }
}
