use crate::error::{Error, Result};
use crate::registry::{NAMESPACE, NONE_IS_LEAF, ReconstructFn};
use crate::tree::TypeKey;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Immutable shape of a tree.
///
/// A leaf spec carries nothing. An internal spec owns its node type,
/// metadata, entries, reconstruction function and child specs, plus the
/// node/leaf counts computed once in [`TreeSpec::node`].
pub struct TreeSpec<T> {
    node: Option<Arc<SpecNode<T>>>,
}

struct SpecNode<T> {
    node_type: TypeKey,
    children: Vec<TreeSpec<T>>,
    metadata: Value,
    entries: Vec<Value>,
    reconstruct: ReconstructFn<T>,
    num_nodes: usize,
    num_leaves: usize,
}

impl<T> TreeSpec<T> {
    /// The canonical leaf spec. Every leaf position uses it.
    pub const LEAF: Self = TreeSpec { node: None };

    pub fn leaf() -> Self {
        Self::LEAF
    }

    /// Internal node over `children`, which must already be complete.
    pub fn node(
        node_type: TypeKey,
        children: Vec<TreeSpec<T>>,
        metadata: Value,
        entries: Vec<Value>,
        reconstruct: ReconstructFn<T>,
    ) -> Self {
        let num_nodes = 1 + children.iter().map(TreeSpec::num_nodes).sum::<usize>();
        let num_leaves = children.iter().map(TreeSpec::num_leaves).sum();
        TreeSpec {
            node: Some(Arc::new(SpecNode {
                node_type,
                children,
                metadata,
                entries,
                reconstruct,
                num_nodes,
                num_leaves,
            })),
        }
    }

    /// `None` for a leaf.
    pub fn node_type(&self) -> Option<&TypeKey> {
        self.node.as_ref().map(|n| &n.node_type)
    }

    /// This node plus every descendant, leaves included.
    pub fn num_nodes(&self) -> usize {
        self.node.as_ref().map_or(1, |n| n.num_nodes)
    }

    pub fn num_leaves(&self) -> usize {
        self.node.as_ref().map_or(1, |n| n.num_leaves)
    }

    pub fn num_children(&self) -> usize {
        self.children().len()
    }

    /// Structural test: a container holding a single leaf is still not a leaf.
    pub fn is_leaf(&self) -> bool {
        self.num_nodes() == 1 && self.num_leaves() == 1
    }

    pub fn children(&self) -> &[TreeSpec<T>] {
        match &self.node {
            Some(n) => &n.children,
            None => &[],
        }
    }

    pub fn child(&self, index: usize) -> Option<&TreeSpec<T>> {
        self.children().get(index)
    }

    pub fn entries(&self) -> &[Value] {
        match &self.node {
            Some(n) => &n.entries,
            None => &[],
        }
    }

    pub fn entry(&self, index: usize) -> Option<&Value> {
        self.entries().get(index)
    }

    pub fn metadata(&self) -> Option<&Value> {
        self.node.as_ref().map(|n| &n.metadata)
    }

    pub fn none_is_leaf(&self) -> bool {
        NONE_IS_LEAF
    }

    pub fn namespace(&self) -> &'static str {
        NAMESPACE
    }

    /// Rebuild a tree of this shape from `leaves`, consumed in flatten order.
    pub fn unflatten(&self, leaves: impl IntoIterator<Item = T>) -> Result<T> {
        let leaves: Vec<T> = leaves.into_iter().collect();
        if leaves.len() != self.num_leaves() {
            return Err(self.length_mismatch(leaves.len()));
        }

        let node = match self.node.as_deref() {
            Some(node) if !self.is_leaf() => node,
            _ => {
                return leaves
                    .into_iter()
                    .next()
                    .ok_or_else(|| self.length_mismatch(0));
            }
        };

        // Each child takes the next run of exactly `child.num_leaves()` leaves.
        let mut rest = leaves.into_iter();
        let mut subtrees = Vec::with_capacity(node.children.len());
        for child in &node.children {
            let run: Vec<T> = rest.by_ref().take(child.num_leaves()).collect();
            subtrees.push(child.unflatten(run)?);
        }

        (node.reconstruct)(&node.metadata, subtrees)
    }

    fn length_mismatch(&self, supplied: usize) -> Error {
        Error::LengthMismatch {
            supplied,
            expected: self.num_leaves(),
            spec: self.to_string(),
        }
    }
}

impl<T> Clone for TreeSpec<T> {
    fn clone(&self) -> Self {
        TreeSpec {
            node: self.node.clone(),
        }
    }
}

impl<T> Default for TreeSpec<T> {
    fn default() -> Self {
        Self::LEAF
    }
}

/// Compares shape only: reconstruction functions are ignored.
impl<T> PartialEq for TreeSpec<T> {
    fn eq(&self, other: &Self) -> bool {
        match (&self.node, &other.node) {
            (None, None) => true,
            (Some(a), Some(b)) => {
                Arc::ptr_eq(a, b)
                    || (a.node_type == b.node_type
                        && a.metadata == b.metadata
                        && a.entries == b.entries
                        && a.children == b.children)
            }
            _ => false,
        }
    }
}

impl<T> fmt::Debug for TreeSpec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
