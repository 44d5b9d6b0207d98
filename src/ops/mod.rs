//! Public tree operations.
//!
//! - `tree_iter` / `tree_leaves`: lazy, stack-driven leaf walk (no spec built)
//! - `tree_flatten` / `tree_structure`: leaves plus the [`crate::TreeSpec`]
//! - `tree_unflatten`: rebuild a tree from leaves and a spec
//!
//! All of them look containers up in [`crate::registry::NAMESPACE`] and treat
//! `none` as a leaf. Leaf order is pre-order, children left to right, and is
//! identical between the walker and flatten.

pub mod flatten;
pub mod iter;
pub mod unflatten;

pub use flatten::{tree_flatten, tree_structure};
pub use iter::{TreeIter, tree_iter, tree_leaves};
pub use unflatten::tree_unflatten;

use serde::Serialize;

/// Optional predicate: values it accepts are leaves even if their type is registered.
pub type LeafPredicate<'a, T> = &'a dyn Fn(&T) -> bool;

/// An operation this crate provides as the canonical implementation for a host tracer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Substitution {
    pub operation: &'static str,
    /// Safe to evaluate eagerly when every input is statically known.
    pub can_constant_fold_through: bool,
}

pub const SUBSTITUTIONS: &[Substitution] = &[
    Substitution {
        operation: "is_dict_insertion_ordered",
        can_constant_fold_through: true,
    },
    Substitution {
        operation: "tree_iter",
        can_constant_fold_through: false,
    },
    Substitution {
        operation: "tree_leaves",
        can_constant_fold_through: true,
    },
    Substitution {
        operation: "tree_flatten",
        can_constant_fold_through: false,
    },
    Substitution {
        operation: "tree_structure",
        can_constant_fold_through: false,
    },
    Substitution {
        operation: "tree_unflatten",
        can_constant_fold_through: false,
    },
];

/// Looks up an operation by name in [`SUBSTITUTIONS`].
pub fn substitution(operation: &str) -> Option<&'static Substitution> {
    SUBSTITUTIONS.iter().find(|s| s.operation == operation)
}

fn is_forced_leaf<T>(node: &T, is_leaf: Option<LeafPredicate<'_, T>>) -> bool
where
    T: crate::tree::TreeValue,
{
    node.is_none() || is_leaf.is_some_and(|p| p(node))
}
