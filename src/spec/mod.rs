//! Structure descriptors.
//!
//! A [`TreeSpec`] records the container nesting of a tree without its leaf
//! values. It is built bottom-up by `tree_flatten` and is never mutated
//! afterwards; `unflatten` puts a new set of leaves back into that shape.

pub mod display;
pub mod treespec;

pub use treespec::TreeSpec;
