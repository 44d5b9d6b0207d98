//! Pytree engine: flatten nested containers into an ordered list of leaves
//! plus a [`TreeSpec`] describing the nesting, and rebuild them from it.
//!
//! Layering:
//! - `tree`: value model ([`TreeValue`], [`TypeKey`], the dynamic [`Tree`])
//! - `registry`: container lookup capability and the builtin decomposers
//! - `spec`: the immutable structure descriptor
//! - `ops`: walker, flatten, structure, unflatten
//! - `render`: serializable views for the CLI

pub mod error;
pub mod ops;
pub mod registry;
pub mod render;
pub mod spec;
pub mod tree;

pub use error::{Error, Result};
pub use ops::{
    LeafPredicate, SUBSTITUTIONS, Substitution, TreeIter, tree_flatten, tree_iter, tree_leaves,
    tree_structure, tree_unflatten,
};
pub use registry::{
    ContainerRegistry, Decomposer, Decomposition, NAMESPACE, ReconstructFn, Registry,
    is_dict_insertion_ordered,
};
pub use spec::TreeSpec;
pub use tree::{Tree, TreeValue, TypeKey};
