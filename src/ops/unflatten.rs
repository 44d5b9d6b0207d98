use crate::error::{Error, Result};
use crate::spec::TreeSpec;
use std::any::{Any, type_name};

/// Rebuild a tree from `leaves` and a spec handed over as an arbitrary value.
///
/// Fails with [`Error::TypeMismatch`] when `treespec` is not a `TreeSpec<T>`,
/// and with [`Error::LengthMismatch`] when the leaf count is off.
/// [`TreeSpec::unflatten`] is the statically typed equivalent.
pub fn tree_unflatten<T, S>(leaves: impl IntoIterator<Item = T>, treespec: &S) -> Result<T>
where
    T: 'static,
    S: Any,
{
    let any: &dyn Any = treespec;
    let Some(spec) = any.downcast_ref::<TreeSpec<T>>() else {
        return Err(Error::TypeMismatch {
            expected: type_name::<TreeSpec<T>>(),
            found: type_name::<S>(),
            context: "tree_unflatten(leaves, spec)",
        });
    };
    let tree = spec.unflatten(leaves)?;
    tracing::debug!(num_leaves = spec.num_leaves(), "unflattened tree");
    Ok(tree)
}
