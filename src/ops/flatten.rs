use crate::error::Result;
use crate::ops::{LeafPredicate, is_forced_leaf};
use crate::registry::{ContainerRegistry, Decomposition, NAMESPACE};
use crate::spec::TreeSpec;
use crate::tree::TreeValue;

/// Split `tree` into its leaves and the spec that puts them back together.
///
/// Leaves come out in the same order as [`crate::ops::tree_leaves`].
pub fn tree_flatten<T, R>(
    tree: T,
    registry: &R,
    is_leaf: Option<LeafPredicate<'_, T>>,
) -> Result<(Vec<T>, TreeSpec<T>)>
where
    T: TreeValue,
    R: ContainerRegistry<T> + ?Sized,
{
    let mut leaves = Vec::new();
    let spec = flatten_into(tree, registry, is_leaf, &mut leaves)?;
    tracing::debug!(
        num_leaves = spec.num_leaves(),
        num_nodes = spec.num_nodes(),
        "flattened tree"
    );
    Ok((leaves, spec))
}

/// Shape of `tree` only; the leaves are dropped.
pub fn tree_structure<T, R>(
    tree: T,
    registry: &R,
    is_leaf: Option<LeafPredicate<'_, T>>,
) -> Result<TreeSpec<T>>
where
    T: TreeValue,
    R: ContainerRegistry<T> + ?Sized,
{
    tree_flatten(tree, registry, is_leaf).map(|(_, spec)| spec)
}

/// Post-order: child specs exist before the parent spec is built.
fn flatten_into<T, R>(
    node: T,
    registry: &R,
    is_leaf: Option<LeafPredicate<'_, T>>,
    leaves: &mut Vec<T>,
) -> Result<TreeSpec<T>>
where
    T: TreeValue,
    R: ContainerRegistry<T> + ?Sized,
{
    if is_forced_leaf(&node, is_leaf) {
        leaves.push(node);
        return Ok(TreeSpec::LEAF);
    }

    let node_type = node.type_key();
    let Some(decomposer) = registry.lookup(&node_type, NAMESPACE) else {
        leaves.push(node);
        return Ok(TreeSpec::LEAF);
    };

    let Decomposition {
        children,
        metadata,
        entries,
        reconstruct,
    } = decomposer.decompose(node)?;

    let mut subspecs = Vec::with_capacity(children.len());
    for child in children {
        subspecs.push(flatten_into(child, registry, is_leaf, leaves)?);
    }

    let spec = TreeSpec::node(node_type, subspecs, metadata, entries, reconstruct);
    Ok(spec)
}
