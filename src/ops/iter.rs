use crate::error::Result;
use crate::ops::{LeafPredicate, is_forced_leaf};
use crate::registry::{ContainerRegistry, NAMESPACE};
use crate::tree::TreeValue;

/// Lazy pre-order leaf walk driven by an explicit stack.
///
/// Nothing past the last leaf handed out is decomposed, so a consumer can
/// stop early. A decomposer error is yielded once and ends the walk.
pub struct TreeIter<'a, T, R: ?Sized> {
    stack: Vec<T>,
    registry: &'a R,
    is_leaf: Option<LeafPredicate<'a, T>>,
}

impl<T, R> Iterator for TreeIter<'_, T, R>
where
    T: TreeValue,
    R: ContainerRegistry<T> + ?Sized,
{
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(curr) = self.stack.pop() {
            if is_forced_leaf(&curr, self.is_leaf) {
                return Some(Ok(curr));
            }

            let Some(decomposer) = self.registry.lookup(&curr.type_key(), NAMESPACE) else {
                return Some(Ok(curr));
            };

            match decomposer.decompose(curr) {
                // LIFO: push reversed so children pop left to right.
                Ok(one_level) => self.stack.extend(one_level.children.into_iter().rev()),
                Err(err) => {
                    self.stack.clear();
                    return Some(Err(err));
                }
            }
        }
        None
    }
}

/// Walk the leaves of `tree` lazily, in pre-order.
pub fn tree_iter<'a, T, R>(
    tree: T,
    registry: &'a R,
    is_leaf: Option<LeafPredicate<'a, T>>,
) -> TreeIter<'a, T, R>
where
    T: TreeValue,
    R: ContainerRegistry<T> + ?Sized,
{
    TreeIter {
        stack: vec![tree],
        registry,
        is_leaf,
    }
}

/// All leaves of `tree`, in the same order `tree_flatten` produces them.
pub fn tree_leaves<T, R>(
    tree: T,
    registry: &R,
    is_leaf: Option<LeafPredicate<'_, T>>,
) -> Result<Vec<T>>
where
    T: TreeValue,
    R: ContainerRegistry<T> + ?Sized,
{
    tree_iter(tree, registry, is_leaf).collect()
}
