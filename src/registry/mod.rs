//! Container registry: which runtime types are containers, and how to take
//! them apart one level at a time.
//!
//! The engine only ever sees the [`ContainerRegistry`] capability. [`Registry`]
//! is the concrete, namespaced implementation; `builtin` fills it with the
//! decomposers for [`crate::Tree`].

pub mod builtin;

use crate::error::{Error, Result};
use crate::tree::TypeKey;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Registration space owned by this core.
pub const NAMESPACE: &str = "torch";

/// Default namespace, consulted after the requested one.
pub const GLOBAL_NAMESPACE: &str = "";

/// `none` values are always leaves.
pub const NONE_IS_LEAF: bool = true;

/// Rebuilds a container from its metadata and its children, in order.
pub type ReconstructFn<T> = Arc<dyn Fn(&Value, Vec<T>) -> Result<T> + Send + Sync>;

/// One level of a container: its children plus what is needed to put it back.
pub struct Decomposition<T> {
    pub children: Vec<T>,
    /// Opaque to the engine; handed back to `reconstruct` untouched.
    pub metadata: Value,
    /// Position identifiers (indices, keys), one per child.
    pub entries: Vec<Value>,
    pub reconstruct: ReconstructFn<T>,
}

pub trait Decomposer<T>: Send + Sync {
    fn decompose(&self, node: T) -> Result<Decomposition<T>>;
}

impl<T, F> Decomposer<T> for F
where
    F: Fn(T) -> Result<Decomposition<T>> + Send + Sync,
{
    fn decompose(&self, node: T) -> Result<Decomposition<T>> {
        self(node)
    }
}

/// Lookup capability consumed by the walker, flatten and unflatten.
pub trait ContainerRegistry<T> {
    /// `None` means values of `type_key` are opaque leaves.
    fn lookup(&self, type_key: &TypeKey, namespace: &str) -> Option<&dyn Decomposer<T>>;
}

/// Always true: in this core's namespace dict keys are traversed in insertion order.
pub fn is_dict_insertion_ordered(_namespace: &str) -> bool {
    true
}

/// Namespaced table of decomposers keyed by type.
pub struct Registry<T> {
    namespaces: BTreeMap<String, BTreeMap<TypeKey, Arc<dyn Decomposer<T>>>>,
}

impl<T> Default for Registry<T> {
    fn default() -> Self {
        Self {
            namespaces: BTreeMap::new(),
        }
    }
}

impl<T: 'static> Registry<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `decomposer` for `type_key` in `namespace`.
    ///
    /// A type can be registered at most once per namespace.
    pub fn register(
        &mut self,
        namespace: &str,
        type_key: TypeKey,
        decomposer: impl Decomposer<T> + 'static,
    ) -> Result<()> {
        let types = self.namespaces.entry(namespace.to_string()).or_default();
        if types.contains_key(&type_key) {
            return Err(Error::DuplicateRegistration {
                namespace: namespace.to_string(),
                type_key,
            });
        }
        tracing::debug!(namespace, type_key = %type_key, "registered container type");
        types.insert(type_key, Arc::new(decomposer));
        Ok(())
    }

    /// Returns whether an entry was removed.
    pub fn unregister(&mut self, namespace: &str, type_key: &TypeKey) -> bool {
        let Some(types) = self.namespaces.get_mut(namespace) else {
            return false;
        };
        let removed = types.remove(type_key).is_some();
        if types.is_empty() {
            self.namespaces.remove(namespace);
        }
        removed
    }

    pub fn is_registered(&self, type_key: &TypeKey, namespace: &str) -> bool {
        self.lookup(type_key, namespace).is_some()
    }
}

impl<T> ContainerRegistry<T> for Registry<T> {
    fn lookup(&self, type_key: &TypeKey, namespace: &str) -> Option<&dyn Decomposer<T>> {
        self.find(type_key, namespace)
            .or_else(|| self.find(type_key, GLOBAL_NAMESPACE))
    }
}

impl<T> Registry<T> {
    fn find(&self, type_key: &TypeKey, namespace: &str) -> Option<&dyn Decomposer<T>> {
        let decomposer = self.namespaces.get(namespace)?.get(type_key)?;
        Some(&**decomposer)
    }
}
