//! Decomposers for the builtin [`Tree`] containers and user objects.
//!
//!   tuple / list  => children in order, entries are indices, metadata null
//!   dict          => values in insertion order, entries and metadata are the keys
//!   object        => field values in order, entries and metadata are the field names

use crate::error::{Error, Result};
use crate::registry::{Decomposer, Decomposition, GLOBAL_NAMESPACE, Registry};
use crate::tree::{Tree, TreeValue, TypeKey};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

impl Registry<Tree> {
    /// Registry with `tuple`, `list` and `dict` registered globally.
    pub fn with_builtins() -> Self {
        let builtins: [(TypeKey, Arc<dyn Decomposer<Tree>>); 3] = [
            (TypeKey::TUPLE, Arc::new(decompose_tuple)),
            (TypeKey::LIST, Arc::new(decompose_list)),
            (TypeKey::DICT, Arc::new(decompose_dict)),
        ];
        let global = (GLOBAL_NAMESPACE.to_string(), BTreeMap::from(builtins));
        Registry {
            namespaces: BTreeMap::from([global]),
        }
    }

    /// Make `Tree::Object` values named `type_name` containers in `namespace`.
    pub fn register_object(&mut self, namespace: &str, type_name: impl Into<String>) -> Result<()> {
        let type_name: String = type_name.into();
        let type_key = TypeKey::owned(type_name.clone());
        self.register(namespace, type_key, move |node: Tree| match node {
            Tree::Object {
                type_name: found,
                fields,
            } if found == type_name => {
                let rebuild_name = found.clone();
                let rebuild = move |fields| Tree::Object {
                    type_name: rebuild_name.clone(),
                    fields,
                };
                Ok(keyed(fields, TypeKey::owned(found), rebuild))
            }
            other => Err(unexpected(&other, &type_name)),
        })
    }
}

fn decompose_tuple(node: Tree) -> Result<Decomposition<Tree>> {
    match node {
        Tree::Tuple(items) => Ok(sequence(items, Tree::Tuple)),
        other => Err(unexpected(&other, "tuple")),
    }
}

fn decompose_list(node: Tree) -> Result<Decomposition<Tree>> {
    match node {
        Tree::List(items) => Ok(sequence(items, Tree::List)),
        other => Err(unexpected(&other, "list")),
    }
}

fn decompose_dict(node: Tree) -> Result<Decomposition<Tree>> {
    match node {
        Tree::Dict(entries) => Ok(keyed(entries, TypeKey::DICT, Tree::Dict)),
        other => Err(unexpected(&other, "dict")),
    }
}

fn sequence(items: Vec<Tree>, rebuild: fn(Vec<Tree>) -> Tree) -> Decomposition<Tree> {
    let entries = (0..items.len()).map(Value::from).collect();
    Decomposition {
        children: items,
        metadata: Value::Null,
        entries,
        reconstruct: Arc::new(move |_: &Value, children: Vec<Tree>| -> Result<Tree> {
            Ok(rebuild(children))
        }),
    }
}

fn keyed(
    pairs: Vec<(String, Tree)>,
    type_key: TypeKey,
    rebuild: impl Fn(Vec<(String, Tree)>) -> Tree + Send + Sync + 'static,
) -> Decomposition<Tree> {
    let (keys, children): (Vec<String>, Vec<Tree>) = pairs.into_iter().unzip();
    let entries: Vec<Value> = keys.into_iter().map(Value::String).collect();
    Decomposition {
        children,
        metadata: Value::Array(entries.clone()),
        entries,
        reconstruct: Arc::new(move |metadata: &Value, children: Vec<Tree>| -> Result<Tree> {
            let keys = metadata_keys(metadata, &type_key)?;
            if keys.len() != children.len() {
                return Err(Error::Reconstruct {
                    type_key: type_key.clone(),
                    reason: format!("{} keys for {} children", keys.len(), children.len()),
                });
            }
            Ok(rebuild(keys.into_iter().zip(children).collect()))
        }),
    }
}

fn metadata_keys(metadata: &Value, type_key: &TypeKey) -> Result<Vec<String>> {
    let bad = || Error::Reconstruct {
        type_key: type_key.clone(),
        reason: format!("metadata must be an array of keys, got {}", metadata),
    };
    metadata
        .as_array()
        .ok_or_else(bad)?
        .iter()
        .map(|k| k.as_str().map(str::to_string).ok_or_else(bad))
        .collect()
}

fn unexpected(node: &Tree, expected: &str) -> Error {
    Error::Decompose {
        type_key: node.type_key(),
        reason: format!("registered as '{}' but the value is not one", expected),
    }
}
