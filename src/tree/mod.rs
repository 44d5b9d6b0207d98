//! Tree values: the runtime type model the engine dispatches on.
//!
//! The engine itself is generic over [`TreeValue`]; [`Tree`] is the dynamic
//! value type this crate ships for JSON-like data and user-defined objects.

pub mod json;
pub mod value;

pub use value::Tree;

use serde::Serialize;
use std::borrow::Cow;
use std::fmt;

/// Name of a runtime type, used as the registry lookup key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct TypeKey(Cow<'static, str>);

impl TypeKey {
    pub const NONE: TypeKey = TypeKey::new("NoneType");
    pub const BOOL: TypeKey = TypeKey::new("bool");
    pub const INT: TypeKey = TypeKey::new("int");
    pub const FLOAT: TypeKey = TypeKey::new("float");
    pub const STR: TypeKey = TypeKey::new("str");
    pub const TUPLE: TypeKey = TypeKey::new("tuple");
    pub const LIST: TypeKey = TypeKey::new("list");
    pub const DICT: TypeKey = TypeKey::new("dict");

    pub const fn new(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    pub fn owned(name: impl Into<String>) -> Self {
        Self(Cow::Owned(name.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What the walker needs to know about a value before asking the registry.
pub trait TreeValue {
    /// Runtime type of this value.
    fn type_key(&self) -> TypeKey;

    /// The `none` value is always a leaf.
    fn is_none(&self) -> bool;
}
