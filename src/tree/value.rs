use crate::tree::{TreeValue, TypeKey};

/// A dynamically typed tree value.
///
/// `Tuple`, `List` and `Dict` are decomposed by the builtin registry entries.
/// An `Object` is a container only when its type name has been registered;
/// otherwise it is an opaque leaf like the scalar variants.
#[derive(Debug, Clone, PartialEq)]
pub enum Tree {
    None,
    Bool(bool),
    Int(i64),
    /// Integers above `i64::MAX`; still of type `int`.
    UInt(u64),
    Float(f64),
    Str(String),
    Tuple(Vec<Tree>),
    List(Vec<Tree>),
    /// Keys kept in insertion order.
    Dict(Vec<(String, Tree)>),
    Object {
        type_name: String,
        fields: Vec<(String, Tree)>,
    },
}

impl Tree {
    pub fn tuple(items: impl IntoIterator<Item = Tree>) -> Self {
        Tree::Tuple(items.into_iter().collect())
    }

    pub fn list(items: impl IntoIterator<Item = Tree>) -> Self {
        Tree::List(items.into_iter().collect())
    }

    pub fn dict<K: Into<String>>(entries: impl IntoIterator<Item = (K, Tree)>) -> Self {
        Tree::Dict(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    pub fn object<K: Into<String>>(
        type_name: impl Into<String>,
        fields: impl IntoIterator<Item = (K, Tree)>,
    ) -> Self {
        Tree::Object {
            type_name: type_name.into(),
            fields: fields.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

impl TreeValue for Tree {
    fn type_key(&self) -> TypeKey {
        match self {
            Tree::None => TypeKey::NONE,
            Tree::Bool(_) => TypeKey::BOOL,
            Tree::Int(_) | Tree::UInt(_) => TypeKey::INT,
            Tree::Float(_) => TypeKey::FLOAT,
            Tree::Str(_) => TypeKey::STR,
            Tree::Tuple(_) => TypeKey::TUPLE,
            Tree::List(_) => TypeKey::LIST,
            Tree::Dict(_) => TypeKey::DICT,
            Tree::Object { type_name, .. } => TypeKey::owned(type_name.clone()),
        }
    }

    fn is_none(&self) -> bool {
        matches!(self, Tree::None)
    }
}

impl From<bool> for Tree {
    fn from(v: bool) -> Self {
        Tree::Bool(v)
    }
}

impl From<i64> for Tree {
    fn from(v: i64) -> Self {
        Tree::Int(v)
    }
}

impl From<u64> for Tree {
    fn from(v: u64) -> Self {
        match i64::try_from(v) {
            Ok(i) => Tree::Int(i),
            Err(_) => Tree::UInt(v),
        }
    }
}

impl From<f64> for Tree {
    fn from(v: f64) -> Self {
        Tree::Float(v)
    }
}

impl From<&str> for Tree {
    fn from(v: &str) -> Self {
        Tree::Str(v.to_string())
    }
}

impl From<String> for Tree {
    fn from(v: String) -> Self {
        Tree::Str(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn object_type_key_is_its_type_name() {
        let p = Tree::object("Point", [("x", Tree::Int(1)), ("y", Tree::Int(2))]);
        assert_eq!(p.type_key(), TypeKey::owned("Point"));
        assert!(!p.is_none());
        assert!(Tree::None.is_none());
    }

    #[test]
    fn unsigned_ints_share_the_int_type() {
        assert_eq!(Tree::UInt(u64::MAX).type_key(), TypeKey::INT);
        assert_eq!(Tree::Int(-1).type_key(), TypeKey::INT);
    }

    #[test]
    fn dict_keeps_insertion_order() {
        let d = Tree::dict([("b", Tree::Int(1)), ("a", Tree::Int(2))]);
        let Tree::Dict(entries) = d else {
            panic!("expected dict");
        };
        let keys: Vec<&str> = entries.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["b", "a"]);
    }
}
