//! JSON <-> Tree conversion.
//!
//! JSON shape mapping:
//!   null    => Tree::None
//!   bool    => Tree::Bool
//!   number  => Tree::Int when it fits in i64, Tree::UInt when it fits in u64,
//!              else Tree::Float
//!   string  => Tree::Str
//!   array   => Tree::List
//!   object  => Tree::Dict (key order preserved)
//!
//! Tuples serialize as arrays and objects as maps of their fields, so the
//! mapping is lossy in that direction only.

use crate::tree::Tree;
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use serde_json::Value;

impl From<Value> for Tree {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Tree::None,
            Value::Bool(b) => Tree::Bool(b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Tree::Int(i)
                } else if let Some(u) = n.as_u64() {
                    Tree::UInt(u)
                } else {
                    Tree::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            Value::String(s) => Tree::Str(s),
            Value::Array(items) => Tree::List(items.into_iter().map(Tree::from).collect()),
            Value::Object(map) => Tree::Dict(map.into_iter().map(|(k, v)| (k, v.into())).collect()),
        }
    }
}

impl Serialize for Tree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Tree::None => serializer.serialize_unit(),
            Tree::Bool(b) => serializer.serialize_bool(*b),
            Tree::Int(i) => serializer.serialize_i64(*i),
            Tree::UInt(u) => serializer.serialize_u64(*u),
            Tree::Float(f) => serializer.serialize_f64(*f),
            Tree::Str(s) => serializer.serialize_str(s),
            Tree::Tuple(items) | Tree::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Tree::Dict(entries) | Tree::Object { fields: entries, .. } => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (k, v) in entries {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
        }
    }
}
