//! Compact text rendering of a [`TreeSpec`], used in error messages.
//!
//! Examples:
//!   leaf                 => *
//!   (1, [2, 3])          => (*, [*, *])
//!   (x,)                 => (*,)
//!   {"a": 1}             => {'a': *}
//!   {"it's": 1}          => {'it\'s': *}
//!   Point(x=1, y=2)      => Point(x=*, y=*)

use crate::spec::TreeSpec;
use crate::tree::TypeKey;
use serde_json::Value;
use std::fmt;

impl<T> fmt::Display for TreeSpec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TreeSpec({}, namespace='{}')",
            Structure(self),
            self.namespace()
        )
    }
}

/// The bracketed body, without the `TreeSpec(...)` wrapper.
struct Structure<'a, T>(&'a TreeSpec<T>);

impl<T> fmt::Display for Structure<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let spec = self.0;
        let Some(node_type) = spec.node_type() else {
            return f.write_str("*");
        };

        let children = spec.children();
        if *node_type == TypeKey::TUPLE {
            f.write_str("(")?;
            write_positional(f, children)?;
            if children.len() == 1 {
                f.write_str(",")?;
            }
            f.write_str(")")
        } else if *node_type == TypeKey::LIST {
            f.write_str("[")?;
            write_positional(f, children)?;
            f.write_str("]")
        } else if *node_type == TypeKey::DICT {
            f.write_str("{")?;
            for (i, child) in children.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{}: {}", quoted_key(spec.entry(i)), Structure(child))?;
            }
            f.write_str("}")
        } else {
            write!(f, "{}(", node_type)?;
            for (i, child) in children.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                match spec.entry(i).and_then(Value::as_str) {
                    Some(name) => write!(f, "{}={}", name, Structure(child))?,
                    None => write!(f, "{}", Structure(child))?,
                }
            }
            f.write_str(")")
        }
    }
}

fn write_positional<T>(f: &mut fmt::Formatter<'_>, children: &[TreeSpec<T>]) -> fmt::Result {
    for (i, child) in children.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", Structure(child))?;
    }
    Ok(())
}

fn quoted_key(entry: Option<&Value>) -> String {
    match entry {
        Some(Value::String(s)) => format!("'{}'", s.replace('\\', "\\\\").replace('\'', "\\'")),
        Some(other) => other.to_string(),
        None => "?".to_string(),
    }
}
