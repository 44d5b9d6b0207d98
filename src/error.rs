use crate::tree::TypeKey;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Supplied leaf count differs from the count the spec was built with.
    #[error(
        "treespec.unflatten(leaves): `leaves` has length {supplied} but the spec refers to a pytree that holds {expected} items ({spec})"
    )]
    LengthMismatch {
        supplied: usize,
        expected: usize,
        spec: String,
    },

    /// `found` names the type of the value handed over instead of a spec.
    #[error(
        "{context}: expected `spec` to be an instance of {expected} but got item of type {found}"
    )]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
        context: &'static str,
    },

    #[error("type '{type_key}' is already registered in namespace '{namespace}'")]
    DuplicateRegistration { namespace: String, type_key: TypeKey },

    /// Raised by a decomposer that was handed a value it cannot take apart.
    #[error("cannot decompose value of type '{type_key}': {reason}")]
    Decompose { type_key: TypeKey, reason: String },

    #[error("cannot reconstruct value of type '{type_key}': {reason}")]
    Reconstruct { type_key: TypeKey, reason: String },
}
