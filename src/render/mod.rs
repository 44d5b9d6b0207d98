//! Serializable report views of flatten results.

pub mod report;

pub use report::{FlattenReport, SpecView, render_json};
