use crate::spec::TreeSpec;
use serde::Serialize;
use serde_json::Value;

/// JSON-friendly mirror of a [`TreeSpec`].
#[derive(Debug, Clone, Serialize)]
pub struct SpecView {
    /// None for a leaf.
    pub node_type: Option<String>,
    pub num_nodes: usize,
    pub num_leaves: usize,
    pub num_children: usize,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub entries: Vec<Value>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<SpecView>,
}

impl SpecView {
    pub fn from_spec<T>(spec: &TreeSpec<T>) -> Self {
        SpecView {
            node_type: spec.node_type().map(|t| t.to_string()),
            num_nodes: spec.num_nodes(),
            num_leaves: spec.num_leaves(),
            num_children: spec.num_children(),
            metadata: spec.metadata().filter(|m| !m.is_null()).cloned(),
            entries: spec.entries().to_vec(),
            children: spec.children().iter().map(SpecView::from_spec).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FlattenReport<L> {
    pub leaves: Vec<L>,
    /// Compact form, e.g. `TreeSpec((*, [*, *]), namespace='torch')`.
    pub rendered: String,
    pub none_is_leaf: bool,
    pub namespace: String,
    pub spec: SpecView,
}

impl<L> FlattenReport<L> {
    pub fn new<T>(leaves: Vec<L>, spec: &TreeSpec<T>) -> Self {
        FlattenReport {
            leaves,
            rendered: spec.to_string(),
            none_is_leaf: spec.none_is_leaf(),
            namespace: spec.namespace().to_string(),
            spec: SpecView::from_spec(spec),
        }
    }
}

/// Pretty-printed JSON for any report value.
pub fn render_json<S: Serialize>(report: &S) -> anyhow::Result<String> {
    let mut json = serde_json::to_string_pretty(report)?;
    json.push('\n');
    Ok(json)
}
