use serde::Serialize;

/// Identity of an edge type file: its id and optional display colour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EdgeType {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}
