use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Fully resolved tool payload, forwarded to the backend as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: Option<String>,
    pub parameters: Option<Value>,
}

/// Auxiliary resolution metadata. Adapters ignore this; it exists for
/// callers that want to log or assert on where tools came from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolLoadReport {
    pub requested: usize,
    pub resolved_from_catalog: usize,
    pub resolved_inline: usize,
}
