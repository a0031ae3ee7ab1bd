use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Backend-agnostic description of an agent. Immutable once handed to an
/// adapter; adapters clone what they need during `load`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    pub name: String,
    pub description: Option<String>,
    /// System prompt forwarded verbatim to the backend agent.
    pub instructions: Option<String>,
    pub model_id: String,
    pub api_key: Option<String>,
    pub api_base: Option<String>,
    /// Extra backend-specific model constructor arguments.
    pub model_args: Map<String, Value>,
    pub tools: Vec<ToolSpec>,
    /// Extra backend-specific agent constructor arguments.
    pub agent_args: Map<String, Value>,
    /// Override for the backend's default model class.
    pub model_type: Option<String>,
    /// Override for the backend's default agent-implementation class.
    pub agent_type: Option<String>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: None,
            instructions: None,
            model_id: String::new(),
            api_key: None,
            api_base: None,
            model_args: Map::new(),
            tools: Vec::new(),
            agent_args: Map::new(),
            model_type: None,
            agent_type: None,
        }
    }
}

/// Tool request as written in configuration. Resolution to a forwardable
/// definition happens in the tool loader; adapters never look inside.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ToolSpec {
    pub name: String,
    pub description: Option<String>,
    pub parameters: Option<Value>,
}

impl Default for ToolSpec {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: None,
            parameters: None,
        }
    }
}

impl ToolSpec {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}
