use thiserror::Error;

use crate::frameworks::AgentFramework;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("{framework} support is not available: {instruction}")]
    IntegrationMissing {
        framework: AgentFramework,
        instruction: String,
    },

    #[error("Agent not loaded. Call load_agent() first.")]
    NotLoaded,

    #[error("agent did not return a valid response: {0}")]
    InvalidResponse(String),

    #[error("tool error: {0}")]
    Tool(String),

    #[error("backend error: {0}")]
    Backend(String),
}
