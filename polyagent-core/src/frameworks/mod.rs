pub mod http_client;
pub mod registry;
pub mod response;

#[cfg(feature = "llama-index")]
pub mod llama_index;
#[cfg(feature = "openai-agents")]
pub mod openai_agents;

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};

pub use registry::AdapterRegistry;
pub use response::{AgentOutput, ContentBlock};

/// Open-ended, backend-specific run options forwarded verbatim.
pub type RunOptions = Map<String, Value>;

/// Fixed tag identifying which backend runtime an adapter targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentFramework {
    LlamaIndex,
    OpenAiAgents,
}

impl AgentFramework {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LlamaIndex => "llama_index",
            Self::OpenAiAgents => "openai_agents",
        }
    }

    /// Cargo feature that compiles this framework's adapter in.
    pub fn feature(&self) -> &'static str {
        match self {
            Self::LlamaIndex => "llama-index",
            Self::OpenAiAgents => "openai-agents",
        }
    }

    pub const fn all() -> &'static [AgentFramework] {
        &[AgentFramework::LlamaIndex, AgentFramework::OpenAiAgents]
    }
}

impl fmt::Display for AgentFramework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AgentFramework {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "llama_index" => Ok(Self::LlamaIndex),
            "openai_agents" => Ok(Self::OpenAiAgents),
            other => Err(Error::Config(format!("unknown agent framework '{other}'"))),
        }
    }
}

/// Uniform interface over backend agent runtimes.
///
/// An adapter starts unloaded. `load` transitions it to loaded by
/// constructing the backend agent; calling it again replaces the loaded
/// instance, which is a documented gap rather than a guarded error.
/// `run` takes `&self`, so concurrent runs against one loaded adapter are
/// allowed by this contract; whether they are safe is the backend's call.
/// Concurrent load+run is unspecified behavior.
#[async_trait]
pub trait AnyAgent: Send + Sync {
    /// Which backend runtime this adapter targets.
    fn framework(&self) -> AgentFramework;

    async fn load(&mut self) -> Result<()>;

    /// Runs the loaded agent and returns the first textual content block.
    async fn run(&self, prompt: &str, options: &RunOptions) -> Result<String>;
}

impl fmt::Debug for dyn AnyAgent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnyAgent")
            .field("framework", &self.framework())
            .finish()
    }
}

/// Which adapters this build carries. Probed once, cached for the process.
#[derive(Debug)]
pub struct Availability {
    compiled: Vec<AgentFramework>,
}

impl Availability {
    fn probe() -> Self {
        let mut compiled = Vec::new();
        #[cfg(feature = "llama-index")]
        compiled.push(AgentFramework::LlamaIndex);
        #[cfg(feature = "openai-agents")]
        compiled.push(AgentFramework::OpenAiAgents);

        Self { compiled }
    }

    pub fn supports(&self, framework: AgentFramework) -> bool {
        self.compiled.contains(&framework)
    }

    pub fn compiled(&self) -> &[AgentFramework] {
        &self.compiled
    }
}

pub fn availability() -> &'static Availability {
    static PROBE: OnceLock<Availability> = OnceLock::new();
    PROBE.get_or_init(Availability::probe)
}

pub(crate) fn integration_missing(framework: AgentFramework) -> Error {
    Error::IntegrationMissing {
        framework,
        instruction: format!(
            "enable the `{}` feature of polyagent-core",
            framework.feature()
        ),
    }
}
