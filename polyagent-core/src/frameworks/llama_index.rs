use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use tracing::debug;

use crate::config::AgentConfig;
use crate::error::{Error, Result};
use crate::frameworks::http_client::{build_client, default_headers};
use crate::frameworks::response::{AgentOutput, ContentBlock};
use crate::frameworks::{availability, integration_missing, AgentFramework, AnyAgent, RunOptions};
use crate::model::build_model;
use crate::tools::ToolLoader;

pub const DEFAULT_MODEL_CLASS: &str = "litellm";
pub const DEFAULT_AGENT_CLASS: &str = "function_agent";
pub const DEFAULT_DESCRIPTION: &str = "The main agent";

// Workflow server default when the config carries no api_base.
const DEFAULT_API_BASE: &str = "http://127.0.0.1:8000";
const REQUEST_TIMEOUT_MS: u64 = 0;

/// Adapter targeting a llama-index workflow runtime. The tool-calling loop,
/// prompt formatting, and credential checks all live on the backend; this
/// layer only maps configuration and normalizes the result.
pub struct LlamaIndexAgent {
    config: AgentConfig,
    tool_loader: Arc<dyn ToolLoader>,
    agent: Option<LoadedAgent>,
}

struct LoadedAgent {
    run_endpoint: String,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct CreatedAgent {
    agent_id: String,
}

#[derive(Debug, Default, Deserialize)]
struct RunEnvelope {
    #[serde(default)]
    response: ResponsePayload,
}

#[derive(Debug, Default, Deserialize)]
struct ResponsePayload {
    #[serde(default)]
    blocks: Vec<ContentBlock>,
}

impl LlamaIndexAgent {
    pub fn new(config: AgentConfig, tool_loader: Arc<dyn ToolLoader>) -> Self {
        Self {
            config,
            tool_loader,
            agent: None,
        }
    }

    fn base_url(&self) -> String {
        self.config
            .api_base
            .as_deref()
            .unwrap_or(DEFAULT_API_BASE)
            .trim_end_matches('/')
            .to_owned()
    }

    fn decode_output(raw: Value) -> Result<AgentOutput> {
        let envelope: RunEnvelope = serde_json::from_value(raw.clone())
            .map_err(|_| Error::InvalidResponse(raw.to_string()))?;
        Ok(AgentOutput::new(envelope.response.blocks, raw))
    }
}

#[async_trait]
impl AnyAgent for LlamaIndexAgent {
    fn framework(&self) -> AgentFramework {
        AgentFramework::LlamaIndex
    }

    async fn load(&mut self) -> Result<()> {
        if !availability().supports(AgentFramework::LlamaIndex) {
            return Err(integration_missing(AgentFramework::LlamaIndex));
        }

        let (tools, _report) = self.tool_loader.load_tools(&self.config.tools).await?;
        let agent_class = self
            .config
            .agent_type
            .clone()
            .unwrap_or_else(|| DEFAULT_AGENT_CLASS.to_owned());
        let model = build_model(DEFAULT_MODEL_CLASS, &self.config);

        let mut payload = Map::new();
        payload.insert("agent_class".to_owned(), json!(agent_class));
        payload.insert("name".to_owned(), json!(self.config.name));
        payload.insert("tools".to_owned(), json!(tools));
        payload.insert(
            "description".to_owned(),
            json!(self
                .config
                .description
                .clone()
                .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_owned())),
        );
        payload.insert("llm".to_owned(), json!(model));
        payload.insert("system_prompt".to_owned(), json!(self.config.instructions));
        payload.extend(self.config.agent_args.clone());

        let base = self.base_url();
        let headers = default_headers(self.config.api_key.as_deref(), "llama_index")?;
        let client = build_client(headers, REQUEST_TIMEOUT_MS, "llama_index")?;

        let response = client
            .post(format!("{base}/agents"))
            .json(&Value::Object(payload))
            .send()
            .await
            .map_err(|err| Error::Backend(format!("llama_index agent creation failed: {err}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_else(|_| String::new());
            return Err(Error::Backend(format!(
                "llama_index agent creation failed with status {status}: {body}"
            )));
        }

        let created: CreatedAgent = response.json().await.map_err(|err| {
            Error::Backend(format!("failed to parse llama_index creation response: {err}"))
        })?;

        debug!(agent_id = %created.agent_id, agent_class = %agent_class, "loaded llama_index agent");

        self.agent = Some(LoadedAgent {
            run_endpoint: format!("{base}/agents/{}/run", created.agent_id),
            client,
        });

        Ok(())
    }

    async fn run(&self, prompt: &str, options: &RunOptions) -> Result<String> {
        let agent = self.agent.as_ref().ok_or(Error::NotLoaded)?;

        let mut payload = Map::new();
        payload.insert("prompt".to_owned(), json!(prompt));
        payload.extend(options.clone());

        let response = agent
            .client
            .post(&agent.run_endpoint)
            .json(&Value::Object(payload))
            .send()
            .await
            .map_err(|err| Error::Backend(format!("llama_index run failed: {err}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_else(|_| String::new());
            return Err(Error::Backend(format!(
                "llama_index run failed with status {status}: {body}"
            )));
        }

        let raw: Value = response.json().await.map_err(|err| {
            Error::Backend(format!("failed to read llama_index run response: {err}"))
        })?;

        Self::decode_output(raw)?.first_text()
    }
}
