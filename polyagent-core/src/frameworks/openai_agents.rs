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

pub const DEFAULT_MODEL_CLASS: &str = "responses";
pub const DEFAULT_AGENT_CLASS: &str = "agent";
pub const DEFAULT_DESCRIPTION: &str = "The main agent";

const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";
const REQUEST_TIMEOUT_MS: u64 = 0;

/// Adapter targeting an openai-agents runtime. Its wire shape differs from
/// the llama-index one; both normalize into the same `ContentBlock`
/// sequence before text extraction.
pub struct OpenAiAgentsAgent {
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
    id: String,
}

#[derive(Debug, Default, Deserialize)]
struct RunEnvelope {
    #[serde(default)]
    output: Vec<OutputItem>,
}

#[derive(Debug, Default, Deserialize)]
struct OutputItem {
    #[serde(default)]
    content: Vec<OutputContent>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum OutputContent {
    OutputText { text: String },
    #[serde(other)]
    Other,
}

impl From<OutputContent> for ContentBlock {
    fn from(content: OutputContent) -> Self {
        match content {
            OutputContent::OutputText { text } => ContentBlock::Text { text },
            OutputContent::Other => ContentBlock::Other,
        }
    }
}

impl OpenAiAgentsAgent {
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

        let blocks = envelope
            .output
            .into_iter()
            .flat_map(|item| item.content)
            .map(ContentBlock::from)
            .collect();

        Ok(AgentOutput::new(blocks, raw))
    }
}

#[async_trait]
impl AnyAgent for OpenAiAgentsAgent {
    fn framework(&self) -> AgentFramework {
        AgentFramework::OpenAiAgents
    }

    async fn load(&mut self) -> Result<()> {
        if !availability().supports(AgentFramework::OpenAiAgents) {
            return Err(integration_missing(AgentFramework::OpenAiAgents));
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
        payload.insert("model".to_owned(), json!(model));
        payload.insert("instructions".to_owned(), json!(self.config.instructions));
        payload.extend(self.config.agent_args.clone());

        let base = self.base_url();
        let headers = default_headers(self.config.api_key.as_deref(), "openai_agents")?;
        let client = build_client(headers, REQUEST_TIMEOUT_MS, "openai_agents")?;

        let response = client
            .post(format!("{base}/agents"))
            .json(&Value::Object(payload))
            .send()
            .await
            .map_err(|err| {
                Error::Backend(format!("openai_agents agent creation failed: {err}"))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_else(|_| String::new());
            return Err(Error::Backend(format!(
                "openai_agents agent creation failed with status {status}: {body}"
            )));
        }

        let created: CreatedAgent = response.json().await.map_err(|err| {
            Error::Backend(format!(
                "failed to parse openai_agents creation response: {err}"
            ))
        })?;

        debug!(agent_id = %created.id, agent_class = %agent_class, "loaded openai_agents agent");

        self.agent = Some(LoadedAgent {
            run_endpoint: format!("{base}/agents/{}/runs", created.id),
            client,
        });

        Ok(())
    }

    async fn run(&self, prompt: &str, options: &RunOptions) -> Result<String> {
        let agent = self.agent.as_ref().ok_or(Error::NotLoaded)?;

        let mut payload = Map::new();
        payload.insert("input".to_owned(), json!(prompt));
        payload.extend(options.clone());

        let response = agent
            .client
            .post(&agent.run_endpoint)
            .json(&Value::Object(payload))
            .send()
            .await
            .map_err(|err| Error::Backend(format!("openai_agents run failed: {err}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_else(|_| String::new());
            return Err(Error::Backend(format!(
                "openai_agents run failed with status {status}: {body}"
            )));
        }

        let raw: Value = response.json().await.map_err(|err| {
            Error::Backend(format!("failed to read openai_agents run response: {err}"))
        })?;

        Self::decode_output(raw)?.first_text()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::CatalogToolLoader;

    fn unloaded_agent() -> OpenAiAgentsAgent {
        OpenAiAgentsAgent::new(
            AgentConfig {
                name: "main".to_owned(),
                model_id: "gpt-4o-mini".to_owned(),
                ..AgentConfig::default()
            },
            Arc::new(CatalogToolLoader::new()),
        )
    }

    #[tokio::test]
    async fn run_before_load_fails_with_not_loaded() {
        let agent = unloaded_agent();

        let error = agent
            .run("hello", &RunOptions::new())
            .await
            .expect_err("run should fail before load");
        assert!(matches!(error, Error::NotLoaded));
    }

    #[test]
    fn normalizes_output_text_into_text_blocks() {
        let raw = json!({
            "output": [
                {
                    "type": "message",
                    "content": [
                        {"type": "output_text", "text": "hello"},
                        {"type": "refusal", "refusal": "nope"}
                    ]
                }
            ]
        });

        let output = OpenAiAgentsAgent::decode_output(raw).expect("decode should succeed");
        assert_eq!(
            output.blocks()[0],
            ContentBlock::Text {
                text: "hello".to_owned()
            }
        );
        assert_eq!(output.blocks()[1], ContentBlock::Other);
        assert_eq!(output.first_text().expect("text expected"), "hello");
    }

    #[test]
    fn empty_output_fails_with_invalid_response() {
        let raw = json!({"output": []});
        let error = OpenAiAgentsAgent::decode_output(raw)
            .expect("decode should succeed")
            .first_text()
            .expect_err("should fail");
        assert!(matches!(error, Error::InvalidResponse(_)));
    }

    #[test]
    fn non_text_leading_content_fails_with_invalid_response() {
        let raw = json!({
            "output": [
                {
                    "type": "message",
                    "content": [{"type": "image", "url": "http://example.com/cat.png"}]
                }
            ]
        });

        let error = OpenAiAgentsAgent::decode_output(raw)
            .expect("decode should succeed")
            .first_text()
            .expect_err("should fail");
        assert!(matches!(error, Error::InvalidResponse(_)));
    }
}
