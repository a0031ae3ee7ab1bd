use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::config::AgentConfig;
use crate::error::{Error, Result};
use crate::frameworks::{integration_missing, AgentFramework, AnyAgent};
use crate::tools::ToolLoader;

pub type AdapterBuilder =
    Box<dyn Fn(AgentConfig, Arc<dyn ToolLoader>) -> Box<dyn AnyAgent> + Send + Sync>;

/// Maps framework tags to adapter constructors. Asking for an unregistered
/// framework fails with `IntegrationMissing`; the caller decides whether to
/// fall back to another framework.
#[derive(Default)]
pub struct AdapterRegistry {
    builders: HashMap<AgentFramework, AdapterBuilder>,
}

impl AdapterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every adapter this build was compiled with.
    pub fn builtin() -> Self {
        let mut registry = Self::new();

        #[cfg(feature = "llama-index")]
        registry.register(
            AgentFramework::LlamaIndex,
            Box::new(|config, tool_loader| {
                Box::new(crate::frameworks::llama_index::LlamaIndexAgent::new(
                    config,
                    tool_loader,
                ))
            }),
        );

        #[cfg(feature = "openai-agents")]
        registry.register(
            AgentFramework::OpenAiAgents,
            Box::new(|config, tool_loader| {
                Box::new(crate::frameworks::openai_agents::OpenAiAgentsAgent::new(
                    config,
                    tool_loader,
                ))
            }),
        );

        registry
    }

    pub fn register(&mut self, framework: AgentFramework, builder: AdapterBuilder) {
        self.builders.insert(framework, builder);
    }

    pub fn is_registered(&self, framework: AgentFramework) -> bool {
        self.builders.contains_key(&framework)
    }

    pub fn frameworks(&self) -> Vec<AgentFramework> {
        let mut frameworks: Vec<AgentFramework> = self.builders.keys().copied().collect();
        frameworks.sort_by_key(|framework| framework.as_str());
        frameworks
    }

    pub fn create(
        &self,
        framework: AgentFramework,
        config: AgentConfig,
        tool_loader: Arc<dyn ToolLoader>,
    ) -> Result<Box<dyn AnyAgent>> {
        let builder = self
            .builders
            .get(&framework)
            .ok_or_else(|| integration_missing(framework))?;

        Ok(builder(config, tool_loader))
    }

    /// Builds an adapter for the first registered framework in `preference`
    /// order. Fails with `IntegrationMissing` naming every candidate's
    /// feature when none is registered.
    pub fn create_with_fallback(
        &self,
        preference: &[AgentFramework],
        config: AgentConfig,
        tool_loader: Arc<dyn ToolLoader>,
    ) -> Result<Box<dyn AnyAgent>> {
        let Some(first) = preference.first() else {
            return Err(Error::Validation(
                "at least one framework candidate is required".to_owned(),
            ));
        };

        for framework in preference {
            if self.is_registered(*framework) {
                debug!(framework = %framework, "selected agent framework");
                return self.create(*framework, config, tool_loader);
            }
        }

        let features: Vec<&str> = preference
            .iter()
            .map(AgentFramework::feature)
            .collect();

        Err(Error::IntegrationMissing {
            framework: *first,
            instruction: format!(
                "none of the requested frameworks are compiled in; enable one of these polyagent-core features: {}",
                features.join(", ")
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frameworks::RunOptions;
    use crate::tools::CatalogToolLoader;
    use async_trait::async_trait;

    struct StubAgent {
        framework: AgentFramework,
    }

    #[async_trait]
    impl AnyAgent for StubAgent {
        fn framework(&self) -> AgentFramework {
            self.framework
        }

        async fn load(&mut self) -> Result<()> {
            Ok(())
        }

        async fn run(&self, _prompt: &str, _options: &RunOptions) -> Result<String> {
            Ok("stub".to_owned())
        }
    }

    fn stub_builder(framework: AgentFramework) -> AdapterBuilder {
        Box::new(move |_config, _tool_loader| Box::new(StubAgent { framework }))
    }

    fn config() -> AgentConfig {
        AgentConfig {
            name: "main".to_owned(),
            model_id: "gpt-4o-mini".to_owned(),
            ..AgentConfig::default()
        }
    }

    fn loader() -> Arc<dyn ToolLoader> {
        Arc::new(CatalogToolLoader::new())
    }

    #[test]
    fn unregistered_framework_fails_with_integration_missing() {
        let registry = AdapterRegistry::new();

        let error = registry
            .create(AgentFramework::LlamaIndex, config(), loader())
            .expect_err("create should fail");
        match error {
            Error::IntegrationMissing {
                framework,
                instruction,
            } => {
                assert_eq!(framework, AgentFramework::LlamaIndex);
                assert!(instruction.contains("llama-index"));
            }
            other => panic!("expected IntegrationMissing, got {other}"),
        }
    }

    #[test]
    fn fallback_picks_first_registered_candidate() {
        let mut registry = AdapterRegistry::new();
        registry.register(
            AgentFramework::OpenAiAgents,
            stub_builder(AgentFramework::OpenAiAgents),
        );

        let agent = registry
            .create_with_fallback(AgentFramework::all(), config(), loader())
            .expect("fallback should succeed");
        assert_eq!(agent.framework(), AgentFramework::OpenAiAgents);
    }

    #[test]
    fn fallback_honors_preference_order() {
        let mut registry = AdapterRegistry::new();
        registry.register(
            AgentFramework::LlamaIndex,
            stub_builder(AgentFramework::LlamaIndex),
        );
        registry.register(
            AgentFramework::OpenAiAgents,
            stub_builder(AgentFramework::OpenAiAgents),
        );

        let agent = registry
            .create_with_fallback(
                &[AgentFramework::OpenAiAgents, AgentFramework::LlamaIndex],
                config(),
                loader(),
            )
            .expect("fallback should succeed");
        assert_eq!(agent.framework(), AgentFramework::OpenAiAgents);
    }

    #[test]
    fn fallback_with_no_candidates_is_a_validation_error() {
        let registry = AdapterRegistry::new();

        let error = registry
            .create_with_fallback(&[], config(), loader())
            .expect_err("should fail");
        assert!(matches!(error, Error::Validation(_)));
    }

    #[test]
    fn fallback_names_every_missing_feature() {
        let registry = AdapterRegistry::new();

        let error = registry
            .create_with_fallback(AgentFramework::all(), config(), loader())
            .expect_err("should fail");
        let message = error.to_string();
        assert!(message.contains("llama-index"));
        assert!(message.contains("openai-agents"));
    }

    #[test]
    fn builtin_registers_compiled_adapters() {
        let registry = AdapterRegistry::builtin();

        #[cfg(feature = "llama-index")]
        assert!(registry.is_registered(AgentFramework::LlamaIndex));
        #[cfg(feature = "openai-agents")]
        assert!(registry.is_registered(AgentFramework::OpenAiAgents));
    }
}
