use std::collections::HashMap;

use async_trait::async_trait;
use tracing::debug;

use crate::config::schema::ToolSpec;
use crate::error::{Error, Result};
use crate::tools::types::{ToolDefinition, ToolLoadReport};

/// Resolves configured tool specs into backend-forwardable definitions.
/// Resolution is all-or-nothing: any unknown spec fails the whole load.
#[async_trait]
pub trait ToolLoader: Send + Sync {
    async fn load_tools(
        &self,
        specs: &[ToolSpec],
    ) -> Result<(Vec<ToolDefinition>, ToolLoadReport)>;
}

/// Loader backed by a registered catalog of definitions. Specs that carry
/// inline parameters resolve without a catalog entry.
#[derive(Debug, Default)]
pub struct CatalogToolLoader {
    catalog: HashMap<String, ToolDefinition>,
}

impl CatalogToolLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, definition: ToolDefinition) {
        self.catalog.insert(definition.name.clone(), definition);
    }

    pub fn with_catalog(definitions: Vec<ToolDefinition>) -> Self {
        let mut loader = Self::new();
        for definition in definitions {
            loader.register(definition);
        }
        loader
    }

    fn resolve(&self, spec: &ToolSpec, report: &mut ToolLoadReport) -> Result<ToolDefinition> {
        if let Some(definition) = self.catalog.get(&spec.name) {
            report.resolved_from_catalog += 1;
            return Ok(definition.clone());
        }

        if spec.parameters.is_some() || spec.description.is_some() {
            report.resolved_inline += 1;
            return Ok(ToolDefinition {
                name: spec.name.clone(),
                description: spec.description.clone(),
                parameters: spec.parameters.clone(),
            });
        }

        Err(Error::Tool(format!(
            "unknown tool '{}': not in catalog and no inline definition given",
            spec.name
        )))
    }
}

#[async_trait]
impl ToolLoader for CatalogToolLoader {
    async fn load_tools(
        &self,
        specs: &[ToolSpec],
    ) -> Result<(Vec<ToolDefinition>, ToolLoadReport)> {
        let mut report = ToolLoadReport {
            requested: specs.len(),
            ..ToolLoadReport::default()
        };

        let mut definitions = Vec::with_capacity(specs.len());
        for spec in specs {
            definitions.push(self.resolve(spec, &mut report)?);
        }

        debug!(
            requested = report.requested,
            from_catalog = report.resolved_from_catalog,
            inline = report.resolved_inline,
            "resolved tool definitions"
        );

        Ok((definitions, report))
    }
}
