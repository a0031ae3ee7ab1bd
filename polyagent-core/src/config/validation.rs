use std::collections::HashSet;

use crate::config::schema::AgentConfig;
use crate::error::{Error, Result};

pub fn validate_config(config: &AgentConfig) -> Result<()> {
    if config.name.trim().is_empty() {
        return Err(Error::Validation("agent name cannot be empty".to_owned()));
    }

    if config.model_id.trim().is_empty() {
        return Err(Error::Validation(format!(
            "agent '{}' is missing required 'model_id'",
            config.name
        )));
    }

    let mut tool_names = HashSet::new();
    for tool in &config.tools {
        let name = tool.name.trim();
        if name.is_empty() {
            return Err(Error::Validation("tool name cannot be empty".to_owned()));
        }

        if !tool_names.insert(name.to_owned()) {
            return Err(Error::Validation(format!("duplicate tool name '{name}'")));
        }
    }

    Ok(())
}
