use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config::AgentConfig;

/// Which concrete model class the backend should instantiate. Resolved
/// exactly once, before construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelVariant {
    Default,
    Override(String),
}

impl ModelVariant {
    pub fn from_config(config: &AgentConfig) -> Self {
        match &config.model_type {
            Some(class) => Self::Override(class.clone()),
            None => Self::Default,
        }
    }

    pub fn resolve(&self, default_class: &str) -> String {
        match self {
            Self::Override(class) => class.clone(),
            Self::Default => default_class.to_owned(),
        }
    }
}

/// Backend-forwardable model description. Field mapping only; identifier
/// and credential validation is the backend's job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelHandle {
    pub class: String,
    pub model_id: String,
    pub api_key: Option<String>,
    pub api_base: Option<String>,
    pub additional_args: Map<String, Value>,
}

pub fn build_model(default_class: &str, config: &AgentConfig) -> ModelHandle {
    let variant = ModelVariant::from_config(config);

    ModelHandle {
        class: variant.resolve(default_class),
        model_id: config.model_id.clone(),
        api_key: config.api_key.clone(),
        api_base: config.api_base.clone(),
        additional_args: config.model_args.clone(),
    }
}
