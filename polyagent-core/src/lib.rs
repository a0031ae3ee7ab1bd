pub mod config;
pub mod error;
pub mod frameworks;
pub mod logging;
pub mod model;
pub mod tools;

pub use config::AgentConfig;
pub use error::{Error, Result};
pub use frameworks::{AdapterRegistry, AgentFramework, AnyAgent, RunOptions};
pub use tools::{CatalogToolLoader, ToolLoader};
