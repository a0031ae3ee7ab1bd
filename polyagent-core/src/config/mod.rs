pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::load_from_file;
pub use schema::{AgentConfig, ToolSpec};
pub use validation::validate_config;
