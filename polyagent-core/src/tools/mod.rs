pub mod loader;
pub mod types;

pub use loader::{CatalogToolLoader, ToolLoader};
pub use types::{ToolDefinition, ToolLoadReport};
