mod cli;

use std::path::Path;
use std::sync::Arc;

use polyagent_core::config::{load_from_file, validate_config};
use polyagent_core::frameworks::RunOptions;
use polyagent_core::{AdapterRegistry, AgentFramework, CatalogToolLoader, Result};
use tracing::info;

use crate::cli::{Cli, Command};

#[tokio::main]
async fn main() {
    let cli = Cli::parse_args();
    polyagent_core::logging::init_tracing(&cli.log_level);

    if let Err(err) = run(cli).await {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let registry = AdapterRegistry::builtin();

    match cli.command {
        Command::Frameworks => {
            for framework in registry.frameworks() {
                println!("{framework}");
            }
            Ok(())
        }
        Command::Run { prompt } => {
            let config = load_from_file(Path::new(&cli.config))?;
            validate_config(&config)?;

            let tool_loader = Arc::new(CatalogToolLoader::new());
            let mut agent = match &cli.framework {
                Some(tag) => {
                    let framework: AgentFramework = tag.parse()?;
                    registry.create(framework, config, tool_loader)?
                }
                None => registry.create_with_fallback(AgentFramework::all(), config, tool_loader)?,
            };

            info!(framework = %agent.framework(), "loading agent");
            agent.load().await?;

            let answer = agent.run(&prompt, &RunOptions::new()).await?;
            println!("{answer}");
            Ok(())
        }
    }
}
