use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "polyagent", about = "Run agents across workflow frameworks")]
pub struct Cli {
    #[arg(long, default_value = "agent.toml")]
    pub config: String,

    /// Framework tag (e.g. "llama_index"). Falls back through compiled-in
    /// adapters when omitted.
    #[arg(long)]
    pub framework: Option<String>,

    #[arg(long, default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Load the configured agent and run a single prompt.
    Run { prompt: String },
    /// List the agent frameworks this build supports.
    Frameworks,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
