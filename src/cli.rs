use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "mongo-es-bridge",
    about = "Prepare Elasticsearch indices and launch mongo-connector"
)]
pub struct Cli {
    /// TOML config file (defaults to ./config.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Env file to load instead of ./.env
    #[arg(long, global = true)]
    pub env_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Subcommand, PartialEq, Eq)]
pub enum Command {
    /// Bootstrap indices, then start the connector (default)
    Run {
        /// Wait for the connector to exit
        #[arg(long)]
        wait: bool,
        /// Do not start the connector if bootstrap failed
        #[arg(long)]
        strict: bool,
    },
    /// Create indices and apply mappings, nothing else
    Bootstrap,
    /// Print the live mapping of an index
    Mapping { index: String },
}

impl Cli {
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Run {
            wait: false,
            strict: false,
        })
    }
}
