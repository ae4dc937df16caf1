use clap::Parser;

use mongo_es_bridge::app;
use mongo_es_bridge::cli::{Cli, Command};
use mongo_es_bridge::config::AppConfig;
use mongo_es_bridge::connector::ProcessLauncher;
use mongo_es_bridge::es::client::EsIndexAdmin;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("mongo_es_bridge=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    // Load configuration (env vars override TOML)
    let mut config = AppConfig::load(cli.config.as_deref(), cli.env_file.as_deref())?;
    tracing::info!("Elasticsearch URL: {}", config.elasticsearch.url);

    let admin = EsIndexAdmin::from_config(&config.elasticsearch)?;

    match cli.command() {
        Command::Run { wait, strict } => {
            config.connector.wait |= wait;
            config.bootstrap.strict |= strict;
            app::run(&admin, &ProcessLauncher, &config).await?;
        }
        Command::Bootstrap => {
            app::bootstrap_only(&admin).await?;
        }
        Command::Mapping { index } => {
            let mapping = app::show_mapping(&admin, &index).await?;
            println!("{}", serde_json::to_string_pretty(&mapping)?);
        }
    }

    Ok(())
}
