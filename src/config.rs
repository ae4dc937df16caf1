use anyhow::Context;
use mongodb::options::ConnectionString;
use serde::Deserialize;
use std::path::Path;
use url::Url;

use crate::error::AppError;

pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub mongo: MongoConfig,
    pub elasticsearch: EsConfig,
    pub connector: ConnectorConfig,
    pub bootstrap: BootstrapConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MongoConfig {
    /// Connection string handed to the connector, e.g. mongodb://db:27017/app
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EsConfig {
    pub url: String,
}

impl Default for EsConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:9200".into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ConnectorConfig {
    /// Executable name or path of the replication tool
    pub program: String,
    /// Connector config file passed with `-c`
    pub config_file: String,
    /// Block until the connector exits instead of detaching from it
    pub wait: bool,
}

impl Default for ConnectorConfig {
    fn default() -> Self {
        Self {
            program: "mongo-connector".into(),
            config_file: "mongo-connector-config.json".into(),
            wait: false,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BootstrapConfig {
    /// Refuse to launch the connector when any bootstrap step failed
    pub strict: bool,
}

impl AppConfig {
    /// Loads `.env`, then the TOML file if present, then environment overrides.
    ///
    /// `config_path` and `env_file` must exist when given explicitly; the
    /// defaults (`config.toml`, `.env`) are skipped silently when missing.
    pub fn load(config_path: Option<&Path>, env_file: Option<&Path>) -> anyhow::Result<Self> {
        match env_file {
            Some(path) => {
                dotenvy::from_path(path)
                    .with_context(|| format!("Failed to load env file {}", path.display()))?;
            }
            None => {
                let _ = dotenvy::dotenv();
            }
        }

        let toml = match config_path {
            Some(path) => Some(
                std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read {}", path.display()))?,
            ),
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Some(std::fs::read_to_string(DEFAULT_CONFIG_FILE)?)
            }
            None => None,
        };

        Self::from_sources(toml.as_deref(), |key| std::env::var(key).ok())
    }

    /// Builds a validated config from optional TOML content and an environment lookup.
    pub fn from_sources<F>(toml: Option<&str>, env: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match toml {
            Some(content) => {
                toml::from_str::<AppConfig>(content).context("Failed to parse config file")?
            }
            None => AppConfig::default(),
        };

        if let Some(url) = env("MONGO_URL") {
            config.mongo.url = url;
        }
        if let Some(url) = env("ELASTICSEARCH_URL") {
            config.elasticsearch.url = url;
        }
        if let Some(program) = env("CONNECTOR_BIN") {
            config.connector.program = program;
        }
        if let Some(path) = env("CONNECTOR_CONFIG") {
            config.connector.config_file = path;
        }
        if let Some(val) = env("CONNECTOR_WAIT") {
            config.connector.wait = parse_bool("CONNECTOR_WAIT", &val)?;
        }
        if let Some(val) = env("BOOTSTRAP_STRICT") {
            config.bootstrap.strict = parse_bool("BOOTSTRAP_STRICT", &val)?;
        }

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), AppError> {
        if self.mongo.url.trim().is_empty() {
            return Err(config_error(
                "Mongo URL not configured. Set MONGO_URL env var or mongo.url in config.toml",
            ));
        }
        ConnectionString::parse(&self.mongo.url).map_err(|e| {
            config_error(format!(
                "MONGO_URL is not a valid connection string ({e}): {}",
                self.mongo.url
            ))
        })?;

        let es_url = Url::parse(&self.elasticsearch.url).map_err(|e| {
            config_error(format!(
                "ELASTICSEARCH_URL is not a valid URL ({e}): {}",
                self.elasticsearch.url
            ))
        })?;
        if !matches!(es_url.scheme(), "http" | "https") {
            return Err(config_error(format!(
                "ELASTICSEARCH_URL must use http or https, got '{}'",
                es_url.scheme()
            )));
        }

        if self.connector.program.trim().is_empty() {
            return Err(config_error(
                "Connector program is empty. Set CONNECTOR_BIN or connector.program",
            ));
        }
        if self.connector.config_file.trim().is_empty() {
            return Err(config_error(
                "Connector config file is empty. Set CONNECTOR_CONFIG or connector.config_file",
            ));
        }
        Ok(())
    }
}

fn config_error(message: impl Into<String>) -> AppError {
    AppError::Config(message.into())
}

fn parse_bool(key: &str, val: &str) -> Result<bool, AppError> {
    match val.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(config_error(format!("{key} must be a boolean, got '{other}'"))),
    }
}
