use async_trait::async_trait;
use std::fmt;
use tokio::process::Command;

use crate::config::AppConfig;
use crate::error::AppError;

/// Argument vector for the external replication tool. Values are passed to
/// the child as-is, without going through a shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectorCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl ConnectorCommand {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            program: config.connector.program.clone(),
            args: vec![
                "-m".into(),
                config.mongo.url.clone(),
                "-c".into(),
                config.connector.config_file.clone(),
                "--target-url".into(),
                config.elasticsearch.url.clone(),
            ],
        }
    }
}

impl fmt::Display for ConnectorCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchMode {
    /// Start the child and return immediately
    Detached,
    /// Block until the child exits
    Wait,
}

impl LaunchMode {
    pub fn from_wait(wait: bool) -> Self {
        if wait { Self::Wait } else { Self::Detached }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchOutcome {
    Detached { pid: Option<u32> },
    /// `code` is `None` when the child was terminated by a signal
    Exited { code: Option<i32> },
}

impl LaunchOutcome {
    pub fn is_success(&self) -> bool {
        match self {
            Self::Detached { .. } => true,
            Self::Exited { code } => *code == Some(0),
        }
    }
}

#[async_trait]
pub trait ConnectorLauncher: Send + Sync {
    async fn launch(
        &self,
        command: &ConnectorCommand,
        mode: LaunchMode,
    ) -> Result<LaunchOutcome, AppError>;
}

/// Spawns the connector as a child process of this one.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessLauncher;

#[async_trait]
impl ConnectorLauncher for ProcessLauncher {
    async fn launch(
        &self,
        command: &ConnectorCommand,
        mode: LaunchMode,
    ) -> Result<LaunchOutcome, AppError> {
        let mut child = Command::new(&command.program)
            .args(&command.args)
            .spawn()
            .map_err(|source| AppError::ConnectorSpawn {
                program: command.program.clone(),
                source,
            })?;

        let pid = child.id();
        tracing::info!("Connector started (pid {pid:?})");

        match mode {
            LaunchMode::Detached => Ok(LaunchOutcome::Detached { pid }),
            LaunchMode::Wait => {
                let status = child.wait().await.map_err(|source| AppError::ConnectorSpawn {
                    program: command.program.clone(),
                    source,
                })?;
                tracing::info!("Connector finished: {status}");
                Ok(LaunchOutcome::Exited {
                    code: status.code(),
                })
            }
        }
    }
}
