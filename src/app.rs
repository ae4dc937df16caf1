use serde_json::Value;

use crate::config::AppConfig;
use crate::connector::{ConnectorCommand, ConnectorLauncher, LaunchMode, LaunchOutcome};
use crate::error::AppError;
use crate::es::admin::IndexAdmin;
use crate::es::bootstrap::{bootstrap_indices, BootstrapReport};
use crate::es::mapping::managed_indices;

/// Bootstraps the indices, then starts the connector.
///
/// Bootstrap failures are logged and the connector is launched anyway unless
/// `bootstrap.strict` is set.
pub async fn run<A, L>(admin: &A, launcher: &L, config: &AppConfig) -> anyhow::Result<LaunchOutcome>
where
    A: IndexAdmin + ?Sized,
    L: ConnectorLauncher + ?Sized,
{
    let report = bootstrap_indices(admin, &managed_indices()).await;
    log_report(&report);

    if !report.is_clean() {
        if config.bootstrap.strict {
            return Err(AppError::Bootstrap {
                failures: report.failures.len(),
            }
            .into());
        }
        tracing::warn!(
            "Continuing to connector launch despite {} bootstrap error(s)",
            report.failures.len()
        );
    }

    let command = ConnectorCommand::from_config(config);
    let mode = LaunchMode::from_wait(config.connector.wait);
    tracing::info!("Starting connector ({mode:?}): {command}");

    let outcome = launcher.launch(&command, mode).await?;
    match outcome {
        LaunchOutcome::Detached { pid } => {
            tracing::info!("Connector running in background (pid {pid:?})");
        }
        LaunchOutcome::Exited { code } => {
            if !outcome.is_success() {
                return Err(AppError::ConnectorExited { code }.into());
            }
            tracing::info!("Connector exited cleanly");
        }
    }

    Ok(outcome)
}

/// Runs only the bootstrapper; any failed step is an error.
pub async fn bootstrap_only<A>(admin: &A) -> anyhow::Result<BootstrapReport>
where
    A: IndexAdmin + ?Sized,
{
    let report = bootstrap_indices(admin, &managed_indices()).await;
    log_report(&report);

    if !report.is_clean() {
        return Err(AppError::Bootstrap {
            failures: report.failures.len(),
        }
        .into());
    }
    Ok(report)
}

pub async fn show_mapping<A>(admin: &A, index: &str) -> anyhow::Result<Value>
where
    A: IndexAdmin + ?Sized,
{
    Ok(admin.get_mapping(index).await?)
}

fn log_report(report: &BootstrapReport) {
    tracing::info!(
        "Bootstrap done: created {:?}, mapped {:?}, {} failure(s)",
        report.created,
        report.mapped,
        report.failures.len()
    );
}
