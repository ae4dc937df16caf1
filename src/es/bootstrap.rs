use std::fmt;

use crate::error::AppError;
use crate::es::admin::IndexAdmin;
use crate::es::mapping::{create_index_body, IndexSpec};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapStep {
    CheckExists,
    Create,
    PutMapping,
}

impl fmt::Display for BootstrapStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CheckExists => write!(f, "check exists"),
            Self::Create => write!(f, "create"),
            Self::PutMapping => write!(f, "put mapping"),
        }
    }
}

#[derive(Debug)]
pub struct BootstrapFailure {
    pub index: String,
    pub step: BootstrapStep,
    pub error: AppError,
}

/// What a bootstrap pass did. Failures are collected here instead of aborting.
#[derive(Debug, Default)]
pub struct BootstrapReport {
    pub created: Vec<String>,
    pub mapped: Vec<String>,
    pub failures: Vec<BootstrapFailure>,
}

impl BootstrapReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    fn fail(&mut self, index: &str, step: BootstrapStep, error: AppError) {
        tracing::error!("Index '{index}' {step} failed: {error}");
        self.failures.push(BootstrapFailure {
            index: index.to_string(),
            step,
            error,
        });
    }
}

/// Ensures every index in `specs` exists with the shared analyzer, then
/// re-applies the full field mappings to all of them.
///
/// Each index is checked independently and each request is attempted even if
/// an earlier one failed.
pub async fn bootstrap_indices<A>(admin: &A, specs: &[IndexSpec]) -> BootstrapReport
where
    A: IndexAdmin + ?Sized,
{
    let mut report = BootstrapReport::default();

    for spec in specs {
        let exists = match admin.index_exists(spec.name).await {
            Ok(exists) => exists,
            Err(e) => {
                report.fail(spec.name, BootstrapStep::CheckExists, e);
                continue;
            }
        };
        tracing::info!("Check index '{}': exists={exists}", spec.name);

        if exists {
            continue;
        }

        match admin.create_index(spec.name, create_index_body()).await {
            Ok(()) => {
                tracing::info!("Created index '{}' with email analyzer", spec.name);
                report.created.push(spec.name.to_string());
            }
            Err(e) => report.fail(spec.name, BootstrapStep::Create, e),
        }
    }

    for spec in specs {
        let body = match spec.mapping_body() {
            Ok(body) => body,
            Err(e) => {
                report.fail(spec.name, BootstrapStep::PutMapping, e.into());
                continue;
            }
        };

        match admin.put_mapping(spec.name, body).await {
            Ok(()) => report.mapped.push(spec.name.to_string()),
            Err(e) => report.fail(spec.name, BootstrapStep::PutMapping, e),
        }
    }

    report
}
