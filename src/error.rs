use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Elasticsearch error: {0}")]
    Elasticsearch(#[from] elasticsearch::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{operation} on index '{index}' failed (status {status_code}): {details}")]
    IndexRequest {
        index: String,
        operation: &'static str,
        status_code: u16,
        details: String,
    },

    #[error("Failed to start connector '{program}': {source}")]
    ConnectorSpawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Connector exited unsuccessfully (code {code:?})")]
    ConnectorExited { code: Option<i32> },

    #[error("Index bootstrap failed with {failures} error(s)")]
    Bootstrap { failures: usize },
}
