use async_trait::async_trait;
use serde_json::Value;

use crate::error::AppError;

/// Administrative operations the bootstrapper needs from the search engine.
#[async_trait]
pub trait IndexAdmin: Send + Sync {
    async fn index_exists(&self, index: &str) -> Result<bool, AppError>;

    async fn create_index(&self, index: &str, body: Value) -> Result<(), AppError>;

    /// Applies `{ "properties": ... }` to an existing index.
    async fn put_mapping(&self, index: &str, body: Value) -> Result<(), AppError>;

    async fn get_mapping(&self, index: &str) -> Result<Value, AppError>;
}
