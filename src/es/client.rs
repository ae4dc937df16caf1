use async_trait::async_trait;
use elasticsearch::http::response::Response;
use elasticsearch::http::transport::{SingleNodeConnectionPool, TransportBuilder};
use elasticsearch::indices::{
    IndicesCreateParts, IndicesExistsParts, IndicesGetMappingParts, IndicesPutMappingParts,
};
use elasticsearch::Elasticsearch;
use serde_json::Value;
use url::Url;

use crate::config::EsConfig;
use crate::error::AppError;
use crate::es::admin::IndexAdmin;

pub fn create_client(config: &EsConfig) -> anyhow::Result<Elasticsearch> {
    let url = Url::parse(&config.url)?;
    let pool = SingleNodeConnectionPool::new(url);
    let transport = TransportBuilder::new(pool).disable_proxy().build()?;
    Ok(Elasticsearch::new(transport))
}

/// `IndexAdmin` backed by the official Elasticsearch client.
pub struct EsIndexAdmin {
    es: Elasticsearch,
}

impl EsIndexAdmin {
    pub fn new(es: Elasticsearch) -> Self {
        Self { es }
    }

    pub fn from_config(config: &EsConfig) -> anyhow::Result<Self> {
        Ok(Self::new(create_client(config)?))
    }
}

/// Turns a non-2xx response into `AppError::IndexRequest` carrying the body.
async fn check_response(
    response: Response,
    index: &str,
    operation: &'static str,
) -> Result<Response, AppError> {
    let status = response.status_code();
    if status.is_success() {
        return Ok(response);
    }

    let details = match response.text().await {
        Ok(body) if !body.is_empty() => body,
        Ok(_) => status.to_string(),
        Err(e) => format!("{status} ({e})"),
    };
    Err(AppError::IndexRequest {
        index: index.to_string(),
        operation,
        status_code: status.as_u16(),
        details,
    })
}

/// Logs the body of a 2xx response. The request already succeeded, so an
/// unreadable body is only a warning.
async fn log_acknowledged(response: Response, index: &str, operation: &'static str) {
    match response.text().await {
        Ok(body) => tracing::info!("{operation} response for '{index}': {body}"),
        Err(e) => tracing::warn!("{operation} on '{index}' succeeded but body was unreadable: {e}"),
    }
}

#[async_trait]
impl IndexAdmin for EsIndexAdmin {
    async fn index_exists(&self, index: &str) -> Result<bool, AppError> {
        let response = self
            .es
            .indices()
            .exists(IndicesExistsParts::Index(&[index]))
            .send()
            .await?;

        match response.status_code().as_u16() {
            404 => Ok(false),
            _ => check_response(response, index, "exists").await.map(|_| true),
        }
    }

    async fn create_index(&self, index: &str, body: Value) -> Result<(), AppError> {
        let response = self
            .es
            .indices()
            .create(IndicesCreateParts::Index(index))
            .body(body)
            .send()
            .await?;

        let response = check_response(response, index, "create").await?;
        log_acknowledged(response, index, "create").await;
        Ok(())
    }

    async fn put_mapping(&self, index: &str, body: Value) -> Result<(), AppError> {
        let response = self
            .es
            .indices()
            .put_mapping(IndicesPutMappingParts::Index(&[index]))
            .body(body)
            .send()
            .await?;

        let response = check_response(response, index, "put_mapping").await?;
        log_acknowledged(response, index, "put_mapping").await;
        Ok(())
    }

    async fn get_mapping(&self, index: &str) -> Result<Value, AppError> {
        let response = self
            .es
            .indices()
            .get_mapping(IndicesGetMappingParts::Index(&[index]))
            .send()
            .await?;

        let response = check_response(response, index, "get_mapping").await?;
        Ok(response.json().await?)
    }
}
