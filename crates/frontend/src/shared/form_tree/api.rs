//! CRUD client used by form trees
//!
//! Every entity is exposed by the backend under `/api/{entity}` with the
//! usual five operations. Reads of whole collections are cached until the
//! collection is invalidated.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use contracts::domain::common::RecordId;
use contracts::shared::forms::Record;
use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::shared::api_utils::api_base;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("network error: {0}")]
    Network(String),

    #[error("unexpected response: {0}")]
    Decode(String),
}

/// The five operations a form tree needs from the backend
#[async_trait(?Send)]
pub trait CrudApi {
    /// Store a new record and return it with its assigned id
    async fn create(&self, entity: &str, payload: &Record) -> Result<Record, ApiError>;

    async fn read_all(&self, entity: &str) -> Result<Vec<Record>, ApiError>;

    async fn read(&self, entity: &str, id: RecordId) -> Result<Record, ApiError>;

    async fn update(
        &self,
        entity: &str,
        id: RecordId,
        payload: &Record,
    ) -> Result<Record, ApiError>;

    async fn delete(&self, entity: &str, id: RecordId) -> Result<Record, ApiError>;

    /// Forget cached reads of `entity`
    fn invalidate(&self, _entity: &str) {}
}

/// [`CrudApi`] over HTTP with gloo-net
#[derive(Clone)]
pub struct HttpCrudApi {
    base_url: String,
    collections: Arc<Mutex<HashMap<String, Vec<Record>>>>,
}

impl HttpCrudApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            collections: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Client for the backend serving the current page
    pub fn from_window() -> Self {
        Self::new(api_base())
    }

    fn collection_url(&self, entity: &str) -> String {
        format!("{}/api/{}", self.base_url, entity)
    }

    fn record_url(&self, entity: &str, id: RecordId) -> String {
        format!("{}/api/{}/{}", self.base_url, entity, id)
    }

    fn cached(&self, entity: &str) -> Option<Vec<Record>> {
        self.collections.lock().ok()?.get(entity).cloned()
    }

    fn remember(&self, entity: &str, records: &[Record]) {
        if let Ok(mut collections) = self.collections.lock() {
            collections.insert(entity.to_string(), records.to_vec());
        }
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    if !response.ok() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(ApiError::Status { status, body });
    }
    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

fn network(err: gloo_net::Error) -> ApiError {
    ApiError::Network(err.to_string())
}

#[async_trait(?Send)]
impl CrudApi for HttpCrudApi {
    async fn create(&self, entity: &str, payload: &Record) -> Result<Record, ApiError> {
        let response = Request::post(&self.collection_url(entity))
            .json(payload)
            .map_err(network)?
            .send()
            .await
            .map_err(network)?;
        read_json(response).await
    }

    async fn read_all(&self, entity: &str) -> Result<Vec<Record>, ApiError> {
        if let Some(records) = self.cached(entity) {
            return Ok(records);
        }
        let response = Request::get(&self.collection_url(entity))
            .send()
            .await
            .map_err(network)?;
        let records: Vec<Record> = read_json(response).await?;
        self.remember(entity, &records);
        Ok(records)
    }

    async fn read(&self, entity: &str, id: RecordId) -> Result<Record, ApiError> {
        let response = Request::get(&self.record_url(entity, id))
            .send()
            .await
            .map_err(network)?;
        read_json(response).await
    }

    async fn update(
        &self,
        entity: &str,
        id: RecordId,
        payload: &Record,
    ) -> Result<Record, ApiError> {
        let response = Request::put(&self.record_url(entity, id))
            .json(payload)
            .map_err(network)?
            .send()
            .await
            .map_err(network)?;
        read_json(response).await
    }

    async fn delete(&self, entity: &str, id: RecordId) -> Result<Record, ApiError> {
        let response = Request::delete(&self.record_url(entity, id))
            .send()
            .await
            .map_err(network)?;
        read_json(response).await
    }

    fn invalidate(&self, entity: &str) {
        if let Ok(mut collections) = self.collections.lock() {
            collections.remove(entity);
        }
    }
}
