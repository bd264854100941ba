//! Collection API client: the only path by which section data reaches the server.
//!
//! Every section talks to one REST-like collection endpoint:
//!   GET    {base}        -> T[]
//!   POST   {base}        -> created T (with server-assigned id)
//!   PUT    {base}/{id}   -> saved T
//!   DELETE {base}/{id}   -> success/failure only
//!
//! Any non-2xx response is a failure; status codes are not distinguished.
use std::marker::PhantomData;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use crate::errors::ApiError;
use crate::timeline::TimelineEntity;

/// The collection endpoint contract consumed by the timeline controller and
/// edit sessions. Swap implementations (HTTP, in-memory) without touching callers.
#[async_trait]
pub trait CollectionApi<T: Send + Sync>: Send + Sync {
    async fn list(&self) -> Result<Vec<T>, ApiError>;

    async fn create(&self, value: &T) -> Result<T, ApiError>;

    async fn update(&self, id: &str, value: &T) -> Result<T, ApiError>;

    async fn delete(&self, id: &str) -> Result<(), ApiError>;
}

/// Builds the shared HTTP client with a request timeout.
pub fn build_client(timeout: Duration) -> Result<Client, ApiError> {
    Ok(Client::builder().timeout(timeout).build()?)
}

/// `reqwest`-backed collection endpoint for entities of type `T`.
pub struct HttpCollection<T> {
    client: Client,
    base: String,
    _entity: PhantomData<fn() -> T>,
}

impl<T> Clone for HttpCollection<T> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            base: self.base.clone(),
            _entity: PhantomData,
        }
    }
}

impl<T> HttpCollection<T> {
    pub fn new(client: Client, api_base_url: &str, path: &str) -> Self {
        Self {
            client,
            base: join_url(api_base_url, path),
            _entity: PhantomData,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base
    }

    fn item_url(&self, id: &str) -> String {
        format!("{}/{}", self.base, id)
    }
}

impl<T: TimelineEntity> HttpCollection<T> {
    /// Endpoint at `{api_base_url}/{T::COLLECTION}`.
    pub fn for_entity(client: Client, api_base_url: &str) -> Self {
        Self::new(client, api_base_url, T::COLLECTION)
    }
}

#[async_trait]
impl<T> CollectionApi<T> for HttpCollection<T>
where
    T: Serialize + DeserializeOwned + Send + Sync + 'static,
{
    async fn list(&self) -> Result<Vec<T>, ApiError> {
        let response = self.client.get(&self.base).send().await?;
        parse_json(ensure_success(response).await?).await
    }

    async fn create(&self, value: &T) -> Result<T, ApiError> {
        let response = self.client.post(&self.base).json(value).send().await?;
        parse_json(ensure_success(response).await?).await
    }

    async fn update(&self, id: &str, value: &T) -> Result<T, ApiError> {
        let response = self
            .client
            .put(self.item_url(id))
            .json(value)
            .send()
            .await?;
        parse_json(ensure_success(response).await?).await
    }

    async fn delete(&self, id: &str) -> Result<(), ApiError> {
        let response = self.client.delete(self.item_url(id)).send().await?;
        ensure_success(response).await?;
        Ok(())
    }
}

async fn ensure_success(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        debug!("{} {}", status, response.url());
        return Ok(response);
    }
    let url = response.url().to_string();
    let body = response.text().await.unwrap_or_default();
    warn!("Collection endpoint {url} returned {status}: {body}");
    Err(ApiError::Status {
        status: status.as_u16(),
        message: body,
    })
}

async fn parse_json<R: DeserializeOwned>(response: Response) -> Result<R, ApiError> {
    let body = response.text().await?;
    Ok(serde_json::from_str(&body)?)
}

fn join_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    let path = path.trim_matches('/');
    if path.is_empty() {
        base.to_string()
    } else {
        format!("{base}/{path}")
    }
}
