//! Async wrapper around the synchronous AgencyClient.
//!
//! This module provides an async interface to the synchronous AgencyClient by using
//! `tokio::task::spawn_blocking` to run HTTP operations on a dedicated thread pool,
//! preventing blocking of the async runtime.

use crate::client::AgencyClient;
use crate::error::{AgencyApiError, AgencyApiResult};
use crate::models::{ClientId, ClientRecord};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Gateway to the remote client data.
///
/// Implementations carry their own credentials; callers never pass any.
/// A client the remote side does not know is `Ok(None)`, not an error.
#[async_trait]
pub trait AsyncAgencyClient: Send + Sync {
    async fn list_all_client_ids(&self) -> AgencyApiResult<Vec<ClientId>>;
    async fn list_changed_client_ids(&self, since: DateTime<Utc>)
        -> AgencyApiResult<Vec<ClientId>>;
    async fn get_client_record(&self, client_id: ClientId)
        -> AgencyApiResult<Option<ClientRecord>>;
}

/// Async wrapper around synchronous AgencyClient.
///
/// Uses `tokio::task::spawn_blocking` to run synchronous HTTP
/// operations on a dedicated thread pool, preventing blocking
/// the async runtime.
#[derive(Clone)]
pub struct AsyncAgencyClientImpl {
    client: Arc<AgencyClient>,
}

impl AsyncAgencyClientImpl {
    pub fn new(client: AgencyClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }
}

#[async_trait]
impl AsyncAgencyClient for AsyncAgencyClientImpl {
    async fn list_all_client_ids(&self) -> AgencyApiResult<Vec<ClientId>> {
        let client = self.client.clone();

        tokio::task::spawn_blocking(move || client.list_all_client_ids())
            .await
            .map_err(|e| AgencyApiError::HttpError(format!("Task join error: {}", e)))?
    }

    async fn list_changed_client_ids(
        &self,
        since: DateTime<Utc>,
    ) -> AgencyApiResult<Vec<ClientId>> {
        let client = self.client.clone();

        tokio::task::spawn_blocking(move || client.list_changed_client_ids(since))
            .await
            .map_err(|e| AgencyApiError::HttpError(format!("Task join error: {}", e)))?
    }

    async fn get_client_record(
        &self,
        client_id: ClientId,
    ) -> AgencyApiResult<Option<ClientRecord>> {
        let client = self.client.clone();

        tokio::task::spawn_blocking(move || client.get_client_record(client_id))
            .await
            .map_err(|e| AgencyApiError::HttpError(format!("Task join error: {}", e)))?
    }
}
