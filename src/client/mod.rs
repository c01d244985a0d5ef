//! HTTP client for the agency-management API.
//!
//! This module provides a synchronous HTTP client that can be used from async contexts
//! via `tokio::task::spawn_blocking`. The client handles Basic authentication, error
//! mapping, and decoding of the client listing and client detail endpoints.

mod async_wrapper;
pub use async_wrapper::{AsyncAgencyClient, AsyncAgencyClientImpl};

use crate::config::Config;
use crate::error::{AgencyApiError, AgencyApiResult};
use crate::metrics::{HttpTimer, Metrics};
use crate::models::{ClientId, ClientRecord};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;

/// API version sent with every request.
pub const API_VERSION: &str = "3.0";

/// Format of the `asOf` query parameter (UTC, `Z` suffix).
pub const AS_OF_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// HTTP client for the agency-management API.
///
/// This client uses `ureq` for synchronous HTTP requests and can be called
/// from async contexts using `tokio::task::spawn_blocking`. Credentials and
/// base URL are fixed at construction.
#[derive(Clone)]
pub struct AgencyClient {
    /// Base URL for the API
    base_url: String,

    /// Agency the client ids belong to
    agency_id: String,

    /// Precomputed `Authorization` header value
    auth_header: String,

    /// HTTP client agent
    agent: Arc<ureq::Agent>,

    /// Metrics collector
    metrics: Metrics,
}

impl AgencyClient {
    /// Create a new AgencyClient from configuration.
    pub fn new(config: &Config) -> Self {
        Self::build(
            config.api_base_url.clone(),
            config.agency_id.clone(),
            &config.api_user,
            &config.api_password,
            config.request_timeout(),
        )
    }

    /// Create an AgencyClient with a custom base URL (useful for testing).
    #[doc(hidden)]
    pub fn with_base_url(
        base_url: String,
        agency_id: String,
        user: &str,
        password: &str,
    ) -> Self {
        Self::build(base_url, agency_id, user, password, Duration::from_secs(10))
    }

    fn build(
        base_url: String,
        agency_id: String,
        user: &str,
        password: &str,
        timeout: Duration,
    ) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();

        Self {
            base_url,
            agency_id,
            auth_header: basic_auth_header(user, password),
            agent: Arc::new(agent),
            metrics: Metrics::new(),
        }
    }

    /// Share an existing metrics collector instead of the client's own.
    pub fn with_metrics(mut self, metrics: Metrics) -> Self {
        self.metrics = metrics;
        self
    }

    /// Get a reference to the metrics collector.
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Build a full URL from a path.
    fn build_url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{}/{}", base, path)
    }

    /// Path of the client listing endpoint.
    fn clients_path(&self) -> String {
        format!(
            "/vendor/agency/{}/clients?version={}",
            self.agency_id, API_VERSION
        )
    }

    /// Execute a GET request with authentication.
    fn get(&self, path: &str) -> Result<ureq::Response, AgencyApiError> {
        let timer = HttpTimer::new(self.metrics.clone());
        let url = self.build_url(path);

        tracing::debug!("GET {}", url);

        let result = self
            .agent
            .get(&url)
            .set("Authorization", &self.auth_header)
            .set("Accept", "application/json")
            .call()
            .map_err(|e| self.map_error(e));

        match &result {
            Ok(_) => timer.complete(),
            Err(e) => {
                tracing::debug!("GET {} - Error: {}", url, e);
                timer.complete_with_error();
            }
        }

        result
    }

    /// Map a ureq error to an AgencyApiError.
    fn map_error(&self, error: ureq::Error) -> AgencyApiError {
        match error {
            ureq::Error::Status(code, response) => {
                let message = response
                    .into_string()
                    .unwrap_or_else(|_| "Unknown error".to_string());

                match code {
                    401 => AgencyApiError::Unauthorized,
                    404 => AgencyApiError::NotFound(message),
                    429 => AgencyApiError::RateLimitExceeded,
                    _ => AgencyApiError::ApiError {
                        status: code,
                        message,
                    },
                }
            }
            ureq::Error::Transport(transport) => {
                if transport.kind() == ureq::ErrorKind::ConnectionFailed {
                    AgencyApiError::HttpError("Connection failed".to_string())
                } else if transport.kind() == ureq::ErrorKind::Io {
                    AgencyApiError::Timeout
                } else {
                    AgencyApiError::HttpError(transport.to_string())
                }
            }
        }
    }

    /// Read a response body and decode a list of client ids.
    fn read_client_ids(&self, response: ureq::Response) -> AgencyApiResult<Vec<ClientId>> {
        let body = response
            .into_string()
            .map_err(|e| AgencyApiError::HttpError(e.to_string()))?;

        let ids: Vec<ClientId> = serde_json::from_str(&body)?;
        self.metrics.record_client_ids_listed(ids.len());
        Ok(ids)
    }

    // ========================= Client Operations =========================

    /// List every client id of the agency.
    ///
    /// Any non-success status, including 404, is an error.
    pub fn list_all_client_ids(&self) -> AgencyApiResult<Vec<ClientId>> {
        let response = self.get(&self.clients_path())?;
        self.read_client_ids(response)
    }

    /// List ids of clients changed at or after `since`.
    pub fn list_changed_client_ids(&self, since: DateTime<Utc>) -> AgencyApiResult<Vec<ClientId>> {
        let as_of = since.format(AS_OF_FORMAT).to_string();
        let path = format!(
            "{}&asOf={}",
            self.clients_path(),
            urlencoding::encode(&as_of)
        );
        let response = self.get(&path)?;
        self.read_client_ids(response)
    }

    /// Fetch the detail record of one client.
    ///
    /// Returns `Ok(None)` when the API answers 404.
    pub fn get_client_record(&self, client_id: ClientId) -> AgencyApiResult<Option<ClientRecord>> {
        let path = format!(
            "/vendor/agency/{}/client/{}?version={}",
            self.agency_id, client_id, API_VERSION
        );

        let response = match self.get(&path) {
            Ok(response) => response,
            Err(AgencyApiError::NotFound(_)) => {
                self.metrics.record_client_record_not_found();
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        let body = response
            .into_string()
            .map_err(|e| AgencyApiError::HttpError(e.to_string()))?;

        let mut record: ClientRecord = serde_json::from_str(&body)?;
        record.id = client_id;

        self.metrics.record_client_record_fetched();
        Ok(Some(record))
    }
}

/// Build the HTTP Basic `Authorization` header value.
fn basic_auth_header(user: &str, password: &str) -> String {
    let credentials = format!("{}:{}", user, password);
    format!("Basic {}", STANDARD.encode(credentials))
}
