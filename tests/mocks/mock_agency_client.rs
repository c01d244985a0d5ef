use agency_phone_sync::client::AsyncAgencyClient;
use agency_phone_sync::error::{AgencyApiError, AgencyApiResult};
use agency_phone_sync::models::{ClientId, ClientRecord};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Mock agency gateway for testing.
///
/// Serves records from memory, can be told to fail or hang for specific ids,
/// and tracks calls plus the peak number of concurrent record fetches.
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct MockAgencyClient {
    records: Arc<Mutex<HashMap<ClientId, ClientRecord>>>,
    all_ids: Arc<Mutex<Vec<ClientId>>>,
    changed_ids: Arc<Mutex<Vec<ClientId>>>,
    failing: Arc<Mutex<HashSet<ClientId>>>,
    undecodable: Arc<Mutex<HashSet<ClientId>>>,
    hanging: Arc<Mutex<HashSet<ClientId>>>,
    listing_fails: Arc<Mutex<bool>>,
    latency: Arc<Mutex<Duration>>,
    call_counts: Arc<Mutex<HashMap<String, usize>>>,
    requested_since: Arc<Mutex<Option<DateTime<Utc>>>>,
    in_flight: Arc<AtomicUsize>,
    max_in_flight: Arc<AtomicUsize>,
}

#[allow(dead_code)]
impl MockAgencyClient {
    /// Create a new empty MockAgencyClient.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a record; its id is also added to the full listing.
    pub fn add_record(&self, record: ClientRecord) {
        self.all_ids.lock().unwrap().push(record.id);
        self.records.lock().unwrap().insert(record.id, record);
    }

    /// Add empty records for every id.
    pub fn add_empty_records(&self, ids: impl IntoIterator<Item = ClientId>) {
        for id in ids {
            self.add_record(ClientRecord {
                id,
                ..Default::default()
            });
        }
    }

    /// List an id without a record behind it (the fetch yields not-found).
    pub fn add_listed_id(&self, id: ClientId) {
        self.all_ids.lock().unwrap().push(id);
    }

    pub fn set_changed_ids(&self, ids: Vec<ClientId>) {
        *self.changed_ids.lock().unwrap() = ids;
    }

    /// Make fetches for `id` fail with a 500.
    pub fn fail_for(&self, id: ClientId) {
        self.failing.lock().unwrap().insert(id);
    }

    /// Make fetches for `id` fail with a decode error.
    pub fn undecodable_for(&self, id: ClientId) {
        self.undecodable.lock().unwrap().insert(id);
    }

    /// Make fetches for `id` never complete in test time.
    pub fn hang_for(&self, id: ClientId) {
        self.hanging.lock().unwrap().insert(id);
    }

    pub fn fail_listing(&self) {
        *self.listing_fails.lock().unwrap() = true;
    }

    pub fn set_latency(&self, latency: Duration) {
        *self.latency.lock().unwrap() = latency;
    }

    /// Get the number of times a method was called.
    pub fn get_call_count(&self, method: &str) -> usize {
        let counts = self.call_counts.lock().unwrap();
        *counts.get(method).unwrap_or(&0)
    }

    pub fn requested_since(&self) -> Option<DateTime<Utc>> {
        *self.requested_since.lock().unwrap()
    }

    /// Highest number of record fetches that were in flight at once.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    fn track_call(&self, method: &str) {
        let mut counts = self.call_counts.lock().unwrap();
        *counts.entry(method.to_string()).or_insert(0) += 1;
    }

    fn listing_error(&self) -> Option<AgencyApiError> {
        if *self.listing_fails.lock().unwrap() {
            Some(AgencyApiError::ApiError {
                status: 503,
                message: "Service Unavailable".to_string(),
            })
        } else {
            None
        }
    }
}

#[async_trait]
impl AsyncAgencyClient for MockAgencyClient {
    async fn list_all_client_ids(&self) -> AgencyApiResult<Vec<ClientId>> {
        self.track_call("list_all_client_ids");
        if let Some(err) = self.listing_error() {
            return Err(err);
        }
        Ok(self.all_ids.lock().unwrap().clone())
    }

    async fn list_changed_client_ids(
        &self,
        since: DateTime<Utc>,
    ) -> AgencyApiResult<Vec<ClientId>> {
        self.track_call("list_changed_client_ids");
        *self.requested_since.lock().unwrap() = Some(since);
        if let Some(err) = self.listing_error() {
            return Err(err);
        }
        Ok(self.changed_ids.lock().unwrap().clone())
    }

    async fn get_client_record(
        &self,
        client_id: ClientId,
    ) -> AgencyApiResult<Option<ClientRecord>> {
        self.track_call("get_client_record");

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        let latency = *self.latency.lock().unwrap();
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }
        let hangs = self.hanging.lock().unwrap().contains(&client_id);
        if hangs {
            tokio::time::sleep(Duration::from_secs(3600)).await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.failing.lock().unwrap().contains(&client_id) {
            return Err(AgencyApiError::ApiError {
                status: 500,
                message: "Internal Server Error".to_string(),
            });
        }

        if self.undecodable.lock().unwrap().contains(&client_id) {
            let err = serde_json::from_str::<ClientRecord>("{").unwrap_err();
            return Err(AgencyApiError::JsonError(err));
        }

        Ok(self.records.lock().unwrap().get(&client_id).cloned())
    }
}
