//! Sync service layer.
//!
//! Resolves the ids for a sync mode, fetches the records, and extracts the
//! phone entries. Listing failures abort the run; per-client failures inside
//! the batch fetch do not.

use crate::client::AsyncAgencyClient;
use crate::error::AgencyApiResult;
use crate::models::{ClientId, PhoneEntry};
use crate::services::batch_fetcher::{BatchFetchReport, BatchFetcher, FetchFailure};
use crate::services::phone_extractor::extract_phone_entries;
use chrono::{DateTime, Utc};
use std::fmt;
use std::time::{Duration, Instant};

/// Which clients a run covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncMode {
    /// Every client of the agency
    Full,
    /// Clients changed at or after `since`
    Incremental { since: DateTime<Utc> },
    /// One client, fetched directly
    SingleClient(ClientId),
}

impl fmt::Display for SyncMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncMode::Full => write!(f, "Full"),
            SyncMode::Incremental { since } => {
                write!(f, "Incremental (since {})", since.format("%Y-%m-%d %H:%M:%S UTC"))
            }
            SyncMode::SingleClient(id) => write!(f, "SingleClient ({})", id),
        }
    }
}

/// Outcome of one sync run.
#[derive(Debug)]
pub struct SyncReport {
    pub mode: SyncMode,
    pub client_ids_requested: usize,
    pub records_fetched: usize,
    pub not_found: Vec<ClientId>,
    pub failures: Vec<FetchFailure>,
    pub entries: Vec<PhoneEntry>,
    pub elapsed: Duration,
}

/// Runs a sync against the agency API.
pub struct PhoneSyncService {
    fetcher: BatchFetcher,
}

impl PhoneSyncService {
    pub fn new(fetcher: BatchFetcher) -> Self {
        Self { fetcher }
    }

    fn client(&self) -> &dyn AsyncAgencyClient {
        self.fetcher.client().as_ref()
    }

    /// Run one sync and collect its phone entries.
    pub async fn run(&self, mode: SyncMode) -> AgencyApiResult<SyncReport> {
        let start = Instant::now();
        tracing::info!("Starting {} sync", mode);

        let (client_ids_requested, fetched) = match mode {
            SyncMode::Full => {
                let ids = self.client().list_all_client_ids().await?;
                tracing::info!("Found {} clients", ids.len());
                (ids.len(), self.fetcher.fetch_all(&ids).await)
            }
            SyncMode::Incremental { since } => {
                let ids = self.client().list_changed_client_ids(since).await?;
                tracing::info!("Found {} clients changed since {}", ids.len(), since);
                (ids.len(), self.fetcher.fetch_all(&ids).await)
            }
            SyncMode::SingleClient(client_id) => (1, self.fetch_single(client_id).await?),
        };

        let entries = extract_phone_entries(&fetched.records);
        tracing::info!(
            "Extracted {} phone numbers from {} clients",
            entries.len(),
            fetched.records.len()
        );

        Ok(SyncReport {
            mode,
            client_ids_requested,
            records_fetched: fetched.records.len(),
            not_found: fetched.not_found,
            failures: fetched.failures,
            entries,
            elapsed: start.elapsed(),
        })
    }

    /// Fetch a single client outside the batch loop; errors propagate.
    async fn fetch_single(&self, client_id: ClientId) -> AgencyApiResult<BatchFetchReport> {
        let mut report = BatchFetchReport::default();

        match self.client().get_client_record(client_id).await? {
            Some(record) => report.records.push(record),
            None => {
                tracing::warn!("Client {} not found", client_id);
                report.not_found.push(client_id);
            }
        }

        Ok(report)
    }
}
