//! Batched, bounded-concurrency fetching of client records.
//!
//! Ids are fetched in fixed-size batches. Every fetch in a batch runs
//! concurrently and the batch is joined before the next one starts, with a
//! short pause in between to keep the request rate down. A failing fetch only
//! loses its own record.

use crate::client::AsyncAgencyClient;
use crate::error::AgencyApiError;
use crate::metrics::Metrics;
use crate::models::{ClientId, ClientRecord};
use futures::future::join_all;
use std::sync::Arc;
use std::time::Duration;

/// Number of client records requested concurrently.
pub const DEFAULT_BATCH_SIZE: usize = 10;

/// Pause between two consecutive batches.
pub const DEFAULT_BATCH_DELAY: Duration = Duration::from_millis(100);

/// A per-client fetch that failed and was dropped from the results.
#[derive(Debug)]
pub struct FetchFailure {
    pub client_id: ClientId,
    pub error: AgencyApiError,
}

/// How a single fetch settled.
#[derive(Debug)]
pub enum FetchOutcome {
    Fetched(ClientRecord),
    NotFound(ClientId),
    Failed(FetchFailure),
}

/// Everything a `fetch_all` call produced.
#[derive(Debug, Default)]
pub struct BatchFetchReport {
    /// Successfully fetched records, batch by batch
    pub records: Vec<ClientRecord>,

    /// Ids the API reported as unknown
    pub not_found: Vec<ClientId>,

    /// Fetches that failed and were skipped
    pub failures: Vec<FetchFailure>,

    /// Size of every batch issued, in order
    pub batch_sizes: Vec<usize>,

    /// Number of inter-batch pauses taken
    pub delays: usize,
}

/// Drives the gateway over a list of client ids.
pub struct BatchFetcher {
    client: Arc<dyn AsyncAgencyClient>,
    batch_size: usize,
    batch_delay: Duration,
    item_timeout: Option<Duration>,
    metrics: Metrics,
}

impl BatchFetcher {
    /// Create a fetcher with the default batch size and delay.
    pub fn new(client: Arc<dyn AsyncAgencyClient>) -> Self {
        Self {
            client,
            batch_size: DEFAULT_BATCH_SIZE,
            batch_delay: DEFAULT_BATCH_DELAY,
            item_timeout: None,
            metrics: Metrics::new(),
        }
    }

    /// Set the batch size. Zero is treated as one.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    pub fn with_batch_delay(mut self, batch_delay: Duration) -> Self {
        self.batch_delay = batch_delay;
        self
    }

    /// Give up on a single fetch after `timeout`; the item counts as failed.
    pub fn with_item_timeout(mut self, timeout: Duration) -> Self {
        self.item_timeout = Some(timeout);
        self
    }

    pub fn with_metrics(mut self, metrics: Metrics) -> Self {
        self.metrics = metrics;
        self
    }

    /// The gateway this fetcher drives.
    pub fn client(&self) -> &Arc<dyn AsyncAgencyClient> {
        &self.client
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Fetch the records of all `ids`.
    ///
    /// Never fails: not-found ids and failed fetches are logged and reported
    /// separately, and the remaining records are returned in batch order.
    pub async fn fetch_all(&self, ids: &[ClientId]) -> BatchFetchReport {
        let mut report = BatchFetchReport::default();
        if ids.is_empty() {
            return report;
        }

        let batch_count = ids.len().div_ceil(self.batch_size);

        for (index, batch) in ids.chunks(self.batch_size).enumerate() {
            if index > 0 {
                tokio::time::sleep(self.batch_delay).await;
                report.delays += 1;
            }

            tracing::info!(
                "Fetching batch {}/{} ({} clients)",
                index + 1,
                batch_count,
                batch.len()
            );

            let outcomes = join_all(batch.iter().map(|&id| self.fetch_one(id))).await;
            report.batch_sizes.push(batch.len());

            for outcome in outcomes {
                match outcome {
                    FetchOutcome::Fetched(record) => report.records.push(record),
                    FetchOutcome::NotFound(client_id) => {
                        tracing::warn!("Client {} not found, skipping", client_id);
                        report.not_found.push(client_id);
                    }
                    FetchOutcome::Failed(failure) => {
                        tracing::error!(
                            "Failed to fetch client {}: {}",
                            failure.client_id,
                            failure.error
                        );
                        self.metrics.record_fetch_failure();
                        report.failures.push(failure);
                    }
                }
            }
        }

        tracing::info!(
            "Fetched {} of {} clients ({} not found, {} failed)",
            report.records.len(),
            ids.len(),
            report.not_found.len(),
            report.failures.len()
        );

        report
    }

    /// Fetch one record and classify the result.
    async fn fetch_one(&self, client_id: ClientId) -> FetchOutcome {
        let fetch = self.client.get_client_record(client_id);

        let result = match self.item_timeout {
            Some(limit) => tokio::time::timeout(limit, fetch)
                .await
                .unwrap_or(Err(AgencyApiError::Timeout)),
            None => fetch.await,
        };

        match result {
            Ok(Some(record)) => FetchOutcome::Fetched(record),
            Ok(None) => FetchOutcome::NotFound(client_id),
            Err(error) => FetchOutcome::Failed(FetchFailure { client_id, error }),
        }
    }
}
