//! Application service layer.
//!
//! Services hold the sync pipeline: batched fetching through the gateway,
//! phone extraction, and mode dispatch.

pub mod batch_fetcher;
pub mod phone_extractor;
pub mod sync_service;

pub use batch_fetcher::{
    BatchFetchReport, BatchFetcher, FetchFailure, FetchOutcome, DEFAULT_BATCH_DELAY,
    DEFAULT_BATCH_SIZE,
};
pub use phone_extractor::{extract_from_record, extract_phone_entries, resolve_person_name};
pub use sync_service::{PhoneSyncService, SyncMode, SyncReport};
