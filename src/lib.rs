//! Agency Phone Sync - pulls client phone numbers out of an agency-management API.
//!
//! The sync lists client ids (all of them, or those changed since a point in
//! time), fetches each client's detail record in paced concurrent batches,
//! extracts and normalizes the phone contacts, and writes them to JSON or CSV.
//!
//! # Architecture
//!
//! - **models**: API payload types and the exported phone entry
//! - **domain**: Phone type tags and phone number normalization
//! - **error**: Custom error types for precise error handling
//! - **config**: Configuration management from environment variables
//! - **client**: HTTP gateway to the agency API (sync client plus async wrapper)
//! - **services**: Batch fetching, phone extraction, and mode dispatch
//! - **export**: JSON and CSV writers
//! - **metrics**: Request and fetch counters for the run summary

pub mod client;
pub mod config;
pub mod domain;
pub mod error;
pub mod export;
pub mod metrics;
pub mod models;
pub mod services;

pub use client::{AgencyClient, AsyncAgencyClient, AsyncAgencyClientImpl};
pub use config::Config;
pub use domain::{normalize_phone, PhoneType};
pub use error::{AgencyApiError, ConfigError, ExportError};
pub use export::{export_entries, ExportFormat};
pub use metrics::{Metrics, MetricsSummary};
pub use models::{ClientId, ClientRecord, Contact, Person, PhoneEntry};
pub use services::{BatchFetcher, PhoneSyncService, SyncMode, SyncReport};
