//! Data models for agency API entities and the exported phone entries.
//!
//! [`ClientRecord`] and its parts mirror the API payload; [`PhoneEntry`] is the
//! flattened output row produced by the extractor.

pub mod client;
pub mod phone_entry;

pub use client::{ClientDetails, ClientId, ClientRecord, Contact, Person};
pub use phone_entry::PhoneEntry;
