//! Phone entry model, one row of the export.

use crate::domain::PhoneType;
use crate::models::ClientId;
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// A phone number extracted from a client record.
///
/// `person_name` is only set when `person_id` resolves to a person with a
/// non-blank first or last name; otherwise the number belongs to the client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PhoneEntry {
    /// Client the number was found on
    pub client_number: ClientId,

    /// Normalized number, or the raw value when it could not be normalized
    pub phone_number: Option<String>,

    pub phone_type: PhoneType,

    pub person_id: Option<String>,

    /// "First Last" of the referenced person
    pub person_name: Option<String>,

    pub priority: i32,

    /// Contact modification time, in the offset the API reported
    pub last_modified: Option<DateTime<FixedOffset>>,
}

impl PhoneEntry {
    /// True when the number is attributed to a named person rather than the client.
    pub fn is_person_level(&self) -> bool {
        self.person_name.is_some()
    }
}
