//! Client detail record as returned by the agency API.
//!
//! The API speaks PascalCase JSON. Identifiers show up as either numbers or
//! strings depending on the endpoint version, so they are normalized to
//! strings on the way in.

use chrono::{DateTime, FixedOffset, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Identifier of a client in the remote system.
pub type ClientId = i64;

/// Treat an explicit `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accept a string or a number and keep it as a string.
fn id_to_string(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        other => Some(other.to_string()),
    }
}

fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(id_to_string(Value::deserialize(deserializer)?).unwrap_or_default())
}

fn deserialize_optional_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(id_to_string(Value::deserialize(deserializer)?))
}

/// Parse a modification timestamp.
///
/// RFC 3339 values keep their own offset. Offset-less values are read as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<FixedOffset>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts);
    }

    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .map(|naive| naive.and_utc().fixed_offset())
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<FixedOffset>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => parse_timestamp(&s)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {}", s))),
    }
}

/// Full detail payload for one client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default, rename_all = "PascalCase")]
pub struct ClientRecord {
    /// Client identifier (set from the requested id after decoding)
    #[serde(alias = "ClientId")]
    pub id: ClientId,

    /// Client-level profile data, when the API includes it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<ClientDetails>,

    /// People attached to the client (the client themselves, family, caregivers)
    #[serde(deserialize_with = "null_as_default")]
    pub people: Vec<Person>,

    /// Contact entries: phones, emails, addresses
    #[serde(deserialize_with = "null_as_default")]
    pub contacts: Vec<Contact>,
}

impl ClientRecord {
    /// Find the first person with the given id.
    pub fn find_person(&self, person_id: &str) -> Option<&Person> {
        self.people.iter().find(|p| p.id == person_id)
    }
}

/// Client-level profile data.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default, rename_all = "PascalCase")]
pub struct ClientDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// Any other properties the API sends
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// A person attached to a client record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default, rename_all = "PascalCase")]
pub struct Person {
    /// Person identifier, referenced by `Contact::person_id`
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,

    /// Relationship to the client (e.g. "Self", "Daughter")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relationship: Option<String>,
}

impl Person {
    /// First and last name joined by a single space, skipping blank parts.
    ///
    /// Returns `None` when both parts are blank.
    pub fn display_name(&self) -> Option<String> {
        let parts: Vec<&str> = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect();

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" "))
        }
    }
}

/// A single contact entry on a client record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default, rename_all = "PascalCase")]
pub struct Contact {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,

    /// Free-form type tag, e.g. "CellPhone" or "Email"
    #[serde(rename = "Type", deserialize_with = "null_as_default")]
    pub contact_type: String,

    /// Person this contact belongs to; absent for client-level contacts
    #[serde(
        deserialize_with = "deserialize_optional_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub person_id: Option<String>,

    /// Raw contact value as entered in the agency system
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,

    #[serde(deserialize_with = "null_as_default")]
    pub priority: i32,

    #[serde(
        deserialize_with = "deserialize_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub modified: Option<DateTime<FixedOffset>>,
}

impl Contact {
    /// Convenience constructor used when building records by hand.
    pub fn new(contact_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            contact_type: contact_type.into(),
            data: Some(data.into()),
            ..Default::default()
        }
    }
}
