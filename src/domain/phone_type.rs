//! PhoneType value object.

use super::errors::ValidationError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// The contact type tags that identify a phone number.
///
/// Tags are matched exactly and case-sensitively; `cellphone` or `Cell Phone`
/// are not phone types.
///
/// # Example
///
/// ```
/// use agency_phone_sync::domain::PhoneType;
///
/// assert_eq!(PhoneType::from_tag("CellPhone"), Some(PhoneType::Cell));
/// assert_eq!(PhoneType::from_tag("cellphone"), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhoneType {
    Work,
    Cell,
    Home,
}

impl PhoneType {
    /// All recognized phone types.
    pub const ALL: [PhoneType; 3] = [PhoneType::Work, PhoneType::Cell, PhoneType::Home];

    /// Look up a phone type by its exact tag.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "WorkPhone" => Some(PhoneType::Work),
            "CellPhone" => Some(PhoneType::Cell),
            "HomePhone" => Some(PhoneType::Home),
            _ => None,
        }
    }

    /// The tag as it appears on the wire and in exports.
    pub fn as_tag(&self) -> &'static str {
        match self {
            PhoneType::Work => "WorkPhone",
            PhoneType::Cell => "CellPhone",
            PhoneType::Home => "HomePhone",
        }
    }
}

// Serde support - serialize as the tag string
impl Serialize for PhoneType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_tag())
    }
}

// Serde support - deserialize from the tag string with validation
impl<'de> Deserialize<'de> for PhoneType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        PhoneType::from_tag(&s)
            .ok_or_else(|| serde::de::Error::custom(ValidationError::UnknownPhoneType(s)))
    }
}

impl fmt::Display for PhoneType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}
