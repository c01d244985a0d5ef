//! Domain validation errors.

use std::fmt;

/// Errors that can occur during domain value object validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The contact type tag is not one of the recognized phone tags.
    UnknownPhoneType(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownPhoneType(tag) => write!(f, "Unknown phone type: {}", tag),
        }
    }
}

impl std::error::Error for ValidationError {}
