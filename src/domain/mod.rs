//! Domain value objects and pure phone-number logic.
//!
//! The contact type tags the sync cares about are modeled as [`PhoneType`],
//! and [`normalize_phone`] maps raw phone strings onto a canonical display
//! format.

pub mod errors;
pub mod phone;
pub mod phone_type;

pub use errors::ValidationError;
pub use phone::normalize_phone;
pub use phone_type::PhoneType;
