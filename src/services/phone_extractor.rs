//! Extraction of phone entries from client records.

use crate::domain::{normalize_phone, PhoneType};
use crate::models::{ClientRecord, Contact, PhoneEntry};

/// Flatten the phone contacts of every record into phone entries.
///
/// Output follows record order, then contact order within a record.
pub fn extract_phone_entries(records: &[ClientRecord]) -> Vec<PhoneEntry> {
    records.iter().flat_map(extract_from_record).collect()
}

/// Phone entries of a single record.
pub fn extract_from_record(record: &ClientRecord) -> Vec<PhoneEntry> {
    record
        .contacts
        .iter()
        .filter_map(|contact| {
            let phone_type = phone_type_of(contact)?;

            Some(PhoneEntry {
                client_number: record.id,
                phone_number: normalize_phone(contact.data.as_deref()),
                phone_type,
                person_id: contact.person_id.clone(),
                person_name: resolve_person_name(record, contact.person_id.as_deref()),
                priority: contact.priority,
                last_modified: contact.modified,
            })
        })
        .collect()
}

/// The phone type of a contact that carries a usable number.
fn phone_type_of(contact: &Contact) -> Option<PhoneType> {
    let phone_type = PhoneType::from_tag(&contact.contact_type)?;
    let has_data = contact
        .data
        .as_deref()
        .is_some_and(|data| !data.trim().is_empty());

    has_data.then_some(phone_type)
}

/// Display name of the person a contact points at, if any.
///
/// The first person with a matching id wins.
pub fn resolve_person_name(record: &ClientRecord, person_id: Option<&str>) -> Option<String> {
    let person_id = person_id.filter(|id| !id.is_empty())?;
    record.find_person(person_id)?.display_name()
}
