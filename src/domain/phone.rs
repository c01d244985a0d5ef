//! Phone number normalization.

/// Normalize a raw phone string into `(DDD) DDD-DDDD`.
///
/// Every non-digit is stripped first. Ten digits are formatted directly; eleven
/// digits with a leading `1` lose the country code and are then formatted.
/// Anything else comes back exactly as it was given, untrimmed.
///
/// Absent or whitespace-only input yields `None`.
///
/// # Example
///
/// ```
/// use agency_phone_sync::domain::normalize_phone;
///
/// assert_eq!(normalize_phone(Some("503.777.7777")).as_deref(), Some("(503) 777-7777"));
/// assert_eq!(normalize_phone(Some("ext 12")).as_deref(), Some("ext 12"));
/// assert_eq!(normalize_phone(None), None);
/// ```
pub fn normalize_phone(raw: Option<&str>) -> Option<String> {
    let raw = raw?;
    if raw.trim().is_empty() {
        return None;
    }

    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();

    let national = match digits.len() {
        10 => digits.as_str(),
        11 if digits.starts_with('1') => &digits[1..],
        _ => return Some(raw.to_string()),
    };

    Some(format!(
        "({}) {}-{}",
        &national[0..3],
        &national[3..6],
        &national[6..10]
    ))
}
