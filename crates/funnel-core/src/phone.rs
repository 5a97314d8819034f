//! Phone Number Helpers

use crate::lead::COUNTRY_CODE;

/// Longest national number accepted
pub const MAX_PHONE_DIGITS: usize = 10;

/// Keep only ASCII digits, at most [`MAX_PHONE_DIGITS`] of them
pub fn normalize_phone(input: &str) -> String {
    input
        .chars()
        .filter(char::is_ascii_digit)
        .take(MAX_PHONE_DIGITS)
        .collect()
}

/// Group digits as `ddd ddd dddd`
///
/// Shorter inputs yield the groups filled so far (`333`, `333 12`).
pub fn format_phone(input: &str) -> String {
    let digits = normalize_phone(input);
    let (head, rest) = digits.split_at(digits.len().min(3));
    if rest.is_empty() {
        return head.to_string();
    }

    let (middle, tail) = rest.split_at(rest.len().min(3));
    if tail.is_empty() {
        format!("{head} {middle}")
    } else {
        format!("{head} {middle} {tail}")
    }
}

/// Attach [`COUNTRY_CODE`] unless the number is already international
pub fn with_country_code(phone: &str) -> String {
    let phone = phone.trim();
    if phone.starts_with('+') {
        phone.to_string()
    } else {
        format!("{COUNTRY_CODE}{phone}")
    }
}
