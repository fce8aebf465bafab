//! Total normalizers for phone numbers, postal codes and person names.
//!
//! None of these functions can fail: malformed input degrades to an empty
//! string (or empty name parts) so a bad cell never aborts a table.

fn digits_only(raw: &str) -> String {
    raw.chars().filter(|ch| ch.is_ascii_digit()).collect()
}

/// Canonicalizes a US phone number to exactly 10 digits, or returns `""`.
///
/// An 11-digit number with a leading country code `1` loses the `1`.
pub fn clean_phone(raw: &str) -> String {
    let digits = digits_only(raw);
    let digits = match digits.strip_prefix('1') {
        Some(rest) if digits.len() == 11 => rest,
        _ => digits.as_str(),
    };
    if digits.len() == 10 {
        digits.to_string()
    } else {
        String::new()
    }
}

/// Returns true when `raw` carries 10 digits, or 11 digits starting with `1`.
pub fn is_valid_phone(raw: &str) -> bool {
    let digits = digits_only(raw);
    match digits.len() {
        10 => true,
        11 => digits.starts_with('1'),
        _ => false,
    }
}

/// Reduces a postal code to its 5-digit form.
///
/// Anything after the first `.` is discarded (float artifacts such as
/// `90210.0`). Ten or more digits look like a phone number typed into the
/// wrong field and yield `""`.
pub fn clean_zip(raw: &str) -> String {
    let integral = raw.split('.').next().unwrap_or_default();
    let digits = digits_only(integral);
    if digits.len() >= 10 {
        return String::new();
    }
    digits.chars().take(5).collect()
}

/// Splits a full name on its first whitespace run.
pub fn split_full_name(value: &str) -> (String, String) {
    let trimmed = value.trim();
    match trimmed.split_once(char::is_whitespace) {
        Some((first, last)) => (first.to_string(), last.trim().to_string()),
        None => (trimmed.to_string(), String::new()),
    }
}
