//! Phone number utilities

use once_cell::sync::Lazy;
use regex::Regex;

// Chinese mobile phone number regex
static CHINA_MOBILE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^1[3-9]\d{9}$").unwrap());

/// Normalize a phone number by removing common formatting characters
pub fn normalize_phone_number(phone: &str) -> String {
    phone.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Check if a phone number is a valid Chinese mobile number
pub fn is_valid_phone(phone: &str) -> bool {
    CHINA_MOBILE_REGEX.is_match(&normalize_phone_number(phone))
}

/// Last four digits of a phone number, used for default display names
pub fn last_four_digits(phone: &str) -> &str {
    if phone.len() >= 4 {
        &phone[phone.len() - 4..]
    } else {
        phone
    }
}

/// Mask a phone number for logs (e.g. 138****5678)
pub fn mask_phone_number(phone: &str) -> String {
    let normalized = normalize_phone_number(phone);
    if normalized.len() >= 7 {
        format!(
            "{}****{}",
            &normalized[0..3],
            &normalized[normalized.len() - 4..]
        )
    } else {
        "****".to_string()
    }
}
