//! Input normalisation helpers shared by the auth and workflow services.

use rand::Rng;

use crate::entities::user::Role;

pub const MOBILE_NUMBER_LEN: usize = 10;

/// Trims the value and maps blank strings to `None`.
pub fn trim_to_option(value: Option<String>) -> Option<String> {
    value.and_then(|raw| {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

pub fn normalize_email(value: Option<String>) -> Option<String> {
    trim_to_option(value).map(|email| email.to_lowercase())
}

/// Ten digits, leading digit 6 through 9.
pub fn is_mobile_number(candidate: &str) -> bool {
    let bytes = candidate.as_bytes();
    bytes.len() == MOBILE_NUMBER_LEN
        && matches!(bytes[0], b'6'..=b'9')
        && bytes.iter().all(u8::is_ascii_digit)
}

/// Role name followed by three digits and one lowercase letter, e.g.
/// `wholesaler042k`.
pub fn generate_username<R: Rng + ?Sized>(role: Role, rng: &mut R) -> String {
    let digits: u16 = rng.gen_range(0..1000);
    let letter = char::from(b'a' + rng.gen_range(0..26u8));
    format!("{}{digits:03}{letter}", role.as_str())
}
