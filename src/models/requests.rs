//! Request validation for the cache server API
//!
//! Values are taken verbatim from the request body, so only keys need checking.

/// Maximum allowed key length in bytes. Long enough for request URLs.
pub const MAX_KEY_LENGTH: usize = 2048;

/// Validates a cache key taken from the request path.
///
/// Returns an error message if validation fails, None if valid.
pub fn validate_key(key: &str) -> Option<String> {
    if key.is_empty() {
        return Some("Key cannot be empty".to_string());
    }
    if key.len() > MAX_KEY_LENGTH {
        return Some(format!(
            "Key exceeds maximum length of {} bytes",
            MAX_KEY_LENGTH
        ));
    }
    None
}
