//! Log sanitization utilities
//!
//! Response bodies for bulk domain listings can be large, and the `X-Api-Signature`
//! header carries the API key in clear text. Both go through here before being logged.

/// Maximum number of bytes of a body to include in log output.
const TRUNCATE_LIMIT: usize = 256;

/// Number of leading characters of the API key left visible in a masked signature.
const VISIBLE_KEY_CHARS: usize = 4;

fn floor_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        s.len()
    } else {
        let mut i = index;
        while i > 0 && !s.is_char_boundary(i) {
            i -= 1;
        }
        i
    }
}

/// Truncate a response body for logging.
///
/// Bodies within the limit are returned unchanged; longer ones are cut on a char boundary
/// and suffixed with the total length.
pub fn truncate_for_log(s: &str) -> String {
    if s.len() <= TRUNCATE_LIMIT {
        s.to_string()
    } else {
        format!(
            "{}... [truncated, total {} bytes]",
            &s[..floor_char_boundary(s, TRUNCATE_LIMIT)],
            s.len()
        )
    }
}

/// Mask an `X-Api-Signature` header value (`key:timestamp:signature`).
///
/// Keeps the first few characters of the key and the timestamp, hides the rest of the key
/// and the whole signature. Values that do not have three parts are masked entirely.
pub fn mask_signature(header: &str) -> String {
    let mut parts = header.splitn(3, ':');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(key), Some(timestamp), Some(_)) => {
            let visible = &key[..floor_char_boundary(key, VISIBLE_KEY_CHARS)];
            format!("{visible}***:{timestamp}:***")
        }
        _ => "***".to_string(),
    }
}
