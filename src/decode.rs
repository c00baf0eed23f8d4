//! Best-effort payload decoding.
//!
//! Vault clients usually store passwords base64-encoded. Anything that does
//! not decode to printable UTF-8 is analyzed as-is.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use secrecy::SecretString;

/// Decodes `payload` if it is base64 of printable text, otherwise returns it unchanged.
pub fn decode_payload(payload: &str) -> SecretString {
    let text = try_decode(payload).unwrap_or_else(|| payload.to_string());
    SecretString::new(text.into())
}

fn try_decode(payload: &str) -> Option<String> {
    let bytes = STANDARD.decode(payload).ok()?;
    let text = String::from_utf8(bytes).ok()?;
    if text.is_empty() || text.chars().any(char::is_control) {
        return None;
    }
    Some(text)
}
