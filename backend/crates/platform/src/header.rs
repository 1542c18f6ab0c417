//! Request header helpers
//!
//! Token-style headers (`x-sui-token` and friends) read from inbound requests.

use axum::http::HeaderMap;

/// Read a token header
///
/// Returns `None` when the header is absent, not visible ASCII,
/// or blank after trimming.
pub fn extract_token(headers: &HeaderMap, name: &str) -> Option<String> {
    let value = headers.get(name)?.to_str().ok()?.trim();
    if value.is_empty() {
        return None;
    }
    Some(value.to_string())
}

/// Read a token header, tolerating an optional `Bearer ` prefix
pub fn extract_bearer_token(headers: &HeaderMap, name: &str) -> Option<String> {
    let raw = extract_token(headers, name)?;
    match raw.strip_prefix("Bearer ") {
        Some(rest) if !rest.trim().is_empty() => Some(rest.trim().to_string()),
        Some(_) => None,
        None => Some(raw),
    }
}
