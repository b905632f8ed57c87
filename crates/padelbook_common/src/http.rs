// --- File: crates/padelbook_common/src/http.rs ---
//! HTTP plumbing shared by the API crate.

use reqwest::header::HeaderMap;

pub mod client;

/// Media type the backend uses for every request and structured response.
pub const JSON_MEDIA_TYPE: &str = "application/json";

/// True when the response declares a JSON body.
///
/// Matching is by substring so `application/json; charset=utf-8` counts.
pub fn is_json_response(headers: &HeaderMap) -> bool {
    headers
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|content_type| content_type.contains(JSON_MEDIA_TYPE))
}
