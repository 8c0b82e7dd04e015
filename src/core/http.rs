//! HTTP helpers for backend and MLB Stats API communication

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};

/// Headers sent with every request.
pub fn default_headers() -> HeaderMap {
    let mut h = HeaderMap::new();
    h.insert(ACCEPT, HeaderValue::from_static("application/json"));
    h.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    h
}

/// Absolute endpoints (the MLB Stats API) pass through; everything else is
/// relative to the backend base URL.
pub fn resolve_url(base_url: &str, endpoint: &str) -> String {
    if endpoint.starts_with("http") {
        endpoint.to_string()
    } else {
        format!("{}{}", base_url.trim_end_matches('/'), endpoint)
    }
}

/// Key under which a GET response is cached and de-duplicated.
pub fn cache_key(endpoint: &str) -> String {
    format!("GET:{endpoint}")
}
