use axum::http::header;
use axum::http::HeaderMap;

/// Extract the bearer token from an Authorization header, if any.
///
/// A missing header, a non-UTF-8 value, or a non-Bearer scheme all come
/// back as `None`; the guard treats every one of them as "no token
/// supplied" (gate 1).
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}
