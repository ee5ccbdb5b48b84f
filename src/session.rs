//! Shopper sessions
//!
//! A session id lives in a cookie and keys per-shopper view state.

use axum::http::{header, HeaderMap, HeaderValue};
use axum::response::Response;
use uuid::Uuid;

pub const SESSION_COOKIE: &str = "storefront_session";

/// Returns the session id from the request cookie, or a fresh one.
///
/// The flag is `true` when the id was just created and needs to be set on
/// the response.
pub fn resolve_session_id(headers: &HeaderMap) -> (String, bool) {
    let existing = headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == SESSION_COOKIE && !value.is_empty())
        .map(|(_, value)| value.to_string());

    match existing {
        Some(id) => (id, false),
        None => (Uuid::new_v4().simple().to_string(), true),
    }
}

/// Sets the session cookie on `response` when the session is new.
pub fn attach_session(mut response: Response, session_id: &str, is_new: bool) -> Response {
    if is_new {
        let cookie = format!("{SESSION_COOKIE}={session_id}; Path=/; HttpOnly; SameSite=Lax");
        if let Ok(value) = HeaderValue::from_str(&cookie) {
            response.headers_mut().append(header::SET_COOKIE, value);
        }
    }
    response
}
