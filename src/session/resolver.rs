//! Session resolution for inbound requests
//!
//! Sources are checked in a fixed order and the first usable one wins:
//!
//! 1. the `session` query parameter, when it appears exactly once and is not empty
//! 2. the `x-checkpoint-session` header, when not empty
//! 3. the `checkpoint.session` cookie, when not empty
//!
//! A session in the query string ends up in access logs and `Referer`
//! headers. The order is kept for existing callers.

use actix_web::http::header::HeaderMap;
use actix_web::HttpRequest;
use url::form_urlencoded;

use super::{SESSION_COOKIE, SESSION_HEADER, SESSION_QUERY_PARAM};

/// Find the Checkpoint session on a request
#[must_use]
pub fn session_from_request(req: &HttpRequest) -> Option<String> {
    session_from_query(req.query_string())
        .or_else(|| session_from_header(req.headers()))
        .or_else(|| session_from_cookie(req))
}

fn session_from_query(query: &str) -> Option<String> {
    let mut values = form_urlencoded::parse(query.as_bytes())
        .filter(|(key, _)| key == SESSION_QUERY_PARAM)
        .map(|(_, value)| value);

    let session = values.next()?;
    // Ambiguous when repeated
    if values.next().is_some() || session.is_empty() {
        return None;
    }
    Some(session.into_owned())
}

fn session_from_header(headers: &HeaderMap) -> Option<String> {
    headers
        .get(SESSION_HEADER)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
        .map(str::to_owned)
}

fn session_from_cookie(req: &HttpRequest) -> Option<String> {
    req.cookie(SESSION_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .filter(|value| !value.is_empty())
}
