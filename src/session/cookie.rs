//! `Set-Cookie` formatting for the Checkpoint session

use std::time::Duration;

use actix_web::http::header::SET_COOKIE;
use actix_web::HttpResponseBuilder;
use chrono::{DateTime, Utc};

use super::SESSION_COOKIE;

/// Cookie lifetime used when the caller does not pass one (365 days)
pub const DEFAULT_EXPIRY: Duration = Duration::from_secs(365 * 24 * 60 * 60);

/// RFC 822 timestamp layout (`02 Jan 06 15:04 UTC`)
pub const RFC822_FORMAT: &str = "%d %b %y %H:%M UTC";

/// Format the `Set-Cookie` value for a session expiring `expiry` from now
#[must_use]
pub fn format_set_cookie(session: &str, expiry: Option<Duration>) -> String {
    format_set_cookie_at(session, expiry, Utc::now())
}

/// Format the `Set-Cookie` value for a session expiring `expiry` after `now`
///
/// Uses [`DEFAULT_EXPIRY`] when `expiry` is `None`. An expiry too large to
/// represent is clamped to the latest representable time.
#[must_use]
pub fn format_set_cookie_at(session: &str, expiry: Option<Duration>, now: DateTime<Utc>) -> String {
    let expiry = expiry.unwrap_or(DEFAULT_EXPIRY);
    let expires = chrono::Duration::from_std(expiry)
        .ok()
        .and_then(|expiry| now.checked_add_signed(expiry))
        .unwrap_or(DateTime::<Utc>::MAX_UTC);

    format!(
        "{SESSION_COOKIE}={session}; expires={}; HttpOnly",
        expires.format(RFC822_FORMAT)
    )
}

/// Append the session `Set-Cookie` header to a response
pub fn add_response_header(
    response: &mut HttpResponseBuilder,
    session: &str,
    expiry: Option<Duration>,
) {
    response.append_header((SET_COOKIE, format_set_cookie(session, expiry)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::cookie::Cookie;
    use actix_web::HttpResponse;
    use chrono::{NaiveDateTime, TimeZone};

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 5, 14, 7, 59).unwrap()
    }

    fn expires_attribute(header: &str) -> DateTime<Utc> {
        let raw = header
            .split("; ")
            .find_map(|part| part.strip_prefix("expires="))
            .expect("expires attribute present");
        NaiveDateTime::parse_from_str(raw, RFC822_FORMAT)
            .expect("RFC 822 timestamp")
            .and_utc()
    }

    #[test]
    fn test_format_with_default_expiry() {
        let header = format_set_cookie_at("abc123", None, fixed_now());
        assert_eq!(
            header,
            "checkpoint.session=abc123; expires=05 Mar 25 14:07 UTC; HttpOnly"
        );
    }

    #[test]
    fn test_format_with_custom_expiry() {
        let header = format_set_cookie_at("abc123", Some(Duration::from_secs(3600)), fixed_now());
        assert_eq!(
            header,
            "checkpoint.session=abc123; expires=05 Mar 24 15:07 UTC; HttpOnly"
        );
    }

    #[test]
    fn test_huge_expiry_is_clamped() {
        let header = format_set_cookie_at("abc123", Some(Duration::MAX), fixed_now());
        assert!(header.starts_with("checkpoint.session=abc123; expires="));
        assert!(header.ends_with("; HttpOnly"));
    }

    #[test]
    fn test_round_trip_through_cookie_parser() {
        let before = Utc::now();
        let header = format_set_cookie("round-trip-token", None);

        let cookie = Cookie::parse(header.clone()).expect("parsable cookie");
        assert_eq!(cookie.name(), SESSION_COOKIE);
        assert_eq!(cookie.value(), "round-trip-token");
        assert_eq!(cookie.http_only(), Some(true));

        // Minute precision plus a little clock skew
        let expected = before + chrono::Duration::days(365);
        let skew = chrono::Duration::seconds(120);
        let expires = expires_attribute(&header);
        assert!(expires > expected - skew, "{expires} too early");
        assert!(expires < expected + skew, "{expires} too late");
    }

    #[test]
    fn test_add_response_header_appends() {
        let mut builder = HttpResponse::Ok();
        builder.append_header((SET_COOKIE, "other=1"));
        add_response_header(&mut builder, "abc123", None);
        let response = builder.finish();

        let cookies: Vec<_> = response
            .headers()
            .get_all(SET_COOKIE)
            .map(|value| value.to_str().unwrap().to_string())
            .collect();
        assert_eq!(cookies.len(), 2);
        assert!(cookies[1].starts_with("checkpoint.session=abc123; expires="));
        assert!(cookies[1].ends_with("; HttpOnly"));
    }
}
