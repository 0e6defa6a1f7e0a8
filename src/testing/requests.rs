//! Inbound HTTP request builder for testing session resolution

use actix_web::cookie::Cookie;
use actix_web::{test, HttpRequest};

use crate::session::{SESSION_COOKIE, SESSION_HEADER};

/// Builder for creating HTTP requests for testing
pub struct RequestBuilder {
    uri: String,
    headers: Vec<(String, String)>,
    cookies: Vec<Cookie<'static>>,
}

impl Default for RequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestBuilder {
    /// Create a new request builder for `GET /`
    #[must_use]
    pub fn new() -> Self {
        Self {
            uri: "/".to_string(),
            headers: Vec::new(),
            cookies: Vec::new(),
        }
    }

    /// Set the request URI, including any query string
    #[must_use]
    pub fn uri(mut self, uri: &str) -> Self {
        self.uri = uri.to_string();
        self
    }

    /// Add a header
    #[must_use]
    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    /// Set the `x-checkpoint-session` header
    #[must_use]
    pub fn session_header(self, session: &str) -> Self {
        self.header(SESSION_HEADER, session)
    }

    /// Add a cookie to the request
    #[must_use]
    pub fn with_cookie(mut self, cookie: Cookie<'static>) -> Self {
        self.cookies.push(cookie);
        self
    }

    /// Add the `checkpoint.session` cookie
    #[must_use]
    pub fn session_cookie(self, session: &str) -> Self {
        self.with_cookie(Cookie::new(SESSION_COOKIE, session.to_string()))
    }

    /// Build the final `HttpRequest`
    #[must_use]
    pub fn build(self) -> HttpRequest {
        let mut req = test::TestRequest::default().uri(&self.uri);

        for (name, value) in self.headers {
            req = req.insert_header((name, value));
        }

        for cookie in self.cookies {
            req = req.cookie(cookie);
        }

        req.to_http_request()
    }
}
