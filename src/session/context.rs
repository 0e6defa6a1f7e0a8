//! Request-scoped session storage
//!
//! The session middleware stores what it resolved in the request extensions.
//! Handlers take [`ResolvedSession`] as an argument instead of looking the
//! value up themselves.

use std::future::{ready, Ready};

use actix_web::dev::{Extensions, Payload};
use actix_web::{FromRequest, HttpMessage, HttpRequest};

/// Session resolved for the current request, if any
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedSession(Option<String>);

impl ResolvedSession {
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.0.as_deref()
    }

    #[must_use]
    pub fn into_inner(self) -> Option<String> {
        self.0
    }
}

/// Store `session` in the request extensions
///
/// An empty session is stored as absent.
pub fn context_with_session(extensions: &mut Extensions, session: &str) {
    let session = (!session.is_empty()).then(|| session.to_owned());
    extensions.insert(ResolvedSession(session));
}

/// Read the session stored by [`context_with_session`]
///
/// Never stored, stored as absent and stored empty all read as `None`.
#[must_use]
pub fn session_from_context(extensions: &Extensions) -> Option<String> {
    extensions
        .get::<ResolvedSession>()
        .and_then(|resolved| resolved.0.clone())
        .filter(|session| !session.is_empty())
}

impl FromRequest for ResolvedSession {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(Self(session_from_context(&req.extensions()))))
    }
}
