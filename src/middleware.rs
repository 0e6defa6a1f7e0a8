//! Session middleware for actix-web
//!
//! ```rust,ignore
//! use actix_web::{middleware::from_fn, App};
//! use checkpoint_client::middleware::session_middleware;
//!
//! let app = App::new().wrap(from_fn(session_middleware));
//! ```
//!
//! Handlers then take a [`ResolvedSession`](crate::session::ResolvedSession)
//! argument.

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::middleware::Next;
use actix_web::{Error, HttpMessage};

use crate::session::{context_with_session, session_from_request};

/// Resolve the Checkpoint session and store it for downstream handlers
///
/// Requests without a session pass through untouched.
///
/// # Errors
///
/// Returns whatever error the wrapped service returns
pub async fn session_middleware(
    req: ServiceRequest,
    next: Next<impl MessageBody>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    if let Some(session) = session_from_request(req.request()) {
        log::debug!("Resolved Checkpoint session for {}", req.path());
        context_with_session(&mut req.extensions_mut(), &session);
    }
    next.call(req).await
}
