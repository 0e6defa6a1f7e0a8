//! Session token plumbing for inbound requests
//!
//! This module finds the Checkpoint session on requests reaching an actix-web
//! application and hands it to handlers, and formats the cookie that gives a
//! browser its session.
//!
//! # Modules
//!
//! - [`resolver`] - Pick the active session from query, header or cookie
//! - [`context`] - Store the resolved session in request extensions
//! - [`cookie`] - `Set-Cookie` formatting

pub mod context;
pub mod cookie;
pub mod resolver;

/// Cookie carrying the session, both inbound and towards Checkpoint
pub const SESSION_COOKIE: &str = "checkpoint.session";

/// Header that overrides the session cookie
pub const SESSION_HEADER: &str = "x-checkpoint-session";

/// Query parameter that overrides header and cookie
pub const SESSION_QUERY_PARAM: &str = "session";

// Re-export commonly used items for convenience
pub use context::{context_with_session, session_from_context, ResolvedSession};
pub use cookie::{add_response_header, format_set_cookie, format_set_cookie_at, DEFAULT_EXPIRY};
pub use resolver::session_from_request;
