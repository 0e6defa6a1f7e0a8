//! Testing utilities for Checkpoint client users
//!
//! Helpers for building inbound requests that carry a session and canned
//! Checkpoint payloads.
//!
//! - [`fixtures`] - Identities, profiles and response bodies
//! - [`requests`] - Inbound request builder with session sources
//!
//! ## Usage
//!
//! ```rust
//! use checkpoint_client::session::session_from_request;
//! use checkpoint_client::testing::RequestBuilder;
//!
//! let req = RequestBuilder::new()
//!     .session_header("abc123")
//!     .session_cookie("ignored")
//!     .build();
//! assert_eq!(session_from_request(&req).as_deref(), Some("abc123"));
//! ```

pub mod fixtures;
pub mod requests;

pub use fixtures::TestFixtures;
pub use requests::RequestBuilder;

/// Common test constants
pub mod constants {
    /// Default test session token
    pub const TEST_SESSION: &str = "test-session-0f3c9a";

    /// Default test identity id
    pub const TEST_IDENTITY_ID: &str = "u1";

    /// Default test profile name
    pub const TEST_PROFILE_NAME: &str = "Ann";

    /// Default test Checkpoint host
    pub const TEST_HOST: &str = "checkpoint.test";
}
