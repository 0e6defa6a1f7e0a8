#![warn(clippy::pedantic)]
#![warn(clippy::cargo)]
#![deny(warnings)]
#![allow(clippy::multiple_crate_versions)]

/// Version of the checkpoint client
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod client;
pub mod error;
pub mod middleware;
pub mod models;
pub mod session;
pub mod settings;

// Testing utilities - available in tests or with testing feature
#[cfg(any(test, feature = "testing"))]
pub mod testing;

/// Re-export commonly used items
pub use client::{Client, ClientConfig, Transport};
pub use error::{CheckpointError, RequestError};
pub use middleware::session_middleware;
pub use models::{Identity, IdentityEnvelope, Profile};
pub use session::ResolvedSession;
pub use settings::CheckpointSettings;
