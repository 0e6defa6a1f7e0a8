//! Canned Checkpoint data for tests

use serde_json::{json, Value};

use super::constants::{TEST_HOST, TEST_IDENTITY_ID, TEST_PROFILE_NAME};
use crate::client::{Client, ClientConfig};
use crate::models::{Identity, Profile};

/// Central fixture provider for test data
pub struct TestFixtures;

impl TestFixtures {
    /// Identity with the default test id
    #[must_use]
    pub fn identity() -> Identity {
        Identity::new(TEST_IDENTITY_ID)
    }

    /// Profile with the default test name
    #[must_use]
    pub fn profile() -> Profile {
        Profile::named(TEST_PROFILE_NAME)
    }

    /// `GET /identities/me` body for [`Self::identity`] and [`Self::profile`]
    #[must_use]
    pub fn identity_envelope_json() -> Value {
        json!({
            "identity": { "id": TEST_IDENTITY_ID },
            "profile": { "name": TEST_PROFILE_NAME }
        })
    }

    /// Client for `host` with default settings
    ///
    /// # Panics
    ///
    /// Panics if `host` is empty
    #[must_use]
    pub fn client_for(host: &str) -> Client {
        Client::new(ClientConfig {
            host: host.to_string(),
            ..ClientConfig::default()
        })
        .expect("test client configuration is valid")
    }

    /// Client for the default test host
    #[must_use]
    pub fn client() -> Client {
        Self::client_for(TEST_HOST)
    }
}
