//! Pluggable HTTP transport
//!
//! The client hands every fully built request to a [`Transport`]. The default
//! is a plain `reqwest::Client`; anything that can execute a
//! `reqwest::Request` (a client with custom TLS, proxies or timeouts, a test
//! double) can be plugged in through [`crate::client::ClientConfig`].

use async_trait::async_trait;

/// Executes a single HTTP request
///
/// Implementations must be safe to share between concurrent callers. The
/// client performs no retries; whatever error the transport returns is the
/// final outcome of the call.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send `request` and return the response head with an unread body
    ///
    /// # Errors
    ///
    /// Returns an error if the request could not be sent or no response was
    /// received (connection failure, timeout, protocol error)
    async fn send(&self, request: reqwest::Request) -> Result<reqwest::Response, reqwest::Error>;
}

#[async_trait]
impl Transport for reqwest::Client {
    async fn send(&self, request: reqwest::Request) -> Result<reqwest::Response, reqwest::Error> {
        self.execute(request).await
    }
}
