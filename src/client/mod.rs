//! Checkpoint identity client
//!
//! [`Client`] performs authenticated GETs against the Checkpoint API. Each
//! call goes through the same pipeline:
//!
//! - [`url`] builds the request URL under `/api/checkpoint/v1`
//! - [`transport`] sends the request
//! - [`response`] classifies the status and turns failures into errors
//! - [`decode`] decodes successful JSON bodies
//!
//! An access-log record is written for every response, success or not.

pub mod decode;
pub mod response;
pub mod transport;
pub mod url;

pub use decode::{decode_response_as_json, parse_media_type, MediaType};
pub use response::{error_from_response, is_success};
pub use transport::Transport;
pub use self::url::{build_url, API_BASE_PATH};

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use reqwest::header::{HeaderValue, ACCEPT, COOKIE};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;

use crate::error::CheckpointError;
use crate::models::{Identity, IdentityEnvelope, Profile};
use crate::session::SESSION_COOKIE;
use crate::settings::ClientSettings;

/// Resource describing the caller's own identity
pub const IDENTITY_PATH: &str = "/identities/me";

/// Service name used in error messages
pub const SERVICE_NAME: &str = "Checkpoint";

/// Default `log` target for access records
pub const DEFAULT_LOG_TARGET: &str = "checkpoint";

/// Client construction parameters
///
/// Every field is public; start from `ClientConfig::default()` and override
/// what is needed. The configuration is checked by [`Client::new`].
#[derive(Clone)]
pub struct ClientConfig {
    /// Executes requests; shared by clients derived with [`Client::with_session`]
    pub transport: Arc<dyn Transport>,
    /// `http` or `https`
    pub scheme: String,
    /// Host with optional port, e.g. `checkpoint.example.com:8080`
    pub host: String,
    /// Session token sent as the `checkpoint.session` cookie
    pub session: Option<String>,
    /// `log` target for access records
    pub log_target: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            transport: Arc::new(reqwest::Client::new()),
            scheme: "http".to_string(),
            host: String::new(),
            session: None,
            log_target: DEFAULT_LOG_TARGET.to_string(),
        }
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("scheme", &self.scheme)
            .field("host", &self.host)
            .field("session", &self.session.as_ref().map(|_| "<redacted>"))
            .field("log_target", &self.log_target)
            .finish_non_exhaustive()
    }
}

impl ClientConfig {
    /// Build a configuration from loaded settings
    ///
    /// A non-zero `timeout_seconds` is applied to the underlying `reqwest`
    /// client as a whole-request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed
    pub fn from_settings(settings: &ClientSettings) -> Result<Self, CheckpointError> {
        let mut builder = reqwest::Client::builder();
        if settings.timeout_seconds > 0 {
            builder = builder.timeout(Duration::from_secs(settings.timeout_seconds));
        }

        Ok(Self {
            transport: Arc::new(builder.build()?),
            scheme: settings.scheme.clone(),
            host: settings.host.clone(),
            session: settings.session.clone(),
            ..Self::default()
        })
    }
}

/// Client for the Checkpoint identity service
///
/// Cheap to clone and safe to share between tasks; it holds no mutable state.
#[derive(Clone, Debug)]
pub struct Client {
    config: ClientConfig,
}

impl Client {
    /// Create a client from a configuration
    ///
    /// An empty session is treated as no session.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The scheme is not `http` or `https`
    /// - The host is empty
    pub fn new(mut config: ClientConfig) -> Result<Self, CheckpointError> {
        if !matches!(config.scheme.as_str(), "http" | "https") {
            return Err(CheckpointError::Configuration(format!(
                "unsupported scheme {:?}, expected \"http\" or \"https\"",
                config.scheme
            )));
        }
        if config.host.trim().is_empty() {
            return Err(CheckpointError::Configuration(
                "Checkpoint host is not configured".to_string(),
            ));
        }
        config.session = config.session.filter(|session| !session.is_empty());

        Ok(Self { config })
    }

    /// Copy of this client that sends a different session
    ///
    /// The transport is shared with `self`; nothing else is.
    #[must_use]
    pub fn with_session(&self, session: impl Into<String>) -> Self {
        let session = session.into();
        let mut config = self.config.clone();
        config.session = (!session.is_empty()).then_some(session);
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    #[must_use]
    pub fn session(&self) -> Option<&str> {
        self.config.session.as_deref()
    }

    /// Full URL of an API resource
    #[must_use]
    pub fn url_for(&self, path: &str, query: &[(&str, &str)]) -> String {
        build_url(
            &self.config.scheme,
            &self.config.host,
            API_BASE_PATH,
            path,
            query,
        )
    }

    /// Fetch the identity behind the current session
    ///
    /// Returns `Ok(None)` when Checkpoint answers 412 Precondition Failed,
    /// meaning there is no authenticated identity for the session.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the service answers with any
    /// other non-2xx status, or the body cannot be decoded
    pub async fn get_current_identity(&self) -> Result<Option<Identity>, CheckpointError> {
        Ok(self.get_current_user().await?.0)
    }

    /// Fetch the identity and profile behind the current session
    ///
    /// Returns `Ok((None, None))` when Checkpoint answers 412 Precondition
    /// Failed.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the service answers with any
    /// other non-2xx status, or the body cannot be decoded
    pub async fn get_current_user(
        &self,
    ) -> Result<(Option<Identity>, Option<Profile>), CheckpointError> {
        match self.get::<IdentityEnvelope>(IDENTITY_PATH, &[]).await {
            Ok(envelope) => {
                let envelope = envelope.unwrap_or_default();
                Ok((envelope.identity, envelope.profile))
            }
            Err(e) if e.is_status(StatusCode::PRECONDITION_FAILED) => Ok((None, None)),
            Err(e) => Err(e),
        }
    }

    /// GET an API resource and decode its JSON body
    ///
    /// `Ok(None)` means the service answered with an empty body.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The request URL is malformed
    /// - The transport fails (including timeouts)
    /// - The response status is outside 200..=299
    /// - The body is not JSON or cannot be decoded into `T`
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<Option<T>, CheckpointError> {
        let request = self.new_request(Method::GET, path, query)?;
        let method = request.method().clone();
        let url = request.url().clone();

        let started = Instant::now();
        let response = self.config.transport.send(request).await?;
        self.log_access(&method, &url, started.elapsed(), response.status());

        let response = error_from_response(&method, &url, response, SERVICE_NAME).await?;
        decode_response_as_json(response).await
    }

    fn new_request(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<reqwest::Request, CheckpointError> {
        let raw = self.url_for(path, query);
        let url = ::url::Url::parse(&raw)
            .map_err(|source| CheckpointError::InvalidUrl { url: raw, source })?;

        let mut request = reqwest::Request::new(method, url);
        let headers = request.headers_mut();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(session) = self.session() {
            let cookie = HeaderValue::from_str(&format!("{SESSION_COOKIE}={session}"))
                .map_err(|e| {
                    CheckpointError::Configuration(format!(
                        "session is not a valid cookie value: {e}"
                    ))
                })?;
            headers.insert(COOKIE, cookie);
        }

        Ok(request)
    }

    fn log_access(&self, method: &Method, url: &::url::Url, elapsed: Duration, status: StatusCode) {
        let seconds = elapsed.as_secs_f64();
        let service = format!("{}://{}", self.config.scheme, self.config.host);
        log::info!(
            target: self.config.log_target.as_str(),
            method = method.as_str(),
            url = url.as_str(),
            time = seconds,
            status = status.as_u16(),
            service = service.as_str();
            "{method} {url} status={} time={seconds:.3}s",
            status.as_u16()
        );
    }
}
