//! Error types for the Checkpoint client
//!
//! Every fallible client operation returns [`CheckpointError`]. Non-2xx
//! responses are carried by [`RequestError`], which keeps the request line,
//! the status and the response body so a failure can be diagnosed without
//! querying the service again.

use std::borrow::Cow;
use std::fmt;

use reqwest::{Method, StatusCode};

/// Number of body characters shown when a `RequestError` is displayed
pub const BODY_SNIPPET_LIMIT: usize = 500;

/// Errors returned by the Checkpoint client
#[derive(Debug, thiserror::Error)]
pub enum CheckpointError {
    /// The client configuration was rejected
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The request URL could not be parsed
    #[error("invalid request URL {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// Network, timeout or protocol failure reported by the transport
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    /// The service answered with a status outside 200..=299
    #[error(transparent)]
    Status(#[from] Box<RequestError>),

    /// A non-empty response carried no Content-Type header
    #[error("expected response to be JSON, received bytes")]
    ContentTypeMissing,

    /// The Content-Type header is not a valid media type
    #[error("invalid content type {content_type:?}: {source}")]
    ContentTypeInvalid {
        content_type: String,
        #[source]
        source: MediaTypeError,
    },

    /// The response media type is not `application/json`
    #[error("expected response to be JSON, got {media_type:?}")]
    ContentTypeMismatch { media_type: String },

    /// The response body could not be read to the end
    #[error("could not read entire response: {0}")]
    BodyRead(#[source] reqwest::Error),

    /// The response body is not the expected JSON document
    #[error("could not decode response JSON ({bytes} bytes): {source}")]
    Decode {
        bytes: usize,
        #[source]
        source: serde_json::Error,
    },
}

impl CheckpointError {
    /// HTTP status of a `Status` error
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status(err) => Some(err.status()),
            _ => None,
        }
    }

    /// Check whether this error is a `Status` error with the given code
    #[must_use]
    pub fn is_status(&self, status: StatusCode) -> bool {
        self.status() == Some(status)
    }
}

impl From<RequestError> for CheckpointError {
    fn from(err: RequestError) -> Self {
        Self::Status(Box::new(err))
    }
}

/// A request that completed with a non-success status
#[derive(Debug, Clone)]
pub struct RequestError {
    method: Method,
    url: String,
    status: StatusCode,
    body: String,
    message: String,
}

impl RequestError {
    #[must_use]
    pub fn new(
        method: Method,
        url: impl Into<String>,
        status: StatusCode,
        body: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            method,
            url: url.into(),
            status,
            body: body.into(),
            message: message.into(),
        }
    }

    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Canonical reason phrase of the status code
    #[must_use]
    pub fn status_text(&self) -> &'static str {
        self.status.canonical_reason().unwrap_or("Unknown Status")
    }

    /// Full response body, or a bracketed marker when none could be read
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Body cut to [`BODY_SNIPPET_LIMIT`] characters with a count of the omitted bytes
    #[must_use]
    pub fn body_snippet(&self) -> Cow<'_, str> {
        match self.body.char_indices().nth(BODY_SNIPPET_LIMIT) {
            Some((cut, _)) => Cow::Owned(format!(
                "{}... [{} more bytes]",
                &self.body[..cut],
                self.body.len() - cut
            )),
            None => Cow::Borrowed(&self.body),
        }
    }
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: Request [{} {}] failed with status {} ({}): {}",
            self.message,
            self.method,
            self.url,
            self.status.as_u16(),
            self.status_text(),
            self.body_snippet()
        )
    }
}

impl std::error::Error for RequestError {}

/// Reasons a Content-Type value is not a valid media type
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MediaTypeError {
    #[error("no media type")]
    MissingType,
    #[error("expected slash after first token")]
    MissingSlash,
    #[error("expected token after slash")]
    MissingSubtype,
    #[error("unexpected content after media subtype")]
    TrailingContent,
    #[error("invalid media parameter {0:?}")]
    InvalidParameter(String),
    #[error("duplicate parameter name {0:?}")]
    DuplicateParameter(String),
    #[error("header value is not visible ASCII")]
    NotVisibleAscii,
}
