//! Response status classification

use reqwest::{Method, Response, StatusCode};

use crate::error::RequestError;

/// Recorded as the body of a failed response that carried no data
pub const NO_DATA_MARKER: &str = "[no data in response]";

/// Check whether a status code counts as success (200..=299)
#[must_use]
pub fn is_success(status: StatusCode) -> bool {
    (200..=299).contains(&status.as_u16())
}

/// Classify a response by status
///
/// A success response is handed back untouched so its body can be decoded.
/// Any other status consumes the response: the whole body is read and kept
/// in the returned [`RequestError`] together with the request line and
/// `message`.
///
/// # Errors
///
/// Returns a `RequestError` for every status outside 200..=299
pub async fn error_from_response(
    method: &Method,
    url: &url::Url,
    response: Response,
    message: &str,
) -> Result<Response, RequestError> {
    let status = response.status();
    if is_success(status) {
        return Ok(response);
    }

    let body = match response.bytes().await {
        Ok(bytes) if bytes.is_empty() => NO_DATA_MARKER.to_string(),
        Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        Err(e) => format!("[error reading response body: {e}]"),
    };

    Err(RequestError::new(
        method.clone(),
        url.as_str(),
        status,
        body,
        message,
    ))
}
