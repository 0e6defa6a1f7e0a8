//! JSON response decoding
//!
//! Decodes a successful response body into a typed value after checking that
//! the service actually sent JSON. A body known to be empty is not an error:
//! it decodes to `None`.

use reqwest::header::CONTENT_TYPE;
use reqwest::Response;
use serde::de::DeserializeOwned;

use crate::error::{CheckpointError, MediaTypeError};

/// The only media type accepted for response bodies
pub const JSON_MEDIA_TYPE: &str = "application/json";

/// Decode a response body as JSON
///
/// # Errors
///
/// Returns an error if:
/// - The body is non-empty and no Content-Type header is present
/// - The Content-Type header is not a valid media type
/// - The media type is not `application/json` (parameters are ignored)
/// - The body cannot be read
/// - The body is not valid JSON for `T`
pub async fn decode_response_as_json<T: DeserializeOwned>(
    response: Response,
) -> Result<Option<T>, CheckpointError> {
    if response.content_length() == Some(0) {
        return Ok(None);
    }

    let content_type = match response.headers().get(CONTENT_TYPE) {
        None => return Err(CheckpointError::ContentTypeMissing),
        Some(value) => value.to_str().map_err(|_| CheckpointError::ContentTypeInvalid {
            content_type: String::from_utf8_lossy(value.as_bytes()).into_owned(),
            source: MediaTypeError::NotVisibleAscii,
        })?,
    };
    if content_type.trim().is_empty() {
        return Err(CheckpointError::ContentTypeMissing);
    }

    let media_type =
        parse_media_type(content_type).map_err(|source| CheckpointError::ContentTypeInvalid {
            content_type: content_type.to_string(),
            source,
        })?;
    if media_type.essence() != JSON_MEDIA_TYPE {
        return Err(CheckpointError::ContentTypeMismatch {
            media_type: media_type.essence().to_string(),
        });
    }

    let bytes = response.bytes().await.map_err(CheckpointError::BodyRead)?;
    serde_json::from_slice(&bytes)
        .map(Some)
        .map_err(|source| CheckpointError::Decode {
            bytes: bytes.len(),
            source,
        })
}

/// A parsed media type such as `application/json; charset=utf-8`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaType {
    essence: String,
    parameters: Vec<(String, String)>,
}

impl MediaType {
    /// Lowercased `type/subtype` without parameters
    #[must_use]
    pub fn essence(&self) -> &str {
        &self.essence
    }

    /// Value of a parameter, looked up case-insensitively
    #[must_use]
    pub fn parameter(&self, name: &str) -> Option<&str> {
        self.parameters
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Parse a Content-Type value into a [`MediaType`]
///
/// Accepts `type "/" subtype *( ";" name "=" value )` where names are tokens
/// and values are tokens or quoted strings. A bare `type` token is accepted
/// too. Trailing semicolons are allowed; repeated parameter names are not.
///
/// # Errors
///
/// Returns a [`MediaTypeError`] describing the first malformed part
pub fn parse_media_type(value: &str) -> Result<MediaType, MediaTypeError> {
    let main_end = value.find(';').unwrap_or(value.len());
    let main = value[..main_end].trim();

    let (kind, rest) = consume_token(main);
    if kind.is_empty() {
        return Err(MediaTypeError::MissingType);
    }
    // A lone token such as `json` is accepted as the whole media type
    let essence = if rest.is_empty() {
        kind.to_ascii_lowercase()
    } else {
        let Some(rest) = rest.strip_prefix('/') else {
            return Err(MediaTypeError::MissingSlash);
        };
        let (subtype, rest) = consume_token(rest);
        if subtype.is_empty() {
            return Err(MediaTypeError::MissingSubtype);
        }
        if !rest.trim().is_empty() {
            return Err(MediaTypeError::TrailingContent);
        }
        format!("{}/{}", kind.to_ascii_lowercase(), subtype.to_ascii_lowercase())
    };

    let mut parameters = Vec::new();
    let mut rest = &value[main_end..];
    loop {
        rest = rest.trim_start();
        if rest.is_empty() {
            break;
        }
        let Some(segment) = rest.strip_prefix(';') else {
            return Err(MediaTypeError::TrailingContent);
        };
        let segment = segment.trim_start();
        if segment.is_empty() {
            break;
        }

        let (name, after) = consume_token(segment);
        if name.is_empty() {
            return Err(MediaTypeError::InvalidParameter(segment.to_string()));
        }
        let Some(after) = after.trim_start().strip_prefix('=') else {
            return Err(MediaTypeError::InvalidParameter(name.to_string()));
        };
        let Some((parameter, after)) = consume_value(after.trim_start()) else {
            return Err(MediaTypeError::InvalidParameter(name.to_string()));
        };

        let name = name.to_ascii_lowercase();
        if parameters.iter().any(|(key, _)| *key == name) {
            return Err(MediaTypeError::DuplicateParameter(name));
        }
        parameters.push((name, parameter));
        rest = after;
    }

    Ok(MediaType { essence, parameters })
}

// RFC 7230 tchar
fn is_token_char(c: char) -> bool {
    c.is_ascii_graphic() && !"()<>@,;:\\\"/[]?={}".contains(c)
}

fn consume_token(s: &str) -> (&str, &str) {
    let end = s.find(|c: char| !is_token_char(c)).unwrap_or(s.len());
    s.split_at(end)
}

fn consume_value(s: &str) -> Option<(String, &str)> {
    let Some(quoted) = s.strip_prefix('"') else {
        let (token, rest) = consume_token(s);
        return (!token.is_empty()).then(|| (token.to_string(), rest));
    };

    let mut value = String::new();
    let mut chars = quoted.char_indices();
    while let Some((i, c)) = chars.next() {
        match c {
            '"' => return Some((value, &quoted[i + 1..])),
            '\\' => value.push(chars.next()?.1),
            _ => value.push(c),
        }
    }
    // unterminated quoted-string
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Payload {
        id: String,
    }

    fn response(content_type: Option<&str>, body: &'static str) -> Response {
        let mut builder = http::Response::builder().status(200);
        if let Some(content_type) = content_type {
            builder = builder.header("content-type", content_type);
        }
        Response::from(builder.body(body).unwrap())
    }

    #[tokio::test]
    async fn test_decodes_json_body() {
        let decoded: Option<Payload> =
            decode_response_as_json(response(Some("application/json"), r#"{"id":"u1"}"#))
                .await
                .unwrap();
        assert_eq!(decoded, Some(Payload { id: "u1".to_string() }));
    }

    #[tokio::test]
    async fn test_ignores_media_type_parameters() {
        let decoded: Option<Payload> = decode_response_as_json(response(
            Some("Application/JSON; charset=utf-8"),
            r#"{"id":"u2"}"#,
        ))
        .await
        .unwrap();
        assert_eq!(decoded, Some(Payload { id: "u2".to_string() }));
    }

    #[tokio::test]
    async fn test_empty_body_without_content_type_is_none() {
        let decoded: Option<Payload> = decode_response_as_json(response(None, ""))
            .await
            .unwrap();
        assert_eq!(decoded, None);
    }

    #[tokio::test]
    async fn test_empty_body_with_other_content_type_is_none() {
        let decoded: Option<Payload> = decode_response_as_json(response(Some("text/html"), ""))
            .await
            .unwrap();
        assert_eq!(decoded, None);
    }

    #[tokio::test]
    async fn test_missing_content_type() {
        let err = decode_response_as_json::<Payload>(response(None, r#"{"id":"u1"}"#))
            .await
            .unwrap_err();
        assert!(matches!(err, CheckpointError::ContentTypeMissing));
    }

    #[tokio::test]
    async fn test_invalid_content_type() {
        let err = decode_response_as_json::<Payload>(response(
            Some("application/json extra"),
            r#"{"id":"u1"}"#,
        ))
        .await
        .unwrap_err();
        match err {
            CheckpointError::ContentTypeInvalid { content_type, source } => {
                assert_eq!(content_type, "application/json extra");
                assert_eq!(source, MediaTypeError::TrailingContent);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_bare_token_content_type_is_a_mismatch() {
        let err = decode_response_as_json::<Payload>(response(Some("JSON"), r#"{"id":"u1"}"#))
            .await
            .unwrap_err();
        match err {
            CheckpointError::ContentTypeMismatch { media_type } => assert_eq!(media_type, "json"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_duplicate_parameter_is_invalid() {
        let err = decode_response_as_json::<Payload>(response(
            Some("application/json; charset=a; Charset=b"),
            r#"{"id":"u1"}"#,
        ))
        .await
        .unwrap_err();
        match err {
            CheckpointError::ContentTypeInvalid { source, .. } => {
                assert_eq!(source, MediaTypeError::DuplicateParameter("charset".to_string()));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_content_type_mismatch_names_received_type() {
        let err = decode_response_as_json::<Payload>(response(
            Some("text/html; charset=utf-8"),
            "<html></html>",
        ))
        .await
        .unwrap_err();
        match err {
            CheckpointError::ContentTypeMismatch { media_type } => assert_eq!(media_type, "text/html"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_malformed_json_keeps_byte_count() {
        let err = decode_response_as_json::<Payload>(response(Some("application/json"), "{\"id\":"))
            .await
            .unwrap_err();
        match err {
            CheckpointError::Decode { bytes, .. } => assert_eq!(bytes, 6),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_media_type_with_parameters() {
        let media_type =
            parse_media_type(r#"application/json; charset="utf-8"; Profile=identity"#).unwrap();
        assert_eq!(media_type.essence(), "application/json");
        assert_eq!(media_type.parameter("charset"), Some("utf-8"));
        assert_eq!(media_type.parameter("profile"), Some("identity"));
        assert_eq!(media_type.parameter("boundary"), None);
    }

    #[test]
    fn test_parse_media_type_quoted_escapes() {
        let media_type = parse_media_type(r#"text/plain; title="a \"b\"; c""#).unwrap();
        assert_eq!(media_type.parameter("title"), Some(r#"a "b"; c"#));
    }

    #[test]
    fn test_parse_media_type_bare_token() {
        let media_type = parse_media_type("Json; charset=utf-8").unwrap();
        assert_eq!(media_type.essence(), "json");
        assert_eq!(media_type.parameter("charset"), Some("utf-8"));
    }

    #[test]
    fn test_parse_media_type_trailing_semicolon() {
        let media_type = parse_media_type("application/json;").unwrap();
        assert_eq!(media_type.essence(), "application/json");
    }

    #[test]
    fn test_parse_media_type_errors() {
        assert_eq!(parse_media_type(""), Err(MediaTypeError::MissingType));
        assert_eq!(parse_media_type("/json"), Err(MediaTypeError::MissingType));
        assert_eq!(parse_media_type("application json"), Err(MediaTypeError::MissingSlash));
        assert_eq!(parse_media_type("application/"), Err(MediaTypeError::MissingSubtype));
        assert_eq!(
            parse_media_type("application/json extra"),
            Err(MediaTypeError::TrailingContent)
        );
        assert_eq!(
            parse_media_type("application/json; charset"),
            Err(MediaTypeError::InvalidParameter("charset".to_string()))
        );
        assert_eq!(
            parse_media_type(r#"application/json; charset="utf-8"#),
            Err(MediaTypeError::InvalidParameter("charset".to_string()))
        );
    }
}
