//! Request URL construction

use url::form_urlencoded;

/// Path prefix shared by every Checkpoint API resource
pub const API_BASE_PATH: &str = "/api/checkpoint/v1";

/// Build a request URL from its parts
///
/// The path is `base_path` followed by `relative_path`. Query parameters are
/// form-encoded and sorted by key; values of a repeated key keep their order.
/// Scheme and host are not validated here; a malformed result is rejected
/// when the request is built.
#[must_use]
pub fn build_url(
    scheme: &str,
    host: &str,
    base_path: &str,
    relative_path: &str,
    query: &[(&str, &str)],
) -> String {
    let mut url = format!("{scheme}://{host}{base_path}{relative_path}");

    if !query.is_empty() {
        let mut pairs = query.to_vec();
        pairs.sort_by_key(|(key, _)| *key);

        let encoded = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(pairs)
            .finish();
        url.push('?');
        url.push_str(&encoded);
    }

    url
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_url_without_query() {
        let url = build_url("https", "checkpoint.test", API_BASE_PATH, "/identities/me", &[]);
        assert_eq!(url, "https://checkpoint.test/api/checkpoint/v1/identities/me");
    }

    #[test]
    fn test_build_url_sorts_query_keys() {
        let url = build_url(
            "http",
            "localhost:9292",
            API_BASE_PATH,
            "/identities",
            &[("realm", "area51"), ("limit", "10"), ("account", "7")],
        );
        assert_eq!(
            url,
            "http://localhost:9292/api/checkpoint/v1/identities?account=7&limit=10&realm=area51"
        );
    }

    #[test]
    fn test_build_url_keeps_repeated_key_order() {
        let url = build_url(
            "http",
            "localhost",
            "",
            "/tags",
            &[("tag", "b"), ("id", "1"), ("tag", "a")],
        );
        assert_eq!(url, "http://localhost/tags?id=1&tag=b&tag=a");
    }

    #[test]
    fn test_build_url_encodes_values() {
        let url = build_url("http", "localhost", "", "/search", &[("q", "ann & bob")]);
        assert_eq!(url, "http://localhost/search?q=ann+%26+bob");
    }

    #[test]
    fn test_build_url_is_deterministic() {
        let query = [("b", "2"), ("a", "1")];
        let first = build_url("http", "h", API_BASE_PATH, "/x", &query);
        let second = build_url("http", "h", API_BASE_PATH, "/x", &query);
        assert_eq!(first, second);
    }
}
