//! Route path type: the decoded path component of a record's URL.
//!
//! - Sort key for the extraction result
//! - Block key (`path <route>:`) in the rendered restfile

use std::sync::Arc;

use percent_encoding::percent_decode_str;
use serde::Serialize;
use url::Url;

/// Decoded URL path
///
/// Invariants:
/// - Always decoded (no percent-encoding), unless the bytes are not UTF-8
///   or decode to control characters
/// - Always starts with `/`
/// - Query string and fragment are never part of it
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoutePath(Arc<str>);

impl RoutePath {
    /// Take the path component of `url` and percent-decode it.
    ///
    /// Invalid UTF-8 or control characters after decoding keep the encoded
    /// form, so the path stays a single line.
    pub fn from_url(url: &Url) -> Self {
        let raw = url.path();
        let decoded = percent_decode_str(raw)
            .decode_utf8()
            .ok()
            .filter(|s| !s.chars().any(char::is_control))
            .map(|s| s.into_owned())
            .unwrap_or_else(|| raw.to_string());

        if decoded.is_empty() {
            return Self(Arc::from("/"));
        }

        let normalized = if decoded.starts_with('/') {
            decoded
        } else {
            format!("/{decoded}")
        };

        Self(Arc::from(normalized))
    }

    /// Get the decoded path as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RoutePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for RoutePath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<&str> for RoutePath {
    fn eq(&self, other: &&str) -> bool {
        self.0.as_ref() == *other
    }
}

impl Serialize for RoutePath {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.0.serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route(s: &str) -> RoutePath {
        RoutePath::from_url(&Url::parse(s).unwrap())
    }

    #[test]
    fn test_from_url_plain() {
        assert_eq!(route("https://example.com/posts/hello/"), "/posts/hello/");
    }

    #[test]
    fn test_from_url_root() {
        assert_eq!(route("https://example.com"), "/");
        assert_eq!(route("https://example.com/"), "/");
    }

    #[test]
    fn test_from_url_decodes() {
        assert_eq!(route("https://example.com/posts/%E4%B8%AD%E6%96%87/"), "/posts/中文/");
        assert_eq!(route("https://example.com/hello%20world"), "/hello world");
    }

    #[test]
    fn test_from_url_unicode_input() {
        // url crate encodes on parse, we decode again
        assert_eq!(route("https://example.com/café"), "/café");
    }

    #[test]
    fn test_from_url_invalid_utf8() {
        assert_eq!(route("https://example.com/posts/%FF/"), "/posts/%FF/");
    }

    #[test]
    fn test_from_url_control_chars_stay_encoded() {
        assert_eq!(
            route("https://x/a%0A%20%20evil:%20x"),
            "/a%0A%20%20evil:%20x"
        );
        assert_eq!(route("https://x/tab%09here"), "/tab%09here");
    }

    #[test]
    fn test_from_url_ignores_query_and_fragment() {
        assert_eq!(route("https://example.com/search?q=a&b=c#top"), "/search");
    }

    #[test]
    fn test_ordering_is_bytewise() {
        let mut paths = vec![route("https://x/b"), route("https://x/B"), route("https://x/a")];
        paths.sort();
        let sorted: Vec<_> = paths.iter().map(RoutePath::as_str).collect();
        assert_eq!(sorted, ["/B", "/a", "/b"]);
    }

    #[test]
    fn test_serialize() {
        let json = serde_json::to_string(&route("https://x/posts/%E4%B8%AD/")).unwrap();
        assert_eq!(json, r#""/posts/中/""#);
    }
}
