//! Restfile generation.
//!
//! # Format
//!
//! ```yaml
//! requests:
//!
//!   path /posts/hello/:
//!     url: https://example.com/posts/hello/
//!     validation:
//!       status: 200
//!
//! ```
//!
//! The key is the decoded path only, so records differing by host or query
//! share a key. `--dedup` warns about them but keeps both.

use super::StatusExpectation;
use crate::sitemap::{Located, ResourceRecord};

/// Render records as a restfile, in the order given.
pub fn render(records: &[ResourceRecord], status: StatusExpectation) -> String {
    let mut out = String::with_capacity(64 + records.len() * 96);

    out.push_str("requests:\n\n");

    for record in records {
        out.push_str("  path ");
        out.push_str(record.route().as_str());
        out.push_str(":\n    url: ");
        out.push_str(record.location().as_str());
        out.push_str("\n    validation:\n      status: ");
        out.push_str(status.as_str());
        out.push_str("\n\n");
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sitemap::{ImageRecord, PageRecord};
    use pretty_assertions::assert_eq;
    use url::Url;

    fn page(s: &str) -> ResourceRecord {
        PageRecord::bare(Url::parse(s).unwrap()).into()
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(render(&[], StatusExpectation::Ok), "requests:\n\n");
    }

    #[test]
    fn test_render_blocks() {
        let records = vec![
            page("https://example.com/"),
            page("https://example.com/posts/hello/"),
            ResourceRecord::Image(ImageRecord {
                location: Url::parse("https://cdn.example.com/img/cover.png").unwrap(),
                title: Some("Cover".to_string()),
            }),
        ];

        let expected = "\
requests:

  path /:
    url: https://example.com/
    validation:
      status: 200

  path /posts/hello/:
    url: https://example.com/posts/hello/
    validation:
      status: 200

  path /img/cover.png:
    url: https://cdn.example.com/img/cover.png
    validation:
      status: 200

";
        assert_eq!(render(&records, StatusExpectation::Ok), expected);
    }

    #[test]
    fn test_render_allow_redirect() {
        let out = render(&[page("https://example.com/a")], StatusExpectation::OkOrRedirect);
        assert!(out.contains("      status: .regex(200|301)\n"));
        assert!(!out.contains("status: 200\n"));
    }

    #[test]
    fn test_render_decoded_path_encoded_url() {
        let out = render(&[page("https://example.com/caf%C3%A9?x=1")], StatusExpectation::Ok);
        assert!(out.contains("  path /café:\n"));
        assert!(out.contains("    url: https://example.com/caf%C3%A9?x=1\n"));
    }

    #[test]
    fn test_render_newline_in_path_stays_one_block() {
        let out = render(&[page("https://x/a%0A%20%20evil:%20x")], StatusExpectation::Ok);
        let expected = "\
requests:

  path /a%0A%20%20evil:%20x:
    url: https://x/a%0A%20%20evil:%20x
    validation:
      status: 200

";
        assert_eq!(out, expected);
    }
}
