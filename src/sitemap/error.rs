//! Extraction error types.

use std::fmt;

use thiserror::Error;

use super::record::RecordKind;

/// Fatal extraction error: the document is not well-formed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("malformed sitemap at byte {position}: {message}")]
    Malformed { position: u64, message: String },
}

impl ParseError {
    pub fn malformed(position: u64, message: impl Into<String>) -> Self {
        Self::Malformed {
            position,
            message: message.into(),
        }
    }
}

/// A record dropped because its location is missing or not a valid URL.
///
/// Non-fatal: extraction continues with the next sibling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidRecord {
    pub kind: RecordKind,
    /// Raw (trimmed) field values in declaration order; `None` = tag never seen.
    pub fields: Vec<(&'static str, Option<String>)>,
    pub reason: String,
}

#[cfg(test)]
impl InvalidRecord {
    /// Value of a field by element name.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| *key == name)
            .and_then(|(_, value)| value.as_deref())
    }
}

impl fmt::Display for InvalidRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}> {{", self.kind.element())?;
        for (i, (key, value)) in self.fields.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            match value {
                Some(value) => write!(f, "{key}: {value:?}")?,
                None => write!(f, "{key}: -")?,
            }
        }
        write!(f, "}}: {}", self.reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display() {
        let err = ParseError::malformed(42, "unexpected end of document");
        assert_eq!(
            err.to_string(),
            "malformed sitemap at byte 42: unexpected end of document"
        );
    }

    #[test]
    fn test_invalid_record_display() {
        let invalid = InvalidRecord {
            kind: RecordKind::Page,
            fields: vec![
                ("loc", Some("not a url".to_string())),
                ("changefreq", Some("daily".to_string())),
                ("priority", None),
                ("lastmod", None),
            ],
            reason: "relative URL without a base".to_string(),
        };
        assert_eq!(
            invalid.to_string(),
            r#"<url> {loc: "not a url", changefreq: "daily", priority: -, lastmod: -}: relative URL without a base"#
        );
        assert_eq!(invalid.field("changefreq"), Some("daily"));
        assert_eq!(invalid.field("priority"), None);
    }
}
