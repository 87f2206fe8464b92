//! Normalized records produced by the extractor.

use serde::Serialize;
use url::Url;

use crate::core::RoutePath;

/// Which sitemap element a record (or an open field set) comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RecordKind {
    /// `<url>` entry
    Page,
    /// `<image:image>` entry (sitemap-image extension)
    Image,
}

impl RecordKind {
    /// Element that opens a record of this kind.
    pub const fn element(self) -> &'static str {
        match self {
            Self::Page => "url",
            Self::Image => "image:image",
        }
    }

    /// Field elements buffered for this kind. The location field comes first.
    pub const fn fields(self) -> &'static [&'static str] {
        match self {
            Self::Page => &["loc", "changefreq", "priority", "lastmod"],
            Self::Image => &["image:loc", "image:title"],
        }
    }

    /// Name of the location field element.
    pub const fn location_field(self) -> &'static str {
        self.fields()[0]
    }

    /// Kind opened by `element`, if it opens a record.
    pub fn from_element(element: &str) -> Option<Self> {
        match element {
            "url" => Some(Self::Page),
            "image:image" => Some(Self::Image),
            _ => None,
        }
    }

    /// Kind whose location field is `element`.
    pub fn from_location_field(element: &str) -> Option<Self> {
        match element {
            "loc" => Some(Self::Page),
            "image:loc" => Some(Self::Image),
            _ => None,
        }
    }
}

/// Anything that carries a validated absolute location.
pub trait Located {
    fn location(&self) -> &Url;

    /// Decoded path of the location, used for ordering and fixture keys.
    fn route(&self) -> RoutePath {
        RoutePath::from_url(self.location())
    }
}

/// A `<url>` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageRecord {
    pub location: Url,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change_frequency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<String>,
}

impl PageRecord {
    /// Page record with only a location (loc-only extraction).
    pub fn bare(location: Url) -> Self {
        Self {
            location,
            change_frequency: None,
            priority: None,
            last_modified: None,
        }
    }
}

/// An `<image:image>` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageRecord {
    pub location: Url,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// One extracted resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ResourceRecord {
    Page(PageRecord),
    Image(ImageRecord),
}

impl ResourceRecord {
    pub const fn kind(&self) -> RecordKind {
        match self {
            Self::Page(_) => RecordKind::Page,
            Self::Image(_) => RecordKind::Image,
        }
    }
}

impl Located for PageRecord {
    fn location(&self) -> &Url {
        &self.location
    }
}

impl Located for ImageRecord {
    fn location(&self) -> &Url {
        &self.location
    }
}

impl Located for ResourceRecord {
    fn location(&self) -> &Url {
        match self {
            Self::Page(page) => page.location(),
            Self::Image(image) => image.location(),
        }
    }
}

impl From<PageRecord> for ResourceRecord {
    fn from(page: PageRecord) -> Self {
        Self::Page(page)
    }
}

impl From<ImageRecord> for ResourceRecord {
    fn from(image: ImageRecord) -> Self {
        Self::Image(image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_lookup() {
        assert_eq!(RecordKind::from_element("url"), Some(RecordKind::Page));
        assert_eq!(RecordKind::from_element("image:image"), Some(RecordKind::Image));
        assert_eq!(RecordKind::from_element("image"), None);
        assert_eq!(RecordKind::from_location_field("image:loc"), Some(RecordKind::Image));
        assert_eq!(RecordKind::from_location_field("lastmod"), None);
    }

    #[test]
    fn test_location_field_is_first() {
        assert_eq!(RecordKind::Page.location_field(), "loc");
        assert_eq!(RecordKind::Image.location_field(), "image:loc");
    }

    #[test]
    fn test_route_from_record() {
        let record: ResourceRecord =
            PageRecord::bare(Url::parse("https://example.com/a%20b?x=1").unwrap()).into();
        assert_eq!(record.route(), "/a b");
        assert_eq!(record.kind(), RecordKind::Page);
    }

    #[test]
    fn test_serialize_skips_absent_fields() {
        let record = ResourceRecord::Image(ImageRecord {
            location: Url::parse("https://img.example.com/1.png").unwrap(),
            title: None,
        });
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"kind":"image","location":"https://img.example.com/1.png"}"#);
    }

    #[test]
    fn test_serialize_keeps_empty_fields() {
        let record = ResourceRecord::Page(PageRecord {
            priority: Some(String::new()),
            ..PageRecord::bare(Url::parse("https://example.com/").unwrap())
        });
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"kind":"page","location":"https://example.com/","priority":""}"#);
    }
}
