//! Sitemap extraction.
//!
//! Turns sitemap XML into a sorted list of [`ResourceRecord`]s in one pass,
//! without building a document tree:
//!
//! ```text
//! bytes ──► quick-xml events ──► ParseContext ──► records (sorted by path)
//!                                     │
//!                                     └──► dropped records (diagnostics)
//! ```
//!
//! # Recognized elements
//!
//! ```xml
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9"
//!         xmlns:image="http://www.google.com/schemas/sitemap-image/1.1">
//!   <url>
//!     <loc>https://example.com/</loc>
//!     <lastmod>2025-01-01</lastmod>
//!     <changefreq>daily</changefreq>
//!     <priority>0.8</priority>
//!     <image:image>
//!       <image:loc>https://example.com/cover.png</image:loc>
//!       <image:title>Cover</image:title>
//!     </image:image>
//!   </url>
//! </urlset>
//! ```
//!
//! Element names are matched literally, prefix included. Anything else is
//! skipped.

mod context;
mod error;
mod extract;
mod record;


pub use error::{InvalidRecord, ParseError};
pub use extract::extract;
pub use record::{ImageRecord, Located, PageRecord, RecordKind, ResourceRecord};

/// Which fields the extractor captures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExtractMode {
    /// Location plus optional metadata (`changefreq`, `priority`, `lastmod`,
    /// `image:title`), keeping absent and empty fields apart.
    #[default]
    Full,
    /// Only `loc` / `image:loc`, tracked with a LIFO buffer stack.
    LocOnly,
}

/// What a malformed document does to the pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Fail the whole extraction.
    #[default]
    Strict,
    /// Keep records completed before the error.
    Lenient,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractOptions {
    pub mode: ExtractMode,
    pub policy: ErrorPolicy,
    /// Drop records repeating an earlier record's kind and location.
    pub dedup: bool,
}

/// Result of one extraction pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    /// Valid records, sorted by decoded URL path.
    pub records: Vec<ResourceRecord>,
    /// Records dropped for a missing or invalid location, in document order.
    pub dropped: Vec<InvalidRecord>,
    /// Error that ended a lenient pass early.
    pub truncated: Option<ParseError>,
}

impl Extraction {
    pub fn pages(&self) -> impl Iterator<Item = &PageRecord> {
        self.records.iter().filter_map(|record| match record {
            ResourceRecord::Page(page) => Some(page),
            ResourceRecord::Image(_) => None,
        })
    }

    pub fn images(&self) -> impl Iterator<Item = &ImageRecord> {
        self.records.iter().filter_map(|record| match record {
            ResourceRecord::Image(image) => Some(image),
            ResourceRecord::Page(_) => None,
        })
    }

    pub fn is_complete(&self) -> bool {
        self.truncated.is_none()
    }

    /// Records whose route equals the previous record's route.
    ///
    /// These render as repeated `path` keys, since the route drops the host
    /// and query. Relies on `records` being sorted.
    pub fn repeated_routes(&self) -> usize {
        self.records
            .windows(2)
            .filter(|pair| pair[0].route() == pair[1].route())
            .count()
    }
}
