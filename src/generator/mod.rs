//! Output generators.
//!
//! Render the extracted records, already sorted, as text:
//!
//! - **Restfile**: rester request listing, one status check per path
//! - **Json**: the records themselves, for inspection or other tooling
//!
//! Pure formatting; every decision was made by the extractor.

pub mod json;
pub mod restfile;

use anyhow::Result;

use crate::sitemap::ResourceRecord;

/// Output format (`--format`)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Restfile,
    Json,
}

/// Expected status written into every restfile request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusExpectation {
    /// `status: 200`
    #[default]
    Ok,
    /// `status: .regex(200|301)`
    OkOrRedirect,
}

impl StatusExpectation {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "200",
            Self::OkOrRedirect => ".regex(200|301)",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    pub format: OutputFormat,
    pub status: StatusExpectation,
}

/// Render records in the configured format.
pub fn render(records: &[ResourceRecord], options: &RenderOptions) -> Result<String> {
    match options.format {
        OutputFormat::Restfile => Ok(restfile::render(records, options.status)),
        OutputFormat::Json => json::render(records),
    }
}
