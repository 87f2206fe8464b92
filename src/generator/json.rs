//! JSON listing of extracted records.

use anyhow::Result;
use serde::Serialize;

use crate::core::RoutePath;
use crate::sitemap::{Located, ResourceRecord};

/// One entry: the record's decoded path, then the record itself.
#[derive(Serialize)]
struct Entry<'a> {
    path: RoutePath,
    #[serde(flatten)]
    record: &'a ResourceRecord,
}

/// Render records as a pretty-printed JSON array.
pub fn render(records: &[ResourceRecord]) -> Result<String> {
    let entries: Vec<Entry<'_>> = records
        .iter()
        .map(|record| Entry {
            path: record.route(),
            record,
        })
        .collect();

    let mut out = serde_json::to_string_pretty(&entries)?;
    out.push('\n');
    Ok(out)
}
