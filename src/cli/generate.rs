//! Sitemap → restfile conversion: fetch, extract, render, write.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::config::Options;
use crate::fetch::{Fetch, Fetcher};
use crate::generator;
use crate::log;
use crate::sitemap::{self, Extraction};
use crate::utils::plural_count;

/// Run the whole conversion with the default fetcher.
pub fn run(options: &Options) -> Result<()> {
    let fetcher = Fetcher::new(&options.fetch)?;
    let output = generate(&fetcher, options)?;
    write_output(&output, options.output.as_deref())
}

/// Fetch and convert the sitemap, returning the rendered text.
pub fn generate(fetcher: &impl Fetch, options: &Options) -> Result<String> {
    let body = fetcher
        .fetch(&options.url)
        .with_context(|| format!("failed to fetch sitemap {}", options.url))?;

    let extraction = sitemap::extract(&body, &options.extract)
        .with_context(|| format!("failed to parse sitemap {}", options.url))?;

    log!("done"; "{}", summary(&extraction));
    generator::render(&extraction.records, &options.render)
}

/// One-line outcome, e.g. `extracted 12 records: 10 pages, 2 images (1 dropped)`.
fn summary(extraction: &Extraction) -> String {
    let mut line = format!(
        "extracted {}: {}, {} ({} dropped)",
        plural_count(extraction.records.len(), "record"),
        plural_count(extraction.pages().count(), "page"),
        plural_count(extraction.images().count(), "image"),
        extraction.dropped.len()
    );
    if !extraction.is_complete() {
        line.push_str(", document truncated");
    }
    line
}

fn write_output(output: &str, path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => {
            fs::write(path, output)
                .with_context(|| format!("Failed to write output to {}", path.display()))?;
            log!("done"; "wrote {}", path.display());
        }
        None => print!("{output}"),
    }
    Ok(())
}
