//! Command-line interface definitions.

use clap::{ColorChoice, Parser};
use std::path::PathBuf;
use url::Url;

use crate::config::DEFAULT_TIMEOUT_SECS;
use crate::generator::OutputFormat;

/// Convert a sitemap into a rester restfile with one status check per path
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
#[command(after_help = "Example: sitemap-restfile https://finestructure.co/sitemap.xml")]
pub struct Cli {
    /// Sitemap URL (http, https or file)
    #[arg(value_name = "URL", value_parser = parse_sitemap_url, value_hint = clap::ValueHint::Url)]
    pub url: Url,

    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Restfile)]
    pub format: OutputFormat,

    /// Write output to file instead of stdout
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Accept 301 as well as 200 in generated status checks
    #[arg(short = 'r', long)]
    pub allow_redirect: bool,

    /// Only read <loc>/<image:loc>, skipping all other metadata
    #[arg(long)]
    pub loc_only: bool,

    /// Keep records read before a malformed part of the document instead of failing
    #[arg(long)]
    pub lenient: bool,

    /// Drop records that repeat an earlier location
    #[arg(short, long)]
    pub dedup: bool,

    /// HTTP timeout in seconds
    #[arg(short, long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Enable verbose output for debugging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Parse the positional URL, rejecting anything that is not an absolute URL.
fn parse_sitemap_url(s: &str) -> Result<Url, String> {
    Url::parse(s).map_err(|e| format!("URL '{s}' is invalid: {e}"))
}
