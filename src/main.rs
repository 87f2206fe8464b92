//! sitemap-restfile - turn a sitemap.xml into a rester restfile.
//!
//! ```text
//! sitemap-restfile https://example.com/sitemap.xml > restfile.yml
//! ```

mod cli;
mod config;
mod core;
mod fetch;
mod generator;
mod logger;
mod sitemap;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::Cli;
use config::Options;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    let options = Options::load(&cli)?;
    cli::generate::run(&options)
}
