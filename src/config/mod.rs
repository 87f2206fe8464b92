//! Run configuration.
//!
//! There is no config file and no environment lookup: every setting comes
//! from the command line. [`Options::load`] turns the parsed [`Cli`] into
//! validated option groups, one per stage:
//!
//! | Group            | Stage     | Flags                                   |
//! |------------------|-----------|-----------------------------------------|
//! | `FetchOptions`   | fetch     | `--timeout`                             |
//! | `ExtractOptions` | extract   | `--loc-only`, `--lenient`, `--dedup`    |
//! | `RenderOptions`  | render    | `--format`, `--allow-redirect`          |

mod error;

pub use error::ConfigError;

use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::cli::Cli;
use crate::generator::{OutputFormat, RenderOptions, StatusExpectation};
use crate::sitemap::{ErrorPolicy, ExtractMode, ExtractOptions};

/// Default HTTP timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// HTTP client settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOptions {
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Everything one run needs.
#[derive(Debug, Clone)]
pub struct Options {
    /// Sitemap to convert
    pub url: Url,
    pub fetch: FetchOptions,
    pub extract: ExtractOptions,
    pub render: RenderOptions,
    /// Output file; stdout when `None`
    pub output: Option<PathBuf>,
}

impl Options {
    /// Build and validate options from CLI arguments.
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        // Set verbose mode globally
        crate::logger::set_verbose(cli.verbose);

        if cli.timeout == 0 {
            return Err(ConfigError::ZeroTimeout);
        }

        let options = Self {
            url: cli.url.clone(),
            fetch: FetchOptions {
                timeout: Duration::from_secs(cli.timeout),
                ..FetchOptions::default()
            },
            extract: ExtractOptions {
                mode: if cli.loc_only {
                    ExtractMode::LocOnly
                } else {
                    ExtractMode::Full
                },
                policy: if cli.lenient {
                    ErrorPolicy::Lenient
                } else {
                    ErrorPolicy::Strict
                },
                dedup: cli.dedup,
            },
            render: RenderOptions {
                format: cli.format,
                status: if cli.allow_redirect {
                    StatusExpectation::OkOrRedirect
                } else {
                    StatusExpectation::Ok
                },
            },
            output: cli.output.clone(),
        };

        options.validate()?;
        Ok(options)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.render.format == OutputFormat::Json
            && self.render.status == StatusExpectation::OkOrRedirect
        {
            return Err(ConfigError::StatusWithJson);
        }

        if let Some(parent) = self.output.as_deref().and_then(|p| p.parent())
            && !parent.as_os_str().is_empty()
            && !parent.is_dir()
        {
            return Err(ConfigError::MissingOutputDir(parent.to_path_buf()));
        }

        Ok(())
    }
}
