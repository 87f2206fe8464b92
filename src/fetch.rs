//! Sitemap retrieval.
//!
//! `http`/`https` go through a blocking `reqwest` client (redirects followed,
//! non-2xx is an error); `file` URLs are read from disk so a saved sitemap
//! can be converted offline.

use std::fs;
use std::path::PathBuf;

use reqwest::blocking::Client;
use thiserror::Error;
use url::Url;

use crate::config::FetchOptions;
use crate::{debug, log};

/// Fetch-related errors
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to set up HTTP client")]
    Client(#[source] reqwest::Error),

    #[error("request to `{0}` failed")]
    Transport(Url, #[source] reqwest::Error),

    #[error("`{url}` answered with HTTP {status}")]
    Status { url: Url, status: u16 },

    #[error("`{0}` does not name a local file")]
    InvalidPath(Url),

    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("unsupported URL scheme `{0}` (expected http, https or file)")]
    UnsupportedScheme(String),
}

/// Source of sitemap bytes.
pub trait Fetch {
    fn fetch(&self, url: &Url) -> Result<Vec<u8>, FetchError>;
}

/// Default fetcher: HTTP(S) plus local files.
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    pub fn new(options: &FetchOptions) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(options.timeout)
            .user_agent(options.user_agent.as_str())
            .build()
            .map_err(FetchError::Client)?;
        Ok(Self { client })
    }

    fn fetch_http(&self, url: &Url) -> Result<Vec<u8>, FetchError> {
        debug!("fetch"; "GET {}", url);
        let response = self
            .client
            .get(url.clone())
            .send()
            .map_err(|e| FetchError::Transport(url.clone(), e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.clone(),
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .map_err(|e| FetchError::Transport(url.clone(), e))?;
        log!("fetch"; "{} ({} bytes)", url, body.len());
        Ok(body.to_vec())
    }
}

impl Fetch for Fetcher {
    fn fetch(&self, url: &Url) -> Result<Vec<u8>, FetchError> {
        match url.scheme() {
            "http" | "https" => self.fetch_http(url),
            "file" => read_file(url),
            other => Err(FetchError::UnsupportedScheme(other.to_string())),
        }
    }
}

fn read_file(url: &Url) -> Result<Vec<u8>, FetchError> {
    let path = url
        .to_file_path()
        .map_err(|()| FetchError::InvalidPath(url.clone()))?;
    let body = fs::read(&path).map_err(|e| FetchError::Io(path.clone(), e))?;
    log!("fetch"; "{} ({} bytes)", path.display(), body.len());
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn fetcher() -> Fetcher {
        Fetcher::new(&FetchOptions::default()).unwrap()
    }

    #[test]
    fn test_fetch_file_url() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("sitemap.xml");
        fs::write(&path, "<urlset/>").unwrap();

        let url = Url::from_file_path(&path).unwrap();
        assert_eq!(fetcher().fetch(&url).unwrap(), b"<urlset/>");
    }

    #[test]
    fn test_fetch_missing_file() {
        let temp = TempDir::new().unwrap();
        let url = Url::from_file_path(temp.path().join("missing.xml")).unwrap();

        let err = fetcher().fetch(&url).unwrap_err();
        assert!(matches!(err, FetchError::Io(..)));
        assert!(err.to_string().contains("missing.xml"));
    }

    #[test]
    fn test_fetch_unsupported_scheme() {
        let url = Url::parse("ftp://example.com/sitemap.xml").unwrap();
        let err = fetcher().fetch(&url).unwrap_err();
        assert_eq!(
            err.to_string(),
            "unsupported URL scheme `ftp` (expected http, https or file)"
        );
    }
}
