//! Document retrieval.
//!
//! Everything the overlay pipeline reads from outside the process goes
//! through here: delimiting documents and locations (local files or URLs)
//! and Overpass queries (HTTP POST).

mod http;

pub use http::{AsyncHttpClient, AsyncReqwestClient, DEFAULT_HTTP_TIMEOUT_SECS};

#[cfg(test)]
pub use http::tests::MockHttpClient;

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

/// Errors retrieving a document.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid response: {0}")]
    Parse(String),
}

/// Where a document is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentSource {
    Path(PathBuf),
    Url(String),
}

impl DocumentSource {
    /// Interpret `location` as a URL when it has an `http://` or `https://`
    /// scheme, otherwise as a filesystem path.
    pub fn parse(location: &str) -> Self {
        let trimmed = location.trim();
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            DocumentSource::Url(trimmed.to_string())
        } else {
            DocumentSource::Path(PathBuf::from(trimmed))
        }
    }

    /// Resolve a relative path against `base`. URLs and absolute paths are
    /// returned unchanged.
    pub fn resolve_against(self, base: &Path) -> Self {
        match self {
            DocumentSource::Path(path) if path.is_relative() => {
                DocumentSource::Path(base.join(path))
            }
            other => other,
        }
    }

    /// Read the whole document.
    ///
    /// # Arguments
    ///
    /// * `client` - HTTP client used for URL sources
    pub async fn load<C: AsyncHttpClient>(&self, client: &C) -> Result<Vec<u8>, FetchError> {
        match self {
            DocumentSource::Path(path) => {
                debug!(path = %path.display(), "Reading document");
                Ok(tokio::fs::read(path).await?)
            }
            DocumentSource::Url(url) => {
                debug!(url = url.as_str(), "Fetching document");
                client.get(url).await
            }
        }
    }
}

impl fmt::Display for DocumentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentSource::Path(path) => write!(f, "{}", path.display()),
            DocumentSource::Url(url) => f.write_str(url),
        }
    }
}
