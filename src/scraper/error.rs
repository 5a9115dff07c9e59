//! Error types for fetching and for the per-page pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// A page or image could not be retrieved.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Invalid URL: {input}: {reason}")]
    InvalidUrl { input: String, reason: String },

    #[error("Network error: could not reach {url}: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP {status} when fetching: {url}")]
    HttpStatus { status: u16, url: String },

    #[error("Failed to save {url} to {path}: {source}")]
    Io {
        url: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl FetchError {
    /// URL the failed request was for.
    pub fn url(&self) -> &str {
        match self {
            FetchError::InvalidUrl { input, .. } => input,
            FetchError::Network { url, .. }
            | FetchError::HttpStatus { url, .. }
            | FetchError::Io { url, .. } => url,
        }
    }
}

/// Why one URL's pipeline aborted. Each variant is logged distinctly by the batch runner.
#[derive(Debug, Error)]
pub enum PageError {
    #[error("Error fetching the URL {url}: {0}", url = .0.url())]
    Fetch(#[from] FetchError),

    #[error("Could not find the main content (class \"{class}\") on {url}")]
    ContentNotFound { url: String, class: String },

    #[error("Filesystem error at {path}: {source}")]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("An error occurred: {0}")]
    Other(String),
}

impl PageError {
    pub(crate) fn filesystem(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PageError::Filesystem {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_error_message_carries_url_and_status() {
        let e = FetchError::HttpStatus {
            status: 404,
            url: "https://docs.example.com/missing/".into(),
        };
        assert_eq!(e.url(), "https://docs.example.com/missing/");
        assert_eq!(
            e.to_string(),
            "HTTP 404 when fetching: https://docs.example.com/missing/"
        );
    }

    #[test]
    fn page_fetch_error_mentions_url() {
        let e = PageError::from(FetchError::HttpStatus {
            status: 500,
            url: "https://docs.example.com/a/".into(),
        });
        let msg = e.to_string();
        assert!(msg.starts_with("Error fetching the URL https://docs.example.com/a/"));
        assert!(msg.contains("HTTP 500"));
    }

    #[test]
    fn content_not_found_names_class() {
        let e = PageError::ContentNotFound {
            url: "https://docs.example.com/".into(),
            class: "theme-doc-markdown".into(),
        };
        assert!(e.to_string().contains("theme-doc-markdown"));
    }
}
