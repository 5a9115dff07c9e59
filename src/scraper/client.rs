//! Blocking HTTP client and the fetch seam the pipeline is driven through.

use crate::scraper::error::FetchError;
use reqwest::Url;
use std::fs::File;
use std::path::Path;

/// Source of page and image bytes.
///
/// Implemented by [HttpClient] for real runs; tests drive the pipeline with an in-memory fake.
pub trait Fetch {
    /// GET `url` and return the full body. Non-2xx status is an error.
    fn fetch(&mut self, url: &str) -> Result<Vec<u8>, FetchError>;

    /// GET `url` and stream the body into `dest`, returning the number of bytes written.
    ///
    /// `dest` is only created once a success status has been received, and is removed again
    /// if the body cannot be read to the end.
    fn download(&mut self, url: &str, dest: &Path) -> Result<u64, FetchError>;
}

/// Plain blocking client. No retries, no custom headers; redirects follow reqwest's default policy.
#[derive(Debug, Clone)]
pub struct HttpClient {
    inner: reqwest::blocking::Client,
}

impl HttpClient {
    pub fn new() -> Result<Self, reqwest::Error> {
        let inner = reqwest::blocking::Client::builder().build()?;
        Ok(Self { inner })
    }

    fn get_success(&self, url: &str) -> Result<reqwest::blocking::Response, FetchError> {
        let parsed = Url::parse(url).map_err(|e| FetchError::InvalidUrl {
            input: url.to_string(),
            reason: e.to_string(),
        })?;
        let response = self
            .inner
            .get(parsed)
            .send()
            .map_err(|e| FetchError::Network {
                url: url.to_string(),
                source: e,
            })?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        Ok(response)
    }
}

impl Fetch for HttpClient {
    fn fetch(&mut self, url: &str) -> Result<Vec<u8>, FetchError> {
        let response = self.get_success(url)?;
        let body = response.bytes().map_err(|e| FetchError::Network {
            url: url.to_string(),
            source: e,
        })?;
        Ok(body.to_vec())
    }

    fn download(&mut self, url: &str, dest: &Path) -> Result<u64, FetchError> {
        let mut response = self.get_success(url)?;
        let mut file = File::create(dest).map_err(|e| FetchError::Io {
            url: url.to_string(),
            path: dest.to_path_buf(),
            source: e,
        })?;
        match response.copy_to(&mut file) {
            Ok(n) => Ok(n),
            Err(e) => {
                drop(file);
                let _ = std::fs::remove_file(dest);
                Err(FetchError::Network {
                    url: url.to_string(),
                    source: e,
                })
            }
        }
    }
}
