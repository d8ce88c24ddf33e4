/// Generic JSON transport with replay support
///
/// Fetches a URL and parses the body as JSON, optionally saving the raw
/// body to disk. In replay mode every request is answered from that saved
/// file instead of the network, which makes parser work free of API-quota
/// cost. The last response wins when caching - there is a single cache
/// file shared by all endpoints.

use crate::config::FetchConfig;
use serde_json::Value;
use std::fs;

/// Transport-boundary failure. Not retried; the caller decides whether the
/// run continues.
#[derive(Debug)]
pub enum FetchError {
    /// Request could not be sent or the body could not be read
    Transport { url: String, source: reqwest::Error },
    /// Server answered with a non-2xx status
    Status { url: String, status: reqwest::StatusCode },
    /// Body (live or cached) was not valid JSON
    Decode { url: String, source: serde_json::Error },
    /// Cache file could not be read or written
    Cache { path: String, source: std::io::Error },
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchError::Transport { url, source } => {
                write!(f, "request to {} failed: {}", url, source)
            }
            FetchError::Status { url, status } => {
                write!(f, "request to {} returned {}", url, status)
            }
            FetchError::Decode { url, source } => {
                write!(f, "response from {} was not valid JSON: {}", url, source)
            }
            FetchError::Cache { path, source } => {
                write!(f, "response cache {} unavailable: {}", path, source)
            }
        }
    }
}

impl std::error::Error for FetchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FetchError::Transport { source, .. } => Some(source),
            FetchError::Status { .. } => None,
            FetchError::Decode { source, .. } => Some(source),
            FetchError::Cache { source, .. } => Some(source),
        }
    }
}

/// Thin fetch collaborator. One instance (and one underlying HTTP client)
/// per run.
pub struct Fetcher {
    client: reqwest::blocking::Client,
    live: bool,
    cache_responses: bool,
    cache_path: String,
    verbose: bool,
}

impl Fetcher {
    pub fn new(config: &FetchConfig, verbose: bool) -> Self {
        Fetcher {
            client: reqwest::blocking::Client::new(),
            live: config.live,
            cache_responses: config.cache_responses,
            cache_path: config.cache_path.clone(),
            verbose,
        }
    }

    /// Fetches `url` and returns the parsed JSON body. In replay mode the
    /// URL is only used for error reporting.
    pub fn get_json(&self, url: &str) -> Result<Value, FetchError> {
        let body = if self.live {
            self.get_live(url)?
        } else {
            self.read_cache()?
        };

        serde_json::from_str(&body).map_err(|e| FetchError::Decode {
            url: url.to_string(),
            source: e,
        })
    }

    fn get_live(&self, url: &str) -> Result<String, FetchError> {
        if self.verbose {
            println!("REST QUERY: {}", url);
        }

        let response = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .send()
            .map_err(|e| FetchError::Transport {
                url: url.to_string(),
                source: e,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }

        let body = response.text().map_err(|e| FetchError::Transport {
            url: url.to_string(),
            source: e,
        })?;

        if self.cache_responses {
            fs::write(&self.cache_path, &body).map_err(|e| FetchError::Cache {
                path: self.cache_path.clone(),
                source: e,
            })?;
        }

        Ok(body)
    }

    fn read_cache(&self) -> Result<String, FetchError> {
        fs::read_to_string(&self.cache_path).map_err(|e| FetchError::Cache {
            path: self.cache_path.clone(),
            source: e,
        })
    }
}
