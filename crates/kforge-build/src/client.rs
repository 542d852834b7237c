//! # Storage and API Clients
//!
//! Blocking HTTP clients for the two services a build pipeline talks to:
//! the storage file server (public, read side) and the build API
//! (token-authenticated, write side). The process is one-shot and
//! synchronous, so the blocking `reqwest` client fits; there is no
//! connection reuse worth pooling across invocations.

use std::time::Duration;

use serde_json::json;
use url::Url;

use crate::error::OpsError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Extend a base URL with path segments.
fn endpoint(base: &Url, segments: &[&str]) -> Result<Url, OpsError> {
    let mut url = base.clone();
    {
        let mut path = url
            .path_segments_mut()
            .map_err(|_| OpsError::InvalidUrl(base.to_string()))?;
        path.pop_if_empty();
        path.extend(segments);
    }
    Ok(url)
}

/// Read-side client for the storage file server.
#[derive(Debug, Clone)]
pub struct StorageClient {
    http: reqwest::blocking::Client,
    base: Url,
}

impl StorageClient {
    /// Create a client for the storage server at `base`.
    pub fn new(base: Url) -> Result<Self, OpsError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|source| OpsError::Http {
                endpoint: base.to_string(),
                source,
            })?;
        Ok(Self { http, base })
    }

    /// The last commit recorded for a tree/branch pair, or `None` when
    /// the pipeline has never published one (404).
    pub fn last_commit(&self, tree: &str, branch: &str) -> Result<Option<String>, OpsError> {
        let url = endpoint(&self.base, &[tree, branch, "last.commit"])?;
        let response = self
            .http
            .get(url.clone())
            .send()
            .map_err(|source| OpsError::Http {
                endpoint: url.to_string(),
                source,
            })?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let body = response
            .error_for_status()
            .and_then(|r| r.text())
            .map_err(|source| OpsError::Http {
                endpoint: url.to_string(),
                source,
            })?;
        Ok(Some(body.trim().to_string()))
    }

    /// Public URL of a published file for a tree/branch/commit triple.
    pub fn file_url(
        &self,
        tree: &str,
        branch: &str,
        commit: &str,
        filename: &str,
    ) -> Result<Url, OpsError> {
        endpoint(&self.base, &[tree, branch, commit, filename])
    }
}

/// Write-side client for the build API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::blocking::Client,
    base: Url,
    token: String,
}

impl ApiClient {
    /// Create a client for the API at `base` authenticating with `token`.
    pub fn new(base: Url, token: &str) -> Result<Self, OpsError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|source| OpsError::Http {
                endpoint: base.to_string(),
                source,
            })?;
        Ok(Self {
            http,
            base,
            token: token.to_string(),
        })
    }

    /// Record `commit` as the last built commit for a tree/branch pair.
    pub fn update_last_commit(
        &self,
        tree: &str,
        branch: &str,
        commit: &str,
    ) -> Result<(), OpsError> {
        let url = endpoint(&self.base, &["commit"])?;
        self.http
            .post(url.clone())
            .bearer_auth(&self.token)
            .json(&json!({
                "tree": tree,
                "branch": branch,
                "commit": commit,
            }))
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|source| OpsError::Http {
                endpoint: url.to_string(),
                source,
            })?;
        Ok(())
    }

    /// Upload a file to `path` on the storage backing, with its sha256
    /// digest declared up front so the server can verify the payload.
    pub fn upload(&self, path: &str, bytes: Vec<u8>, sha256: &str) -> Result<(), OpsError> {
        let mut segments = vec!["upload"];
        segments.extend(path.split('/').filter(|s| !s.is_empty()));
        let url = endpoint(&self.base, &segments)?;

        self.http
            .put(url.clone())
            .bearer_auth(&self.token)
            .header("x-checksum-sha256", sha256)
            .body(bytes)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|source| OpsError::Http {
                endpoint: url.to_string(),
                source,
            })?;
        Ok(())
    }
}
