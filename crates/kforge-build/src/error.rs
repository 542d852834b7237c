//! Error type for delegated build operations.

use thiserror::Error;

use kforge_config::ConfigError;

/// Errors from the external build operations layer.
#[derive(Error, Debug)]
pub enum OpsError {
    /// A git subprocess exited with a non-zero status.
    #[error("git {args} failed: {stderr}")]
    Git {
        /// The git arguments that were invoked.
        args: String,
        /// Trimmed stderr of the failed invocation.
        stderr: String,
    },

    /// The tracked branch does not exist on the remote.
    #[error("branch '{branch}' not found on tree '{tree}'")]
    RemoteBranchMissing {
        /// Tree name.
        tree: String,
        /// Branch that was queried.
        branch: String,
    },

    /// An HTTP request failed or returned an error status.
    #[error("http request to {endpoint} failed: {source}")]
    Http {
        /// The endpoint that was contacted.
        endpoint: String,
        /// Underlying client error.
        #[source]
        source: reqwest::Error,
    },

    /// A storage or API URL could not be extended with path segments.
    #[error("invalid endpoint url: {0}")]
    InvalidUrl(String),

    /// A configuration lookup failed inside a delegated operation.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Filesystem or subprocess IO failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
