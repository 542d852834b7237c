//! Source tree identity: a named git repository URL.

use serde::{Deserialize, Serialize};
use url::Url;

/// A kernel source tree: the repository a build configuration tracks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tree {
    /// Short tree name, e.g. `mainline` or `stable`.
    pub name: String,
    /// Git repository URL.
    pub url: Url,
}
