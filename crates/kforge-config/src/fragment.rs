//! Named kernel config fragments: a target path inside the checkout and
//! the config lines the fragment carries.

use serde::{Deserialize, Serialize};

/// A kernel configuration fragment referenced by variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigFragment {
    /// Fragment name, e.g. `kselftest` or `virtio`.
    pub name: String,
    /// Path of the generated fragment file, relative to the checkout.
    pub path: String,
    /// Kernel config lines written into the fragment file.
    #[serde(default)]
    pub configs: Vec<String>,
}
