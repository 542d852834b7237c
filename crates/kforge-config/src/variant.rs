//! # Variant
//!
//! A build configuration's sub-unit: the ordered architecture list, the
//! build environment that compiles it, and the config fragments folded
//! into its build targets. Environment and fragment fields are name
//! references resolved through the document, never ownership edges.

use serde::{Deserialize, Serialize};

/// One variant of a build configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    /// Variant name, unique within its configuration.
    pub name: String,
    /// Target architecture names, in declared order.
    ///
    /// An empty list is a configuration-authoring error; it is not
    /// rejected at load time.
    pub architectures: Vec<String>,
    /// Name of the build environment this variant compiles with.
    pub build_environment: String,
    /// Names of the config fragments folded into this variant's targets.
    #[serde(default)]
    pub fragments: Vec<String>,
}
