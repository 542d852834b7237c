//! Source tarball packaging: `git archive` plus a content digest the
//! upload declares to the API.

use std::io::Read;
use std::path::Path;

use sha2::{Digest, Sha256};

use crate::error::OpsError;
use crate::git;

/// Name of the source tarball published for every built commit.
pub const TARBALL_NAME: &str = "linux-src.tar.gz";

/// Path prefix inside the tarball.
pub const TARBALL_PREFIX: &str = "linux";

/// Package the checkout's HEAD into `output`.
pub fn make_tarball(kdir: &Path, output: &Path) -> Result<(), OpsError> {
    git::archive(kdir, output, TARBALL_PREFIX)
}

/// Hex-encoded sha256 digest of a file, streamed in chunks.
pub fn sha256_file(path: &Path) -> Result<String, OpsError> {
    let mut file = std::fs::File::open(path)?;
    let mut hasher = Sha256::new();
    let mut buf = [0u8; 64 * 1024];
    loop {
        let n = file.read(&mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(format!("{:x}", hasher.finalize()))
}
