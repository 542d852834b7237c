//! # Git Subprocess Layer
//!
//! Thin wrappers over the `git` binary. Every helper runs one git
//! command to completion, captures its output, and maps a non-zero exit
//! status to [`OpsError::Git`] carrying the invocation and its stderr.

use std::path::Path;
use std::process::Command;

use url::Url;

use crate::error::OpsError;

/// Run `git` with `args`, optionally inside `dir`, and return stdout.
fn git(dir: Option<&Path>, args: &[&str]) -> Result<String, OpsError> {
    let mut command = Command::new("git");
    if let Some(dir) = dir {
        command.current_dir(dir);
    }
    let output = command.args(args).output()?;

    if !output.status.success() {
        return Err(OpsError::Git {
            args: args.join(" "),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Query the commit a remote branch points at, without fetching.
///
/// Returns `None` when the branch does not exist on the remote.
pub fn remote_head(url: &Url, branch: &str) -> Result<Option<String>, OpsError> {
    let refspec = format!("refs/heads/{branch}");
    let out = git(None, &["ls-remote", url.as_str(), &refspec])?;
    Ok(out
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().next())
        .map(str::to_string))
}

/// Create or refresh a bare mirror of `url` at `mirror`.
pub fn update_mirror(url: &Url, mirror: &Path) -> Result<(), OpsError> {
    if mirror.join("HEAD").exists() {
        tracing::debug!(mirror = %mirror.display(), "updating existing mirror");
        git(Some(mirror), &["remote", "update", "--prune"])?;
    } else {
        tracing::debug!(mirror = %mirror.display(), "creating mirror clone");
        if let Some(parent) = mirror.parent() {
            std::fs::create_dir_all(parent)?;
        }
        git(
            None,
            &["clone", "--mirror", url.as_str(), &mirror.to_string_lossy()],
        )?;
    }
    Ok(())
}

/// Synchronize a working checkout of `url` at `kdir` to the head of
/// `branch`, cloning first if the checkout does not exist yet.
///
/// When `mirror` is given, the initial clone borrows objects from it via
/// `--reference`, which keeps checkouts of large trees cheap.
pub fn update_repo(
    url: &Url,
    branch: &str,
    kdir: &Path,
    mirror: Option<&Path>,
) -> Result<(), OpsError> {
    if !kdir.join(".git").exists() {
        if let Some(parent) = kdir.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let kdir_str = kdir.to_string_lossy().into_owned();
        let mut args = vec!["clone", "--no-checkout"];
        let mirror_str;
        if let Some(mirror) = mirror {
            mirror_str = mirror.to_string_lossy().into_owned();
            args.push("--reference");
            args.push(&mirror_str);
        }
        args.push(url.as_str());
        args.push(&kdir_str);
        git(None, &args)?;
    }

    git(Some(kdir), &["fetch", "origin", branch])?;
    git(Some(kdir), &["checkout", "-B", branch, "FETCH_HEAD"])?;
    git(Some(kdir), &["reset", "--hard", "FETCH_HEAD"])?;
    Ok(())
}

/// The commit hash the checkout's HEAD points at.
pub fn head_commit(kdir: &Path) -> Result<String, OpsError> {
    Ok(git(Some(kdir), &["rev-parse", "HEAD"])?.trim().to_string())
}

/// Short description of HEAD: nearest tag when one exists, abbreviated
/// commit hash otherwise.
pub fn describe(kdir: &Path) -> Result<String, OpsError> {
    Ok(git(Some(kdir), &["describe", "--always"])?.trim().to_string())
}

/// Verbose description of HEAD, matching release tags only.
///
/// Returns `None` when no matching tag describes HEAD; callers fall back
/// to the short description.
pub fn describe_verbose(kdir: &Path) -> Result<Option<String>, OpsError> {
    match git(
        Some(kdir),
        &["describe", "--long", "--match", "v[0-9]*", "--dirty"],
    ) {
        Ok(out) => Ok(Some(out.trim().to_string())),
        Err(OpsError::Git { .. }) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Package the checkout's HEAD into a gzipped tarball at `output`, with
/// all paths under `prefix/`.
pub fn archive(kdir: &Path, output: &Path, prefix: &str) -> Result<(), OpsError> {
    let prefix_arg = format!("--prefix={prefix}/");
    let output_arg = output.to_string_lossy().into_owned();
    git(
        Some(kdir),
        &[
            "archive",
            "--format=tar.gz",
            &prefix_arg,
            "-o",
            &output_arg,
            "HEAD",
        ],
    )?;
    Ok(())
}
