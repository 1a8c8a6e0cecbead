use std::path::Path;
use std::process::Command;

use crate::error::{Error, Result};

/// Clone a single branch of a repository into a target directory.
///
/// The target must not exist; callers hand us a fresh per-run path. On
/// failure the destination project is untouched - only the clone target may
/// hold partial state.
pub fn clone_branch(url: &str, branch: &str, target_dir: &Path) -> Result<()> {
    let output = Command::new("git")
        .args([
            "clone",
            "--branch",
            branch,
            "--single-branch",
            url,
            &target_dir.to_string_lossy(),
        ])
        .output()
        .map_err(|e| Error::git_clone_failed(url, branch, format!("Failed to run git: {}", e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(Error::git_clone_failed(url, branch, stderr.trim().to_string()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use tempfile::tempdir;

    #[test]
    fn clone_from_nonexistent_repo_fails() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("no-such-repo");
        let target = dir.path().join("clone");

        let err = clone_branch(
            &missing.to_string_lossy(),
            "main",
            &target,
        )
        .unwrap_err();

        assert_eq!(err.code, ErrorCode::GitCloneFailed);
        assert_eq!(err.details["branch"], "main");
    }
}
