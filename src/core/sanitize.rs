use std::fs;
use std::path::Path;

use serde::Serialize;

/// Packaging artifacts stripped from a freshly copied utility. These belong
/// to the utility's own repository, not to the consuming project.
pub const PACKAGING_ARTIFACTS: [&str; 6] = [
    "package.json",
    "package-lock.json",
    ".gitignore",
    ".git",
    "tsconfig.json",
    ".swcrc",
];

/// A cleanup step that could not complete. Never fatal; collected and
/// surfaced after the run's terminal message.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CleanupWarning {
    pub path: String,
    pub problem: String,
}

/// Delete the enumerated artifact set directly under the destination root.
///
/// Each deletion is independent: absence is not an error, and one failure
/// does not stop the rest.
pub fn strip_artifacts(dest: &Path) -> Vec<CleanupWarning> {
    let mut warnings = Vec::new();

    for name in PACKAGING_ARTIFACTS {
        let path = dest.join(name);
        if !path.exists() {
            continue;
        }
        if let Err(e) = remove_path(&path) {
            warnings.push(CleanupWarning {
                path: path.display().to_string(),
                problem: e.to_string(),
            });
        }
    }

    warnings
}

/// Remove the temporary clone directory. Failure is a warning; stale temp
/// directories can accumulate across failed runs.
pub fn remove_temp_dir(temp_dir: &Path) -> Option<CleanupWarning> {
    if !temp_dir.exists() {
        return None;
    }

    fs::remove_dir_all(temp_dir).err().map(|e| CleanupWarning {
        path: temp_dir.display().to_string(),
        problem: e.to_string(),
    })
}

fn remove_path(path: &Path) -> std::io::Result<()> {
    if path.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    }
}
