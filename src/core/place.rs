use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Resolve the utilities root for a project.
///
/// Projects with a `src/` directory keep utilities at `src/utilities`;
/// everything else gets `utilities` at the project root.
pub fn utilities_root(project_root: &Path) -> PathBuf {
    let src = project_root.join("src");
    if src.is_dir() {
        src.join("utilities")
    } else {
        project_root.join("utilities")
    }
}

/// Destination directory for a utility's files. Nothing is created here.
pub fn destination(project_root: &Path, dest_folder: &str) -> PathBuf {
    utilities_root(project_root).join(dest_folder)
}

/// Remove a pre-existing destination after the user confirmed the overwrite.
pub fn remove_existing(dest: &Path) -> Result<()> {
    let removed = if dest.is_dir() {
        fs::remove_dir_all(dest)
    } else {
        fs::remove_file(dest)
    };

    removed.map_err(|e| {
        Error::internal_io(
            e.to_string(),
            Some(format!("remove old utility at {}", dest.display())),
        )
    })
}

/// Copy the fetched tree into the destination, creating parent directories
/// as needed. Structure, contents, and permissions are preserved
/// (`fs::copy` semantics). A failed copy may leave a partial destination
/// behind; that is surfaced, not rolled back.
pub fn copy_tree(src: &Path, dest: &Path) -> Result<()> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            Error::internal_io(
                e.to_string(),
                Some(format!("create utilities root {}", parent.display())),
            )
        })?;
    }

    copy_dir_recursive(src, dest)
}

fn copy_dir_recursive(src: &Path, dest: &Path) -> Result<()> {
    fs::create_dir_all(dest)
        .map_err(|e| Error::copy_failed(dest.display().to_string(), e.to_string()))?;

    for entry in fs::read_dir(src)
        .map_err(|e| Error::copy_failed(src.display().to_string(), e.to_string()))?
    {
        let entry =
            entry.map_err(|e| Error::copy_failed(src.display().to_string(), e.to_string()))?;
        let src_path = entry.path();
        let dest_path = dest.join(entry.file_name());

        if src_path.is_dir() {
            copy_dir_recursive(&src_path, &dest_path)?;
        } else {
            fs::copy(&src_path, &dest_path)
                .map_err(|e| Error::copy_failed(src_path.display().to_string(), e.to_string()))?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write(path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn root_prefers_src_when_present() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("src")).unwrap();
        assert_eq!(
            utilities_root(dir.path()),
            dir.path().join("src").join("utilities")
        );
    }

    #[test]
    fn root_falls_back_without_src() {
        let dir = tempdir().unwrap();
        assert_eq!(utilities_root(dir.path()), dir.path().join("utilities"));
    }

    #[test]
    fn copy_preserves_nested_structure() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("fetched");
        let dest = dir.path().join("src").join("utilities").join("sf-socketio");

        write(&src.join("index.ts"), "export {};");
        write(&src.join("lib").join("socket.ts"), "// socket");
        write(&src.join("lib").join("deep").join("util.ts"), "// util");

        copy_tree(&src, &dest).unwrap();

        assert_eq!(
            fs::read_to_string(dest.join("index.ts")).unwrap(),
            "export {};"
        );
        assert!(dest.join("lib").join("socket.ts").is_file());
        assert!(dest.join("lib").join("deep").join("util.ts").is_file());
    }

    #[cfg(unix)]
    #[test]
    fn copy_preserves_executable_bit() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let src = dir.path().join("fetched");
        let dest = dir.path().join("utilities").join("tool");

        let script = src.join("run.sh");
        write(&script, "#!/bin/sh\n");
        fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();

        copy_tree(&src, &dest).unwrap();

        let mode = fs::metadata(dest.join("run.sh")).unwrap().permissions().mode();
        assert_eq!(mode & 0o111, 0o111);
    }

    #[test]
    fn remove_existing_clears_directory() {
        let dir = tempdir().unwrap();
        let old = dir.path().join("utilities").join("sf-socketio");
        write(&old.join("stale.ts"), "// stale");

        remove_existing(&old).unwrap();
        assert!(!old.exists());
    }

    #[test]
    fn copy_missing_source_is_copy_error() {
        use crate::error::ErrorCode;

        let dir = tempdir().unwrap();
        let err = copy_tree(&dir.path().join("absent"), &dir.path().join("dest")).unwrap_err();
        assert_eq!(err.code, ErrorCode::CopyFailed);
    }
}
