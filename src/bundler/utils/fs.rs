//! Filesystem utilities for bundle assembly.
//!
//! Plain file copies, directory-tree copies with a caller-selected conflict
//! policy, and the "flattening" copy used for component folders. Directory
//! walks run on the blocking thread pool.

use crate::bail;
use crate::bundler::error::{Error, ErrorExt, Result};
use std::path::{Path, PathBuf};
use tokio::fs;

/// What to do when a destination file already exists during a tree copy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OnConflict {
    /// Abort the copy with an error.
    Fail,
    /// Replace the existing file.
    Overwrite,
    /// Leave the existing file untouched and log a warning.
    Skip,
}

/// Copies a regular file from one path to another, creating any parent
/// directories of the destination path as necessary.
///
/// Fails if the source path is a directory or doesn't exist, or if the
/// destination already exists.
pub async fn copy_file(from: &Path, to: &Path) -> Result<()> {
    if !from.is_file() {
        bail!("{from:?} does not exist or is not a file");
    }
    if to.exists() {
        bail!("{to:?} already exists, refusing to overwrite");
    }
    if let Some(dest_dir) = to.parent() {
        fs::create_dir_all(dest_dir)
            .await
            .fs_context("creating destination directory", dest_dir)?;
    }
    fs::copy(from, to).await.fs_context("copying file", to)?;
    Ok(())
}

/// Recursively copies the contents of `from` into `to`, preserving relative
/// paths and creating intermediate directories as needed.
///
/// Conflicting files are handled per `on_conflict`; `OnConflict::Skip`
/// leaves the existing file in place and logs a warning.
pub async fn copy_dir_contents(from: &Path, to: &Path, on_conflict: OnConflict) -> Result<()> {
    if !from.is_dir() {
        bail!("{from:?} does not exist or is not a directory");
    }

    let from = from.to_path_buf();
    let to = to.to_path_buf();

    tokio::task::spawn_blocking(move || copy_tree_sync(&from, &to, on_conflict))
        .await
        .map_err(|e| Error::GenericError(format!("directory copy task panicked: {e}")))?
}

/// Copies `from` into `to` while flattening the tree: regular files land
/// directly in `to` regardless of their original subpath, but a directory
/// whose extension matches one of `bundle_extensions` (a ".wo" component,
/// for instance) is copied whole under its own name and never descended
/// into.
///
/// Flattened files overwrite existing destination files.
pub async fn copy_dir_flatten(from: &Path, to: &Path, bundle_extensions: &[&str]) -> Result<()> {
    if !from.is_dir() {
        bail!("{from:?} does not exist or is not a directory");
    }

    let from = from.to_path_buf();
    let to = to.to_path_buf();
    let bundle_extensions: Vec<String> =
        bundle_extensions.iter().map(|e| e.to_string()).collect();

    tokio::task::spawn_blocking(move || {
        std::fs::create_dir_all(&to).fs_context("creating destination directory", &to)?;

        let mut walker = walkdir::WalkDir::new(&from).into_iter();

        while let Some(entry) = walker.next() {
            let entry = entry.map_err(|e| Error::GenericError(e.to_string()))?;
            let path = entry.path();

            if entry.file_type().is_dir() && is_bundle_dir(path, &bundle_extensions) {
                // An atomic bundle: keep it intact under its own name.
                let name = path
                    .file_name()
                    .ok_or_else(|| Error::GenericError(format!("{path:?} has no file name")))?;
                copy_tree_sync(path, &to.join(name), OnConflict::Overwrite)?;
                walker.skip_current_dir();
            } else if entry.file_type().is_file() {
                let name = path
                    .file_name()
                    .ok_or_else(|| Error::GenericError(format!("{path:?} has no file name")))?;
                copy_entry_sync(path, &to.join(name), OnConflict::Overwrite)?;
            }
        }

        Ok(())
    })
    .await
    .map_err(|e| Error::GenericError(format!("flattening copy task panicked: {e}")))?
}

/// Returns the directory at `path`, creating it (and any missing parents)
/// if necessary. Fails if the path exists but is not a directory.
pub fn ensure_dir(path: &Path) -> Result<PathBuf> {
    if path.exists() {
        if !path.is_dir() {
            return Err(Error::GenericError(format!(
                "{path:?} exists but is not a directory"
            )));
        }
    } else {
        std::fs::create_dir_all(path).fs_context("creating directory", path)?;
    }

    Ok(path.to_path_buf())
}

/// Grants owner-execute permission on top of the permissions the file
/// already has. No-op on platforms without Unix permission bits.
pub async fn make_user_executable(path: &Path) -> Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let metadata = fs::metadata(path)
            .await
            .fs_context("reading file permissions", path)?;
        let mode = metadata.permissions().mode() | 0o100;
        fs::set_permissions(path, std::fs::Permissions::from_mode(mode))
            .await
            .fs_context("setting file permissions", path)?;
    }
    #[cfg(not(unix))]
    {
        let _ = path;
    }
    Ok(())
}

fn is_bundle_dir(path: &Path, bundle_extensions: &[String]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| bundle_extensions.iter().any(|b| b == ext))
}

fn copy_tree_sync(from: &Path, to: &Path, on_conflict: OnConflict) -> Result<()> {
    std::fs::create_dir_all(to).fs_context("creating destination directory", to)?;

    for entry in walkdir::WalkDir::new(from) {
        let entry = entry.map_err(|e| Error::GenericError(e.to_string()))?;
        let rel_path = entry
            .path()
            .strip_prefix(from)
            .map_err(|e| Error::GenericError(e.to_string()))?;
        let dest_path = to.join(rel_path);

        if entry.file_type().is_dir() {
            std::fs::create_dir_all(&dest_path).fs_context("creating directory", &dest_path)?;
        } else {
            copy_entry_sync(entry.path(), &dest_path, on_conflict)?;
        }
    }

    Ok(())
}

fn copy_entry_sync(from: &Path, to: &Path, on_conflict: OnConflict) -> Result<()> {
    if to.exists() {
        match on_conflict {
            OnConflict::Fail => {
                return Err(Error::GenericError(format!(
                    "{to:?} already exists, refusing to overwrite"
                )));
            }
            OnConflict::Skip => {
                log::warn!("{} already exists, keeping existing file", to.display());
                return Ok(());
            }
            OnConflict::Overwrite => {}
        }
    }

    if let Some(parent) = to.parent() {
        std::fs::create_dir_all(parent).fs_context("creating destination directory", parent)?;
    }
    std::fs::copy(from, to).fs_context("copying file", to)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(path: &Path, content: &str) {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, content).unwrap();
    }

    #[tokio::test]
    async fn copy_file_refuses_to_overwrite() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("a.txt");
        let dst = tmp.path().join("b.txt");
        write(&src, "alpha");
        write(&dst, "beta");

        assert!(copy_file(&src, &dst).await.is_err());
        assert_eq!(std::fs::read_to_string(&dst).unwrap(), "beta");
    }

    #[tokio::test]
    async fn copy_dir_contents_preserves_relative_paths() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("src");
        let dst = tmp.path().join("dst");
        write(&src.join("one.txt"), "1");
        write(&src.join("sub/two.txt"), "2");

        copy_dir_contents(&src, &dst, OnConflict::Fail).await.unwrap();

        assert_eq!(std::fs::read_to_string(dst.join("one.txt")).unwrap(), "1");
        assert_eq!(
            std::fs::read_to_string(dst.join("sub/two.txt")).unwrap(),
            "2"
        );
    }

    #[tokio::test]
    async fn copy_dir_contents_skip_keeps_existing_file() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("src");
        let dst = tmp.path().join("dst");
        write(&src.join("one.txt"), "new");
        write(&dst.join("one.txt"), "old");

        copy_dir_contents(&src, &dst, OnConflict::Skip).await.unwrap();

        assert_eq!(std::fs::read_to_string(dst.join("one.txt")).unwrap(), "old");
    }

    #[tokio::test]
    async fn copy_dir_flatten_keeps_bundles_intact() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("components");
        let dst = tmp.path().join("resources");
        write(&src.join("foo/bar.txt"), "bar");
        write(&src.join("foo/widget.wo/contents.html"), "<html/>");

        copy_dir_flatten(&src, &dst, &["wo"]).await.unwrap();

        // bar.txt is flattened to the destination root.
        assert_eq!(std::fs::read_to_string(dst.join("bar.txt")).unwrap(), "bar");
        assert!(!dst.join("foo").exists());
        // The .wo bundle keeps its internal structure.
        assert_eq!(
            std::fs::read_to_string(dst.join("widget.wo/contents.html")).unwrap(),
            "<html/>"
        );
    }

    #[tokio::test]
    async fn ensure_dir_rejects_files() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("plain.txt");
        write(&file, "");

        assert!(ensure_dir(&file).is_err());
        let dir = tmp.path().join("a/b/c");
        assert_eq!(ensure_dir(&dir).unwrap(), dir);
        assert!(dir.is_dir());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn make_user_executable_adds_exec_bit() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = TempDir::new().unwrap();
        let script = tmp.path().join("launch");
        write(&script, "#!/bin/sh\n");
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o644)).unwrap();

        make_user_executable(&script).await.unwrap();

        let mode = std::fs::metadata(&script).unwrap().permissions().mode();
        assert_eq!(mode & 0o744, 0o744);
    }
}
