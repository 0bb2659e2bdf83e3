//! In-memory representation of the WOA bundle.
//!
//! A [`Woa`] only tracks the bundle root; each subdirectory accessor
//! creates the directory on first use and is idempotent, so the assembler
//! never has to pre-create the layout.

use crate::bundler::error::Result;
use crate::bundler::utils::fs::ensure_dir;
use std::path::{Path, PathBuf};

/// The `<name>.woa` bundle under a containing directory.
#[derive(Clone, Debug)]
pub struct Woa {
    woa_path: PathBuf,
}

impl Woa {
    /// The WOA bundle `<application_name>.woa` in `containing_dir`,
    /// created if missing.
    pub fn create(containing_dir: &Path, application_name: &str) -> Result<Self> {
        let woa_path = ensure_dir(&containing_dir.join(format!("{application_name}.woa")))?;
        Ok(Self { woa_path })
    }

    pub fn woa_path(&self) -> &Path {
        &self.woa_path
    }

    pub fn contents_path(&self) -> Result<PathBuf> {
        ensure_dir(&self.woa_path.join("Contents"))
    }

    pub fn macos_path(&self) -> Result<PathBuf> {
        ensure_dir(&self.contents_path()?.join("MacOS"))
    }

    pub fn unix_path(&self) -> Result<PathBuf> {
        ensure_dir(&self.contents_path()?.join("UNIX"))
    }

    pub fn windows_path(&self) -> Result<PathBuf> {
        ensure_dir(&self.contents_path()?.join("Windows"))
    }

    pub fn resources_path(&self) -> Result<PathBuf> {
        ensure_dir(&self.contents_path()?.join("Resources"))
    }

    pub fn web_server_resources_path(&self) -> Result<PathBuf> {
        ensure_dir(&self.contents_path()?.join("WebServerResources"))
    }

    pub fn frameworks_path(&self) -> Result<PathBuf> {
        ensure_dir(&self.contents_path()?.join("Frameworks"))
    }

    /// `Contents/Resources/Java`, where the project jar and every
    /// dependency jar end up.
    pub fn java_path(&self) -> Result<PathBuf> {
        ensure_dir(&self.resources_path()?.join("Java"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn accessors_create_the_layout_lazily() {
        let tmp = TempDir::new().unwrap();
        let woa = Woa::create(tmp.path(), "Demo").unwrap();

        assert!(tmp.path().join("Demo.woa").is_dir());
        assert!(!tmp.path().join("Demo.woa/Contents").exists());

        let java = woa.java_path().unwrap();
        assert_eq!(java, tmp.path().join("Demo.woa/Contents/Resources/Java"));
        assert!(java.is_dir());

        // Idempotent: a second call reuses the directory.
        assert_eq!(woa.java_path().unwrap(), java);
    }

    #[test]
    fn accessors_reject_non_directories() {
        let tmp = TempDir::new().unwrap();
        let woa = Woa::create(tmp.path(), "Demo").unwrap();

        std::fs::write(tmp.path().join("Demo.woa/Contents"), "not a directory").unwrap();
        assert!(woa.contents_path().is_err());
    }
}
