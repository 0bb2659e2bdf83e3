//! Jar archive utilities for bundle assembly.
//!
//! Jars are plain zip archives. Reading extracts a named top-level folder
//! to the filesystem. Writing never mutates a jar in place: the new archive
//! is staged next to the original and atomically renamed over it, so a
//! failure mid-write leaves the original jar untouched.

use crate::bundler::error::{Error, ErrorExt, Result};
use std::collections::HashSet;
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use zip::ZipArchive;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// Extracts the top-level folder `folder_name` from `jar_path` into
/// `dest_dir`, preserving the entries' relative paths (you end up with
/// `dest_dir/folder_name/...`).
pub async fn extract_folder(jar_path: &Path, folder_name: &str, dest_dir: &Path) -> Result<()> {
    let jar_path = jar_path.to_path_buf();
    let dest_dir = dest_dir.to_path_buf();
    let prefix = format!("{folder_name}/");

    tokio::task::spawn_blocking(move || {
        let file = File::open(&jar_path).fs_context("opening jar", &jar_path)?;
        let mut archive = ZipArchive::new(file)?;

        for i in 0..archive.len() {
            let mut entry = archive.by_index(i)?;

            if !entry.name().starts_with(&prefix) {
                continue;
            }

            let Some(relative) = entry.enclosed_name() else {
                continue;
            };
            let target = dest_dir.join(relative);

            if entry.is_dir() {
                std::fs::create_dir_all(&target).fs_context("creating directory", &target)?;
            } else {
                if let Some(parent) = target.parent() {
                    std::fs::create_dir_all(parent).fs_context("creating directory", parent)?;
                }
                let mut out = File::create(&target).fs_context("creating file", &target)?;
                io::copy(&mut entry, &mut out).fs_context("extracting jar entry", &target)?;
            }
        }

        Ok(())
    })
    .await
    .map_err(|e| Error::GenericError(format!("jar extraction task panicked: {e}")))?
}

/// Returns true if the jar contains a non-empty top-level folder named
/// `folder_name`: at least one entry beyond the folder marker itself.
pub async fn has_top_level_folder(jar_path: &Path, folder_name: &str) -> Result<bool> {
    let jar_path = jar_path.to_path_buf();
    let prefix = format!("{folder_name}/");

    tokio::task::spawn_blocking(move || {
        let file = File::open(&jar_path).fs_context("opening jar", &jar_path)?;
        let mut archive = ZipArchive::new(file)?;

        let mut count = 0;

        for i in 0..archive.len() {
            let entry = archive.by_index(i)?;

            if entry.name().starts_with(&prefix) {
                count += 1;

                if count > 1 {
                    return Ok(true);
                }
            }
        }

        Ok(false)
    })
    .await
    .map_err(|e| Error::GenericError(format!("jar scan task panicked: {e}")))?
}

/// Writes every file under `src_dir` into the jar at
/// `folder_name/<path relative to src_dir>`, overwriting entries that are
/// already present. No-op if `src_dir` does not exist.
pub async fn inject_dir(src_dir: &Path, folder_name: &str, jar_path: &Path) -> Result<()> {
    if !src_dir.exists() {
        return Ok(());
    }

    let src_dir = src_dir.to_path_buf();
    let folder_name = folder_name.to_string();
    let jar_path = jar_path.to_path_buf();

    tokio::task::spawn_blocking(move || {
        let mut entries = Vec::new();

        for entry in walkdir::WalkDir::new(&src_dir) {
            let entry = entry.map_err(|e| Error::GenericError(e.to_string()))?;

            if !entry.file_type().is_file() {
                continue;
            }

            let relative = entry
                .path()
                .strip_prefix(&src_dir)
                .map_err(|e| Error::GenericError(e.to_string()))?;
            let name = format!("{}/{}", folder_name, zip_entry_name(relative));
            entries.push((name, NewEntry::File(entry.path().to_path_buf())));
        }

        rewrite_jar(&jar_path, entries)
    })
    .await
    .map_err(|e| Error::GenericError(format!("jar injection task panicked: {e}")))?
}

/// Writes `text` (UTF-8) into the jar at `entry_path`, overwriting any
/// existing entry.
pub async fn inject_file_content(text: &str, entry_path: &str, jar_path: &Path) -> Result<()> {
    let entry_path = entry_path.to_string();
    let jar_path = jar_path.to_path_buf();
    let bytes = text.as_bytes().to_vec();

    tokio::task::spawn_blocking(move || {
        rewrite_jar(&jar_path, vec![(entry_path, NewEntry::Bytes(bytes))])
    })
    .await
    .map_err(|e| Error::GenericError(format!("jar injection task panicked: {e}")))?
}

enum NewEntry {
    File(PathBuf),
    Bytes(Vec<u8>),
}

/// Rebuilds the jar with `new_entries` added, replacing same-named entries.
///
/// The replacement archive is staged in the jar's own directory and renamed
/// over the original only after a successful finish.
fn rewrite_jar(jar_path: &Path, new_entries: Vec<(String, NewEntry)>) -> Result<()> {
    let parent = jar_path
        .parent()
        .ok_or_else(|| Error::GenericError(format!("{jar_path:?} has no parent directory")))?;

    let replaced: HashSet<&str> = new_entries.iter().map(|(name, _)| name.as_str()).collect();

    let staging = tempfile::Builder::new()
        .prefix(".wobundle-")
        .suffix(".jar")
        .tempfile_in(parent)
        .fs_context("creating staging jar", parent)?;
    let staging_path = staging.into_temp_path();

    {
        let out = File::create(&staging_path).fs_context("opening staging jar", &staging_path)?;
        let mut writer = ZipWriter::new(out);

        let file = File::open(jar_path).fs_context("opening jar", jar_path)?;
        let mut archive = ZipArchive::new(file)?;

        for i in 0..archive.len() {
            let entry = archive.by_index(i)?;

            if replaced.contains(entry.name()) {
                continue;
            }

            writer.raw_copy_file(entry)?;
        }

        let options = SimpleFileOptions::default();

        for (name, source) in new_entries {
            writer.start_file(name, options)?;

            match source {
                NewEntry::File(path) => {
                    let mut input = File::open(&path).fs_context("opening file", &path)?;
                    io::copy(&mut input, &mut writer).fs_context("writing jar entry", &path)?;
                }
                NewEntry::Bytes(bytes) => {
                    writer.write_all(&bytes).fs_context("writing jar entry", jar_path)?;
                }
            }
        }

        writer.finish()?;
    }

    staging_path
        .persist(jar_path)
        .map_err(|e| Error::Io(e.error))?;

    Ok(())
}

/// Zip entry names always use forward slashes, regardless of platform.
fn zip_entry_name(relative: &Path) -> String {
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
