//! Unpacking downloaded artifact archives

use anyhow::{bail, Context, Result};
use std::fs::{self, File};
use std::io::{self, Cursor};
use std::path::{Path, PathBuf};
use zip::ZipArchive;

/// Extract a zip archive into `destination`, returning the files written.
///
/// Entries whose path would land outside `destination` are rejected.
pub fn extract_zip(bytes: &[u8], destination: &Path) -> Result<Vec<PathBuf>> {
    let mut archive =
        ZipArchive::new(Cursor::new(bytes)).context("Artifact archive is not a valid zip file")?;
    let mut written = Vec::with_capacity(archive.len());

    for index in 0..archive.len() {
        let mut entry = archive
            .by_index(index)
            .with_context(|| format!("Unable to read archive entry #{index}"))?;
        let relative = match entry.enclosed_name() {
            Some(relative) => relative,
            None => bail!(
                "Archive entry '{}' points outside the destination directory",
                entry.name()
            ),
        };
        let target = destination.join(relative);

        if entry.is_dir() {
            fs::create_dir_all(&target)
                .with_context(|| format!("Unable to create directory {}", target.display()))?;
            continue;
        }
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Unable to create directory {}", parent.display()))?;
        }
        let mut file = File::create(&target)
            .with_context(|| format!("Unable to create {}", target.display()))?;
        io::copy(&mut entry, &mut file)
            .with_context(|| format!("Unable to write {}", target.display()))?;
        written.push(target);
    }

    Ok(written)
}
