//! Archive unpacking.
//!
//! Release archives are `.tar.xz` (both distributions today) or
//! `.tar.gz`. Every archive wraps a single top-level directory named
//! after the release; unpacking strips it so the destination directory
//! IS the toolchain root.

use std::fs::File;
use std::io::Read;
use std::path::{Component, Path, PathBuf};

use crate::error::{FetchError, Result};

/// Compression format, recognized by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveKind {
    /// gzip-compressed tarball (`.tar.gz`, `.tgz`).
    TarGz,
    /// xz-compressed tarball (`.tar.xz`).
    TarXz,
}

impl ArchiveKind {
    /// Recognize the format from the archive file name.
    pub fn from_path(path: &Path) -> Result<ArchiveKind> {
        let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
        if name.ends_with(".tar.gz") || name.ends_with(".tgz") {
            Ok(ArchiveKind::TarGz)
        } else if name.ends_with(".tar.xz") {
            Ok(ArchiveKind::TarXz)
        } else {
            Err(FetchError::UnsupportedArchive {
                path: path.to_path_buf(),
            })
        }
    }
}

/// Unpack an archive into `dest`, stripping the single top-level
/// directory of each entry path. The format is recognized from the
/// archive file name.
pub fn unpack(archive_path: &Path, dest: &Path) -> Result<()> {
    let kind = ArchiveKind::from_path(archive_path)?;
    unpack_with(archive_path, kind, dest)
}

/// Unpack with an explicitly named format, for archives whose on-disk
/// name (e.g. a download temp file) does not carry the extension.
pub fn unpack_with(archive_path: &Path, kind: ArchiveKind, dest: &Path) -> Result<()> {
    let file = File::open(archive_path)?;
    let reader: Box<dyn Read> = match kind {
        ArchiveKind::TarGz => Box::new(flate2::read::GzDecoder::new(file)),
        ArchiveKind::TarXz => Box::new(xz::read::XzDecoder::new(file)),
    };
    unpack_tar(reader, dest)
}

fn unpack_tar(reader: Box<dyn Read>, dest: &Path) -> Result<()> {
    std::fs::create_dir_all(dest)?;
    let mut archive = tar::Archive::new(reader);
    archive.set_preserve_permissions(true);

    for entry in archive.entries()? {
        let mut entry = entry?;
        let path = entry.path()?.into_owned();
        let stripped = strip_root(&path);
        // The root directory entry itself strips to nothing.
        if stripped.as_os_str().is_empty() {
            continue;
        }
        let target = dest.join(&stripped);
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent)?;
        }
        entry.unpack(&target)?;
    }
    Ok(())
}

/// Drop the first normal path component.
fn strip_root(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| matches!(c, Component::Normal(_)))
        .skip(1)
        .collect()
}
