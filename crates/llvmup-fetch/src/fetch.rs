//! Toolchain provisioning.
//!
//! [`Fetcher::provision`] takes a key from cached to installed:
//! skip if already installed → download → verify the pinned SHA-256 →
//! unpack into a staging directory → publish with one atomic rename.
//! At most one fetch runs per key within a process; a second caller for
//! the same key blocks until the first finishes, then finds the install
//! in the cache.

use std::collections::HashSet;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Condvar, Mutex, MutexGuard};

use crate::archive::{self, ArchiveKind};
use crate::cache::ToolchainCache;
use crate::error::{FetchError, Result};
use crate::integrity::ContentHash;
use crate::source::{ArtifactKey, SourceManifest};

/// Downloads, verifies, and installs toolchain archives.
pub struct Fetcher {
    cache: ToolchainCache,
    client: reqwest::blocking::Client,
    in_flight: Mutex<HashSet<String>>,
    idle: Condvar,
}

impl Fetcher {
    /// Create a fetcher installing into the given cache.
    pub fn new(cache: ToolchainCache) -> Self {
        Fetcher {
            cache,
            client: reqwest::blocking::Client::new(),
            in_flight: Mutex::new(HashSet::new()),
            idle: Condvar::new(),
        }
    }

    /// The cache this fetcher installs into.
    pub fn cache(&self) -> &ToolchainCache {
        &self.cache
    }

    /// Ensure the toolchain for `key` is installed; return its root.
    ///
    /// The manifest lookup happens before any network access, so an
    /// unpinned key fails fast with [`FetchError::SourceNotFound`]. A
    /// checksum mismatch installs nothing.
    pub fn provision(&self, key: &ArtifactKey, manifest: &SourceManifest) -> Result<PathBuf> {
        if let Some(dir) = self.cache.toolchain_dir(key) {
            return Ok(dir);
        }

        let _guard = self.begin(key);
        // Whoever held the key may have installed it while we waited.
        if let Some(dir) = self.cache.toolchain_dir(key) {
            return Ok(dir);
        }

        let entry = manifest
            .lookup(key)
            .ok_or_else(|| FetchError::SourceNotFound {
                version: key.version.to_string(),
                os: key.os.to_string(),
                arch: key.arch.clone(),
                variant: key.variant.to_string(),
            })?;
        let url = entry.resolved_url(key);
        let kind = ArchiveKind::from_path(Path::new(&url))?;

        let archive_file = self.download(&url)?;

        let actual = ContentHash::compute_file(archive_file.path())?;
        if !actual.matches(&entry.sha256) {
            return Err(FetchError::ChecksumMismatch {
                url,
                expected: entry.sha256.clone(),
                actual: actual.to_string(),
            });
        }

        // Stage next to the final slot so the publishing rename stays on
        // one filesystem.
        let staging = tempfile::Builder::new()
            .prefix(".staging-")
            .tempdir_in(self.cache.root())?;
        archive::unpack_with(archive_file.path(), kind, staging.path())?;

        self.cache.install_from(key, staging.path())
    }

    fn download(&self, url: &str) -> Result<tempfile::NamedTempFile> {
        std::fs::create_dir_all(self.cache.root())?;
        let mut file = tempfile::NamedTempFile::new_in(self.cache.root())?;
        let mut response = self.client.get(url).send()?.error_for_status()?;
        std::io::copy(&mut response, &mut file)?;
        file.flush()?;
        Ok(file)
    }

    /// Claim the key for this thread, waiting out any fetch already in
    /// flight for it.
    fn begin(&self, key: &ArtifactKey) -> FlightGuard<'_> {
        let token = key.to_string();
        let mut in_flight = lock_unpoisoned(&self.in_flight);
        while in_flight.contains(&token) {
            in_flight = self
                .idle
                .wait(in_flight)
                .unwrap_or_else(|poisoned| poisoned.into_inner());
        }
        in_flight.insert(token.clone());
        FlightGuard {
            fetcher: self,
            token,
        }
    }
}

/// Releases the in-flight claim on drop, including on error paths.
struct FlightGuard<'a> {
    fetcher: &'a Fetcher,
    token: String,
}

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        let mut in_flight = lock_unpoisoned(&self.fetcher.in_flight);
        in_flight.remove(&self.token);
        self.fetcher.idle.notify_all();
    }
}

fn lock_unpoisoned<'a>(mutex: &'a Mutex<HashSet<String>>) -> MutexGuard<'a, HashSet<String>> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
