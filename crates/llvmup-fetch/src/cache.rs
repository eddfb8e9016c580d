//! Local toolchain cache.
//!
//! Installed toolchains live in a filesystem cache organized by
//! distribution variant, release version, and host triple:
//!
//! ```text
//! <cache_root>/
//!   upstream/
//!     18.1.8/
//!       x86_64-unknown-linux-gnu/   — unpacked toolchain root
//!   arm-embedded/
//!     18.1.3/
//!       x86_64-unknown-linux-gnu/
//! ```
//!
//! A sentinel file inside the toolchain root marks a completed install.
//! The sentinel is written into the staging directory before the atomic
//! rename, so a reader never sees a directory that is present but
//! incomplete.

use std::path::{Path, PathBuf};

use crate::error::{FetchError, Result};
use crate::source::ArtifactKey;

/// Marker file written as the last step of staging.
const COMPLETE_SENTINEL: &str = ".llvmup-complete";

/// A filesystem cache of installed toolchains.
#[derive(Debug, Clone)]
pub struct ToolchainCache {
    /// Root directory for the cache.
    root: PathBuf,
}

/// One installed toolchain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstalledToolchain {
    /// Distribution variant directory name.
    pub variant: String,
    /// Release version directory name.
    pub version: String,
    /// Host triple directory name.
    pub triple: String,
    /// Toolchain root directory.
    pub path: PathBuf,
}

impl ToolchainCache {
    /// Create a cache rooted at the given directory.
    pub fn new(root: PathBuf) -> Self {
        ToolchainCache { root }
    }

    /// Create a cache at the default location (`~/.llvmup/toolchains`).
    pub fn default_location() -> Option<Self> {
        home_dir().map(|home| ToolchainCache::new(home.join(".llvmup").join("toolchains")))
    }

    /// Get the root directory of this cache.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The slot directory a key installs into.
    pub fn slot_dir(&self, key: &ArtifactKey) -> PathBuf {
        self.root
            .join(key.variant.as_str())
            .join(key.version.to_string())
            .join(key.host_triple())
    }

    /// Whether a completed install exists for this key.
    pub fn contains(&self, key: &ArtifactKey) -> bool {
        self.slot_dir(key).join(COMPLETE_SENTINEL).is_file()
    }

    /// The toolchain root for a key, if a completed install exists.
    pub fn toolchain_dir(&self, key: &ArtifactKey) -> Option<PathBuf> {
        let dir = self.slot_dir(key);
        if dir.join(COMPLETE_SENTINEL).is_file() {
            Some(dir)
        } else {
            None
        }
    }

    /// Install a fully staged toolchain directory into the key's slot.
    ///
    /// The sentinel goes into the staged tree first, then a single
    /// rename publishes it. An existing complete install wins; a
    /// leftover partial slot is replaced.
    pub fn install_from(&self, key: &ArtifactKey, staged: &Path) -> Result<PathBuf> {
        let slot = self.slot_dir(key);

        std::fs::write(staged.join(COMPLETE_SENTINEL), key.to_string()).map_err(|e| {
            FetchError::Cache {
                path: staged.to_path_buf(),
                detail: format!("writing completion sentinel: {e}"),
            }
        })?;

        if let Some(parent) = slot.parent() {
            std::fs::create_dir_all(parent).map_err(|e| FetchError::Cache {
                path: parent.to_path_buf(),
                detail: format!("creating cache dir: {e}"),
            })?;
        }

        if slot.exists() {
            if slot.join(COMPLETE_SENTINEL).is_file() {
                // Another fetch completed first; keep its install.
                std::fs::remove_dir_all(staged).ok();
                return Ok(slot);
            }
            std::fs::remove_dir_all(&slot).map_err(|e| FetchError::Cache {
                path: slot.clone(),
                detail: format!("removing partial install: {e}"),
            })?;
        }

        std::fs::rename(staged, &slot).map_err(|e| FetchError::Cache {
            path: slot.clone(),
            detail: format!("publishing install: {e}"),
        })?;
        Ok(slot)
    }

    /// Remove an installed toolchain. Returns whether anything existed.
    pub fn remove(&self, key: &ArtifactKey) -> Result<bool> {
        let slot = self.slot_dir(key);
        if slot.is_dir() {
            std::fs::remove_dir_all(&slot).map_err(|e| FetchError::Cache {
                path: slot,
                detail: format!("removing install: {e}"),
            })?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Remove the whole cache. Returns whether anything existed.
    pub fn remove_all(&self) -> Result<bool> {
        if self.root.is_dir() {
            std::fs::remove_dir_all(&self.root).map_err(|e| FetchError::Cache {
                path: self.root.clone(),
                detail: format!("removing cache: {e}"),
            })?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// List all completed installs.
    pub fn list(&self) -> Result<Vec<InstalledToolchain>> {
        let mut installed = Vec::new();
        if !self.root.is_dir() {
            return Ok(installed);
        }
        for variant in read_dir_names(&self.root)? {
            let variant_dir = self.root.join(&variant);
            for version in read_dir_names(&variant_dir)? {
                let version_dir = variant_dir.join(&version);
                for triple in read_dir_names(&version_dir)? {
                    let path = version_dir.join(&triple);
                    if path.join(COMPLETE_SENTINEL).is_file() {
                        installed.push(InstalledToolchain {
                            variant: variant.clone(),
                            version: version.clone(),
                            triple,
                            path,
                        });
                    }
                }
            }
        }
        installed.sort_by(|a, b| {
            (&a.variant, &a.version, &a.triple).cmp(&(&b.variant, &b.version, &b.triple))
        });
        Ok(installed)
    }
}

/// Names of subdirectories, sorted.
fn read_dir_names(dir: &Path) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(|e| FetchError::Cache {
        path: dir.to_path_buf(),
        detail: format!("listing: {e}"),
    })? {
        let entry = entry.map_err(|e| FetchError::Cache {
            path: dir.to_path_buf(),
            detail: format!("reading entry: {e}"),
        })?;
        if entry.path().is_dir() {
            if let Some(name) = entry.file_name().to_str() {
                names.push(name.to_string());
            }
        }
    }
    names.sort();
    Ok(names)
}

/// Get the user's home directory.
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME").map(PathBuf::from)
}
