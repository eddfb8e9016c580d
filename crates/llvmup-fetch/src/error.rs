//! Fetcher error types.
//!
//! All errors are terminal at this layer; retry policy belongs to
//! callers.

use std::path::PathBuf;

/// Errors that can occur while provisioning a toolchain archive.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The key names a host with no prebuilt binaries.
    #[error("no prebuilt toolchains run on host {os}/{arch}")]
    UnsupportedHost {
        /// Host operating system.
        os: String,
        /// Host CPU architecture.
        arch: String,
    },

    /// The source manifest has no entry for this key. Raised before any
    /// network access.
    #[error("no source entry for {variant} {version} on {os}/{arch}")]
    SourceNotFound {
        version: String,
        os: String,
        arch: String,
        variant: String,
    },

    /// Downloaded archive does not match the pinned checksum. Nothing
    /// was installed.
    #[error("checksum mismatch for {url}: expected {expected}, got {actual}")]
    ChecksumMismatch {
        url: String,
        expected: String,
        actual: String,
    },

    /// Archive extension not recognized.
    #[error("unsupported archive format: {}", path.display())]
    UnsupportedArchive {
        /// The archive path.
        path: PathBuf,
    },

    /// Cache I/O error.
    #[error("cache error at {path}: {detail}")]
    Cache { path: PathBuf, detail: String },

    /// HTTP error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// TOML parsing error (source manifests).
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for fetch operations.
pub type Result<T> = std::result::Result<T, FetchError>;
