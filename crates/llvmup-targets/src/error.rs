//! Error types for target resolution and profile loading.

use std::path::PathBuf;

/// Errors that can occur while resolving a target or loading a profile.
#[derive(Debug, thiserror::Error)]
pub enum TargetError {
    /// No prebuilt toolchain exists for this os/arch pair.
    #[error("unsupported target {os}/{arch} (supported for {os}: {supported})")]
    UnsupportedTarget {
        /// The requested operating system.
        os: String,
        /// The requested CPU architecture.
        arch: String,
        /// Comma-separated list of architectures with known binaries.
        supported: String,
    },

    /// Contradictory target/option pairing.
    #[error("invalid option combination: {detail}")]
    InvalidOptionCombination {
        /// Description of the contradiction.
        detail: String,
    },

    /// Operating system name not recognized.
    #[error("unknown operating system '{name}' (expected linux, macos, windows, or baremetal)")]
    UnknownOs {
        /// The unrecognized name.
        name: String,
    },

    /// TOML deserialization error.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML serialization error.
    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    /// I/O error reading/writing profile files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Build profile file not found.
    #[error("build profile not found: {}", path.display())]
    NotFound {
        /// The path that was not found.
        path: PathBuf,
    },
}

/// Result type for target operations.
pub type Result<T> = std::result::Result<T, TargetError>;
