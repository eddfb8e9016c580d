//! Toolchain archive download, verification, and cache for llvmup.
//!
//! Provisions prebuilt toolchain archives keyed by
//! (version, host os, host arch, variant):
//! - a [`source::SourceManifest`] maps each key to a URL and SHA-256,
//! - [`fetch::Fetcher`] downloads, verifies, unpacks, and installs
//!   atomically into a [`cache::ToolchainCache`],
//! - at most one fetch runs per key at a time, and a partially extracted
//!   toolchain is never visible as installed.
//!
//! This crate owns all the I/O the resolver in `llvmup-targets`
//! deliberately has none of.

pub mod archive;
pub mod cache;
pub mod error;
pub mod fetch;
pub mod integrity;
pub mod source;

// Re-exports for convenience.
pub use cache::ToolchainCache;
pub use error::{FetchError, Result};
pub use fetch::Fetcher;
pub use integrity::ContentHash;
pub use source::{ArtifactKey, SourceEntry, SourceManifest};
