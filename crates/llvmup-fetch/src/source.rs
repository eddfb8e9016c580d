//! Source manifests: where toolchain archives come from.
//!
//! A source manifest is a TOML data table pinning, per
//! (version, host os, host arch, variant), the archive URL and its
//! SHA-256 digest:
//!
//! ```toml
//! [[sources]]
//! version = "18.1.8"
//! os = "linux"
//! arch = "x86_64"
//! variant = "upstream"
//! sha256 = "…"
//! ```
//!
//! The URL may be omitted for the two known distributions, in which case
//! it is filled from the release URL template; the checksum is always
//! required.

use std::path::Path;

use serde::{Deserialize, Serialize};

use llvmup_targets::{host_profile, TargetOs, ToolchainVariant};

use crate::error::{FetchError, Result};

/// Identity of one toolchain archive: what to fetch and for which host.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArtifactKey {
    /// Toolchain release version.
    pub version: semver::Version,
    /// Host operating system the binaries run on.
    pub os: TargetOs,
    /// Host CPU architecture.
    pub arch: String,
    /// Which distribution supplies the archive.
    pub variant: ToolchainVariant,
}

impl ArtifactKey {
    /// Build a key, rejecting hosts with no prebuilt binaries.
    pub fn new(
        version: semver::Version,
        os: TargetOs,
        arch: impl Into<String>,
        variant: ToolchainVariant,
    ) -> Result<Self> {
        let arch = arch.into();
        if host_profile(os, &arch).is_none() {
            return Err(FetchError::UnsupportedHost {
                os: os.to_string(),
                arch,
            });
        }
        Ok(ArtifactKey {
            version,
            os,
            arch,
            variant,
        })
    }

    /// Normalized triple of the host this archive runs on.
    pub fn host_triple(&self) -> &'static str {
        // new() guarantees the lookup succeeds.
        host_profile(self.os, &self.arch)
            .map(|p| p.triple)
            .unwrap_or("unknown")
    }
}

impl std::fmt::Display for ArtifactKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}-{}-{}-{}",
            self.variant, self.version, self.os, self.arch
        )
    }
}

/// One pinned archive in a source manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SourceEntry {
    /// Toolchain release version.
    pub version: semver::Version,
    /// Host operating system.
    pub os: TargetOs,
    /// Host CPU architecture.
    pub arch: String,
    /// Distribution variant.
    pub variant: ToolchainVariant,
    /// Archive URL; filled from the release template when omitted.
    #[serde(default)]
    pub url: Option<String>,
    /// Pinned SHA-256 hex digest of the archive.
    pub sha256: String,
}

/// A parsed source manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SourceManifest {
    /// Pinned archives.
    #[serde(default)]
    pub sources: Vec<SourceEntry>,
}

impl SourceManifest {
    /// Load a manifest from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse a manifest from a TOML string.
    pub fn parse(toml_str: &str) -> Result<Self> {
        let manifest: SourceManifest = toml::from_str(toml_str)?;
        Ok(manifest)
    }

    /// Find the entry for a key, if pinned.
    pub fn lookup(&self, key: &ArtifactKey) -> Option<&SourceEntry> {
        self.sources.iter().find(|e| {
            e.version == key.version
                && e.os == key.os
                && e.arch == key.arch
                && e.variant == key.variant
        })
    }
}

impl SourceEntry {
    /// The archive URL: the pinned one, or the distribution's release
    /// URL template.
    pub fn resolved_url(&self, key: &ArtifactKey) -> String {
        if let Some(url) = &self.url {
            return url.clone();
        }
        match self.variant {
            ToolchainVariant::Upstream => upstream_url(&self.version, key.host_triple()),
            ToolchainVariant::ArmEmbedded => {
                arm_embedded_url(&self.version, self.os, &self.arch)
            }
        }
    }
}

/// Upstream llvm-project release archive URL.
fn upstream_url(version: &semver::Version, triple: &str) -> String {
    format!(
        "https://github.com/llvm/llvm-project/releases/download/\
         llvmorg-{version}/clang+llvm-{version}-{triple}.tar.xz"
    )
}

/// ARM embedded toolchain release archive URL.
fn arm_embedded_url(version: &semver::Version, os: TargetOs, arch: &str) -> String {
    // ARM's release artifacts are named by host OS, with a universal
    // macOS binary.
    let host = match (os, arch) {
        (TargetOs::Macos, _) => "Darwin-universal".to_string(),
        (TargetOs::Linux, "armv8") => "Linux-AArch64".to_string(),
        (TargetOs::Windows, "armv8") => "Windows-AArch64".to_string(),
        (os, _) => {
            let os = match os {
                TargetOs::Linux => "Linux",
                TargetOs::Windows => "Windows",
                _ => "Linux",
            };
            format!("{os}-x86_64")
        }
    };
    format!(
        "https://github.com/ARM-software/LLVM-embedded-toolchain-for-Arm/\
         releases/download/release-{version}/LLVM-ET-Arm-{version}-{host}.tar.xz"
    )
}
