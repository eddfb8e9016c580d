//! Target description model.
//!
//! A [`TargetDescription`] says what the toolchain will emit code for:
//! one of the three supported host operating systems, or bare-metal ARM
//! Cortex-M. The floating-point variant is not free-standing data; it is
//! derived from the trailing suffix of the Cortex-M tag (`cortex-m4f`,
//! `cortex-m7d`).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TargetError;

/// Operating system the toolchain emits code for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TargetOs {
    /// Linux host, glibc environment.
    Linux,
    /// macOS host.
    Macos,
    /// Windows host, MSVC environment.
    Windows,
    /// No operating system (embedded Cortex-M).
    Baremetal,
}

impl TargetOs {
    /// Whether this is one of the three host operating systems.
    pub fn is_host(self) -> bool {
        !matches!(self, TargetOs::Baremetal)
    }

    /// Canonical lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            TargetOs::Linux => "linux",
            TargetOs::Macos => "macos",
            TargetOs::Windows => "windows",
            TargetOs::Baremetal => "baremetal",
        }
    }
}

impl fmt::Display for TargetOs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TargetOs {
    type Err = TargetError;

    /// Accepts both the lowercase names and the capitalized spellings
    /// used by package-manager profiles ("Linux", "Macos", "Windows").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "linux" => Ok(TargetOs::Linux),
            "macos" => Ok(TargetOs::Macos),
            "windows" => Ok(TargetOs::Windows),
            "baremetal" | "bare-metal" => Ok(TargetOs::Baremetal),
            _ => Err(TargetError::UnknownOs {
                name: s.to_string(),
            }),
        }
    }
}

/// Floating-point variant encoded in the trailing suffix of a Cortex-M tag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FpVariant {
    /// Software floating point (no suffix).
    #[default]
    None,
    /// Single-precision hardware float (`f` suffix).
    SinglePrecision,
    /// Double-precision hardware float (`d` suffix).
    DoublePrecision,
}

impl FpVariant {
    /// Derive the variant from an architecture tag.
    ///
    /// Only Cortex-M tags carry a suffix; everything else is `None`.
    /// `cortex-m0plus` and `cortex-m35p` end in ordinary letters and
    /// stay soft-float.
    pub fn from_tag(tag: &str) -> FpVariant {
        if !is_cortex_m_tag(tag) {
            return FpVariant::None;
        }
        match tag.as_bytes().last() {
            Some(b'f') => FpVariant::SinglePrecision,
            Some(b'd') => FpVariant::DoublePrecision,
            _ => FpVariant::None,
        }
    }
}

/// Whether an architecture tag names a Cortex-M variant.
pub fn is_cortex_m_tag(tag: &str) -> bool {
    tag.starts_with("cortex-m")
}

/// Immutable description of what is being built for.
///
/// Construct with [`TargetDescription::new`] so the floating-point
/// variant stays consistent with the architecture tag. The variant is
/// only meaningful for bare-metal Cortex-M targets; the resolver rejects
/// any other pairing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TargetDescription {
    /// Target operating system.
    pub os: TargetOs,
    /// CPU architecture identifier (e.g. "x86_64", "armv8", "cortex-m4f").
    pub cpu_arch: String,
    /// Floating-point variant derived from the architecture tag.
    pub fp_variant: FpVariant,
}

impl TargetDescription {
    /// Build a description, deriving the floating-point variant from the
    /// architecture tag.
    pub fn new(os: TargetOs, cpu_arch: impl Into<String>) -> Self {
        let cpu_arch = cpu_arch.into();
        let fp_variant = FpVariant::from_tag(&cpu_arch);
        TargetDescription {
            os,
            cpu_arch,
            fp_variant,
        }
    }

    /// Whether the architecture tag names a Cortex-M variant.
    pub fn is_cortex_m(&self) -> bool {
        is_cortex_m_tag(&self.cpu_arch)
    }
}
