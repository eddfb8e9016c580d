//! Per-architecture constants for the ARM Cortex-M family.
//!
//! One [`ArchProfile`] per supported Cortex-M tag. The mapping is total
//! over the supported tags and fixed at compile time; it is configuration
//! data, not behavior, so it lives in a const table rather than a type
//! hierarchy.

use std::fmt;

/// Float ABI selection passed to the compiler via `-mfloat-abi=`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FloatAbi {
    /// Software floating point.
    Soft,
    /// Hardware floating point, FP registers used for arguments.
    Hard,
}

impl FloatAbi {
    /// The spelling used on the compiler command line.
    pub fn as_str(self) -> &'static str {
        match self {
            FloatAbi::Soft => "soft",
            FloatAbi::Hard => "hard",
        }
    }
}

impl fmt::Display for FloatAbi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compiler-facing constants for one Cortex-M variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArchProfile {
    /// Architecture tag as it appears in build profiles (e.g. "cortex-m4f").
    pub tag: &'static str,
    /// LLVM target triple for code generation.
    pub llvm_triple: &'static str,
    /// Value for `-mcpu=`.
    pub cpu: &'static str,
    /// Value for `-mfloat-abi=`.
    pub float_abi: FloatAbi,
    /// Value for `-mfpu=`, present only on hard-float variants.
    pub fpu: Option<&'static str>,
}

/// All supported Cortex-M variants.
///
/// Hard-float tags (`f`/`d` suffix) use the `eabihf` triple and name the
/// FPU; everything else is soft-float `eabi`.
pub const CORTEX_M_PROFILES: &[ArchProfile] = &[
    ArchProfile {
        tag: "cortex-m0",
        llvm_triple: "armv6m-none-eabi",
        cpu: "cortex-m0",
        float_abi: FloatAbi::Soft,
        fpu: None,
    },
    ArchProfile {
        tag: "cortex-m0plus",
        llvm_triple: "armv6m-none-eabi",
        cpu: "cortex-m0plus",
        float_abi: FloatAbi::Soft,
        fpu: None,
    },
    ArchProfile {
        tag: "cortex-m1",
        llvm_triple: "armv6m-none-eabi",
        cpu: "cortex-m1",
        float_abi: FloatAbi::Soft,
        fpu: None,
    },
    ArchProfile {
        tag: "cortex-m3",
        llvm_triple: "armv7m-none-eabi",
        cpu: "cortex-m3",
        float_abi: FloatAbi::Soft,
        fpu: None,
    },
    ArchProfile {
        tag: "cortex-m4",
        llvm_triple: "armv7em-none-eabi",
        cpu: "cortex-m4",
        float_abi: FloatAbi::Soft,
        fpu: None,
    },
    ArchProfile {
        tag: "cortex-m4f",
        llvm_triple: "armv7em-none-eabihf",
        cpu: "cortex-m4",
        float_abi: FloatAbi::Hard,
        fpu: Some("fpv4-sp-d16"),
    },
    ArchProfile {
        tag: "cortex-m7",
        llvm_triple: "armv7em-none-eabi",
        cpu: "cortex-m7",
        float_abi: FloatAbi::Soft,
        fpu: None,
    },
    ArchProfile {
        tag: "cortex-m7f",
        llvm_triple: "armv7em-none-eabihf",
        cpu: "cortex-m7",
        float_abi: FloatAbi::Hard,
        fpu: Some("fpv5-sp-d16"),
    },
    ArchProfile {
        tag: "cortex-m7d",
        llvm_triple: "armv7em-none-eabihf",
        cpu: "cortex-m7",
        float_abi: FloatAbi::Hard,
        fpu: Some("fpv5-d16"),
    },
    ArchProfile {
        tag: "cortex-m23",
        llvm_triple: "armv8m.base-none-eabi",
        cpu: "cortex-m23",
        float_abi: FloatAbi::Soft,
        fpu: None,
    },
    ArchProfile {
        tag: "cortex-m33",
        llvm_triple: "armv8m.main-none-eabi",
        cpu: "cortex-m33",
        float_abi: FloatAbi::Soft,
        fpu: None,
    },
    ArchProfile {
        tag: "cortex-m33f",
        llvm_triple: "armv8m.main-none-eabihf",
        cpu: "cortex-m33",
        float_abi: FloatAbi::Hard,
        fpu: Some("fpv5-sp-d16"),
    },
    ArchProfile {
        tag: "cortex-m35p",
        llvm_triple: "armv8m.main-none-eabi",
        cpu: "cortex-m35p",
        float_abi: FloatAbi::Soft,
        fpu: None,
    },
    ArchProfile {
        tag: "cortex-m35pf",
        llvm_triple: "armv8m.main-none-eabihf",
        cpu: "cortex-m35p",
        float_abi: FloatAbi::Hard,
        fpu: Some("fpv5-sp-d16"),
    },
    ArchProfile {
        tag: "cortex-m55",
        llvm_triple: "armv8.1m.main-none-eabi",
        cpu: "cortex-m55",
        float_abi: FloatAbi::Soft,
        fpu: None,
    },
    ArchProfile {
        tag: "cortex-m85",
        llvm_triple: "armv8.1m.main-none-eabi",
        cpu: "cortex-m85",
        float_abi: FloatAbi::Soft,
        fpu: None,
    },
];

/// Look up the profile for a Cortex-M tag.
pub fn arch_profile(tag: &str) -> Option<&'static ArchProfile> {
    CORTEX_M_PROFILES.iter().find(|p| p.tag == tag)
}

/// Comma-separated list of all supported Cortex-M tags, for error messages.
pub fn supported_tags() -> String {
    CORTEX_M_PROFILES
        .iter()
        .map(|p| p.tag)
        .collect::<Vec<_>>()
        .join(", ")
}
