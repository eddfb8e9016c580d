//! Toolchain selection and flag derivation.
//!
//! [`resolve`] maps a [`TargetDescription`] and an [`OptionSet`] to a
//! [`FlagBundle`]: the toolchain distribution to install, the normalized
//! target triple, and the ordered compiler/linker flags. It performs no
//! I/O and keeps no state; identical inputs always yield structurally
//! identical bundles.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::arch::{arch_profile, supported_tags};
use crate::error::{Result, TargetError};
use crate::host::{host_profile, supported_archs};
use crate::options::OptionSet;
use crate::target::{FpVariant, TargetDescription, TargetOs};

/// Which binary distribution supplies the compiler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ToolchainVariant {
    /// Upstream llvm-project release binaries.
    Upstream,
    /// ARM embedded toolchain for Cortex-M.
    ArmEmbedded,
}

impl ToolchainVariant {
    /// Canonical name, as used in cache paths and CLI output.
    pub fn as_str(self) -> &'static str {
        match self {
            ToolchainVariant::Upstream => "upstream",
            ToolchainVariant::ArmEmbedded => "arm-embedded",
        }
    }
}

impl fmt::Display for ToolchainVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ToolchainVariant {
    type Err = TargetError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "upstream" => Ok(ToolchainVariant::Upstream),
            "arm-embedded" => Ok(ToolchainVariant::ArmEmbedded),
            _ => Err(TargetError::InvalidOptionCombination {
                detail: format!("unknown toolchain variant '{s}' (expected upstream or arm-embedded)"),
            }),
        }
    }
}

/// Linker script referenced when `default_linker_script` is enabled.
/// The script ships inside the ARM embedded toolchain.
pub const DEFAULT_LINKER_SCRIPT: &str = "picolibc.ld";

/// The resolver's output: everything a build-file generator needs.
///
/// Flag order is part of the contract. The default linker script is the
/// first linker flag, so a caller-appended `-T` lands later on the
/// command line and wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct FlagBundle {
    /// Selected binary distribution.
    pub variant: ToolchainVariant,
    /// Normalized target triple.
    pub triple: String,
    /// Ordered compiler flags.
    pub compiler_flags: Vec<String>,
    /// Ordered linker flags.
    pub linker_flags: Vec<String>,
    /// Benign no-op notes (options that had no effect for this target).
    pub notes: Vec<String>,
}

/// Resolve a target description and option set into a flag bundle.
///
/// Errors with [`TargetError::UnsupportedTarget`] when no prebuilt
/// toolchain exists for the (os, arch) pair, and
/// [`TargetError::InvalidOptionCombination`] when a floating-point
/// variant is set on a target that cannot carry one. Resolution is
/// all-or-nothing; no partial bundle is ever returned.
pub fn resolve(target: &TargetDescription, options: &OptionSet) -> Result<FlagBundle> {
    // fp_variant carries meaning only on bare-metal Cortex-M.
    if target.fp_variant != FpVariant::None
        && !(target.os == TargetOs::Baremetal && target.is_cortex_m())
    {
        return Err(TargetError::InvalidOptionCombination {
            detail: format!(
                "floating-point variant set on non-Cortex-M target {}/{}",
                target.os, target.cpu_arch
            ),
        });
    }

    let (variant, triple, cortex) = match target.os {
        TargetOs::Baremetal => {
            let profile =
                arch_profile(&target.cpu_arch).ok_or_else(|| TargetError::UnsupportedTarget {
                    os: target.os.to_string(),
                    arch: target.cpu_arch.clone(),
                    supported: supported_tags(),
                })?;
            (
                ToolchainVariant::ArmEmbedded,
                profile.llvm_triple.to_string(),
                Some(profile),
            )
        }
        os => {
            let host =
                host_profile(os, &target.cpu_arch).ok_or_else(|| TargetError::UnsupportedTarget {
                    os: os.to_string(),
                    arch: target.cpu_arch.clone(),
                    supported: supported_archs(os),
                })?;
            (ToolchainVariant::Upstream, host.triple.to_string(), None)
        }
    };

    let mut compiler_flags = Vec::new();
    let mut linker_flags = Vec::new();
    let mut notes = Vec::new();

    // 1. Architecture flags. Only injected for Cortex-M and only when
    //    requested; with default_arch off the caller owns these flags and
    //    the resolver must not guess.
    if options.default_arch {
        if let Some(p) = cortex {
            compiler_flags.push(format!("-target {}", p.llvm_triple));
            compiler_flags.push(format!("-mcpu={}", p.cpu));
            compiler_flags.push(format!("-mfloat-abi={}", p.float_abi));
            if let Some(fpu) = p.fpu {
                compiler_flags.push(format!("-mfpu={fpu}"));
            }
        }
    }

    // 2. LTO. fat_lto without lto emits nothing and is recorded as a
    //    benign no-op, not an error.
    if options.lto {
        compiler_flags.push("-flto".to_string());
        if options.fat_lto {
            compiler_flags.push("-ffat-lto-objects".to_string());
        }
    } else if options.fat_lto {
        notes.push("fat-lto has no effect while lto is disabled".to_string());
    }

    // 3./4. Per-symbol sections.
    if options.function_sections {
        compiler_flags.push("-ffunction-sections".to_string());
    }
    if options.data_sections {
        compiler_flags.push("-fdata-sections".to_string());
    }

    // 6. Default linker script, bare-metal only. First on the linker list:
    //    a caller-supplied -T must land after it to take precedence.
    if target.os == TargetOs::Baremetal && options.default_linker_script {
        linker_flags.push(format!("-T{DEFAULT_LINKER_SCRIPT}"));
    }

    // 5. Section garbage collection, portable spelling. Per-OS linker
    //    dialects are the build-file emitter's concern.
    if options.gc_sections {
        linker_flags.push("--gc-sections".to_string());
    }

    Ok(FlagBundle {
        variant,
        triple,
        compiler_flags,
        linker_flags,
        notes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arch::CORTEX_M_PROFILES;

    fn baremetal(tag: &str) -> TargetDescription {
        TargetDescription::new(TargetOs::Baremetal, tag)
    }

    #[test]
    fn cortex_m4f_full_derivation() {
        let options = OptionSet {
            default_linker_script: false,
            ..OptionSet::default()
        };
        let bundle = resolve(&baremetal("cortex-m4f"), &options).unwrap();

        assert_eq!(bundle.variant, ToolchainVariant::ArmEmbedded);
        assert_eq!(bundle.triple, "armv7em-none-eabihf");
        assert_eq!(
            bundle.compiler_flags,
            vec![
                "-target armv7em-none-eabihf",
                "-mcpu=cortex-m4",
                "-mfloat-abi=hard",
                "-mfpu=fpv4-sp-d16",
                "-flto",
                "-ffat-lto-objects",
                "-ffunction-sections",
                "-fdata-sections",
            ]
        );
        assert_eq!(bundle.linker_flags, vec!["--gc-sections"]);
        assert!(bundle.notes.is_empty());
    }

    #[test]
    fn linux_x86_64_defaults() {
        let target = TargetDescription::new(TargetOs::Linux, "x86_64");
        let bundle = resolve(&target, &OptionSet::default()).unwrap();

        assert_eq!(bundle.variant, ToolchainVariant::Upstream);
        assert_eq!(bundle.triple, "x86_64-unknown-linux-gnu");
        // default_arch applies only to bare-metal Cortex-M.
        assert_eq!(
            bundle.compiler_flags,
            vec![
                "-flto",
                "-ffat-lto-objects",
                "-ffunction-sections",
                "-fdata-sections",
            ]
        );
        // default_linker_script is bare-metal only.
        assert_eq!(bundle.linker_flags, vec!["--gc-sections"]);
    }

    #[test]
    fn every_cortex_tag_emits_arch_flags_in_order() {
        for p in CORTEX_M_PROFILES {
            let bundle = resolve(&baremetal(p.tag), &OptionSet::default()).unwrap();
            let flags = &bundle.compiler_flags;

            assert_eq!(flags[0], format!("-target {}", p.llvm_triple), "{}", p.tag);
            assert_eq!(flags[1], format!("-mcpu={}", p.cpu), "{}", p.tag);
            assert_eq!(flags[2], format!("-mfloat-abi={}", p.float_abi), "{}", p.tag);

            let mfpu: Vec<_> = flags.iter().filter(|f| f.starts_with("-mfpu=")).collect();
            let has_fp_suffix = p.tag.ends_with('f') || p.tag.ends_with('d');
            assert_eq!(mfpu.len(), usize::from(has_fp_suffix), "{}", p.tag);
            if let Some(fpu) = p.fpu {
                assert_eq!(flags[3], format!("-mfpu={fpu}"), "{}", p.tag);
            }

            assert_eq!(
                flags.iter().filter(|f| f.starts_with("-target")).count(),
                1,
                "{}",
                p.tag
            );
            assert_eq!(
                flags.iter().filter(|f| f.starts_with("-mcpu=")).count(),
                1,
                "{}",
                p.tag
            );
        }
    }

    #[test]
    fn resolution_is_deterministic() {
        let target = baremetal("cortex-m33f");
        let options = OptionSet::default();
        assert_eq!(
            resolve(&target, &options).unwrap(),
            resolve(&target, &options).unwrap()
        );
    }

    #[test]
    fn default_arch_off_emits_no_arch_flags() {
        let options = OptionSet {
            default_arch: false,
            ..OptionSet::default()
        };
        let bundle = resolve(&baremetal("cortex-m7"), &options).unwrap();
        assert!(!bundle.compiler_flags.iter().any(|f| f.starts_with("-target")));
        assert!(!bundle.compiler_flags.iter().any(|f| f.starts_with("-mcpu=")));
        assert!(!bundle
            .compiler_flags
            .iter()
            .any(|f| f.starts_with("-mfloat-abi=")));
        // Variant selection is unaffected.
        assert_eq!(bundle.variant, ToolchainVariant::ArmEmbedded);
    }

    #[test]
    fn fat_lto_without_lto_is_a_noop() {
        let options = OptionSet {
            lto: false,
            fat_lto: true,
            ..OptionSet::default()
        };
        let bundle = resolve(&baremetal("cortex-m0"), &options).unwrap();
        assert!(!bundle.compiler_flags.iter().any(|f| f == "-flto"));
        assert!(!bundle
            .compiler_flags
            .iter()
            .any(|f| f == "-ffat-lto-objects"));
        assert_eq!(bundle.notes.len(), 1);
        assert!(bundle.notes[0].contains("fat-lto"));
    }

    #[test]
    fn lto_without_fat_lto() {
        let options = OptionSet {
            fat_lto: false,
            ..OptionSet::default()
        };
        let bundle = resolve(&baremetal("cortex-m0"), &options).unwrap();
        assert!(bundle.compiler_flags.iter().any(|f| f == "-flto"));
        assert!(!bundle
            .compiler_flags
            .iter()
            .any(|f| f == "-ffat-lto-objects"));
        assert!(bundle.notes.is_empty());
    }

    #[test]
    fn unknown_host_arch_is_unsupported() {
        let target = TargetDescription::new(TargetOs::Linux, "risc-v");
        let err = resolve(&target, &OptionSet::default()).unwrap_err();
        match err {
            TargetError::UnsupportedTarget { os, arch, supported } => {
                assert_eq!(os, "linux");
                assert_eq!(arch, "risc-v");
                assert!(supported.contains("x86_64"));
                assert!(supported.contains("armv8"));
            }
            other => panic!("expected UnsupportedTarget, got {other:?}"),
        }
    }

    #[test]
    fn unknown_cortex_tag_is_unsupported() {
        let err = resolve(&baremetal("cortex-m9000"), &OptionSet::default()).unwrap_err();
        match err {
            TargetError::UnsupportedTarget { supported, .. } => {
                assert!(supported.contains("cortex-m0"));
                assert!(supported.contains("cortex-m85"));
            }
            other => panic!("expected UnsupportedTarget, got {other:?}"),
        }
    }

    #[test]
    fn baremetal_non_cortex_is_unsupported() {
        let target = TargetDescription::new(TargetOs::Baremetal, "x86_64");
        assert!(matches!(
            resolve(&target, &OptionSet::default()),
            Err(TargetError::UnsupportedTarget { .. })
        ));
    }

    #[test]
    fn fp_variant_on_host_target_is_invalid() {
        let target = TargetDescription {
            os: TargetOs::Linux,
            cpu_arch: "x86_64".to_string(),
            fp_variant: FpVariant::SinglePrecision,
        };
        assert!(matches!(
            resolve(&target, &OptionSet::default()),
            Err(TargetError::InvalidOptionCombination { .. })
        ));
    }

    #[test]
    fn default_linker_script_precedes_gc_sections() {
        let bundle = resolve(&baremetal("cortex-m4"), &OptionSet::default()).unwrap();
        assert_eq!(
            bundle.linker_flags,
            vec![format!("-T{DEFAULT_LINKER_SCRIPT}"), "--gc-sections".to_string()]
        );
    }

    #[test]
    fn default_linker_script_is_baremetal_only() {
        let target = TargetDescription::new(TargetOs::Macos, "armv8");
        let bundle = resolve(&target, &OptionSet::default()).unwrap();
        assert!(!bundle.linker_flags.iter().any(|f| f.starts_with("-T")));
    }

    #[test]
    fn all_sections_off_yields_minimal_flags() {
        let options = OptionSet {
            default_arch: false,
            lto: false,
            fat_lto: false,
            function_sections: false,
            data_sections: false,
            gc_sections: false,
            default_linker_script: false,
        };
        let bundle = resolve(&baremetal("cortex-m3"), &options).unwrap();
        assert!(bundle.compiler_flags.is_empty());
        assert!(bundle.linker_flags.is_empty());
        assert_eq!(bundle.variant, ToolchainVariant::ArmEmbedded);
        assert_eq!(bundle.triple, "armv7m-none-eabi");
    }

    #[test]
    fn windows_host_triple() {
        let target = TargetDescription::new(TargetOs::Windows, "armv8");
        let bundle = resolve(&target, &OptionSet::default()).unwrap();
        assert_eq!(bundle.triple, "aarch64-pc-windows-msvc");
        assert_eq!(bundle.variant, ToolchainVariant::Upstream);
    }
}
