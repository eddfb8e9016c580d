//! CMake toolchain file rendering.
//!
//! Turns a resolved flag bundle plus an installed toolchain root into a
//! toolchain file a downstream project passes via
//! `-DCMAKE_TOOLCHAIN_FILE=`. Rendering is plain string building and
//! deterministic: identical inputs produce identical bytes.

use std::path::Path;

use llvmup_targets::{FlagBundle, TargetOs};

use crate::error::Result;
use crate::flags::{driver_link_args, merge_linker_flags};

/// Inputs for toolchain file rendering.
#[derive(Debug, Clone)]
pub struct CmakeToolchain<'a> {
    /// The resolved flag bundle.
    pub bundle: &'a FlagBundle,
    /// Target operating system the bundle was resolved for.
    pub os: TargetOs,
    /// Root directory of the installed toolchain.
    pub toolchain_root: &'a Path,
    /// Caller-supplied linker flags, merged over the resolver defaults.
    pub caller_linker_flags: &'a [String],
}

/// Render the toolchain file contents.
pub fn render_toolchain_file(input: &CmakeToolchain<'_>) -> String {
    let root = input.toolchain_root.display();
    let mut out = String::new();

    out.push_str("# Generated by llvmup. Do not edit.\n\n");

    // Cross builds need an explicit system; host builds configure the
    // running system and must not override it.
    if input.os == TargetOs::Baremetal {
        out.push_str("set(CMAKE_SYSTEM_NAME Generic)\n");
        out.push_str("set(CMAKE_SYSTEM_PROCESSOR ARM)\n");
        out.push_str("set(CMAKE_TRY_COMPILE_TARGET_TYPE STATIC_LIBRARY)\n");
        out.push('\n');
    }

    out.push_str(&format!("set(CMAKE_C_COMPILER \"{root}/bin/clang\")\n"));
    out.push_str(&format!("set(CMAKE_CXX_COMPILER \"{root}/bin/clang++\")\n"));
    out.push_str(&format!("set(CMAKE_ASM_COMPILER \"{root}/bin/clang\")\n"));
    out.push('\n');

    let compiler_flags = input.bundle.compiler_flags.join(" ");
    out.push_str(&format!("set(CMAKE_C_FLAGS_INIT \"{compiler_flags}\")\n"));
    out.push_str(&format!("set(CMAKE_CXX_FLAGS_INIT \"{compiler_flags}\")\n"));
    out.push_str(&format!("set(CMAKE_ASM_FLAGS_INIT \"{compiler_flags}\")\n"));
    out.push('\n');

    let merged = merge_linker_flags(&input.bundle.linker_flags, input.caller_linker_flags);
    let mut link_args = vec!["-fuse-ld=lld".to_string()];
    link_args.extend(driver_link_args(&merged, input.os));
    out.push_str(&format!(
        "set(CMAKE_EXE_LINKER_FLAGS_INIT \"{}\")\n",
        link_args.join(" ")
    ));
    out.push('\n');

    out.push_str(&format!("set(CMAKE_FIND_ROOT_PATH \"{root}\")\n"));
    out.push_str("set(CMAKE_FIND_ROOT_PATH_MODE_PROGRAM NEVER)\n");
    if input.os == TargetOs::Baremetal {
        out.push_str("set(CMAKE_FIND_ROOT_PATH_MODE_LIBRARY ONLY)\n");
        out.push_str("set(CMAKE_FIND_ROOT_PATH_MODE_INCLUDE ONLY)\n");
    }

    out
}

/// Render and write the toolchain file.
pub fn write_toolchain_file(path: &Path, input: &CmakeToolchain<'_>) -> Result<()> {
    std::fs::write(path, render_toolchain_file(input))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use llvmup_targets::{resolve, OptionSet, TargetDescription};
    use std::path::PathBuf;

    fn baremetal_input() -> (FlagBundle, PathBuf) {
        let target = TargetDescription::new(TargetOs::Baremetal, "cortex-m4f");
        let bundle = resolve(&target, &OptionSet::default()).unwrap();
        (bundle, PathBuf::from("/opt/llvm-et-arm"))
    }

    #[test]
    fn baremetal_file_sets_cross_system() {
        let (bundle, root) = baremetal_input();
        let rendered = render_toolchain_file(&CmakeToolchain {
            bundle: &bundle,
            os: TargetOs::Baremetal,
            toolchain_root: &root,
            caller_linker_flags: &[],
        });

        assert!(rendered.contains("set(CMAKE_SYSTEM_NAME Generic)"));
        assert!(rendered.contains("set(CMAKE_SYSTEM_PROCESSOR ARM)"));
        assert!(rendered.contains("set(CMAKE_C_COMPILER \"/opt/llvm-et-arm/bin/clang\")"));
        assert!(rendered.contains("-target armv7em-none-eabihf"));
        assert!(rendered.contains("-fuse-ld=lld -Tpicolibc.ld -Wl,--gc-sections"));
    }

    #[test]
    fn host_file_leaves_system_alone() {
        let target = TargetDescription::new(TargetOs::Linux, "x86_64");
        let bundle = resolve(&target, &OptionSet::default()).unwrap();
        let root = PathBuf::from("/opt/clang+llvm");
        let rendered = render_toolchain_file(&CmakeToolchain {
            bundle: &bundle,
            os: TargetOs::Linux,
            toolchain_root: &root,
            caller_linker_flags: &[],
        });

        assert!(!rendered.contains("CMAKE_SYSTEM_NAME"));
        assert!(rendered.contains("set(CMAKE_CXX_FLAGS_INIT \"-flto -ffat-lto-objects -ffunction-sections -fdata-sections\")"));
        assert!(rendered.contains("-Wl,--gc-sections"));
    }

    #[test]
    fn caller_linker_script_overrides_default() {
        let (bundle, root) = baremetal_input();
        let caller = vec!["-Tboard.ld".to_string()];
        let rendered = render_toolchain_file(&CmakeToolchain {
            bundle: &bundle,
            os: TargetOs::Baremetal,
            toolchain_root: &root,
            caller_linker_flags: &caller,
        });

        assert!(!rendered.contains("picolibc.ld"));
        assert!(rendered.contains("-Tboard.ld"));
    }

    #[test]
    fn rendering_is_deterministic() {
        let (bundle, root) = baremetal_input();
        let input = CmakeToolchain {
            bundle: &bundle,
            os: TargetOs::Baremetal,
            toolchain_root: &root,
            caller_linker_flags: &[],
        };
        assert_eq!(render_toolchain_file(&input), render_toolchain_file(&input));
    }

    #[test]
    fn write_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("toolchain.cmake");
        let (bundle, root) = baremetal_input();
        write_toolchain_file(
            &path,
            &CmakeToolchain {
                bundle: &bundle,
                os: TargetOs::Baremetal,
                toolchain_root: &root,
                caller_linker_flags: &[],
            },
        )
        .unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("# Generated by llvmup."));
    }
}
