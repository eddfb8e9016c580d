//! `llvmup emit` — render build glue for a resolved target.

use std::path::Path;

use anyhow::Result;

use llvmup_emit::{write_env_script, write_toolchain_file, CmakeToolchain};
use llvmup_targets::{resolve, OptionSet, TargetDescription};

/// Resolve the target and write a CMake toolchain file.
pub fn cmake(
    target: &TargetDescription,
    options: &OptionSet,
    toolchain_root: &Path,
    output: &Path,
    linker_flags: &[String],
) -> Result<()> {
    let bundle = resolve(target, options)?;
    write_toolchain_file(
        output,
        &CmakeToolchain {
            bundle: &bundle,
            os: target.os,
            toolchain_root,
            caller_linker_flags: linker_flags,
        },
    )?;
    println!("Wrote {}", output.display());
    for note in &bundle.notes {
        println!("note: {note}");
    }
    Ok(())
}

/// Write a POSIX environment script for an installed toolchain.
pub fn env(toolchain_root: &Path, output: &Path) -> Result<()> {
    write_env_script(output, toolchain_root)?;
    println!("Wrote {}", output.display());
    Ok(())
}
