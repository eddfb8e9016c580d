//! `llvmup target` — supported target listing and description.

use anyhow::{bail, Result};

use llvmup_targets::{arch_profile, host_profile, TargetOs, CORTEX_M_PROFILES, HOST_PROFILES};

/// List all supported targets.
pub fn list() -> Result<()> {
    println!("Host platforms (upstream toolchain):");
    println!();
    for p in HOST_PROFILES {
        println!("  {:<18} {}", format!("{}/{}", p.os, p.arch), p.triple);
    }
    println!();
    println!("Cortex-M targets (arm-embedded toolchain):");
    println!();
    for p in CORTEX_M_PROFILES {
        println!("  {:<15} {}", p.tag, p.llvm_triple);
    }
    println!();
    println!("Use 'llvmup target describe <arch>' for details.");
    Ok(())
}

/// Describe one architecture in detail.
pub fn describe(arch: &str) -> Result<()> {
    if let Some(p) = arch_profile(arch) {
        println!("=== {} ===", p.tag);
        println!("Toolchain:  arm-embedded");
        println!("Triple:     {}", p.llvm_triple);
        println!("CPU:        {}", p.cpu);
        println!("Float ABI:  {}", p.float_abi);
        if let Some(fpu) = p.fpu {
            println!("FPU:        {fpu}");
        }
        return Ok(());
    }

    let hosts: Vec<_> = [TargetOs::Linux, TargetOs::Macos, TargetOs::Windows]
        .into_iter()
        .filter_map(|os| host_profile(os, arch))
        .collect();
    if hosts.is_empty() {
        bail!("unknown target: '{arch}'. Use 'llvmup target list' to see available targets.");
    }

    println!("=== {arch} ===");
    println!("Toolchain:  upstream");
    for h in hosts {
        println!("  {:<10} {}", h.os, h.triple);
    }
    Ok(())
}
