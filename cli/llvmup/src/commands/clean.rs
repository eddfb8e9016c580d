//! `llvmup clean` — remove installed toolchains.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use llvmup_fetch::ArtifactKey;
use llvmup_targets::{TargetOs, ToolchainVariant};

use crate::commands::fetch::open_cache;

/// Remove one installed toolchain, or the whole cache.
pub fn run(
    version: Option<&str>,
    os: Option<&str>,
    arch: Option<&str>,
    variant: Option<&str>,
    cache_dir: Option<PathBuf>,
) -> Result<()> {
    let cache = open_cache(cache_dir)?;

    let (version, variant) = match (version, variant) {
        (None, None) => {
            // No key given: clear everything.
            if cache.remove_all()? {
                println!("Removed {}", cache.root().display());
            } else {
                println!("Nothing to clean at {}", cache.root().display());
            }
            return Ok(());
        }
        (Some(version), Some(variant)) => (version, variant),
        _ => bail!("removing a single install requires both --version and --variant"),
    };

    let version = semver::Version::parse(version)
        .with_context(|| format!("invalid version '{version}'"))?;
    let os: TargetOs = os.unwrap_or("linux").parse()?;
    let variant: ToolchainVariant = variant.parse()?;
    let key = ArtifactKey::new(version, os, arch.unwrap_or("x86_64"), variant)?;

    if cache.remove(&key)? {
        println!("Removed {key}");
    } else {
        println!("{key} is not installed");
    }
    Ok(())
}
