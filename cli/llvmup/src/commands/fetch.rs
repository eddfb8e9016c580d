//! `llvmup fetch` / `llvmup list` — toolchain provisioning and cache
//! inspection.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use llvmup_fetch::{ArtifactKey, Fetcher, SourceManifest, ToolchainCache};
use llvmup_targets::{TargetOs, ToolchainVariant};

/// Download, verify, and install one toolchain.
pub fn run(
    version: &str,
    os: Option<&str>,
    arch: Option<&str>,
    variant: &str,
    sources: &Path,
    cache_dir: Option<PathBuf>,
) -> Result<()> {
    let version = semver::Version::parse(version)
        .with_context(|| format!("invalid version '{version}'"))?;
    let os: TargetOs = os.unwrap_or("linux").parse()?;
    let arch = arch.unwrap_or("x86_64");
    let variant: ToolchainVariant = variant.parse()?;

    let key = ArtifactKey::new(version, os, arch, variant)?;
    let manifest = SourceManifest::load(sources)
        .with_context(|| format!("loading source manifest {}", sources.display()))?;

    let cache = open_cache(cache_dir)?;
    let fetcher = Fetcher::new(cache);

    println!("Provisioning {key}...");
    let installed = fetcher.provision(&key, &manifest)?;
    println!("Installed: {}", installed.display());
    Ok(())
}

/// List completed installs in the cache.
pub fn list(cache_dir: Option<PathBuf>) -> Result<()> {
    let cache = open_cache(cache_dir)?;
    let installed = cache.list()?;
    if installed.is_empty() {
        println!("No toolchains installed in {}", cache.root().display());
        return Ok(());
    }
    println!("Installed toolchains:");
    for tc in installed {
        println!(
            "  {:<14} {:<10} {:<28} {}",
            tc.variant,
            tc.version,
            tc.triple,
            tc.path.display()
        );
    }
    Ok(())
}

/// Open the cache at the given or default location.
pub fn open_cache(cache_dir: Option<PathBuf>) -> Result<ToolchainCache> {
    match cache_dir {
        Some(dir) => Ok(ToolchainCache::new(dir)),
        None => match ToolchainCache::default_location() {
            Some(cache) => Ok(cache),
            None => bail!("cannot determine home directory; pass --cache-dir"),
        },
    }
}
