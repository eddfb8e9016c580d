//! `llvmup profile` — build profile management.

use std::path::Path;

use anyhow::Result;

use llvmup_targets::profile::generate_template;
use llvmup_targets::TargetOs;

/// Write a template profile to a file, or print it.
pub fn template(os: &str, arch: &str, output: Option<&Path>) -> Result<()> {
    let os: TargetOs = os.parse()?;
    let toml_str = generate_template(os, arch)?;
    match output {
        Some(path) => {
            std::fs::write(path, toml_str)?;
            println!("Wrote {}", path.display());
        }
        None => print!("{toml_str}"),
    }
    Ok(())
}
