//! `llvmup resolve` — run the resolver and print the flag bundle.

use anyhow::{bail, Result};

use llvmup_targets::{resolve, OptionSet, TargetDescription};

/// Resolve and print, human-readable by default or as JSON.
pub fn run(target: &TargetDescription, options: &OptionSet, format: Option<&str>) -> Result<()> {
    let bundle = resolve(target, options)?;

    match format.unwrap_or("human") {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&bundle)?);
        }
        "human" => {
            println!("Variant: {}", bundle.variant);
            println!("Triple:  {}", bundle.triple);
            println!();
            println!("Compiler flags:");
            for flag in &bundle.compiler_flags {
                println!("  {flag}");
            }
            println!();
            println!("Linker flags:");
            for flag in &bundle.linker_flags {
                println!("  {flag}");
            }
            for note in &bundle.notes {
                println!();
                println!("note: {note}");
            }
        }
        other => bail!("unknown format '{other}' (expected human or json)"),
    }
    Ok(())
}
