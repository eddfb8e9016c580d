//! CLI subcommand implementations.

pub mod clean;
pub mod emit;
pub mod fetch;
pub mod profile;
pub mod resolve;
pub mod target;

use std::path::Path;

use anyhow::{bail, Context, Result};

use llvmup_targets::{load_profile, OptionSet, TargetDescription, TargetOs};

/// Option disables collected from `--no-*` flags. `true` disables.
#[derive(Debug, Clone, Default)]
pub struct Disables {
    pub default_arch: bool,
    pub lto: bool,
    pub fat_lto: bool,
    pub function_sections: bool,
    pub data_sections: bool,
    pub gc_sections: bool,
    pub default_linker_script: bool,
}

impl Disables {
    pub fn from_selection(selection: &crate::TargetSelection) -> Self {
        Disables {
            default_arch: selection.no_default_arch,
            lto: selection.no_lto,
            fat_lto: selection.no_fat_lto,
            function_sections: selection.no_function_sections,
            data_sections: selection.no_data_sections,
            gc_sections: selection.no_gc_sections,
            default_linker_script: selection.no_default_linker_script,
        }
    }

    fn apply(&self, options: &mut OptionSet) {
        if self.default_arch {
            options.default_arch = false;
        }
        if self.lto {
            options.lto = false;
        }
        if self.fat_lto {
            options.fat_lto = false;
        }
        if self.function_sections {
            options.function_sections = false;
        }
        if self.data_sections {
            options.data_sections = false;
        }
        if self.gc_sections {
            options.gc_sections = false;
        }
        if self.default_linker_script {
            options.default_linker_script = false;
        }
    }
}

/// Build the (target, options) pair from either a profile file or
/// explicit `--os`/`--arch`, then apply `--no-*` overrides on top.
pub fn selection(
    profile: Option<&Path>,
    os: Option<&str>,
    arch: Option<&str>,
    disables: &Disables,
) -> Result<(TargetDescription, OptionSet)> {
    let (target, mut options) = match (profile, os, arch) {
        (Some(path), _, _) => {
            let profile = load_profile(path)
                .with_context(|| format!("loading profile {}", path.display()))?;
            (profile.target_description(), profile.options)
        }
        (None, Some(os), Some(arch)) => {
            let os: TargetOs = os.parse()?;
            (TargetDescription::new(os, arch), OptionSet::default())
        }
        _ => bail!("specify either --profile <file> or both --os and --arch"),
    };
    disables.apply(&mut options);
    Ok((target, options))
}
