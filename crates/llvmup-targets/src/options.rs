//! Resolver option toggles.

use serde::{Deserialize, Serialize};

/// Boolean build options controlling flag derivation.
///
/// All options default to enabled. `fat_lto` only takes effect when
/// `lto` is on, and `default_linker_script` only applies to bare-metal
/// targets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct OptionSet {
    /// Inject `-target`/`-mcpu`/`-mfloat-abi`/`-mfpu` for Cortex-M
    /// targets. When off, the caller supplies target flags externally.
    pub default_arch: bool,
    /// Enable link-time optimization (`-flto`).
    pub lto: bool,
    /// Emit fat LTO objects usable both with and without LTO linking.
    pub fat_lto: bool,
    /// Place each function in its own section (`-ffunction-sections`).
    pub function_sections: bool,
    /// Place each data item in its own section (`-fdata-sections`).
    pub data_sections: bool,
    /// Garbage-collect unreferenced sections at link time.
    pub gc_sections: bool,
    /// Reference the distribution's default linker script on bare-metal
    /// targets.
    pub default_linker_script: bool,
}

impl Default for OptionSet {
    fn default() -> Self {
        OptionSet {
            default_arch: true,
            lto: true,
            fat_lto: true,
            function_sections: true,
            data_sections: true,
            gc_sections: true,
            default_linker_script: true,
        }
    }
}
