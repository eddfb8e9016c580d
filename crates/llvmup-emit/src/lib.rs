//! Build-system glue emission for llvmup.
//!
//! Renders a resolved [`llvmup_targets::FlagBundle`] into concrete build
//! inputs: a CMake toolchain file and a POSIX environment script. This
//! layer also owns the flag policies the resolver cannot: merging
//! caller-supplied linker arguments over the resolver's overridable
//! defaults, and translating portable linker flags into the clang
//! driver's per-OS dialect.

pub mod cmake;
pub mod env;
pub mod error;
pub mod flags;

// Re-exports for convenience.
pub use cmake::{render_toolchain_file, write_toolchain_file, CmakeToolchain};
pub use env::{render_env_script, write_env_script};
pub use error::{EmitError, Result};
pub use flags::{driver_link_args, merge_linker_flags};
