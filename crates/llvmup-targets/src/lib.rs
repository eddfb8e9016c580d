//! Target description model and toolchain flag resolver for llvmup.
//!
//! Maps a declarative target description (OS, CPU architecture,
//! floating-point variant) plus a set of boolean build options to:
//! - which prebuilt toolchain distribution to install (upstream LLVM or
//!   the ARM embedded toolchain),
//! - the normalized target triple,
//! - the exact compiler and linker flags for the build.
//!
//! Resolution is pure computation: no I/O, no shared state, and identical
//! inputs always produce identical [`resolver::FlagBundle`]s.

pub mod arch;
pub mod error;
pub mod host;
pub mod options;
pub mod profile;
pub mod resolver;
pub mod target;

// Re-exports for convenience.
pub use arch::{arch_profile, ArchProfile, FloatAbi, CORTEX_M_PROFILES};
pub use error::{Result, TargetError};
pub use host::{host_profile, HostProfile, HOST_PROFILES};
pub use options::OptionSet;
pub use profile::{load_profile, parse_profile, BuildProfile};
pub use resolver::{resolve, FlagBundle, ToolchainVariant, DEFAULT_LINKER_SCRIPT};
pub use target::{FpVariant, TargetDescription, TargetOs};
