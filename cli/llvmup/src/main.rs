//! llvmup CLI — provisioning and build glue for prebuilt LLVM toolchains.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "llvmup", version, about = "Prebuilt LLVM/Clang toolchain provisioning")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Target and option selection shared by resolve and emit.
#[derive(Args)]
struct TargetSelection {
    /// Build profile TOML file (alternative to --os/--arch)
    #[arg(long)]
    profile: Option<PathBuf>,
    /// Target operating system (linux, macos, windows, baremetal)
    #[arg(long)]
    os: Option<String>,
    /// CPU architecture (x86_64, armv8, cortex-m0 … cortex-m85)
    #[arg(long)]
    arch: Option<String>,
    /// Do not inject -target/-mcpu/-mfloat-abi/-mfpu
    #[arg(long)]
    no_default_arch: bool,
    /// Disable link-time optimization
    #[arg(long)]
    no_lto: bool,
    /// Disable fat LTO objects
    #[arg(long)]
    no_fat_lto: bool,
    /// Disable -ffunction-sections
    #[arg(long)]
    no_function_sections: bool,
    /// Disable -fdata-sections
    #[arg(long)]
    no_data_sections: bool,
    /// Disable link-time section garbage collection
    #[arg(long)]
    no_gc_sections: bool,
    /// Do not reference the default linker script
    #[arg(long)]
    no_default_linker_script: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a target and print its toolchain flags
    Resolve {
        #[command(flatten)]
        selection: TargetSelection,
        /// Output format (human, json)
        #[arg(long)]
        format: Option<String>,
    },
    /// Inspect supported targets
    Target {
        #[command(subcommand)]
        action: TargetAction,
    },
    /// Download and install a toolchain into the local cache
    Fetch {
        /// Toolchain release version (e.g. 18.1.8)
        version: String,
        /// Host operating system (default: linux)
        #[arg(long)]
        os: Option<String>,
        /// Host CPU architecture (default: x86_64)
        #[arg(long)]
        arch: Option<String>,
        /// Distribution variant (upstream, arm-embedded)
        #[arg(long)]
        variant: String,
        /// Source manifest pinning URLs and checksums
        #[arg(long)]
        sources: PathBuf,
        /// Cache directory (default: ~/.llvmup/toolchains)
        #[arg(long)]
        cache_dir: Option<PathBuf>,
    },
    /// List installed toolchains
    List {
        /// Cache directory (default: ~/.llvmup/toolchains)
        #[arg(long)]
        cache_dir: Option<PathBuf>,
    },
    /// Emit build glue for a resolved target
    Emit {
        #[command(subcommand)]
        action: EmitAction,
    },
    /// Manage build profiles
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },
    /// Remove installed toolchains
    Clean {
        /// Remove only this release version (requires --variant)
        #[arg(long)]
        version: Option<String>,
        /// Host operating system (default: linux)
        #[arg(long)]
        os: Option<String>,
        /// Host CPU architecture (default: x86_64)
        #[arg(long)]
        arch: Option<String>,
        /// Distribution variant of the install to remove
        #[arg(long)]
        variant: Option<String>,
        /// Cache directory (default: ~/.llvmup/toolchains)
        #[arg(long)]
        cache_dir: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum TargetAction {
    /// List supported targets
    List,
    /// Show details of one target architecture
    Describe {
        /// Architecture tag (e.g. cortex-m4f, x86_64)
        arch: String,
    },
}

#[derive(Subcommand)]
enum EmitAction {
    /// Write a CMake toolchain file
    Cmake {
        #[command(flatten)]
        selection: TargetSelection,
        /// Root of the installed toolchain
        #[arg(long)]
        toolchain_root: PathBuf,
        /// Output file path
        #[arg(long)]
        output: PathBuf,
        /// Additional linker flag (repeatable); an explicit -T here
        /// replaces the default linker script
        #[arg(long = "linker-flag")]
        linker_flags: Vec<String>,
    },
    /// Write a POSIX environment script
    Env {
        /// Root of the installed toolchain
        #[arg(long)]
        toolchain_root: PathBuf,
        /// Output file path
        #[arg(long)]
        output: PathBuf,
    },
}

#[derive(Subcommand)]
enum ProfileAction {
    /// Write a template build profile
    Template {
        /// Target operating system
        #[arg(long)]
        os: String,
        /// CPU architecture
        #[arg(long)]
        arch: String,
        /// Output file (stdout if omitted)
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Resolve { selection, format } => {
            let (target, options) = commands::selection(
                selection.profile.as_deref(),
                selection.os.as_deref(),
                selection.arch.as_deref(),
                &commands::Disables::from_selection(&selection),
            )?;
            commands::resolve::run(&target, &options, format.as_deref())
        }

        Commands::Target { action } => match action {
            TargetAction::List => commands::target::list(),
            TargetAction::Describe { arch } => commands::target::describe(&arch),
        },

        Commands::Fetch {
            version,
            os,
            arch,
            variant,
            sources,
            cache_dir,
        } => commands::fetch::run(
            &version,
            os.as_deref(),
            arch.as_deref(),
            &variant,
            &sources,
            cache_dir,
        ),

        Commands::List { cache_dir } => commands::fetch::list(cache_dir),

        Commands::Emit { action } => match action {
            EmitAction::Cmake {
                selection,
                toolchain_root,
                output,
                linker_flags,
            } => {
                let (target, options) = commands::selection(
                    selection.profile.as_deref(),
                    selection.os.as_deref(),
                    selection.arch.as_deref(),
                    &commands::Disables::from_selection(&selection),
                )?;
                commands::emit::cmake(&target, &options, &toolchain_root, &output, &linker_flags)
            }
            EmitAction::Env {
                toolchain_root,
                output,
            } => commands::emit::env(&toolchain_root, &output),
        },

        Commands::Profile { action } => match action {
            ProfileAction::Template { os, arch, output } => {
                commands::profile::template(&os, &arch, output.as_deref())
            }
        },

        Commands::Clean {
            version,
            os,
            arch,
            variant,
            cache_dir,
        } => commands::clean::run(
            version.as_deref(),
            os.as_deref(),
            arch.as_deref(),
            variant.as_deref(),
            cache_dir,
        ),
    }
}
