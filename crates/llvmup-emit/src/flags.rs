//! Linker flag policies that live above the resolver.
//!
//! The resolver emits its default linker script as an overridable
//! default: it cannot see the caller's own link arguments, so the
//! suppression decision happens here, where both lists are in hand.
//! Likewise the resolver keeps the portable `--gc-sections` spelling;
//! translating it for the clang driver and the per-OS linkers is this
//! module's job.

use llvmup_targets::TargetOs;

/// Merge resolver linker flags with caller-supplied ones.
///
/// Resolver flags come first so caller flags win positionally. When the
/// caller brings an explicit `-T<script>`, the resolver's default
/// linker-script flag is dropped entirely rather than merely preceded.
pub fn merge_linker_flags(resolver_flags: &[String], caller_flags: &[String]) -> Vec<String> {
    let caller_has_script = caller_flags.iter().any(|f| is_linker_script_flag(f));

    let mut merged: Vec<String> = resolver_flags
        .iter()
        .filter(|f| !(caller_has_script && is_linker_script_flag(f)))
        .cloned()
        .collect();
    merged.extend(caller_flags.iter().cloned());
    merged
}

/// Whether a flag names a linker script.
fn is_linker_script_flag(flag: &str) -> bool {
    flag.starts_with("-T")
}

/// Translate portable linker flags into arguments for the clang driver.
///
/// Flags spelled `--…` are for the linker itself and get the `-Wl,`
/// prefix; flags the driver understands (`-T`, `-flto`, …) pass through.
/// Section garbage collection has per-OS spellings: `-dead_strip` on
/// Macos, nothing on Windows where lld collects sections on its own.
pub fn driver_link_args(linker_flags: &[String], os: TargetOs) -> Vec<String> {
    let mut args = Vec::new();
    for flag in linker_flags {
        if flag == "--gc-sections" {
            match os {
                TargetOs::Macos => args.push("-Wl,-dead_strip".to_string()),
                TargetOs::Windows => {}
                TargetOs::Linux | TargetOs::Baremetal => {
                    args.push("-Wl,--gc-sections".to_string())
                }
            }
        } else if let Some(rest) = flag.strip_prefix("--") {
            args.push(format!("-Wl,--{rest}"));
        } else {
            args.push(flag.clone());
        }
    }
    args
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flags(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn caller_script_suppresses_default() {
        let resolver = flags(&["-Tpicolibc.ld", "--gc-sections"]);
        let caller = flags(&["-Tapp.ld"]);
        assert_eq!(
            merge_linker_flags(&resolver, &caller),
            flags(&["--gc-sections", "-Tapp.ld"])
        );
    }

    #[test]
    fn no_caller_script_keeps_default_first() {
        let resolver = flags(&["-Tpicolibc.ld", "--gc-sections"]);
        let caller = flags(&["-Lextra"]);
        assert_eq!(
            merge_linker_flags(&resolver, &caller),
            flags(&["-Tpicolibc.ld", "--gc-sections", "-Lextra"])
        );
    }

    #[test]
    fn empty_caller_flags_are_identity() {
        let resolver = flags(&["--gc-sections"]);
        assert_eq!(merge_linker_flags(&resolver, &[]), resolver);
    }

    #[test]
    fn gc_sections_per_os() {
        let portable = flags(&["--gc-sections"]);
        assert_eq!(
            driver_link_args(&portable, TargetOs::Linux),
            flags(&["-Wl,--gc-sections"])
        );
        assert_eq!(
            driver_link_args(&portable, TargetOs::Baremetal),
            flags(&["-Wl,--gc-sections"])
        );
        assert_eq!(
            driver_link_args(&portable, TargetOs::Macos),
            flags(&["-Wl,-dead_strip"])
        );
        assert!(driver_link_args(&portable, TargetOs::Windows).is_empty());
    }

    #[test]
    fn driver_flags_pass_through() {
        let list = flags(&["-Tpicolibc.ld", "--gc-sections"]);
        assert_eq!(
            driver_link_args(&list, TargetOs::Baremetal),
            flags(&["-Tpicolibc.ld", "-Wl,--gc-sections"])
        );
    }

    #[test]
    fn unknown_double_dash_flags_are_wrapped() {
        let list = flags(&["--print-gc-sections"]);
        assert_eq!(
            driver_link_args(&list, TargetOs::Linux),
            flags(&["-Wl,--print-gc-sections"])
        );
    }
}
