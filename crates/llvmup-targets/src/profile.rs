//! TOML build profiles.
//!
//! A build profile is the textual input surface of the resolver: a
//! `[target]` table naming the OS and architecture, and an optional
//! `[options]` table overriding individual defaults.
//!
//! ```toml
//! [target]
//! os = "baremetal"
//! arch = "cortex-m4f"
//!
//! [options]
//! fat-lto = false
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TargetError};
use crate::options::OptionSet;
use crate::target::{TargetDescription, TargetOs};

/// The `[target]` table of a build profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TargetSection {
    /// Target operating system.
    pub os: TargetOs,
    /// CPU architecture identifier.
    pub arch: String,
}

/// A parsed build profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct BuildProfile {
    /// What to build for.
    pub target: TargetSection,
    /// Option overrides; omitted keys keep their defaults.
    #[serde(default)]
    pub options: OptionSet,
}

impl BuildProfile {
    /// The target description this profile resolves to.
    pub fn target_description(&self) -> TargetDescription {
        TargetDescription::new(self.target.os, self.target.arch.clone())
    }
}

/// Load a build profile from a TOML file.
pub fn load_profile(path: &Path) -> Result<BuildProfile> {
    if !path.exists() {
        return Err(TargetError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let content = std::fs::read_to_string(path)?;
    parse_profile(&content)
}

/// Parse a build profile from a TOML string.
pub fn parse_profile(toml_str: &str) -> Result<BuildProfile> {
    let profile: BuildProfile = toml::from_str(toml_str)?;
    Ok(profile)
}

/// Serialize a build profile to pretty TOML.
pub fn profile_to_toml(profile: &BuildProfile) -> Result<String> {
    let toml_str = toml::to_string_pretty(profile)?;
    Ok(toml_str)
}

/// Generate a template profile for the given target with all options
/// spelled out explicitly.
pub fn generate_template(os: TargetOs, arch: &str) -> Result<String> {
    let profile = BuildProfile {
        target: TargetSection {
            os,
            arch: arch.to_string(),
        },
        options: OptionSet::default(),
    };
    profile_to_toml(&profile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::{resolve, ToolchainVariant};
    use crate::target::FpVariant;

    #[test]
    fn parse_minimal_profile() {
        let profile = parse_profile(
            r#"
[target]
os = "baremetal"
arch = "cortex-m4f"
"#,
        )
        .unwrap();
        assert_eq!(profile.target.os, TargetOs::Baremetal);
        assert_eq!(profile.target.arch, "cortex-m4f");
        // Omitted [options] table keeps the defaults.
        assert_eq!(profile.options, OptionSet::default());
    }

    #[test]
    fn parse_with_option_overrides() {
        let profile = parse_profile(
            r#"
[target]
os = "linux"
arch = "x86_64"

[options]
lto = false
gc-sections = false
"#,
        )
        .unwrap();
        assert!(!profile.options.lto);
        assert!(!profile.options.gc_sections);
        assert!(profile.options.function_sections);
    }

    #[test]
    fn profile_feeds_the_resolver() {
        let profile = parse_profile(
            r#"
[target]
os = "baremetal"
arch = "cortex-m33f"
"#,
        )
        .unwrap();
        let target = profile.target_description();
        assert_eq!(target.fp_variant, FpVariant::SinglePrecision);

        let bundle = resolve(&target, &profile.options).unwrap();
        assert_eq!(bundle.variant, ToolchainVariant::ArmEmbedded);
        assert_eq!(bundle.triple, "armv8m.main-none-eabihf");
    }

    #[test]
    fn parse_invalid_toml_returns_error() {
        assert!(parse_profile("not toml [[[").is_err());
    }

    #[test]
    fn parse_unknown_os_returns_error() {
        let result = parse_profile(
            r#"
[target]
os = "freebsd"
arch = "x86_64"
"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn round_trip() {
        let profile = parse_profile(
            r#"
[target]
os = "macos"
arch = "armv8"

[options]
fat-lto = false
"#,
        )
        .unwrap();
        let toml_str = profile_to_toml(&profile).unwrap();
        let reparsed = parse_profile(&toml_str).unwrap();
        assert_eq!(profile, reparsed);
    }

    #[test]
    fn template_is_parseable() {
        let toml_str = generate_template(TargetOs::Baremetal, "cortex-m7f").unwrap();
        let profile = parse_profile(&toml_str).unwrap();
        assert_eq!(profile.target.arch, "cortex-m7f");
        assert_eq!(profile.options, OptionSet::default());
    }

    #[test]
    fn load_not_found() {
        let result = load_profile(Path::new("/nonexistent/build.profile.toml"));
        assert!(matches!(result, Err(TargetError::NotFound { .. })));
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("m85.profile.toml");
        std::fs::write(&path, generate_template(TargetOs::Baremetal, "cortex-m85").unwrap())
            .unwrap();

        let profile = load_profile(&path).unwrap();
        assert_eq!(profile.target.arch, "cortex-m85");
    }
}
