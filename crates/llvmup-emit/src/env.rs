//! Environment script rendering.
//!
//! A small POSIX script that puts an installed toolchain on `PATH` and
//! exports `LLVM_INSTALL_DIR` for build systems that key off it.

use std::path::Path;

use crate::error::Result;

/// Render the environment script for an installed toolchain.
pub fn render_env_script(toolchain_root: &Path) -> String {
    let root = toolchain_root.display();
    format!(
        "# Generated by llvmup. Source this file.\n\
         export LLVM_INSTALL_DIR=\"{root}\"\n\
         export PATH=\"{root}/bin:$PATH\"\n"
    )
}

/// Render and write the environment script.
pub fn write_env_script(path: &Path, toolchain_root: &Path) -> Result<()> {
    std::fs::write(path, render_env_script(toolchain_root))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn exports_install_dir_and_path() {
        let script = render_env_script(&PathBuf::from("/opt/llvm"));
        assert!(script.contains("export LLVM_INSTALL_DIR=\"/opt/llvm\""));
        assert!(script.contains("export PATH=\"/opt/llvm/bin:$PATH\""));
    }

    #[test]
    fn write_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("env.sh");
        write_env_script(&path, &PathBuf::from("/opt/llvm")).unwrap();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            render_env_script(&PathBuf::from("/opt/llvm"))
        );
    }
}
