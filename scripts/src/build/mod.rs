//! Build utils for the Move package

use std::path::Path;

use crate::errors::ScriptError;

pub mod compiler;

pub use compiler::MoveCompiler;

/// Manifest every Move package carries at its root
pub const MOVE_MANIFEST: &str = "Move.toml";

/// Check that `package_dir` holds a Move package before handing it to the toolchain
pub fn ensure_move_package(package_dir: &Path) -> Result<(), ScriptError> {
    if package_dir.join(MOVE_MANIFEST).is_file() {
        Ok(())
    } else {
        Err(ScriptError::PackageNotFound(package_dir.to_path_buf()))
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn detects_move_package() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            ensure_move_package(dir.path()),
            Err(ScriptError::PackageNotFound(_))
        ));

        fs::write(dir.path().join(MOVE_MANIFEST), "[package]\nname = \"iot_dapp\"\n").unwrap();
        ensure_move_package(dir.path()).unwrap();
    }
}
