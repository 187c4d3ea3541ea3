//! `aptos move compile` wrapper

use std::path::PathBuf;

use tokio::process::Command;

use crate::{
    build::ensure_move_package, constants::FRAMEWORK_NAMED_ADDRESSES, errors::ScriptError,
    named_addresses::NamedAddresses, utils::command_success_or,
};

/// Compiles a Move package through `aptos move compile`
#[derive(Clone, Debug)]
pub struct MoveCompiler {
    /// The aptos CLI binary
    aptos_cli: PathBuf,
    /// Directory of the Move package
    package_dir: PathBuf,
    /// Passed as `--named-addresses`
    named_addresses: NamedAddresses,
}

impl MoveCompiler {
    /// Compiler for the package in `package_dir`
    pub fn new(
        aptos_cli: impl Into<PathBuf>,
        package_dir: impl Into<PathBuf>,
        named_addresses: NamedAddresses,
    ) -> Self {
        Self {
            aptos_cli: aptos_cli.into(),
            package_dir: package_dir.into(),
            named_addresses,
        }
    }

    /// The compile command, ready to spawn
    pub fn command(&self) -> Command {
        let mut cmd = Command::new(&self.aptos_cli);
        cmd.args(["move", "compile"]);
        cmd.arg("--package-dir");
        cmd.arg(&self.package_dir);
        if !self.named_addresses.is_empty() {
            cmd.arg("--named-addresses");
            cmd.arg(self.named_addresses.to_string());
        }
        cmd
    }

    /// Compile the package, streaming the toolchain output to the console
    pub async fn compile(&self) -> Result<(), ScriptError> {
        ensure_move_package(&self.package_dir)?;
        command_success_or(self.command(), "Failed to compile Move package").await
    }
}

/// Named addresses used at compile time: our module bound to the publisher, plus the framework
pub fn compile_named_addresses(module_name: &str, publisher_address: &str) -> NamedAddresses {
    let mut addresses = NamedAddresses::new();
    addresses.insert(module_name, publisher_address);
    addresses.extend(FRAMEWORK_NAMED_ADDRESSES.iter().copied());
    addresses
}
