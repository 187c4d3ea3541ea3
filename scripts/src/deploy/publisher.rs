//! `aptos move publish` wrapper

use std::path::{Path, PathBuf};

use tokio::process::Command;

use crate::{
    build::ensure_move_package,
    config::PrivateKey,
    errors::ScriptError,
    named_addresses::NamedAddresses,
    utils::{command_output, CommandOutput},
};

/// Publishes a Move package through `aptos move publish`
#[derive(Clone, Debug)]
pub struct MovePublisher {
    /// The aptos CLI binary
    aptos_cli: PathBuf,
    /// Directory of the Move package
    package_dir: PathBuf,
    /// Passed as `--named-addresses`
    named_addresses: NamedAddresses,
    /// Signs the publish transaction
    private_key: PrivateKey,
    /// Full node the transaction is submitted to
    node_url: String,
    /// Pass `--assume-yes`
    assume_yes: bool,
}

impl MovePublisher {
    /// Publisher for the package in `package_dir`, prompting before the transaction is sent
    pub fn new(
        aptos_cli: impl Into<PathBuf>,
        package_dir: impl Into<PathBuf>,
        named_addresses: NamedAddresses,
        private_key: PrivateKey,
        node_url: impl Into<String>,
    ) -> Self {
        Self {
            aptos_cli: aptos_cli.into(),
            package_dir: package_dir.into(),
            named_addresses,
            private_key,
            node_url: node_url.into(),
            assume_yes: false,
        }
    }

    /// Skip the confirmation prompt of the aptos CLI
    pub fn assume_yes(mut self, assume_yes: bool) -> Self {
        self.assume_yes = assume_yes;
        self
    }

    /// Directory of the Move package
    pub fn package_dir(&self) -> &Path {
        &self.package_dir
    }

    /// The publish command, ready to spawn
    pub fn command(&self) -> Command {
        let mut cmd = Command::new(&self.aptos_cli);
        cmd.args(["move", "publish"]);
        cmd.arg("--package-dir");
        cmd.arg(&self.package_dir);
        if !self.named_addresses.is_empty() {
            cmd.arg("--named-addresses");
            cmd.arg(self.named_addresses.to_string());
        }
        cmd.arg("--private-key");
        cmd.arg(self.private_key.expose());
        cmd.arg("--url");
        cmd.arg(&self.node_url);
        if self.assume_yes {
            cmd.arg("--assume-yes");
        }
        cmd
    }

    /// Publish the package, capturing the toolchain output
    pub async fn publish(&self) -> Result<CommandOutput, ScriptError> {
        command_output(self.command(), &[self.private_key.expose()]).await
    }
}

/// Named addresses used at publish time: our module bound to the publisher
pub fn publish_named_addresses(module_name: &str, publisher_address: &str) -> NamedAddresses {
    let mut addresses = NamedAddresses::new();
    addresses.insert(module_name, publisher_address);
    addresses
}

/// Check the package exists before spending a publish transaction on it
pub fn preflight(publisher: &MovePublisher) -> Result<(), ScriptError> {
    ensure_move_package(publisher.package_dir())
}
