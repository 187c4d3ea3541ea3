//! Definitions of CLI arguments and commands for the package scripts

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing::info;

use crate::{
    commands::{compile_package, publish_package, ScriptContext},
    constants::{DEFAULT_ENV_FILE, DEFAULT_MODULE_NAME, DEFAULT_PACKAGE_DIR},
    errors::ScriptError,
    named_addresses::parse_named_address,
};

/// Scripts for compiling & publishing the IoT dApp Move package
#[derive(Debug, Parser)]
#[command(name = "aptos-scripts", version)]
pub struct Cli {
    /// Env file loaded at startup, and updated with the module address after a publish
    #[arg(long, global = true, default_value = DEFAULT_ENV_FILE)]
    pub env_file: PathBuf,

    /// Path to the aptos CLI binary (defaults to `$APTOS_CLI`, then `aptos`)
    #[arg(long, global = true)]
    pub aptos_cli: Option<PathBuf>,

    /// Whether to print debug info
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Command,
}

/// The possible CLI commands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compile the Move package
    Compile(PackageArgs),
    /// Publish the Move package and record its address in the env file
    Publish(PublishArgs),
}

impl Command {
    /// Run the command
    pub async fn run(self, context: &ScriptContext) -> Result<(), ScriptError> {
        match self {
            Command::Compile(args) => {
                info!("Compiling package...");
                compile_package(&args, context).await
            }
            Command::Publish(args) => {
                info!("Publishing package...");
                publish_package(&args, context).await
            }
        }
    }
}

/// Location of the package and its named addresses
#[derive(Debug, Args)]
pub struct PackageArgs {
    /// Directory of the Move package
    #[arg(long, default_value = DEFAULT_PACKAGE_DIR)]
    pub package_dir: PathBuf,

    /// Named address bound to the publisher account
    #[arg(long, default_value = DEFAULT_MODULE_NAME)]
    pub module_name: String,

    /// Extra named address, as NAME=ADDRESS (repeatable)
    #[arg(long = "named-address", value_name = "NAME=ADDRESS", value_parser = parse_named_address)]
    pub named_addresses: Vec<(String, String)>,
}

/// Publish the package
#[derive(Debug, Args)]
pub struct PublishArgs {
    /// The package to publish
    #[command(flatten)]
    pub package: PackageArgs,

    /// Answer yes to the aptos CLI confirmation prompt
    #[arg(long)]
    pub assume_yes: bool,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn compile_defaults() {
        let cli = Cli::parse_from(["aptos-scripts", "compile"]);
        assert_eq!(cli.env_file, PathBuf::from(".env"));
        assert!(cli.aptos_cli.is_none());
        let Command::Compile(args) = cli.command else {
            panic!("expected compile command");
        };
        assert_eq!(args.package_dir, PathBuf::from("contract"));
        assert_eq!(args.module_name, "iot_dapp");
        assert!(args.named_addresses.is_empty());
    }

    #[test]
    fn publish_options() {
        let cli = Cli::parse_from([
            "aptos-scripts",
            "publish",
            "--package-dir",
            "move/iot",
            "--named-address",
            "oracle=0x42",
            "--assume-yes",
            "--env-file",
            "deploy.env",
        ]);
        assert_eq!(cli.env_file, PathBuf::from("deploy.env"));
        let Command::Publish(args) = cli.command else {
            panic!("expected publish command");
        };
        assert!(args.assume_yes);
        assert_eq!(args.package.package_dir, PathBuf::from("move/iot"));
        assert_eq!(
            args.package.named_addresses,
            [("oracle".to_string(), "0x42".to_string())]
        );
    }

    #[test]
    fn malformed_named_address_is_rejected() {
        let res = Cli::try_parse_from(["aptos-scripts", "compile", "--named-address", "oracle"]);
        assert!(res.is_err());
    }
}
