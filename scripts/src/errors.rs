//! Definitions of errors that can occur during the execution of the package management scripts

use std::{io, path::PathBuf};

/// Errors that can occur during the execution of the package management scripts
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    /// A required variable is unset or empty
    #[error("{0} variable is not set, make sure you have set the {desc}", desc = describe_var(.0))]
    MissingEnvVar(&'static str),
    /// `APP_NETWORK` names a network we have no endpoint for
    #[error("unknown network `{0}`, expected one of: mainnet, testnet, devnet, local")]
    UnknownNetwork(String),
    /// A `--named-address` argument that is not `name=address`
    #[error("invalid named address `{0}`, expected NAME=ADDRESS")]
    InvalidNamedAddress(String),
    /// The package directory holds no `Move.toml`
    #[error("no Move package found in {}, expected a Move.toml file", .0.display())]
    PackageNotFound(PathBuf),
    /// Error reading or writing the env file
    #[error("error updating env file {}: {source}", .path.display())]
    EnvFile {
        /// The env file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },
    /// The env file holds a line that can't be parsed, nothing after it would be loaded
    #[error(
        "could not parse {line} of env file {}, values holding spaces or special characters must be quoted",
        .path.display()
    )]
    EnvFileParse {
        /// The env file
        path: PathBuf,
        /// Which line failed, named by its key so values never end up in the message
        line: String,
    },
    /// The env file could not be loaded into the environment
    #[error("error loading env file {}: {source}", .path.display())]
    EnvFileLoad {
        /// The env file
        path: PathBuf,
        /// Error reported by the env file loader
        #[source]
        source: dotenv::Error,
    },
    /// Error building the env file key matcher
    #[error("invalid env key pattern: {0}")]
    Regex(#[from] regex::Error),
    /// Error compiling the Move package
    #[error("error compiling package: {0}")]
    ContractCompilation(String),
    /// Error publishing the Move package
    #[error("error publishing package: {0}")]
    ContractDeployment(String),
}

/// Human description of what a configuration variable holds
fn describe_var(var: &str) -> &'static str {
    match var {
        crate::constants::PUBLISHER_ADDRESS_VAR => "publisher account address",
        crate::constants::PUBLISHER_PRIVATE_KEY_VAR => "publisher account private key",
        crate::constants::NETWORK_VAR => "network to publish to",
        _ => "required configuration",
    }
}
