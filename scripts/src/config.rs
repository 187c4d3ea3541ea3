//! Publisher configuration, read from the environment

use std::{env, fmt};

use crate::{
    constants::{NETWORK_VAR, PUBLISHER_ADDRESS_VAR, PUBLISHER_PRIVATE_KEY_VAR},
    errors::ScriptError,
    network::Network,
};

/// Private key of the publisher account.
///
/// Kept out of `Debug` output so it never lands in logs.
#[derive(Clone, PartialEq, Eq)]
pub struct PrivateKey(String);

impl PrivateKey {
    /// Wrap a raw private key
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// The raw key, only meant to be handed to the aptos CLI
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrivateKey(<redacted>)")
    }
}

/// Everything needed to publish the package
#[derive(Clone, Debug)]
pub struct PublisherConfig {
    /// Address of the publisher account
    pub address: String,
    /// Key signing the publish transaction
    pub private_key: PrivateKey,
    /// Network the package is published to
    pub network: Network,
}

impl PublisherConfig {
    /// Read the publisher config from the process environment
    pub fn from_env() -> Result<Self, ScriptError> {
        Self::from_lookup(process_env)
    }

    /// Read the publisher config through `lookup`.
    ///
    /// Variables are checked in order: address, private key, network.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ScriptError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let address = publisher_address(&lookup)?;
        let private_key = PrivateKey::new(required(&lookup, PUBLISHER_PRIVATE_KEY_VAR)?);
        let network = required(&lookup, NETWORK_VAR)?.parse()?;
        Ok(Self {
            address,
            private_key,
            network,
        })
    }
}

/// Read the publisher account address, the only value the compile step needs
pub fn publisher_address<F>(lookup: F) -> Result<String, ScriptError>
where
    F: Fn(&str) -> Option<String>,
{
    required(&lookup, PUBLISHER_ADDRESS_VAR)
}

/// Lookup in the process environment
pub fn process_env(key: &str) -> Option<String> {
    env::var(key).ok()
}

/// Fetch a variable, treating unset and blank values alike
fn required<F>(lookup: &F, var: &'static str) -> Result<String, ScriptError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(var)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .ok_or(ScriptError::MissingEnvVar(var))
}
