//! Aptos networks and their full node REST endpoints

use std::{fmt, str::FromStr};

use crate::errors::ScriptError;

/// Networks a package can be published to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Network {
    /// Aptos mainnet
    Mainnet,
    /// Aptos testnet
    Testnet,
    /// Aptos devnet, reset weekly
    Devnet,
    /// Local node started with `aptos node run-local-testnet`
    Local,
}

impl Network {
    /// Every known network
    pub const ALL: [Network; 4] = [
        Network::Mainnet,
        Network::Testnet,
        Network::Devnet,
        Network::Local,
    ];

    /// Name of the network, as found in `APP_NETWORK`
    pub fn name(&self) -> &'static str {
        match self {
            Network::Mainnet => "mainnet",
            Network::Testnet => "testnet",
            Network::Devnet => "devnet",
            Network::Local => "local",
        }
    }

    /// Full node REST API the publish transaction is submitted to
    pub fn node_api_url(&self) -> &'static str {
        match self {
            Network::Mainnet => "https://api.mainnet.aptoslabs.com/v1",
            Network::Testnet => "https://api.testnet.aptoslabs.com/v1",
            Network::Devnet => "https://api.devnet.aptoslabs.com/v1",
            Network::Local => "http://127.0.0.1:8080/v1",
        }
    }
}

impl FromStr for Network {
    type Err = ScriptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Network::ALL
            .into_iter()
            .find(|network| network.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| ScriptError::UnknownNetwork(name.to_string()))
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
