//! Constants used in the compile & publish scripts

/// Env var holding the address of the account publishing the module
pub const PUBLISHER_ADDRESS_VAR: &str = "MODULE_PUBLISHER_ACCOUNT_ADDRESS";

/// Env var holding the private key of the publisher account
pub const PUBLISHER_PRIVATE_KEY_VAR: &str = "MODULE_PUBLISHER_ACCOUNT_PRIVATE_KEY";

/// Env var holding the name of the target network
pub const NETWORK_VAR: &str = "APP_NETWORK";

/// Env var written once the module is published
pub const MODULE_ADDRESS_VAR: &str = "MODULE_ADDRESS";

/// Env var that can point to a specific aptos CLI binary
pub const APTOS_CLI_VAR: &str = "APTOS_CLI";

/// The aptos CLI binary, resolved from `PATH`
pub const DEFAULT_APTOS_CLI: &str = "aptos";

/// The env file read at startup and patched after a publish
pub const DEFAULT_ENV_FILE: &str = ".env";

/// Directory of the Move package
pub const DEFAULT_PACKAGE_DIR: &str = "contract";

/// Named address of our module, bound to the publisher account
pub const DEFAULT_MODULE_NAME: &str = "iot_dapp";

/// Framework named addresses, explicitly mapped to `0x1` at compile time
pub const FRAMEWORK_NAMED_ADDRESSES: &[(&str, &str)] = &[("std", "0x1"), ("aptos_stdlib", "0x1")];
