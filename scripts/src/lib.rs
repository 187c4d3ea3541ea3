//! Scripts for compiling and publishing the IoT dApp Move package on Aptos.
//!
//! Both commands delegate the actual work to the `aptos` CLI. Publishing records the resulting
//! module address in the project's env file.

#![deny(clippy::missing_docs_in_private_items)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod constants;
pub mod env_file;
pub mod errors;
pub mod named_addresses;
pub mod network;
pub mod utils;

/// Our build utils
pub mod build;

/// Our publish utils
pub mod deploy;
