//! Compile and publish procedures

use std::path::PathBuf;

use tracing::{debug, error, info};

use crate::{
    build::{compiler::compile_named_addresses, MoveCompiler},
    cli::{PackageArgs, PublishArgs},
    config::{self, PublisherConfig},
    constants::{APTOS_CLI_VAR, DEFAULT_APTOS_CLI, MODULE_ADDRESS_VAR},
    deploy::{
        publisher::{preflight, publish_named_addresses},
        MovePublisher,
    },
    env_file::write_module_address,
    errors::ScriptError,
    named_addresses::NamedAddresses,
};

/// Settings shared by every command
#[derive(Clone, Debug)]
pub struct ScriptContext {
    /// The aptos CLI binary
    pub aptos_cli: PathBuf,
    /// Env file updated after a publish
    pub env_file: PathBuf,
}

impl ScriptContext {
    /// Build the context, falling back on `$APTOS_CLI` when no binary was given
    pub fn new(aptos_cli: Option<PathBuf>, env_file: PathBuf) -> Self {
        let aptos_cli = aptos_cli
            .or_else(|| config::process_env(APTOS_CLI_VAR).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_APTOS_CLI));
        Self {
            aptos_cli,
            env_file,
        }
    }
}

/// Compile the Move package with our module bound to the publisher account
pub async fn compile_package(
    args: &PackageArgs,
    context: &ScriptContext,
) -> Result<(), ScriptError> {
    let publisher_address = config::publisher_address(config::process_env)?;

    let mut named_addresses = compile_named_addresses(&args.module_name, &publisher_address);
    with_extra_addresses(&mut named_addresses, args);
    debug!("Named addresses: {named_addresses}");

    let compiler = MoveCompiler::new(&context.aptos_cli, &args.package_dir, named_addresses);
    compiler.compile().await?;
    info!("Compiled with success");

    Ok(())
}

/// Publish the Move package, then record the module address in the env file.
///
/// A failing publish command is logged and the env file left as is, but it does not fail the
/// script.
pub async fn publish_package(
    args: &PublishArgs,
    context: &ScriptContext,
) -> Result<(), ScriptError> {
    let PublisherConfig {
        address,
        private_key,
        network,
    } = PublisherConfig::from_env()?;

    let mut named_addresses = publish_named_addresses(&args.package.module_name, &address);
    with_extra_addresses(&mut named_addresses, &args.package);
    debug!("Named addresses: {named_addresses}");

    let publisher = MovePublisher::new(
        &context.aptos_cli,
        &args.package.package_dir,
        named_addresses,
        private_key,
        network.node_api_url(),
    )
    .assume_yes(args.assume_yes);
    preflight(&publisher)?;

    info!("Publishing to {network} ({})", network.node_api_url());
    let output = match publisher.publish().await {
        Ok(output) => output,
        Err(err) => {
            error!("{err}");
            return Ok(());
        }
    };
    println!("stdout: {}", output.stdout);
    eprintln!("stderr: {}", output.stderr);

    write_module_address(&context.env_file, &address)?;
    info!(
        "Published with success, {MODULE_ADDRESS_VAR}={address} written to {}",
        context.env_file.display()
    );

    Ok(())
}

/// Add the user supplied named addresses, overriding the defaults
fn with_extra_addresses(named_addresses: &mut NamedAddresses, args: &PackageArgs) {
    named_addresses.extend(args.named_addresses.iter().cloned());
}
