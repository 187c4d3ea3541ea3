//! Utilities for the compile & publish scripts.

use std::{ffi::OsStr, process::Stdio};

use tokio::process::Command;
use tracing::{debug, info};

use crate::errors::ScriptError;

/// Placeholder printed instead of secret arguments
const REDACTED: &str = "<redacted>";

/// Output captured from an external command
#[derive(Debug)]
pub struct CommandOutput {
    /// Everything written to stdout
    pub stdout: String,
    /// Everything written to stderr
    pub stderr: String,
}

/// Printable form of a command line, with every `secrets` argument masked
pub fn describe_command(cmd: &Command, secrets: &[&str]) -> String {
    let cmd = cmd.as_std();
    let mut parts = vec![cmd.get_program().to_string_lossy().into_owned()];
    parts.extend(cmd.get_args().map(|arg| mask(arg, secrets)));
    parts.join(" ")
}

/// The argument, or a placeholder if it is one of `secrets`
fn mask(arg: &OsStr, secrets: &[&str]) -> String {
    let arg = arg.to_string_lossy();
    if secrets.iter().any(|secret| !secret.is_empty() && arg == *secret) {
        REDACTED.to_string()
    } else {
        arg.into_owned()
    }
}

/// Runs a command with inherited stdio, returning an error if the command fails
pub async fn command_success_or(mut cmd: Command, err_msg: &str) -> Result<(), ScriptError> {
    info!("Running command: {}", describe_command(&cmd, &[]));
    let status = cmd
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .await
        .map_err(|e| ScriptError::ContractCompilation(format!("{err_msg}: {e}")))?;
    if !status.success() {
        return Err(ScriptError::ContractCompilation(format!(
            "{err_msg} ({status})"
        )));
    }
    Ok(())
}

/// Runs a command, capturing its stdout & stderr.
///
/// Fails if the command can't be spawned or exits unsuccessfully, the error carrying whatever
/// the command wrote to stderr.
pub async fn command_output(
    mut cmd: Command,
    secrets: &[&str],
) -> Result<CommandOutput, ScriptError> {
    let description = describe_command(&cmd, secrets);
    info!("Running command: {description}");

    let output = cmd
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await
        .map_err(|e| ScriptError::ContractDeployment(format!("failed to run `{description}`: {e}")))?;

    let captured = CommandOutput {
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    };
    debug!(status = %output.status, "command finished");

    if !output.status.success() {
        return Err(ScriptError::ContractDeployment(format!(
            "`{description}` failed ({}): {}",
            output.status,
            captured.stderr.trim()
        )));
    }
    Ok(captured)
}
