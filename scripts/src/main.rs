use std::{io::IsTerminal, path::PathBuf, process::ExitCode};

use aptos_scripts::{
    cli::{Cli, Command},
    commands::ScriptContext,
    env_file::load_into_process,
    errors::ScriptError,
};
use clap::Parser;
use tracing::{debug, Level};

#[tokio::main]
async fn main() -> ExitCode {
    let Cli {
        env_file,
        aptos_cli,
        verbose,
        command,
    } = Cli::parse();

    let level = if verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr)
        .init();

    match run(env_file, aptos_cli, command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(
    env_file: PathBuf,
    aptos_cli: Option<PathBuf>,
    command: Command,
) -> Result<(), ScriptError> {
    // Variables already set in the environment take precedence over the env file
    if !load_into_process(&env_file)? {
        debug!("No env file found at {}", env_file.display());
    }

    let context = ScriptContext::new(aptos_cli, env_file);
    command.run(&context).await
}
