mod bootstrap;
mod cli_args;
mod env_command;
mod prompt_command;
mod prompt_config;
mod prompts;
mod reflector;
mod run_command;

use clap::Parser;

use crate::cli_args::{Cli, Command};

#[tokio::main]
async fn main() {
    bootstrap::init_tracing();

    let cli = Cli::parse();
    let result = match cli.command {
        Command::Run(args) => run_command::execute_run_command(args).await,
        Command::Prompt(args) => prompt_command::execute_prompt_command(args),
        Command::Env(args) => env_command::execute_env_command(args),
    };

    if let Err(error) = result {
        eprintln!("{error:#}");
        std::process::exit(1);
    }
}
