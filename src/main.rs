mod commands;
mod domain;
mod services;
#[cfg(test)]
mod test_support;

use crate::commands::base_commands::{CliArgs, Commands};
use crate::commands::project_cmd::project_command;
use crate::commands::scenario_cmd::{add_command, init_command, remove_command, set_command};
use crate::commands::show_cmd::show_command;
use crate::commands::simulate_cmd::simulate_command;
use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let args = CliArgs::parse();
    init_tracing(args.verbose);

    match args.command {
        cmd @ Commands::Init { .. } => init_command(cmd).await,
        cmd @ Commands::Add { .. } => add_command(cmd).await,
        cmd @ Commands::Set { .. } => set_command(cmd).await,
        cmd @ Commands::Remove { .. } => remove_command(cmd).await,
        cmd @ Commands::Show { .. } => show_command(cmd).await,
        cmd @ Commands::Simulate { .. } => simulate_command(cmd).await,
        cmd @ Commands::Project { .. } => project_command(cmd).await,
        Commands::Completions { shell } => {
            let mut command = CliArgs::command();
            let name = command.get_name().to_string();
            clap_complete::generate(shell, &mut command, name, &mut std::io::stdout());
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
