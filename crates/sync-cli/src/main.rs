//! syncsel - selection engine command line
//!
//! Loads a snapshot document, builds a viewer model over it and reports what
//! a synchronization command would act on.

mod cli;
mod commands;
mod error;
mod logging;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands, TransferAction};
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match cli.command {
        Some(cmd) => execute_command(cmd),
        None => {
            println!("{}", "syncsel - sync selection engine".bold());
            println!();
            println!("Run {} for usage information.", "syncsel --help".cyan());
            Ok(())
        }
    }
}

fn execute_command(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Select {
            input,
            command,
            filter,
            remote_filter,
            group_nodes,
            direction,
        } => commands::run_select(
            &input,
            command.as_deref(),
            filter.as_deref(),
            remote_filter.as_deref(),
            group_nodes,
            &direction,
        ),
        Commands::Records { input, command } => commands::run_records(&input, &command),
        Commands::Plan { input, command } => commands::run_plan(&input, &command),
        Commands::Commands => commands::run_list_commands(),
        Commands::Filters => commands::run_list_filters(),
        Commands::Transfer { action } => match action {
            TransferAction::Encode {
                urls,
                operation,
                output,
            } => commands::run_encode(&urls, operation, &output),
            TransferAction::Decode { input, json } => commands::run_decode(&input, json),
        },
        Commands::Completions { shell } => commands::run_completions(shell),
    }
}
