//! Shell completion scripts

use clap::CommandFactory;
use clap_complete::Shell;

use crate::cli::Cli;
use crate::error::Result;

pub fn run_completions(shell: Shell) -> Result<()> {
    clap_complete::generate(shell, &mut Cli::command(), "syncsel", &mut std::io::stdout());
    Ok(())
}
