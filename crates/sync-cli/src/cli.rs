//! CLI argument parsing using clap derive

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

/// Sync selection engine - compute what a command would act on
#[derive(Parser, Debug)]
#[command(name = "syncsel")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Which viewer model to build from the snapshot
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModelShape {
    /// Flat list of diff elements
    #[default]
    Flat,
    /// Parent/child node tree with grouping headers
    Tree,
}

/// Options shared by every command reading a snapshot document
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct SnapshotArgs {
    /// Snapshot document (.toml, .json, .yaml)
    #[arg(short, long, env = "SYNCSEL_SNAPSHOT")]
    pub snapshot: PathBuf,

    /// Viewer model to select against
    #[arg(short, long, value_enum, default_value_t = ModelShape::Flat)]
    pub model: ModelShape,

    /// Output as JSON for scripting
    #[arg(long)]
    pub json: bool,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Select resources with a command's filters or an ad hoc filter
    ///
    /// Examples:
    ///   syncsel select -s snap.toml --command commit
    ///   syncsel select -s snap.toml --filter added --group-nodes
    ///   syncsel select -s snap.toml --filter new --remote-filter deleted --direction incoming,conflicting
    Select {
        #[command(flatten)]
        input: SnapshotArgs,

        /// Use the filters of a catalogue command (see `syncsel commands`)
        #[arg(short, long, conflicts_with_all = ["filter", "remote_filter", "group_nodes", "direction"])]
        command: Option<String>,

        /// Local-state filter (see `syncsel filters`)
        #[arg(short, long)]
        filter: Option<String>,

        /// Remote-state filter
        #[arg(short, long)]
        remote_filter: Option<String>,

        /// Pull in ancestors up to the first selected one
        #[arg(short, long)]
        group_nodes: bool,

        /// Comma separated directions (incoming, outgoing, conflicting, all)
        #[arg(short, long, default_value = "all")]
        direction: String,
    },

    /// Show the records a command would act on
    Records {
        #[command(flatten)]
        input: SnapshotArgs,

        /// Catalogue command
        #[arg(short, long)]
        command: String,
    },

    /// Build a command's plan and hand it to the dispatcher
    Plan {
        #[command(flatten)]
        input: SnapshotArgs,

        /// Catalogue command
        #[arg(short, long)]
        command: String,
    },

    /// List catalogue commands
    Commands,

    /// List standard state filters
    Filters,

    /// Encode or decode clipboard transfers
    Transfer {
        #[command(subcommand)]
        action: TransferAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Operation carried by an encoded transfer
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationArg {
    Copy,
    Cut,
    None,
}

/// Transfer subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum TransferAction {
    /// Encode repository references into a transfer file
    Encode {
        /// Repository URL, optionally with `@revision`
        #[arg(short, long = "url", required = true)]
        urls: Vec<String>,

        /// Transfer operation
        #[arg(long, value_enum, default_value = "copy")]
        operation: OperationArg,

        /// Where to write the encoded bytes
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Decode a transfer file
    Decode {
        /// Encoded transfer file
        input: PathBuf,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_select_with_command() {
        let cli = Cli::parse_from(["syncsel", "select", "-s", "snap.toml", "--command", "commit"]);
        match cli.command {
            Some(Commands::Select { input, command, .. }) => {
                assert_eq!(input.snapshot, PathBuf::from("snap.toml"));
                assert_eq!(input.model, ModelShape::Flat);
                assert_eq!(command.as_deref(), Some("commit"));
            }
            _ => panic!("Expected Select command"),
        }
    }

    #[test]
    fn command_conflicts_with_filter() {
        let result = Cli::try_parse_from([
            "syncsel", "select", "-s", "snap.toml", "--command", "commit", "--filter", "added",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn parse_transfer_encode() {
        let cli = Cli::parse_from([
            "syncsel", "transfer", "encode", "--url", "svn://h/a", "--url", "svn://h/b@4", "-o", "out.bin",
        ]);
        match cli.command {
            Some(Commands::Transfer {
                action: TransferAction::Encode { urls, operation, .. },
            }) => {
                assert_eq!(urls.len(), 2);
                assert_eq!(operation, OperationArg::Copy);
            }
            _ => panic!("Expected Transfer Encode command"),
        }
    }

    #[test]
    fn parse_completions_command() {
        let cli = Cli::parse_from(["syncsel", "completions", "bash"]);
        assert!(matches!(cli.command, Some(Commands::Completions { .. })));
    }
}
