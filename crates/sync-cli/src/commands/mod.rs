//! Command implementations for sync-cli

pub mod catalogue;
pub mod completions;
pub mod select;
pub mod transfer;

pub use catalogue::{run_list_commands, run_list_filters};
pub use completions::run_completions;
pub use select::{run_plan, run_records, run_select};
pub use transfer::{run_decode, run_encode};
