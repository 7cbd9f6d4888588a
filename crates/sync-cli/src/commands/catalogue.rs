//! Listing the command catalogue and the standard filters

use colored::Colorize;
use sync_filter::{StandardFilter, SyncStateFilter};
use sync_model::{Direction, Directions};
use sync_select::CommandKind;

use crate::error::Result;

pub fn run_list_commands() -> Result<()> {
    println!("{}", "Commands".bold());
    println!();

    for command in CommandKind::ALL {
        let directions = command.direction_filter().directions();
        let mut notes = vec![direction_names(directions)];
        if command.state_filter().accept_group_nodes() {
            notes.push("group nodes".to_string());
        }
        if command.is_extraction() {
            notes.push("tags deletions".to_string());
        }
        println!("  {:<22} {}", command.name().green(), notes.join(", ").dimmed());
    }

    println!();
    println!("Use {} to preview one.", "syncsel plan -s <snapshot> -c <command>".cyan());
    Ok(())
}

pub fn run_list_filters() -> Result<()> {
    println!("{}", "State filters".bold());
    println!();

    for filter in StandardFilter::ALL_FILTERS {
        println!("  {}", filter.name().green());
    }

    println!();
    println!(
        "{} {} filters. Use {} to apply one.",
        "Total:".dimmed(),
        StandardFilter::ALL_FILTERS.len(),
        "syncsel select -s <snapshot> -f <filter>".cyan()
    );
    Ok(())
}

fn direction_names(directions: Directions) -> String {
    [Direction::Incoming, Direction::Outgoing, Direction::Conflicting]
        .into_iter()
        .filter(|direction| directions.includes(*direction))
        .map(Direction::as_str)
        .collect::<Vec<_>>()
        .join("+")
}
