//! Selection, record and plan commands over a snapshot document

use colored::Colorize;
use serde::Serialize;
use std::collections::BTreeSet;
use sync_filter::{DirectionFilter, StandardFilter, StateFilterWrapper, SyncStateFilter};
use sync_model::{Resource, ResourceKind, SyncRecord};
use sync_select::{
    CommandKind, CommandPlan, OperationRunner, ResourceSelector, SelectionModel, SnapshotDocument, SyncContext,
    dispatch,
};

use crate::cli::{ModelShape, SnapshotArgs};
use crate::error::{CliError, Result};

/// Snapshot loaded into a context and the requested viewer model.
struct Loaded {
    ctx: SyncContext,
    model: Box<dyn SelectionModel>,
}

fn load(input: &SnapshotArgs) -> Result<Loaded> {
    let document = SnapshotDocument::load(&input.snapshot)?;
    let model: Box<dyn SelectionModel> = match input.model {
        ModelShape::Flat => Box::new(document.diff_model()?),
        ModelShape::Tree => Box::new(document.node_model()?),
    };
    tracing::debug!(
        snapshot = %input.snapshot.display(),
        records = document.records.len(),
        model = ?input.model,
        "Loaded snapshot"
    );
    Ok(Loaded {
        ctx: document.context(),
        model,
    })
}

fn parse_filter(name: Option<&str>) -> Result<Option<StandardFilter>> {
    name.map(|name| name.parse::<StandardFilter>().map_err(CliError::from))
        .transpose()
}

/// Ad hoc state filter from the `--filter` / `--remote-filter` pair.
fn ad_hoc_filter(local: Option<&str>, remote: Option<&str>, group_nodes: bool) -> Result<StateFilterWrapper> {
    match (parse_filter(local)?, parse_filter(remote)?) {
        (Some(local), Some(remote)) => Ok(StateFilterWrapper::with_remote(local, remote, group_nodes)),
        (Some(local), None) => Ok(StateFilterWrapper::new(local, group_nodes)),
        (None, Some(remote)) => Ok(StateFilterWrapper::remote_only(remote, group_nodes)),
        (None, None) => Err(CliError::user(
            "Nothing to select with. Pass --command or at least one of --filter / --remote-filter",
        )),
    }
}

fn kind_label(kind: ResourceKind) -> &'static str {
    match kind {
        ResourceKind::File => "file",
        ResourceKind::Folder => "folder",
        ResourceKind::Project => "project",
    }
}

fn print_resources(resources: &BTreeSet<Resource>, deleted: &BTreeSet<Resource>) {
    for resource in resources {
        if deleted.contains(resource) {
            println!(
                "  {} {} {}",
                "-".red(),
                resource.path,
                "(deleted)".dimmed()
            );
        } else {
            println!(
                "  {} {} {}",
                "+".green(),
                resource.path,
                format!("({})", kind_label(resource.kind)).dimmed()
            );
        }
    }
}

/// Run the select command
pub fn run_select(
    input: &SnapshotArgs,
    command: Option<&str>,
    filter: Option<&str>,
    remote_filter: Option<&str>,
    group_nodes: bool,
    direction: &str,
) -> Result<()> {
    let loaded = load(input)?;

    let (direction, state): (DirectionFilter, Box<dyn SyncStateFilter>) = match command {
        Some(name) => {
            let command: CommandKind = name.parse()?;
            (command.direction_filter(), command.state_filter())
        }
        None => (
            DirectionFilter::new(DirectionFilter::parse_directions(direction)?),
            Box::new(ad_hoc_filter(filter, remote_filter, group_nodes)?) as Box<dyn SyncStateFilter>,
        ),
    };

    let selector = ResourceSelector::new(&loaded.ctx, loaded.model.as_ref());
    let resources = selector.select_resources(&direction, state.as_ref());

    if input.json {
        println!("{}", serde_json::to_string_pretty(&resources)?);
        return Ok(());
    }

    println!("{} {} resource(s)", "Selected".bold(), resources.len());
    print_resources(&resources, &BTreeSet::new());
    Ok(())
}

/// One row of `records` output.
#[derive(Debug, Serialize)]
struct RecordRow<'a> {
    path: &'a str,
    kind: ResourceKind,
    direction: String,
    change: String,
    local_state: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    remote_state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    originator: Option<String>,
}

impl<'a> From<&'a SyncRecord> for RecordRow<'a> {
    fn from(record: &'a SyncRecord) -> Self {
        let change = record.remote_change();
        Self {
            path: record.resource().path.as_str(),
            kind: record.resource().kind,
            direction: record.direction().to_string(),
            change: record.kind().to_string(),
            local_state: record.local().state.to_string(),
            remote_state: change.map(|c| c.state.to_string()),
            originator: change.map(|c| c.originator.key()),
        }
    }
}

/// Run the records command
pub fn run_records(input: &SnapshotArgs, command: &str) -> Result<()> {
    let loaded = load(input)?;
    let command: CommandKind = command.parse()?;
    let plan = CommandPlan::build(&loaded.ctx, loaded.model.as_ref(), command);
    let rows: Vec<RecordRow<'_>> = plan.records.iter().map(|record| RecordRow::from(record.as_ref())).collect();

    if input.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    println!("{} {} record(s) for {}", "Found".bold(), rows.len(), command.name().cyan());
    for row in &rows {
        let remote = row
            .remote_state
            .as_deref()
            .map(|state| format!(" remote={state}"))
            .unwrap_or_default();
        println!(
            "  {:<12} {:<10} {} {}",
            row.direction.yellow(),
            row.change,
            row.path,
            format!("local={}{}", row.local_state, remote).dimmed()
        );
    }
    Ok(())
}

/// Prints plans instead of running them.
struct PreviewRunner {
    json: bool,
    printed: Result<()>,
}

impl PreviewRunner {
    fn print(&self, plan: &CommandPlan) -> Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(plan)?);
            return Ok(());
        }
        println!(
            "{} would act on {} resource(s)",
            plan.command.name().cyan().bold(),
            plan.resources.len()
        );
        print_resources(&plan.resources, &plan.deleted);
        Ok(())
    }
}

impl OperationRunner for PreviewRunner {
    fn run(&mut self, plan: CommandPlan) {
        self.printed = self.print(&plan);
    }
}

/// Run the plan command
pub fn run_plan(input: &SnapshotArgs, command: &str) -> Result<()> {
    let loaded = load(input)?;
    let command: CommandKind = command.parse()?;
    let mut runner = PreviewRunner {
        json: input.json,
        printed: Ok(()),
    };

    if dispatch(&loaded.ctx, loaded.model.as_ref(), command, &mut runner) {
        return runner.printed;
    }

    if input.json {
        let empty = serde_json::json!({ "command": command, "resources": [] });
        println!("{}", serde_json::to_string_pretty(&empty)?);
    } else {
        println!("{} Nothing to {} in the current selection.", "note:".dimmed(), command.name());
    }
    Ok(())
}
