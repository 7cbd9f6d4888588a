//! Command catalogue and dispatch
//!
//! Each command pairs a [`DirectionFilter`] with a [`SyncStateFilter`]. The
//! selector turns those into a [`CommandPlan`], which is handed to an
//! [`OperationRunner`] when it is not empty. Running the operation itself is
//! the runner's business.

use crate::{Error, ResourceSelector, SelectionModel, SyncContext};
use serde::Serialize;
use std::collections::BTreeSet;
use std::str::FromStr;
use std::sync::Arc;
use sync_filter::{
    DirectionFilter, StandardFilter, StateFilterExt, StateFilterWrapper, SyncOrFilter, SyncStateFilter, canonical,
    filter_fn,
};
use sync_model::{Directions, LocalState, Resource, SyncRecord};
use tracing::{debug, info};

/// Commands offered on a synchronization selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CommandKind {
    Commit,
    Revert,
    Cleanup,
    Update,
    OverrideAndUpdate,
    OverrideAndCommit,
    ExtractIncoming,
    ExtractOutgoing,
    ExtractAll,
    SetProperty,
    ShowHistory,
    Lock,
    Unlock,
}

impl CommandKind {
    pub const ALL: [CommandKind; 13] = [
        CommandKind::Commit,
        CommandKind::Revert,
        CommandKind::Cleanup,
        CommandKind::Update,
        CommandKind::OverrideAndUpdate,
        CommandKind::OverrideAndCommit,
        CommandKind::ExtractIncoming,
        CommandKind::ExtractOutgoing,
        CommandKind::ExtractAll,
        CommandKind::SetProperty,
        CommandKind::ShowHistory,
        CommandKind::Lock,
        CommandKind::Unlock,
    ];

    pub fn name(self) -> &'static str {
        match self {
            CommandKind::Commit => "commit",
            CommandKind::Revert => "revert",
            CommandKind::Cleanup => "cleanup",
            CommandKind::Update => "update",
            CommandKind::OverrideAndUpdate => "override-and-update",
            CommandKind::OverrideAndCommit => "override-and-commit",
            CommandKind::ExtractIncoming => "extract-incoming",
            CommandKind::ExtractOutgoing => "extract-outgoing",
            CommandKind::ExtractAll => "extract-all",
            CommandKind::SetProperty => "set-property",
            CommandKind::ShowHistory => "show-history",
            CommandKind::Lock => "lock",
            CommandKind::Unlock => "unlock",
        }
    }

    pub fn is_extraction(self) -> bool {
        matches!(
            self,
            CommandKind::ExtractIncoming | CommandKind::ExtractOutgoing | CommandKind::ExtractAll
        )
    }

    /// Which records the command may look at.
    pub fn direction_filter(self) -> DirectionFilter {
        match self {
            CommandKind::Commit => DirectionFilter::outgoing().reject_local(StandardFilter::Obstructed),
            CommandKind::Revert => {
                DirectionFilter::all().require_local(StandardFilter::Revertable.or(StandardFilter::New))
            }
            CommandKind::Update => DirectionFilter::new(Directions::INCOMING | Directions::CONFLICTING),
            CommandKind::OverrideAndCommit => DirectionFilter::all().reject_local(StandardFilter::Obstructed),
            CommandKind::ExtractIncoming => DirectionFilter::new(Directions::INCOMING | Directions::CONFLICTING),
            CommandKind::ExtractOutgoing => DirectionFilter::new(Directions::OUTGOING | Directions::CONFLICTING),
            CommandKind::Cleanup
            | CommandKind::OverrideAndUpdate
            | CommandKind::ExtractAll
            | CommandKind::SetProperty
            | CommandKind::ShowHistory
            | CommandKind::Lock
            | CommandKind::Unlock => DirectionFilter::all(),
        }
    }

    /// Which of those records qualify.
    pub fn state_filter(self) -> Box<dyn SyncStateFilter> {
        match self {
            CommandKind::Commit => Box::new(StateFilterWrapper::new(
                StandardFilter::Commitable.or(StandardFilter::New),
                true,
            )),
            CommandKind::Revert => Box::new(StateFilterWrapper::new(
                StandardFilter::Revertable.or(StandardFilter::New),
                false,
            )),
            CommandKind::Cleanup => Box::new(StateFilterWrapper::new(StandardFilter::VersionedFolders, false)),
            CommandKind::Update => Box::new(canonical::on_repository()),
            CommandKind::OverrideAndUpdate | CommandKind::OverrideAndCommit => {
                Box::new(canonical::override_filter())
            }
            CommandKind::ExtractIncoming => Box::new(StateFilterWrapper::remote_only(StandardFilter::All, true)),
            CommandKind::ExtractOutgoing => Box::new(StateFilterWrapper::new(StandardFilter::AnyChange, true)),
            CommandKind::ExtractAll => Box::new(canonical::all(true)),
            CommandKind::SetProperty => Box::new(StateFilterWrapper::new(StandardFilter::Versioned, false)),
            CommandKind::ShowHistory => Box::new(StateFilterWrapper::with_remote(
                StandardFilter::OnRepository,
                filter_fn(|view| view.state != LocalState::NotExists),
                false,
            )),
            CommandKind::Lock => Box::new(StateFilterWrapper::new(StandardFilter::ReadyToLock, false)),
            CommandKind::Unlock => Box::new(StateFilterWrapper::new(StandardFilter::Locked, false)),
        }
    }

    /// Predicate tagging resources as deleted in an extraction plan.
    fn deletion_filter(self) -> Option<Box<dyn SyncStateFilter>> {
        let local_deleted = || StateFilterWrapper::new(StandardFilter::Deleted, false);
        match self {
            CommandKind::ExtractIncoming => Some(Box::new(canonical::remote_deleted(false))),
            CommandKind::ExtractOutgoing => Some(Box::new(local_deleted())),
            CommandKind::ExtractAll => Some(Box::new(SyncOrFilter::new(
                vec![Box::new(canonical::remote_deleted(false)), Box::new(local_deleted())],
                false,
            ))),
            _ => None,
        }
    }
}

impl std::fmt::Display for CommandKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CommandKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CommandKind::ALL
            .into_iter()
            .find(|command| command.name() == s)
            .ok_or_else(|| Error::UnknownCommand { name: s.to_string() })
    }
}

/// Resources to extract, with the subset that should be marked deleted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractPlan {
    pub resources: BTreeSet<Resource>,
    pub deleted: BTreeSet<Resource>,
}

impl ExtractPlan {
    /// Run the selector once with the change filter and once with the
    /// deletion filter, keeping only deletions that are also extracted.
    pub fn build<M: SelectionModel + ?Sized>(
        selector: &ResourceSelector<'_, M>,
        direction: &DirectionFilter,
        changes: &dyn SyncStateFilter,
        deletions: &dyn SyncStateFilter,
    ) -> Self {
        let resources = selector.select_resources(direction, changes);
        let deleted = selector
            .select_resources(direction, deletions)
            .into_iter()
            .filter(|resource| resources.contains(resource))
            .collect();
        Self { resources, deleted }
    }
}

/// What a command would operate on for the current selection.
#[derive(Debug, Clone, Serialize)]
pub struct CommandPlan {
    pub command: CommandKind,
    pub resources: BTreeSet<Resource>,
    #[serde(skip)]
    pub records: Vec<Arc<SyncRecord>>,
    /// Extraction commands only
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub deleted: BTreeSet<Resource>,
}

impl CommandPlan {
    /// Compute the plan for `command` over the model's current selection.
    pub fn build<M: SelectionModel + ?Sized>(ctx: &SyncContext, model: &M, command: CommandKind) -> Self {
        let selector = ResourceSelector::new(ctx, model);
        let direction = command.direction_filter();
        let state = command.state_filter();

        let records = selector.select_records(&direction, state.as_ref());
        let resources: BTreeSet<Resource> = records.iter().map(|record| record.resource().clone()).collect();
        let deleted = match command.deletion_filter() {
            Some(deletions) => {
                ExtractPlan::build(&selector, &direction, state.as_ref(), deletions.as_ref()).deleted
            }
            None => BTreeSet::new(),
        };

        debug!(command = %command, resources = resources.len(), deleted = deleted.len(), "Built command plan");
        Self {
            command,
            resources,
            records,
            deleted,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

/// Executes command plans, usually by scheduling a background operation.
pub trait OperationRunner {
    fn run(&mut self, plan: CommandPlan);
}

/// Build the plan for `command` and hand it to `runner`.
///
/// Returns `false` without calling the runner when nothing qualifies.
pub fn dispatch<M: SelectionModel + ?Sized>(
    ctx: &SyncContext,
    model: &M,
    command: CommandKind,
    runner: &mut dyn OperationRunner,
) -> bool {
    let plan = CommandPlan::build(ctx, model, command);
    if plan.is_empty() {
        debug!(command = %command, "Nothing to dispatch");
        return false;
    }
    info!(command = %command, resources = plan.resources.len(), "Dispatching command");
    runner.run(plan);
    true
}
