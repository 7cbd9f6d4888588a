//! Selection engine for synchronization views
//!
//! Given a viewer model and a pair of filters, computes exactly which
//! resources a command should act on:
//!
//! 1. the model resolves its selection to sync records
//! 2. a [`sync_filter::DirectionFilter`] keeps records of the right direction
//! 3. a [`sync_filter::SyncStateFilter`] matches records on their remote change
//!    or their local state
//! 4. filters that accept group nodes pull in ancestors up to the first one
//!    present in the original selection
//!
//! Collaborators (record provider, error reporter, settings) are passed in a
//! [`SyncContext`]; the selector keeps nothing between invocations.

mod context;

pub mod commands;
pub mod config;
pub mod error;
pub mod model;
pub mod selector;
pub mod snapshot;

pub use commands::{CommandKind, CommandPlan, ExtractPlan, OperationRunner, dispatch};
pub use config::{GapPolicy, SelectorConfig};
pub use context::{ErrorReporter, SyncContext, SyncInfoProvider, SyncSnapshot, TracingReporter};
pub use error::{Error, Result};
pub use model::{DiffTreeModel, ModelNode, NodeId, NodeTreeModel, SelectionModel};
pub use selector::ResourceSelector;
pub use snapshot::{GroupEntry, RecordEntry, RemoteEntry, SnapshotDocument};
