//! State filtering for synchronization selections
//!
//! Three layers of predicates decide whether a sync record is acted upon:
//!
//! - [`StateFilter`]: pure predicate over one side's versioning state, with the
//!   full catalogue in [`StandardFilter`] and AND/OR/NOT combinators
//! - [`SyncStateFilter`]: adds a remote-side predicate and the group-node flag
//! - [`DirectionFilter`]: restricts records to incoming/outgoing/conflicting
//!   before any state filter runs
//!
//! All filters are stateless; evaluating one never has side effects.

pub mod direction;
pub mod error;
pub mod standard;
pub mod state_filter;
pub mod sync_filter;

pub use direction::DirectionFilter;
pub use error::{Error, Result};
pub use standard::StandardFilter;
pub use state_filter::{AndFilter, FnFilter, NotFilter, OrFilter, StateFilter, StateFilterExt, filter_fn};
pub use sync_filter::{StateFilterWrapper, SyncAndFilter, SyncOrFilter, SyncStateFilter};

/// Canonical sync filters shared by the command catalogue
pub mod canonical {
    pub use crate::sync_filter::{all, on_repository, override_filter, remote_deleted};
}
