//! Synchronization data model
//!
//! Describes one refresh cycle of a three-way (local / remote / common
//! ancestor) change model:
//!
//! - [`Resource`] and [`ResourcePath`]: workspace items and their identity
//! - [`LocalState`], [`ChangeMask`], [`TreeConflict`]: versioning state of one side
//! - [`LocalResource`], [`ResourceChange`], [`ResourceVariant`]: the sides themselves
//! - [`SyncRecord`]: the association of a resource with all three sides plus
//!   its [`Direction`] and [`ChangeKind`]
//!
//! Records are immutable snapshots. A new refresh produces new records; nothing
//! here is mutated in place.

pub mod error;
pub mod path;
pub mod record;
pub mod resource;
pub mod state;
pub mod variant;

pub use error::{Error, Result};
pub use path::ResourcePath;
pub use record::{ChangeKind, Direction, Directions, SyncRecord};
pub use resource::{Resource, ResourceKind};
pub use state::{ChangeMask, ConflictAction, ConflictOperation, ConflictReason, LocalState, TreeConflict};
pub use variant::{LocalResource, RepositoryRef, ResourceChange, ResourceVariant, StateView};
