//! Versioning state of a single side of a resource

use crate::Error;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Working-copy (or repository-side) status of a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocalState {
    /// Status could not be computed; rejected by every filter but its own
    InternalInvalid,
    /// Resource is not present on this side
    NotExists,
    Ignored,
    /// Unversioned and not ignored
    New,
    Added,
    Normal,
    Modified,
    Conflicting,
    Deleted,
    /// Versioned but absent from disk
    Missing,
    /// Versioned as one node kind, present as another
    Obstructed,
    /// Unversioned item sitting where a deleted versioned item was
    Prereplaced,
    Replaced,
    /// Linked (virtual) resource outside version control
    Linked,
}

impl LocalState {
    pub const ALL: [LocalState; 14] = [
        LocalState::InternalInvalid,
        LocalState::NotExists,
        LocalState::Ignored,
        LocalState::New,
        LocalState::Added,
        LocalState::Normal,
        LocalState::Modified,
        LocalState::Conflicting,
        LocalState::Deleted,
        LocalState::Missing,
        LocalState::Obstructed,
        LocalState::Prereplaced,
        LocalState::Replaced,
        LocalState::Linked,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            LocalState::InternalInvalid => "internal_invalid",
            LocalState::NotExists => "not_exists",
            LocalState::Ignored => "ignored",
            LocalState::New => "new",
            LocalState::Added => "added",
            LocalState::Normal => "normal",
            LocalState::Modified => "modified",
            LocalState::Conflicting => "conflicting",
            LocalState::Deleted => "deleted",
            LocalState::Missing => "missing",
            LocalState::Obstructed => "obstructed",
            LocalState::Prereplaced => "prereplaced",
            LocalState::Replaced => "replaced",
            LocalState::Linked => "linked",
        }
    }
}

impl std::fmt::Display for LocalState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LocalState {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LocalState::ALL
            .into_iter()
            .find(|state| state.as_str() == s)
            .ok_or_else(|| Error::UnknownState { name: s.to_string() })
    }
}

bitflags::bitflags! {
    /// Additional status flags carried next to a [`LocalState`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct ChangeMask: u32 {
        const COPIED = 0x01;
        const SWITCHED = 0x02;
        const LOCKED = 0x04;
        /// Root of an `svn:externals` definition
        const SVN_EXTERNALS = 0x08;
        const UNVERSIONED_EXTERNAL = 0x10;
        /// Ignored by a rule that cannot be overridden
        const FORBIDDEN = 0x20;
        const TEXT_MODIFIED = 0x40;
        const PROPERTY_MODIFIED = 0x80;
    }
}

/// Operation that produced a tree conflict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictOperation {
    None,
    Update,
    Switched,
    Merge,
}

/// Incoming action involved in a tree conflict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictAction {
    Add,
    Modify,
    Delete,
    Replace,
}

/// Local reason for a tree conflict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictReason {
    Modified,
    Obstructed,
    Deleted,
    Missing,
    Unversioned,
    Added,
    Replaced,
    MovedAway,
    MovedHere,
}

/// Description of a tree conflict on a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TreeConflict {
    pub operation: ConflictOperation,
    pub action: ConflictAction,
    pub reason: ConflictReason,
}

impl TreeConflict {
    pub fn new(operation: ConflictOperation, action: ConflictAction, reason: ConflictReason) -> Self {
        Self {
            operation,
            action,
            reason,
        }
    }

    /// Whether the conflicted item still exists in the repository.
    ///
    /// Update and switch conflicts keep the item unless the incoming action
    /// deleted it or both sides added it. Merge conflicts only count when the
    /// incoming change was applied to a locally modified item.
    pub fn exists_on_repository(&self) -> bool {
        match self.operation {
            ConflictOperation::Update | ConflictOperation::Switched => {
                self.action != ConflictAction::Delete
                    && !(self.action == ConflictAction::Add && self.reason == ConflictReason::Added)
            }
            ConflictOperation::Merge => {
                self.action != ConflictAction::Delete && self.reason == ConflictReason::Modified
            }
            ConflictOperation::None => false,
        }
    }
}
