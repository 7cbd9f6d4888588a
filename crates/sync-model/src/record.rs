//! Sync records: the three-way association for one resource

use crate::{Error, LocalResource, LocalState, Resource, ResourceChange, ResourceVariant};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Which side(s) changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    InSync,
    Incoming,
    Outgoing,
    Conflicting,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::InSync => "in_sync",
            Direction::Incoming => "incoming",
            Direction::Outgoing => "outgoing",
            Direction::Conflicting => "conflicting",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "in_sync" => Ok(Direction::InSync),
            "incoming" => Ok(Direction::Incoming),
            "outgoing" => Ok(Direction::Outgoing),
            "conflicting" => Ok(Direction::Conflicting),
            other => Err(Error::UnknownDirection {
                name: other.to_string(),
            }),
        }
    }
}

bitflags::bitflags! {
    /// A set of directions, as accepted by a direction filter.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct Directions: u8 {
        const INCOMING = 0x1;
        const OUTGOING = 0x2;
        const CONFLICTING = 0x4;
    }
}

impl Directions {
    /// Whether `direction` is in the set. In-sync records never are.
    pub fn includes(self, direction: Direction) -> bool {
        match direction {
            Direction::InSync => false,
            Direction::Incoming => self.contains(Directions::INCOMING),
            Direction::Outgoing => self.contains(Directions::OUTGOING),
            Direction::Conflicting => self.contains(Directions::CONFLICTING),
        }
    }
}

impl From<Direction> for Directions {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::InSync => Directions::empty(),
            Direction::Incoming => Directions::INCOMING,
            Direction::Outgoing => Directions::OUTGOING,
            Direction::Conflicting => Directions::CONFLICTING,
        }
    }
}

/// What kind of change a record describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    #[default]
    None,
    Addition,
    Deletion,
    Change,
}

impl ChangeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ChangeKind::None => "none",
            ChangeKind::Addition => "addition",
            ChangeKind::Deletion => "deletion",
            ChangeKind::Change => "change",
        }
    }

    fn of_local(local: &LocalResource) -> Self {
        match local.state {
            LocalState::New | LocalState::Added | LocalState::Prereplaced => ChangeKind::Addition,
            LocalState::Deleted | LocalState::Missing => ChangeKind::Deletion,
            LocalState::Modified
            | LocalState::Conflicting
            | LocalState::Replaced
            | LocalState::Obstructed => ChangeKind::Change,
            _ if local.prop_state.is_some_and(|p| p != LocalState::Normal) => ChangeKind::Change,
            _ => ChangeKind::None,
        }
    }

    fn of_remote(remote: &ResourceChange) -> Self {
        match remote.state {
            LocalState::New | LocalState::Added => ChangeKind::Addition,
            LocalState::Deleted | LocalState::Missing => ChangeKind::Deletion,
            LocalState::Modified
            | LocalState::Conflicting
            | LocalState::Replaced
            | LocalState::Prereplaced => ChangeKind::Change,
            _ => ChangeKind::None,
        }
    }
}

impl std::fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChangeKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(ChangeKind::None),
            "addition" => Ok(ChangeKind::Addition),
            "deletion" => Ok(ChangeKind::Deletion),
            "change" => Ok(ChangeKind::Change),
            other => Err(Error::UnknownChangeKind {
                name: other.to_string(),
            }),
        }
    }
}

/// Association of one resource with its local, remote and base variants.
///
/// Created by a synchronization subscriber once per refresh and never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncRecord {
    local: LocalResource,
    remote: ResourceVariant,
    base: Option<ResourceVariant>,
    direction: Direction,
    kind: ChangeKind,
}

impl SyncRecord {
    /// Build a record whose direction and change kind are derived from the
    /// local status and the (optional) incoming change.
    pub fn calculate(local: LocalResource, remote: Option<ResourceChange>) -> Self {
        let (direction, kind) = Self::classify(&local, remote.as_ref());
        Self::with_direction(local, remote, direction, kind)
    }

    /// Build a record with a direction and kind already known to the caller.
    pub fn with_direction(
        local: LocalResource,
        remote: Option<ResourceChange>,
        direction: Direction,
        kind: ChangeKind,
    ) -> Self {
        let base = match local.state {
            LocalState::New
            | LocalState::Ignored
            | LocalState::NotExists
            | LocalState::Prereplaced => None,
            _ => Some(ResourceVariant::Local(local.clone())),
        };
        let remote = match remote {
            Some(change) => ResourceVariant::Change(change),
            None => ResourceVariant::Local(local.clone()),
        };
        Self {
            local,
            remote,
            base,
            direction,
            kind,
        }
    }

    fn classify(local: &LocalResource, remote: Option<&ResourceChange>) -> (Direction, ChangeKind) {
        let local_kind = ChangeKind::of_local(local);
        let remote_kind = remote.map(ChangeKind::of_remote).unwrap_or_default();
        let conflicted = local.state == LocalState::Conflicting || local.tree_conflict.is_some();

        match (local_kind, remote_kind) {
            _ if conflicted => {
                let kind = match (local_kind, remote_kind) {
                    (ChangeKind::None, ChangeKind::None) => ChangeKind::Change,
                    (ChangeKind::None, theirs) => theirs,
                    (ours, _) => ours,
                };
                (Direction::Conflicting, kind)
            }
            (ChangeKind::None, ChangeKind::None) => (Direction::InSync, ChangeKind::None),
            (ChangeKind::None, theirs) => (Direction::Incoming, theirs),
            (ours, ChangeKind::None) => (Direction::Outgoing, ours),
            (ours, _) => (Direction::Conflicting, ours),
        }
    }

    pub fn resource(&self) -> &Resource {
        &self.local.resource
    }

    pub fn local(&self) -> &LocalResource {
        &self.local
    }

    /// The remote side: the incoming change if there is one, otherwise the
    /// local status standing in for an unchanged remote.
    pub fn remote(&self) -> &ResourceVariant {
        &self.remote
    }

    /// The common ancestor; absent for unversioned items.
    pub fn base(&self) -> Option<&ResourceVariant> {
        self.base.as_ref()
    }

    pub fn remote_change(&self) -> Option<&ResourceChange> {
        self.remote.as_change()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn kind(&self) -> ChangeKind {
        self.kind
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{RepositoryRef, TreeConflict};

    fn local(state: LocalState) -> LocalResource {
        LocalResource::new(Resource::file("root/a.txt"), state)
    }

    fn change(state: LocalState) -> ResourceChange {
        ResourceChange::new(
            Resource::file("root/a.txt"),
            state,
            RepositoryRef::new("https://svn.example.org/repo/root/a.txt"),
            42,
        )
    }

    #[test]
    fn local_modification_is_outgoing_change() {
        let record = SyncRecord::calculate(local(LocalState::Modified), None);
        assert_eq!(record.direction(), Direction::Outgoing);
        assert_eq!(record.kind(), ChangeKind::Change);
        assert!(record.remote_change().is_none());
    }

    #[test]
    fn remote_deletion_is_incoming_deletion() {
        let record = SyncRecord::calculate(local(LocalState::Normal), Some(change(LocalState::Deleted)));
        assert_eq!(record.direction(), Direction::Incoming);
        assert_eq!(record.kind(), ChangeKind::Deletion);
    }

    #[test]
    fn changes_on_both_sides_conflict() {
        let record = SyncRecord::calculate(local(LocalState::Modified), Some(change(LocalState::Modified)));
        assert_eq!(record.direction(), Direction::Conflicting);
    }

    #[test]
    fn tree_conflict_forces_conflicting_direction() {
        let conflicted = local(LocalState::Normal).with_tree_conflict(TreeConflict::new(
            crate::ConflictOperation::Update,
            crate::ConflictAction::Delete,
            crate::ConflictReason::Modified,
        ));
        let record = SyncRecord::calculate(conflicted, Some(change(LocalState::Deleted)));
        assert_eq!(record.direction(), Direction::Conflicting);
        assert_eq!(record.kind(), ChangeKind::Deletion);
    }

    #[test]
    fn unversioned_record_has_no_base() {
        let record = SyncRecord::calculate(local(LocalState::New), None);
        assert!(record.base().is_none());
        assert_eq!(record.kind(), ChangeKind::Addition);
    }

    #[test]
    fn directions_never_include_in_sync() {
        assert!(!Directions::all().includes(Direction::InSync));
        assert!(Directions::from(Direction::Outgoing).includes(Direction::Outgoing));
    }
}
