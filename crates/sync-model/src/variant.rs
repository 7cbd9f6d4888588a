//! The sides of a sync record

use crate::{ChangeMask, LocalState, Resource, TreeConflict};
use serde::{Deserialize, Serialize};

/// Borrowed view of one side's versioning state.
///
/// Filters evaluate views rather than concrete sides so the same predicate
/// can be applied to a working-copy status and to a repository change.
#[derive(Debug, Clone, Copy)]
pub struct StateView<'a> {
    pub resource: &'a Resource,
    pub state: LocalState,
    pub mask: ChangeMask,
    pub text_state: LocalState,
    pub prop_state: LocalState,
    pub tree_conflict: Option<&'a TreeConflict>,
}

impl<'a> StateView<'a> {
    /// A view carrying only a state and mask, as used by composed predicates.
    pub fn bare(resource: &'a Resource, state: LocalState, mask: ChangeMask) -> Self {
        Self {
            resource,
            state,
            mask,
            text_state: state,
            prop_state: LocalState::Normal,
            tree_conflict: None,
        }
    }

    pub fn has_tree_conflict(&self) -> bool {
        self.tree_conflict.is_some()
    }
}

/// Working-copy status of a resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalResource {
    pub resource: Resource,
    pub state: LocalState,
    #[serde(default)]
    pub mask: ChangeMask,
    /// Content status when it differs from the combined `state`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_state: Option<LocalState>,
    /// Property status; absent means unmodified
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prop_state: Option<LocalState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tree_conflict: Option<TreeConflict>,
}

impl LocalResource {
    pub fn new(resource: Resource, state: LocalState) -> Self {
        Self {
            resource,
            state,
            mask: ChangeMask::empty(),
            text_state: None,
            prop_state: None,
            tree_conflict: None,
        }
    }

    pub fn with_mask(mut self, mask: ChangeMask) -> Self {
        self.mask = mask;
        self
    }

    pub fn with_text_state(mut self, state: LocalState) -> Self {
        self.text_state = Some(state);
        self
    }

    pub fn with_prop_state(mut self, state: LocalState) -> Self {
        self.prop_state = Some(state);
        self
    }

    pub fn with_tree_conflict(mut self, conflict: TreeConflict) -> Self {
        self.tree_conflict = Some(conflict);
        self
    }

    pub fn view(&self) -> StateView<'_> {
        StateView {
            resource: &self.resource,
            state: self.state,
            mask: self.mask,
            text_state: self.text_state.unwrap_or(self.state),
            prop_state: self.prop_state.unwrap_or(LocalState::Normal),
            tree_conflict: self.tree_conflict.as_ref(),
        }
    }
}

/// Reference to an item in a repository.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepositoryRef {
    pub url: String,
    /// Peg revision; `None` means HEAD
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision: Option<u64>,
}

impl RepositoryRef {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            revision: None,
        }
    }

    pub fn at_revision(mut self, revision: u64) -> Self {
        self.revision = Some(revision);
        self
    }

    /// Identity key: URL plus peg revision.
    pub fn key(&self) -> String {
        match self.revision {
            Some(rev) => format!("{}@{}", self.url, rev),
            None => self.url.clone(),
        }
    }
}

/// A committed change reported by the repository for one resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceChange {
    pub resource: Resource,
    pub state: LocalState,
    #[serde(default)]
    pub mask: ChangeMask,
    pub originator: RepositoryRef,
    pub revision: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

impl ResourceChange {
    pub fn new(resource: Resource, state: LocalState, originator: RepositoryRef, revision: u64) -> Self {
        Self {
            resource,
            state,
            mask: ChangeMask::empty(),
            originator,
            revision,
            author: None,
        }
    }

    pub fn with_mask(mut self, mask: ChangeMask) -> Self {
        self.mask = mask;
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn view(&self) -> StateView<'_> {
        StateView::bare(&self.resource, self.state, self.mask)
    }
}

/// One side of a sync record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "variant", rename_all = "snake_case")]
pub enum ResourceVariant {
    /// Plain working-copy item
    Local(LocalResource),
    /// Repository change descriptor
    Change(ResourceChange),
}

impl ResourceVariant {
    pub fn resource(&self) -> &Resource {
        match self {
            ResourceVariant::Local(local) => &local.resource,
            ResourceVariant::Change(change) => &change.resource,
        }
    }

    pub fn view(&self) -> StateView<'_> {
        match self {
            ResourceVariant::Local(local) => local.view(),
            ResourceVariant::Change(change) => change.view(),
        }
    }

    pub fn as_change(&self) -> Option<&ResourceChange> {
        match self {
            ResourceVariant::Change(change) => Some(change),
            ResourceVariant::Local(_) => None,
        }
    }

    /// A variant is on the repository iff it is a change descriptor whose
    /// status is anything but not-exists.
    pub fn is_on_repository(&self) -> bool {
        matches!(self, ResourceVariant::Change(change) if change.state != LocalState::NotExists)
    }
}
