//! Catalogue of standard local-state filters

use crate::{Error, StateFilter};
use std::str::FromStr;
use sync_model::{ChangeMask, LocalState, StateView};

/// The predicates used throughout command selection.
///
/// Every filter except [`StandardFilter::InternalInvalid`] rejects a state
/// that could not be computed, and refuses recursion below it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StandardFilter {
    All,
    InternalInvalid,
    NotExists,
    Ignored,
    IgnoredNotForbidden,
    New,
    Added,
    NotModified,
    Modified,
    ModifiedNotIgnored,
    Conflicting,
    ContentConflicting,
    PropertiesConflicting,
    DataConflicting,
    TreeConflicting,
    Deleted,
    Missing,
    Commitable,
    Revertable,
    AnyChange,
    ExcludeDeleted,
    ExcludePrereplacedAndDeleted,
    Versioned,
    VersionedFiles,
    VersionedFolders,
    Unversioned,
    UnversionedExternal,
    OnRepository,
    NotOnRepository,
    Obstructed,
    Replaced,
    Prereplaced,
    PrereplacedOrReplaced,
    Linked,
    Switched,
    Locked,
    ReadyToLock,
    HasPropertiesChanges,
}

impl StandardFilter {
    pub const ALL_FILTERS: [StandardFilter; 38] = [
        StandardFilter::All,
        StandardFilter::InternalInvalid,
        StandardFilter::NotExists,
        StandardFilter::Ignored,
        StandardFilter::IgnoredNotForbidden,
        StandardFilter::New,
        StandardFilter::Added,
        StandardFilter::NotModified,
        StandardFilter::Modified,
        StandardFilter::ModifiedNotIgnored,
        StandardFilter::Conflicting,
        StandardFilter::ContentConflicting,
        StandardFilter::PropertiesConflicting,
        StandardFilter::DataConflicting,
        StandardFilter::TreeConflicting,
        StandardFilter::Deleted,
        StandardFilter::Missing,
        StandardFilter::Commitable,
        StandardFilter::Revertable,
        StandardFilter::AnyChange,
        StandardFilter::ExcludeDeleted,
        StandardFilter::ExcludePrereplacedAndDeleted,
        StandardFilter::Versioned,
        StandardFilter::VersionedFiles,
        StandardFilter::VersionedFolders,
        StandardFilter::Unversioned,
        StandardFilter::UnversionedExternal,
        StandardFilter::OnRepository,
        StandardFilter::NotOnRepository,
        StandardFilter::Obstructed,
        StandardFilter::Replaced,
        StandardFilter::Prereplaced,
        StandardFilter::PrereplacedOrReplaced,
        StandardFilter::Linked,
        StandardFilter::Switched,
        StandardFilter::Locked,
        StandardFilter::ReadyToLock,
        StandardFilter::HasPropertiesChanges,
    ];

    pub fn name(self) -> &'static str {
        match self {
            StandardFilter::All => "all",
            StandardFilter::InternalInvalid => "internal-invalid",
            StandardFilter::NotExists => "not-exists",
            StandardFilter::Ignored => "ignored",
            StandardFilter::IgnoredNotForbidden => "ignored-not-forbidden",
            StandardFilter::New => "new",
            StandardFilter::Added => "added",
            StandardFilter::NotModified => "not-modified",
            StandardFilter::Modified => "modified",
            StandardFilter::ModifiedNotIgnored => "modified-not-ignored",
            StandardFilter::Conflicting => "conflicting",
            StandardFilter::ContentConflicting => "content-conflicting",
            StandardFilter::PropertiesConflicting => "properties-conflicting",
            StandardFilter::DataConflicting => "data-conflicting",
            StandardFilter::TreeConflicting => "tree-conflicting",
            StandardFilter::Deleted => "deleted",
            StandardFilter::Missing => "missing",
            StandardFilter::Commitable => "commitable",
            StandardFilter::Revertable => "revertable",
            StandardFilter::AnyChange => "any-change",
            StandardFilter::ExcludeDeleted => "exclude-deleted",
            StandardFilter::ExcludePrereplacedAndDeleted => "exclude-prereplaced-and-deleted",
            StandardFilter::Versioned => "versioned",
            StandardFilter::VersionedFiles => "versioned-files",
            StandardFilter::VersionedFolders => "versioned-folders",
            StandardFilter::Unversioned => "unversioned",
            StandardFilter::UnversionedExternal => "unversioned-external",
            StandardFilter::OnRepository => "on-repository",
            StandardFilter::NotOnRepository => "not-on-repository",
            StandardFilter::Obstructed => "obstructed",
            StandardFilter::Replaced => "replaced",
            StandardFilter::Prereplaced => "prereplaced",
            StandardFilter::PrereplacedOrReplaced => "prereplaced-or-replaced",
            StandardFilter::Linked => "linked",
            StandardFilter::Switched => "switched",
            StandardFilter::Locked => "locked",
            StandardFilter::ReadyToLock => "ready-to-lock",
            StandardFilter::HasPropertiesChanges => "has-properties-changes",
        }
    }

    fn accept_impl(self, view: StateView<'_>) -> bool {
        use LocalState::*;
        let state = view.state;

        match self {
            StandardFilter::All => true,
            StandardFilter::InternalInvalid => false,
            StandardFilter::NotExists => matches!(state, NotExists | Linked),
            StandardFilter::Ignored => state == Ignored,
            StandardFilter::IgnoredNotForbidden => {
                state == Ignored && !view.mask.contains(ChangeMask::FORBIDDEN)
            }
            StandardFilter::New => matches!(state, Prereplaced | New),
            StandardFilter::Added => matches!(state, Prereplaced | Replaced | New | Added),
            StandardFilter::NotModified => matches!(state, Normal | NotExists | Linked),
            StandardFilter::Modified => matches!(state, Modified | Conflicting),
            StandardFilter::ModifiedNotIgnored => {
                !StandardFilter::Ignored.accept(view) && !StandardFilter::NotModified.accept(view)
            }
            StandardFilter::Conflicting => state == Conflicting,
            StandardFilter::ContentConflicting => view.text_state == Conflicting,
            StandardFilter::PropertiesConflicting => view.prop_state == Conflicting,
            StandardFilter::DataConflicting => state == Conflicting && !view.has_tree_conflict(),
            StandardFilter::TreeConflicting => view.has_tree_conflict(),
            StandardFilter::Deleted => matches!(state, Prereplaced | Replaced | Deleted | Missing),
            StandardFilter::Missing => state == Missing,
            StandardFilter::Commitable => matches!(state, Replaced | Added | Modified | Deleted | Missing),
            StandardFilter::Revertable => {
                matches!(
                    state,
                    Prereplaced | Conflicting | Replaced | Added | Modified | Deleted | Missing
                ) || view.has_tree_conflict()
            }
            StandardFilter::AnyChange => {
                !StandardFilter::Ignored.accept(view) && !matches!(state, Normal | Obstructed | Linked)
            }
            StandardFilter::ExcludeDeleted => {
                StandardFilter::OnRepository.accept(view) && !matches!(state, Deleted | Missing)
            }
            StandardFilter::ExcludePrereplacedAndDeleted => {
                StandardFilter::Versioned.accept(view) && !matches!(state, Prereplaced | Deleted | Missing)
            }
            StandardFilter::Versioned => match view.tree_conflict {
                Some(conflict) => {
                    conflict.exists_on_repository()
                        || conflict.reason == sync_model::ConflictReason::Added
                }
                None => matches!(
                    state,
                    Replaced | Prereplaced | Added | Normal | Modified | Conflicting | Deleted | Missing
                ),
            },
            StandardFilter::VersionedFiles => {
                view.resource.is_file() && StandardFilter::Versioned.accept(view)
            }
            StandardFilter::VersionedFolders => {
                view.resource.is_container() && StandardFilter::Versioned.accept(view)
            }
            StandardFilter::Unversioned => matches!(state, Prereplaced | New | Ignored | NotExists),
            StandardFilter::UnversionedExternal => {
                // the dedicated flag is not consulted; externals surface as ignored roots
                state == Ignored && view.mask.contains(ChangeMask::SVN_EXTERNALS)
            }
            StandardFilter::OnRepository => match view.tree_conflict {
                Some(conflict) => conflict.exists_on_repository(),
                None => matches!(
                    state,
                    Prereplaced | Replaced | Normal | Modified | Conflicting | Deleted | Missing
                ),
            },
            StandardFilter::NotOnRepository => match view.tree_conflict {
                Some(conflict) => !conflict.exists_on_repository(),
                None => matches!(state, Prereplaced | New | Ignored | NotExists | Added),
            },
            StandardFilter::Obstructed => state == Obstructed,
            StandardFilter::Replaced => state == Replaced,
            StandardFilter::Prereplaced => state == Prereplaced,
            StandardFilter::PrereplacedOrReplaced => matches!(state, Prereplaced | Replaced),
            StandardFilter::Linked => state == Linked,
            StandardFilter::Switched => view.mask.contains(ChangeMask::SWITCHED),
            StandardFilter::Locked => view.mask.contains(ChangeMask::LOCKED),
            StandardFilter::ReadyToLock => {
                view.resource.is_file()
                    && !view.mask.contains(ChangeMask::LOCKED)
                    && StandardFilter::ExcludeDeleted.accept(view)
            }
            StandardFilter::HasPropertiesChanges => matches!(view.prop_state, Modified | Conflicting),
        }
    }

    fn allows_recursion_impl(self, view: StateView<'_>) -> bool {
        let versioned_or_external =
            || StandardFilter::Versioned.accept(view) || StandardFilter::UnversionedExternal.accept(view);
        let on_repository_or_external = || {
            StandardFilter::OnRepository.accept(view) || StandardFilter::UnversionedExternal.accept(view)
        };
        let not_ignored_change = || {
            (!StandardFilter::Ignored.accept(view) || view.mask.contains(ChangeMask::SVN_EXTERNALS))
                && !matches!(view.state, LocalState::Obstructed | LocalState::Linked)
        };

        match self {
            StandardFilter::InternalInvalid => false,
            StandardFilter::All
            | StandardFilter::NotExists
            | StandardFilter::Ignored
            | StandardFilter::IgnoredNotForbidden
            | StandardFilter::Unversioned
            | StandardFilter::NotOnRepository
            | StandardFilter::NotModified
            | StandardFilter::Obstructed
            | StandardFilter::Linked
            | StandardFilter::Switched => true,
            StandardFilter::New | StandardFilter::AnyChange | StandardFilter::ModifiedNotIgnored => {
                not_ignored_change()
            }
            StandardFilter::Modified
            | StandardFilter::Conflicting
            | StandardFilter::ContentConflicting
            | StandardFilter::PropertiesConflicting
            | StandardFilter::DataConflicting
            | StandardFilter::TreeConflicting
            | StandardFilter::Deleted
            | StandardFilter::Missing
            | StandardFilter::Locked
            | StandardFilter::HasPropertiesChanges => on_repository_or_external(),
            StandardFilter::Added
            | StandardFilter::Commitable
            | StandardFilter::Revertable
            | StandardFilter::Versioned
            | StandardFilter::VersionedFiles
            | StandardFilter::VersionedFolders
            | StandardFilter::OnRepository
            | StandardFilter::Replaced
            | StandardFilter::Prereplaced
            | StandardFilter::PrereplacedOrReplaced => versioned_or_external(),
            StandardFilter::UnversionedExternal => StandardFilter::Versioned.accept(view),
            StandardFilter::ExcludeDeleted
            | StandardFilter::ExcludePrereplacedAndDeleted
            | StandardFilter::ReadyToLock => {
                StandardFilter::ExcludeDeleted.accept(view)
                    || StandardFilter::UnversionedExternal.accept(view)
            }
        }
    }
}

impl StateFilter for StandardFilter {
    fn accept(&self, view: StateView<'_>) -> bool {
        if view.state == LocalState::InternalInvalid {
            return *self == StandardFilter::InternalInvalid;
        }
        self.accept_impl(view)
    }

    fn allows_recursion(&self, view: StateView<'_>) -> bool {
        view.state != LocalState::InternalInvalid && self.allows_recursion_impl(view)
    }
}

impl std::fmt::Display for StandardFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StandardFilter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StandardFilter::ALL_FILTERS
            .into_iter()
            .find(|filter| filter.name() == s)
            .ok_or_else(|| Error::UnknownFilter { name: s.to_string() })
    }
}
