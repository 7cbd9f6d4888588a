//! Sync-aware filters: a local predicate, a remote predicate and a
//! group-node flag.

use crate::{StandardFilter, StateFilter, StateFilterExt, filter_fn};
use sync_model::{LocalState, StateView};

/// A [`StateFilter`] that can also qualify a resource by its remote change.
pub trait SyncStateFilter: StateFilter {
    /// Whether the remote change alone qualifies the resource.
    fn accept_remote(&self, remote: StateView<'_>) -> bool;

    /// Fixed per instance. When true, matched resources pull in their
    /// ancestors up to the first one present in the original selection.
    fn accept_group_nodes(&self) -> bool;
}

impl<F: SyncStateFilter + ?Sized> SyncStateFilter for &F {
    fn accept_remote(&self, remote: StateView<'_>) -> bool {
        (**self).accept_remote(remote)
    }

    fn accept_group_nodes(&self) -> bool {
        (**self).accept_group_nodes()
    }
}

impl<F: SyncStateFilter + ?Sized> SyncStateFilter for Box<F> {
    fn accept_remote(&self, remote: StateView<'_>) -> bool {
        (**self).accept_remote(remote)
    }

    fn accept_group_nodes(&self) -> bool {
        (**self).accept_group_nodes()
    }
}

/// Lifts plain local and remote predicates into a [`SyncStateFilter`].
pub struct StateFilterWrapper {
    local: Option<Box<dyn StateFilter>>,
    remote: Option<Box<dyn StateFilter>>,
    group_nodes: bool,
}

impl StateFilterWrapper {
    /// Local predicate only; the remote side never qualifies.
    pub fn new(local: impl StateFilter + 'static, group_nodes: bool) -> Self {
        Self {
            local: Some(local.boxed()),
            remote: None,
            group_nodes,
        }
    }

    pub fn with_remote(
        local: impl StateFilter + 'static,
        remote: impl StateFilter + 'static,
        group_nodes: bool,
    ) -> Self {
        Self {
            local: Some(local.boxed()),
            remote: Some(remote.boxed()),
            group_nodes,
        }
    }

    /// Remote predicate only; the local side never qualifies.
    pub fn remote_only(remote: impl StateFilter + 'static, group_nodes: bool) -> Self {
        Self {
            local: None,
            remote: Some(remote.boxed()),
            group_nodes,
        }
    }
}

impl StateFilter for StateFilterWrapper {
    fn accept(&self, view: StateView<'_>) -> bool {
        self.local.as_ref().is_some_and(|f| f.accept(view))
    }

    fn allows_recursion(&self, view: StateView<'_>) -> bool {
        match &self.local {
            Some(filter) => filter.allows_recursion(view),
            None => true,
        }
    }
}

impl SyncStateFilter for StateFilterWrapper {
    fn accept_remote(&self, remote: StateView<'_>) -> bool {
        self.remote.as_ref().is_some_and(|f| f.accept(remote))
    }

    fn accept_group_nodes(&self) -> bool {
        self.group_nodes
    }
}

/// Conjunction of sync filters, on both sides, with its own group flag.
pub struct SyncAndFilter {
    filters: Vec<Box<dyn SyncStateFilter>>,
    group_nodes: bool,
}

impl SyncAndFilter {
    pub fn new(filters: Vec<Box<dyn SyncStateFilter>>, group_nodes: bool) -> Self {
        Self { filters, group_nodes }
    }
}

impl StateFilter for SyncAndFilter {
    fn accept(&self, view: StateView<'_>) -> bool {
        self.filters.iter().all(|f| f.accept(view))
    }

    fn allows_recursion(&self, view: StateView<'_>) -> bool {
        self.filters.iter().all(|f| f.allows_recursion(view))
    }
}

impl SyncStateFilter for SyncAndFilter {
    fn accept_remote(&self, remote: StateView<'_>) -> bool {
        self.filters.iter().all(|f| f.accept_remote(remote))
    }

    fn accept_group_nodes(&self) -> bool {
        self.group_nodes
    }
}

/// Disjunction of sync filters, on both sides, with its own group flag.
pub struct SyncOrFilter {
    filters: Vec<Box<dyn SyncStateFilter>>,
    group_nodes: bool,
}

impl SyncOrFilter {
    pub fn new(filters: Vec<Box<dyn SyncStateFilter>>, group_nodes: bool) -> Self {
        Self { filters, group_nodes }
    }
}

impl StateFilter for SyncOrFilter {
    fn accept(&self, view: StateView<'_>) -> bool {
        self.filters.iter().any(|f| f.accept(view))
    }

    fn allows_recursion(&self, view: StateView<'_>) -> bool {
        self.filters.iter().any(|f| f.allows_recursion(view))
    }
}

impl SyncStateFilter for SyncOrFilter {
    fn accept_remote(&self, remote: StateView<'_>) -> bool {
        self.filters.iter().any(|f| f.accept_remote(remote))
    }

    fn accept_group_nodes(&self) -> bool {
        self.group_nodes
    }
}

/// Local item is on the repository, or the remote change does not remove it.
pub fn on_repository() -> StateFilterWrapper {
    StateFilterWrapper::with_remote(
        StandardFilter::OnRepository,
        filter_fn(|view| view.state != LocalState::NotExists),
        true,
    )
}

/// Local item is revertable or unversioned, or the remote side has any change.
pub fn override_filter() -> StateFilterWrapper {
    StateFilterWrapper::with_remote(
        StandardFilter::Revertable.or(StandardFilter::New),
        StandardFilter::AnyChange,
        true,
    )
}

/// Remote change deletes the item. Local state is ignored.
pub fn remote_deleted(group_nodes: bool) -> StateFilterWrapper {
    StateFilterWrapper::remote_only(StandardFilter::Deleted, group_nodes)
}

/// Everything qualifies, on either side.
pub fn all(group_nodes: bool) -> StateFilterWrapper {
    StateFilterWrapper::with_remote(StandardFilter::All, StandardFilter::All, group_nodes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sync_model::{ChangeMask, Resource};

    fn view(resource: &Resource, state: LocalState) -> StateView<'_> {
        StateView::bare(resource, state, ChangeMask::empty())
    }

    #[test]
    fn wrapper_without_remote_never_accepts_remote() {
        let resource = Resource::file("a.txt");
        let filter = StateFilterWrapper::new(StandardFilter::All, false);
        assert!(filter.accept(view(&resource, LocalState::Normal)));
        assert!(!filter.accept_remote(view(&resource, LocalState::Modified)));
        assert!(!filter.accept_group_nodes());
    }

    #[test]
    fn remote_only_wrapper_ignores_local_side() {
        let resource = Resource::file("a.txt");
        let filter = remote_deleted(true);
        assert!(!filter.accept(view(&resource, LocalState::Deleted)));
        assert!(filter.accept_remote(view(&resource, LocalState::Deleted)));
    }

    #[test]
    fn composites_carry_their_own_group_flag() {
        let and = SyncAndFilter::new(vec![Box::new(all(true)), Box::new(on_repository())], false);
        assert!(!and.accept_group_nodes());

        let or = SyncOrFilter::new(vec![Box::new(all(false))], true);
        assert!(or.accept_group_nodes());
    }

    #[test]
    fn override_accepts_unversioned_and_revertable() {
        let resource = Resource::file("a.txt");
        let filter = override_filter();
        assert!(filter.accept(view(&resource, LocalState::New)));
        assert!(filter.accept(view(&resource, LocalState::Modified)));
        assert!(!filter.accept(view(&resource, LocalState::Normal)));
        assert!(filter.accept_group_nodes());
    }
}
