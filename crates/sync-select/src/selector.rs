//! Resolution of a viewer selection to the resources a command acts on

use crate::context::Probe;
use crate::{GapPolicy, SelectionModel, SyncContext};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use sync_filter::{DirectionFilter, StandardFilter, StateFilter, SyncStateFilter};
use sync_model::{Resource, ResourcePath, SyncRecord};
use tracing::debug;

/// Selects resources from a [`SelectionModel`] through direction and state
/// filters.
///
/// Holds no state between calls; every selection is computed from scratch
/// against the model and the context's provider.
pub struct ResourceSelector<'a, M: ?Sized> {
    ctx: &'a SyncContext,
    model: &'a M,
}

impl<'a, M: SelectionModel + ?Sized> ResourceSelector<'a, M> {
    pub fn new(ctx: &'a SyncContext, model: &'a M) -> Self {
        Self { ctx, model }
    }

    /// Distinct resources that match directly or are pulled in as group
    /// nodes, ordered by path.
    pub fn select_resources(&self, direction: &DirectionFilter, filter: &dyn SyncStateFilter) -> BTreeSet<Resource> {
        self.select(direction, filter).into_values().map(|record| record.resource().clone()).collect()
    }

    /// The records behind [`ResourceSelector::select_resources`], one per
    /// resource, ordered by path.
    pub fn select_records(&self, direction: &DirectionFilter, filter: &dyn SyncStateFilter) -> Vec<Arc<SyncRecord>> {
        self.select(direction, filter).into_values().collect()
    }

    fn select(
        &self,
        direction: &DirectionFilter,
        filter: &dyn SyncStateFilter,
    ) -> BTreeMap<ResourcePath, Arc<SyncRecord>> {
        let candidates = self.model.records(self.ctx);
        let considered = candidates.len();

        let mut selected: BTreeMap<ResourcePath, Arc<SyncRecord>> = BTreeMap::new();
        for record in candidates {
            if direction.select(&record) && Self::matches(&record, filter) {
                selected.entry(record.resource().path.clone()).or_insert(record);
            }
        }
        let matched = selected.len();

        if filter.accept_group_nodes() && self.ctx.config().expand_group_nodes {
            let expansions: Vec<(ResourcePath, Arc<SyncRecord>)> = selected
                .values()
                .flat_map(|record| self.group_nodes(record.resource()))
                .collect();
            for (path, record) in expansions {
                selected.entry(path).or_insert(record);
            }
        }

        debug!(
            considered,
            matched,
            expanded = selected.len() - matched,
            "Resolved selection"
        );
        selected
    }

    /// A record matches on its remote change or on its local state.
    fn matches(record: &SyncRecord, filter: &dyn SyncStateFilter) -> bool {
        record
            .remote_change()
            .is_some_and(|change| filter.accept_remote(change.view()))
            || filter.accept(record.local().view())
    }

    /// Ancestors of `resource` up to and including the first one in the
    /// original selection. Empty if the walk never meets the selection.
    fn group_nodes(&self, resource: &Resource) -> Vec<(ResourcePath, Arc<SyncRecord>)> {
        let mut pending = Vec::new();
        let mut current = resource.clone();

        while let Some(parent) = self.model.parent_of(&current) {
            match self.ctx.probe(&parent) {
                Probe::Found(record) => {
                    if !StandardFilter::UnversionedExternal.accept(record.local().view()) {
                        pending.push((parent.path.clone(), record));
                    }
                }
                Probe::Missing => {
                    if self.ctx.config().gap_policy == GapPolicy::Terminate {
                        return Vec::new();
                    }
                }
                Probe::Failed => {}
            }

            if self.model.is_selected(&parent) {
                return pending;
            }
            current = parent;
        }
        Vec::new()
    }
}
