use super::SelectionModel;
use crate::SyncContext;
use std::collections::BTreeSet;
use std::sync::Arc;
use sync_model::{Resource, ResourcePath, SyncRecord};

/// Flat list of out-of-sync resources plus the selected resources.
///
/// Selecting a container selects every diff element at or below it. Parents
/// are derived from resource paths.
#[derive(Debug, Clone, Default)]
pub struct DiffTreeModel {
    diffs: Vec<Resource>,
    selection: BTreeSet<Resource>,
}

impl DiffTreeModel {
    pub fn new(diffs: impl IntoIterator<Item = Resource>, selection: impl IntoIterator<Item = Resource>) -> Self {
        Self {
            diffs: diffs.into_iter().collect(),
            selection: selection.into_iter().collect(),
        }
    }

    pub fn diffs(&self) -> &[Resource] {
        &self.diffs
    }

    pub fn selection(&self) -> impl Iterator<Item = &Resource> {
        self.selection.iter()
    }

    fn covered(&self, path: &ResourcePath) -> bool {
        self.selection.iter().any(|selected| selected.path.contains(path))
    }
}

impl SelectionModel for DiffTreeModel {
    fn records(&self, ctx: &SyncContext) -> Vec<Arc<SyncRecord>> {
        self.diffs
            .iter()
            .filter(|diff| self.covered(&diff.path))
            .filter_map(|diff| ctx.lookup(diff))
            .collect()
    }

    fn is_selected(&self, resource: &Resource) -> bool {
        self.selection.contains(resource)
    }

    fn parent_of(&self, resource: &Resource) -> Option<Resource> {
        resource.parent()
    }
}
