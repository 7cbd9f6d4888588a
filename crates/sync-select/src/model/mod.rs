//! Viewer-model capabilities the selector works against
//!
//! Two model shapes exist: a flat list of diff elements reached through the
//! resource hierarchy ([`DiffTreeModel`]) and an explicit parent/child node
//! tree that may contain grouping headers ([`NodeTreeModel`]). Both expose the
//! same small capability set so a single selector serves both.

mod flat;
mod tree;

pub use flat::DiffTreeModel;
pub use tree::{ModelNode, NodeId, NodeTreeModel};

use crate::SyncContext;
use std::sync::Arc;
use sync_model::{Resource, SyncRecord};

/// What the selector needs from a viewer model.
pub trait SelectionModel {
    /// Records behind the current selection, including those of selected
    /// containers' descendants. Entries without a record are skipped.
    fn records(&self, ctx: &SyncContext) -> Vec<Arc<SyncRecord>>;

    /// Whether `resource` is part of the original, unfiltered selection.
    fn is_selected(&self, resource: &Resource) -> bool;

    /// The model parent of `resource`, `None` at the top or below a node that
    /// carries no resource.
    fn parent_of(&self, resource: &Resource) -> Option<Resource>;
}

impl<M: SelectionModel + ?Sized> SelectionModel for &M {
    fn records(&self, ctx: &SyncContext) -> Vec<Arc<SyncRecord>> {
        (**self).records(ctx)
    }

    fn is_selected(&self, resource: &Resource) -> bool {
        (**self).is_selected(resource)
    }

    fn parent_of(&self, resource: &Resource) -> Option<Resource> {
        (**self).parent_of(resource)
    }
}
