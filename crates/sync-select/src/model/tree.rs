use super::SelectionModel;
use crate::{SyncContext, SyncSnapshot};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use sync_model::{Resource, ResourcePath, SyncRecord};

/// Index of a node inside a [`NodeTreeModel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// One element of the viewer tree.
///
/// Grouping headers (change sets and the like) carry a label but neither a
/// resource nor a record. The record is the one known when the node was
/// built; selection re-resolves it through the context's provider.
#[derive(Debug, Clone)]
pub struct ModelNode {
    label: String,
    resource: Option<Resource>,
    record: Option<Arc<SyncRecord>>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl ModelNode {
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn resource(&self) -> Option<&Resource> {
        self.resource.as_ref()
    }

    pub fn record(&self) -> Option<&Arc<SyncRecord>> {
        self.record.as_ref()
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn is_group(&self) -> bool {
        self.resource.is_none()
    }
}

/// Explicit parent/child tree of model nodes with a node selection.
///
/// Nodes live in an arena; parent links are indices, so the tree is read
/// without any shared ownership.
#[derive(Debug, Clone, Default)]
pub struct NodeTreeModel {
    nodes: Vec<ModelNode>,
    roots: Vec<NodeId>,
    selected: Vec<NodeId>,
    /// A path shows up once per branch it appears in (below a header and at
    /// the top level, say).
    by_path: HashMap<ResourcePath, Vec<NodeId>>,
}

impl NodeTreeModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tree holding every record of `snapshot` under its resource hierarchy.
    pub fn from_snapshot(snapshot: &SyncSnapshot) -> Self {
        let mut model = Self::new();
        for resource in snapshot.resources() {
            model.add_resource(None, resource, snapshot);
        }
        model
    }

    pub fn node(&self, id: NodeId) -> &ModelNode {
        &self.nodes[id.0]
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// First node showing `path`, if any.
    pub fn find(&self, path: &ResourcePath) -> Option<NodeId> {
        self.find_all(path).first().copied()
    }

    /// Every node showing `path`, in insertion order.
    pub fn find_all(&self, path: &ResourcePath) -> &[NodeId] {
        self.by_path.get(path).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn find_group(&self, label: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .position(|node| node.is_group() && node.label == label)
            .map(NodeId)
    }

    /// Add a grouping header at the top level.
    pub fn add_group(&mut self, label: impl Into<String>) -> NodeId {
        self.push(None, label.into(), None, None)
    }

    /// Add `resource` below `under`, creating folder nodes for its ancestors
    /// as needed. Records are taken from `snapshot`.
    pub fn add_resource(&mut self, under: Option<NodeId>, resource: Resource, snapshot: &SyncSnapshot) -> NodeId {
        let mut ancestors: Vec<ResourcePath> = resource.path.ancestors().collect();
        ancestors.reverse();

        let mut parent = under;
        for path in ancestors {
            parent = Some(match self.child_with_path(parent, &path) {
                Some(existing) => existing,
                None => {
                    let record = snapshot.get(&path).cloned();
                    let folder = Resource::folder(path);
                    self.push(parent, folder.path.to_string(), Some(folder), record)
                }
            });
        }

        match self.child_with_path(parent, &resource.path) {
            Some(existing) => existing,
            None => {
                let record = snapshot.get(&resource.path).cloned();
                self.push(parent, resource.path.to_string(), Some(resource), record)
            }
        }
    }

    pub fn select(&mut self, id: NodeId) {
        if !self.selected.contains(&id) {
            self.selected.push(id);
        }
    }

    pub fn selected(&self) -> &[NodeId] {
        &self.selected
    }

    fn child_with_path(&self, parent: Option<NodeId>, path: &ResourcePath) -> Option<NodeId> {
        let siblings = match parent {
            Some(id) => &self.nodes[id.0].children,
            None => &self.roots,
        };
        siblings
            .iter()
            .copied()
            .find(|id| self.nodes[id.0].resource.as_ref().is_some_and(|r| &r.path == path))
    }

    fn push(
        &mut self,
        parent: Option<NodeId>,
        label: String,
        resource: Option<Resource>,
        record: Option<Arc<SyncRecord>>,
    ) -> NodeId {
        let id = NodeId(self.nodes.len());
        if let Some(resource) = &resource {
            self.by_path.entry(resource.path.clone()).or_default().push(id);
        }
        self.nodes.push(ModelNode {
            label,
            resource,
            record,
            parent,
            children: Vec::new(),
        });
        match parent {
            Some(parent) => self.nodes[parent.0].children.push(id),
            None => self.roots.push(id),
        }
        id
    }
}

impl SelectionModel for NodeTreeModel {
    fn records(&self, ctx: &SyncContext) -> Vec<Arc<SyncRecord>> {
        let mut visited = HashSet::new();
        let mut resolved = HashSet::new();
        let mut records = Vec::new();

        for &start in &self.selected {
            let mut stack = vec![start];
            while let Some(id) = stack.pop() {
                if !visited.insert(id) {
                    continue;
                }
                let node = &self.nodes[id.0];
                // only diff elements are looked up, each path once
                if let (Some(resource), Some(_)) = (&node.resource, &node.record) {
                    if resolved.insert(&resource.path) {
                        records.extend(ctx.lookup(resource));
                    }
                }
                stack.extend(node.children.iter().rev().copied());
            }
        }
        records
    }

    fn is_selected(&self, resource: &Resource) -> bool {
        self.selected
            .iter()
            .any(|id| self.nodes[id.0].resource.as_ref() == Some(resource))
    }

    /// Ancestor folders are created along the path, so every node showing
    /// `resource` has the same parent resource, or none below a header.
    fn parent_of(&self, resource: &Resource) -> Option<Resource> {
        self.find_all(&resource.path).iter().find_map(|id| {
            let parent = self.nodes[id.0].parent?;
            self.nodes[parent.0].resource.clone()
        })
    }
}
