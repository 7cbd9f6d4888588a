//! Snapshot documents: records, a selection and selector settings in one file
//!
//! ```toml
//! selection = ["trunk/src"]
//!
//! [selector]
//! gap_policy = "tunnel"
//!
//! [[records]]
//! path = "trunk/src/lib.rs"
//! state = "modified"
//!
//! [[records]]
//! path = "trunk/src/old.rs"
//! state = "normal"
//! remote = { state = "deleted", url = "https://svn.example.org/repo/trunk/src/old.rs", revision = 42 }
//! ```

use crate::{DiffTreeModel, Error, NodeTreeModel, Result, SelectorConfig, SyncContext, SyncSnapshot};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;
use sync_model::{
    ChangeKind, ChangeMask, Direction, LocalResource, LocalState, RepositoryRef, Resource, ResourceChange,
    ResourceKind, ResourcePath, SyncRecord, TreeConflict,
};

/// Serialized form of one refresh cycle plus a viewer selection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SnapshotDocument {
    #[serde(default)]
    pub selector: SelectorConfig,
    #[serde(default)]
    pub records: Vec<RecordEntry>,
    /// Selected paths or group labels
    #[serde(default)]
    pub selection: Vec<String>,
    /// Grouping headers for the node tree
    #[serde(default)]
    pub groups: Vec<GroupEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordEntry {
    pub path: String,
    #[serde(default)]
    pub kind: ResourceKind,
    pub state: LocalState,
    #[serde(default)]
    pub mask: ChangeMask,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_state: Option<LocalState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prop_state: Option<LocalState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tree_conflict: Option<TreeConflict>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote: Option<RemoteEntry>,
    /// Overrides the derived direction
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<Direction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change_kind: Option<ChangeKind>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteEntry {
    pub state: LocalState,
    #[serde(default)]
    pub mask: ChangeMask,
    pub url: String,
    pub revision: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupEntry {
    pub label: String,
    pub members: Vec<String>,
}

impl RecordEntry {
    pub fn to_record(&self) -> SyncRecord {
        let resource = Resource::new(self.path.as_str(), self.kind);

        let mut local = LocalResource::new(resource.clone(), self.state).with_mask(self.mask);
        local.text_state = self.text_state;
        local.prop_state = self.prop_state;
        local.tree_conflict = self.tree_conflict;

        let remote = self.remote.as_ref().map(|remote| {
            let change = ResourceChange::new(
                resource,
                remote.state,
                RepositoryRef::new(remote.url.as_str()).at_revision(remote.revision),
                remote.revision,
            )
            .with_mask(remote.mask);
            match &remote.author {
                Some(author) => change.with_author(author.as_str()),
                None => change,
            }
        });

        match self.direction {
            Some(direction) => {
                SyncRecord::with_direction(local, remote, direction, self.change_kind.unwrap_or_default())
            }
            None => SyncRecord::calculate(local, remote),
        }
    }
}

impl SnapshotDocument {
    /// Load a document, picking the format from the file extension.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let extension = path.extension().and_then(|ext| ext.to_str()).unwrap_or("");

        match extension.to_lowercase().as_str() {
            "toml" => toml::from_str(&content).map_err(|e| Error::SnapshotParse {
                path: path.to_path_buf(),
                format: "TOML".into(),
                message: e.to_string(),
            }),
            "json" => serde_json::from_str(&content).map_err(|e| Error::SnapshotParse {
                path: path.to_path_buf(),
                format: "JSON".into(),
                message: e.to_string(),
            }),
            "yaml" | "yml" => serde_yaml::from_str(&content).map_err(|e| Error::SnapshotParse {
                path: path.to_path_buf(),
                format: "YAML".into(),
                message: e.to_string(),
            }),
            _ => Err(Error::UnsupportedFormat {
                extension: extension.to_string(),
            }),
        }
    }

    pub fn snapshot(&self) -> SyncSnapshot {
        SyncSnapshot::new(self.records.iter().map(RecordEntry::to_record))
    }

    /// Context over this document's records and selector settings.
    pub fn context(&self) -> SyncContext {
        SyncContext::new(Arc::new(self.snapshot())).with_config(self.selector)
    }

    /// Flat model. A selected group stands for its members.
    pub fn diff_model(&self) -> Result<DiffTreeModel> {
        let snapshot = self.snapshot();
        let mut selection = Vec::new();
        for entry in &self.selection {
            match self.groups.iter().find(|group| &group.label == entry) {
                Some(group) => selection.extend(group.members.iter().map(|m| self.resource_for(m))),
                None => selection.push(self.selected_resource(entry)?),
            }
        }
        Ok(DiffTreeModel::new(snapshot.resources(), selection))
    }

    /// Node tree. Group members hang below their header; every other record
    /// sits in the plain resource hierarchy.
    pub fn node_model(&self) -> Result<NodeTreeModel> {
        let snapshot = self.snapshot();
        let mut model = NodeTreeModel::new();

        let mut grouped = HashSet::new();
        for group in &self.groups {
            let header = model.add_group(group.label.as_str());
            for member in &group.members {
                grouped.insert(ResourcePath::from(member.as_str()));
                model.add_resource(Some(header), self.resource_for(member), &snapshot);
            }
        }
        for resource in snapshot.resources() {
            if !grouped.contains(&resource.path) {
                model.add_resource(None, resource, &snapshot);
            }
        }

        for entry in &self.selection {
            let nodes = match model.find_group(entry) {
                Some(header) => vec![header],
                None => {
                    let resource = self.selected_resource(entry)?;
                    model.find_all(&resource.path).to_vec()
                }
            };
            if nodes.is_empty() {
                return Err(Error::UnknownSelection { entry: entry.clone() });
            }
            for node in nodes {
                model.select(node);
            }
        }
        Ok(model)
    }

    /// Resource for a record path, with the record's kind when known.
    fn resource_for(&self, path: &str) -> Resource {
        let path = ResourcePath::from(path);
        match self.records.iter().find(|record| ResourcePath::from(record.path.as_str()) == path) {
            Some(record) => Resource::new(path, record.kind),
            None => Resource::folder(path),
        }
    }

    /// A selection entry must name a record or an ancestor of one.
    fn selected_resource(&self, entry: &str) -> Result<Resource> {
        let path = ResourcePath::from(entry);
        let known = self
            .records
            .iter()
            .any(|record| path.contains(&ResourcePath::from(record.path.as_str())));
        if known {
            Ok(self.resource_for(entry))
        } else {
            Err(Error::UnknownSelection {
                entry: entry.to_string(),
            })
        }
    }
}
