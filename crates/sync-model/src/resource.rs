//! Workspace resources

use crate::{Error, ResourcePath};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// What sort of workspace item a resource is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    #[default]
    File,
    Folder,
    /// Top-level container of a working copy
    Project,
}

impl ResourceKind {
    /// Folders and projects can hold children.
    pub fn is_container(self) -> bool {
        matches!(self, ResourceKind::Folder | ResourceKind::Project)
    }
}

impl FromStr for ResourceKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "file" => Ok(ResourceKind::File),
            "folder" => Ok(ResourceKind::Folder),
            "project" => Ok(ResourceKind::Project),
            other => Err(Error::UnknownResourceKind {
                name: other.to_string(),
            }),
        }
    }
}

/// A workspace item.
///
/// Identity is the path alone: equality, hashing and ordering ignore the
/// kind, so a resource set never holds one location twice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resource {
    pub path: ResourcePath,
    #[serde(default)]
    pub kind: ResourceKind,
}

impl Resource {
    pub fn new(path: impl Into<ResourcePath>, kind: ResourceKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }

    pub fn file(path: impl Into<ResourcePath>) -> Self {
        Self::new(path, ResourceKind::File)
    }

    pub fn folder(path: impl Into<ResourcePath>) -> Self {
        Self::new(path, ResourceKind::Folder)
    }

    pub fn project(path: impl Into<ResourcePath>) -> Self {
        Self::new(path, ResourceKind::Project)
    }

    pub fn is_file(&self) -> bool {
        self.kind == ResourceKind::File
    }

    pub fn is_container(&self) -> bool {
        self.kind.is_container()
    }

    /// The containing folder, derived from the path.
    pub fn parent(&self) -> Option<Resource> {
        self.path.parent().map(Resource::folder)
    }
}

impl PartialEq for Resource {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl Eq for Resource {}

impl Hash for Resource {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.path.hash(state);
    }
}

impl PartialOrd for Resource {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Resource {
    fn cmp(&self, other: &Self) -> Ordering {
        self.path.cmp(&other.path)
    }
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn identity_ignores_kind() {
        let mut set = HashSet::new();
        set.insert(Resource::folder("root/a"));
        set.insert(Resource::file("root/a"));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn parent_is_a_folder() {
        let parent = Resource::file("root/a/File.txt").parent().unwrap();
        assert_eq!(parent.path.as_str(), "root/a");
        assert!(parent.is_container());
    }
}
