//! Workspace-relative resource paths

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Identity of a resource inside the workspace.
///
/// Always uses forward slashes and never carries a trailing slash, so two
/// spellings of the same location compare and hash equal.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct ResourcePath {
    inner: String,
}

impl ResourcePath {
    /// Create a new path from any path-like input.
    ///
    /// Backslashes become forward slashes, repeated separators collapse and a
    /// trailing separator is dropped (except for the root `/`).
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self::from_str_lossy(&path.as_ref().to_string_lossy())
    }

    fn from_str_lossy(raw: &str) -> Self {
        let replaced = raw.replace('\\', "/");
        let absolute = replaced.starts_with('/');
        let joined = replaced
            .split('/')
            .filter(|segment| !segment.is_empty())
            .collect::<Vec<_>>()
            .join("/");

        let inner = if absolute { format!("/{}", joined) } else { joined };
        Self { inner }
    }

    /// Get the internal normalized string representation.
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Whether this is the empty (workspace root) path.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty() || self.inner == "/"
    }

    /// Join this path with a segment.
    pub fn join(&self, segment: &str) -> Self {
        if self.inner.is_empty() {
            return Self::from_str_lossy(segment);
        }
        Self::from_str_lossy(&format!("{}/{}", self.inner, segment))
    }

    /// Get the parent path, or `None` at the top of the hierarchy.
    pub fn parent(&self) -> Option<Self> {
        match self.inner.rfind('/') {
            Some(idx) if idx > 0 => Some(Self {
                inner: self.inner[..idx].to_string(),
            }),
            Some(0) if self.inner.len() > 1 => Some(Self {
                inner: "/".to_string(),
            }),
            _ => None,
        }
    }

    /// Get the last path segment.
    pub fn file_name(&self) -> Option<&str> {
        self.inner.rsplit('/').next().filter(|name| !name.is_empty())
    }

    /// Number of segments in the path.
    pub fn depth(&self) -> usize {
        self.inner.split('/').filter(|s| !s.is_empty()).count()
    }

    /// Whether `self` is `other` or one of its ancestors.
    pub fn contains(&self, other: &ResourcePath) -> bool {
        if self.is_empty() {
            return true;
        }
        match other.inner.strip_prefix(self.inner.as_str()) {
            Some(rest) => rest.is_empty() || rest.starts_with('/'),
            None => false,
        }
    }

    /// Iterate over the strict ancestors of this path, nearest first.
    pub fn ancestors(&self) -> impl Iterator<Item = ResourcePath> {
        std::iter::successors(self.parent(), |p| p.parent())
    }
}

impl AsRef<Path> for ResourcePath {
    fn as_ref(&self) -> &Path {
        Path::new(&self.inner)
    }
}

impl std::fmt::Display for ResourcePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl From<&str> for ResourcePath {
    fn from(s: &str) -> Self {
        Self::from_str_lossy(s)
    }
}

impl From<String> for ResourcePath {
    fn from(s: String) -> Self {
        Self::from_str_lossy(&s)
    }
}

impl From<ResourcePath> for String {
    fn from(p: ResourcePath) -> Self {
        p.inner
    }
}
