//! Selector configuration

use serde::{Deserialize, Serialize};

/// How the group-node walk treats an ancestor that has no sync record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GapPolicy {
    /// Skip the ancestor as a candidate and keep walking upward
    #[default]
    Tunnel,
    /// Abandon the branch without adding any ancestors
    Terminate,
}

/// Tunables for [`crate::ResourceSelector`].
///
/// ```toml
/// [selector]
/// gap_policy = "tunnel"
/// expand_group_nodes = true
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    pub gap_policy: GapPolicy,
    /// Global switch for ancestor expansion. When false, filters asking for
    /// group nodes get direct matches only.
    pub expand_group_nodes: bool,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            gap_policy: GapPolicy::Tunnel,
            expand_group_nodes: true,
        }
    }
}
