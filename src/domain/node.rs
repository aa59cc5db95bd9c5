use serde::Serialize;

/// Package identity as reported by the oracle (case-sensitive).
pub type PortName = String;

/// Install/upgrade status of a port
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeStatus {
    /// Not yet decorated
    #[default]
    Unknown,
    Installed,
    /// Installed, but an upgrade is available
    Outdated,
    /// Not installed
    Missing,
}

impl NodeStatus {
    /// Combine the two status facts. An absent port cannot be outdated, so
    /// "not installed" always wins.
    pub fn resolve(installed: bool, outdated: bool) -> Self {
        match (installed, outdated) {
            (false, _) => NodeStatus::Missing,
            (true, true) => NodeStatus::Outdated,
            (true, false) => NodeStatus::Installed,
        }
    }
}

impl std::fmt::Display for NodeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NodeStatus::Unknown => write!(f, "unknown"),
            NodeStatus::Installed => write!(f, "installed"),
            NodeStatus::Outdated => write!(f, "outdated"),
            NodeStatus::Missing => write!(f, "missing"),
        }
    }
}

/// Node payload stored in the dependency graph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeData {
    pub name: PortName,
    pub status: NodeStatus,
    /// Set once an outgoing edge is discovered from a non-root expansion.
    pub has_children: bool,
}

impl NodeData {
    pub fn new(name: impl Into<PortName>) -> Self {
        Self {
            name: name.into(),
            status: NodeStatus::Unknown,
            has_children: false,
        }
    }
}
