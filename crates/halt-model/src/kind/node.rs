use serde::{Deserialize, Serialize};

/// Role of a node inside the slot pool.
///
/// The kind only affects enumeration order: the local node is always scanned before any remote node.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NodeKind {
    /// The node hosting this process.
    Local,
    /// A worker node registered with this process.
    Remote,
}

impl NodeKind {
    /// Returns a short symbolic identifier for the node kind.
    ///
    /// Intended for logging:
    /// - `"local"`
    /// - `"remote"`
    pub fn kind(&self) -> &'static str {
        match self {
            NodeKind::Local => "local",
            NodeKind::Remote => "remote",
        }
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.kind())
    }
}
