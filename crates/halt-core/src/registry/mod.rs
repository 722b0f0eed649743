use std::sync::{Arc, PoisonError, RwLock};

use halt_model::NodeKind;
use tracing::info;

use crate::{error::CoreError, node::Node};

/// Source of the nodes the slot pool enumerates.
///
/// Node discovery and lifecycle live behind this trait; the pool only reads snapshots from it.
pub trait NodeRegistry: Send + Sync + 'static {
    /// The node hosting this process.
    fn local(&self) -> Arc<Node>;

    /// Remote nodes in registry order.
    fn remotes(&self) -> Vec<Arc<Node>>;
}

/// In-memory registry: one fixed local node plus a mutable list of remote nodes.
pub struct StaticRegistry {
    local: Arc<Node>,
    remotes: RwLock<Vec<Arc<Node>>>,
}

impl StaticRegistry {
    /// Create a registry around the local node.
    pub fn new(local: Node) -> Result<Self, CoreError> {
        check(&local, NodeKind::Local)?;
        Ok(Self {
            local: Arc::new(local),
            remotes: RwLock::new(Vec::new()),
        })
    }

    /// Register a remote node; it is enumerated after every node registered before it.
    pub fn add_remote(&self, node: Node) -> Result<(), CoreError> {
        check(&node, NodeKind::Remote)?;

        let mut remotes = self.remotes.write().unwrap_or_else(PoisonError::into_inner);
        if node.name() == self.local.name() || remotes.iter().any(|n| n.name() == node.name()) {
            return Err(CoreError::DuplicateNode(node.name().to_string()));
        }

        info!(node = node.name(), slots = node.slots().len(), "remote node registered");
        remotes.push(Arc::new(node));
        Ok(())
    }

    /// Builder form of [`StaticRegistry::add_remote`].
    pub fn with_remote(self, node: Node) -> Result<Self, CoreError> {
        self.add_remote(node)?;
        Ok(self)
    }
}

impl NodeRegistry for StaticRegistry {
    fn local(&self) -> Arc<Node> {
        Arc::clone(&self.local)
    }

    fn remotes(&self) -> Vec<Arc<Node>> {
        self.remotes
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

fn check(node: &Node, expected: NodeKind) -> Result<(), CoreError> {
    if node.name().is_empty() {
        return Err(CoreError::EmptyNodeName);
    }
    if node.kind() != expected {
        return Err(CoreError::WrongKind {
            name: node.name().to_string(),
            expected,
            actual: node.kind(),
        });
    }
    Ok(())
}
