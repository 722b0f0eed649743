use std::sync::Arc;

use tracing::debug;

use crate::{node::Node, registry::NodeRegistry, slot::SlotRef};

/// Every execution slot across every node, in scan order.
///
/// Scan order doubles as the tie-break when two jobs (wrongly) share a token:
/// local node first, then remote nodes in registry order, slots in node order within each node.
#[derive(Clone)]
pub struct SlotPool {
    registry: Arc<dyn NodeRegistry>,
}

impl SlotPool {
    pub fn new(registry: Arc<dyn NodeRegistry>) -> Self {
        Self { registry }
    }

    /// Snapshot of the nodes in scan order.
    pub fn nodes(&self) -> Vec<Arc<Node>> {
        let local = self.registry.local();
        let remotes = self.registry.remotes();

        let mut nodes = Vec::with_capacity(remotes.len() + 1);
        for node in remotes {
            if Arc::ptr_eq(&node, &local) || node.name() == local.name() {
                debug!(node = node.name(), "local node listed among remotes; skipped");
                continue;
            }
            nodes.push(node);
        }
        nodes.insert(0, local);
        nodes
    }

    /// All `(node, slot)` pairs in scan order.
    ///
    /// The node list is snapshotted once; slot state is read lazily by the caller.
    pub fn all_slots(&self) -> impl Iterator<Item = (Arc<Node>, SlotRef)> {
        self.nodes().into_iter().flat_map(|node| {
            let slots = node.slots().to_vec();
            slots
                .into_iter()
                .map(move |slot| (Arc::clone(&node), slot))
        })
    }

    /// Total number of slots in the current snapshot.
    pub fn len(&self) -> usize {
        self.nodes().iter().map(|n| n.slots().len()).sum()
    }
}
