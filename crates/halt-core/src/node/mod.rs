use std::fmt;

use halt_model::{NodeKind, NodeName};

use crate::slot::SlotRef;

/// A named host exposing an ordered set of execution slots.
pub struct Node {
    name: NodeName,
    kind: NodeKind,
    slots: Vec<SlotRef>,
}

impl Node {
    pub fn new(name: impl Into<NodeName>, kind: NodeKind, slots: Vec<SlotRef>) -> Self {
        Self {
            name: name.into(),
            kind,
            slots,
        }
    }

    #[inline]
    pub fn local(name: impl Into<NodeName>, slots: Vec<SlotRef>) -> Self {
        Self::new(name, NodeKind::Local, slots)
    }

    #[inline]
    pub fn remote(name: impl Into<NodeName>, slots: Vec<SlotRef>) -> Self {
        Self::new(name, NodeKind::Remote, slots)
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Slots in node-assigned order.
    #[inline]
    pub fn slots(&self) -> &[SlotRef] {
        &self.slots
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("slots", &self.slots.len())
            .finish()
    }
}
