mod node;
pub use node::NodeKind;
