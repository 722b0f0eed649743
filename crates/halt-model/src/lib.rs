mod domain;
pub use domain::*;

mod kind;
pub use kind::NodeKind;
