mod node;
mod tree;

pub type TreeFloat = f64;

pub use node::{Node, NodeId};
pub use tree::{Tree, TreeError};
