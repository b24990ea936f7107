//! File tree
//!
//! Path utilities and the presentation projection of the flat node set.

pub mod builder;
pub mod node;
pub mod path;

pub use builder::{build_tree, count_nodes};
pub use node::TreeNode;
