//! Aggregation logic.
//!
//! - [`range`] - splitting address ranges into CIDR blocks
//! - [`trie`] - the collapsing binary trie
//! - [`tree`] - [`CidrTree`], the public aggregation API

mod range;
mod tree;
mod trie;

// Re-export public functions
pub use range::{decompose, RangeBlocks};
pub use tree::{CidrTree, Entry};
pub use trie::Node;
