//! Binary trie over the 32 address bits.
//!
//! Each level consumes one address bit, most significant first. A node is
//! either empty, fully covered by one value, or forked into two half-size
//! subtrees. Whenever both halves of a fork become covered they are merged
//! into a single covered parent, so the trie never holds two sibling blocks.

use crate::models::{CidrBlock, MAX_LENGTH};

/// A trie node. Children are owned outright; there is no sharing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node<V> {
    /// Nothing inserted below this point.
    Empty,
    /// Every address below this point maps to one merged value.
    Covered(V),
    /// Left holds addresses whose next bit is 0, right those whose next bit is 1.
    Fork(Box<Node<V>>, Box<Node<V>>),
}

impl<V> Default for Node<V> {
    fn default() -> Self {
        Node::Empty
    }
}

/// Bit of `addr` that selects the child at `depth` (0 = most significant).
fn branch_bit(addr: u32, depth: u8) -> bool {
    ((addr >> (MAX_LENGTH - 1 - depth)) & 1) == 1
}

impl<V> Node<V> {
    pub fn is_empty(&self) -> bool {
        matches!(self, Node::Empty)
    }

    /// Insert `value` for the block of length `target_depth` containing `addr`.
    ///
    /// `depth` is the number of address bits already consumed to reach this
    /// node. An insertion landing in an already covered region is dropped:
    /// the existing value stays and `merge` is not called.
    pub fn insert<F>(self, addr: u32, depth: u8, target_depth: u8, value: V, merge: &F) -> Node<V>
    where
        F: Fn(V, V) -> V + ?Sized,
    {
        debug_assert!(depth <= target_depth && target_depth <= MAX_LENGTH);
        if matches!(self, Node::Covered(_)) {
            return self;
        }
        if depth == target_depth {
            return Node::Covered(value);
        }

        let (left, right) = match self {
            Node::Fork(left, right) => (*left, *right),
            _ => (Node::Empty, Node::Empty),
        };
        let (left, right) = if branch_bit(addr, depth) {
            (left, right.insert(addr, depth + 1, target_depth, value, merge))
        } else {
            (left.insert(addr, depth + 1, target_depth, value, merge), right)
        };

        match (left, right) {
            (Node::Covered(l), Node::Covered(r)) => Node::Covered(merge(l, r)),
            (l, r) => Node::Fork(Box::new(l), Box::new(r)),
        }
    }

    /// Visit every covered block below this node in ascending address order.
    ///
    /// `base` is the first address of this node and `depth` its prefix length.
    pub fn walk<F>(&self, base: u32, depth: u8, emit: &mut F)
    where
        F: FnMut(CidrBlock, &V),
    {
        match self {
            Node::Empty => {}
            Node::Covered(value) => emit(CidrBlock::new_unchecked(base, depth), value),
            Node::Fork(left, right) => {
                left.walk(base, depth + 1, emit);
                right.walk(base | (1 << (MAX_LENGTH - 1 - depth)), depth + 1, emit);
            }
        }
    }

    /// Value of the covered block containing `addr`, if any.
    pub fn lookup(&self, addr: u32) -> Option<&V> {
        let mut node = self;
        let mut depth = 0;
        loop {
            match node {
                Node::Empty => return None,
                Node::Covered(value) => return Some(value),
                Node::Fork(left, right) => {
                    node = if branch_bit(addr, depth) { right } else { left };
                    depth += 1;
                }
            }
        }
    }

    /// Number of live nodes, this one included.
    pub fn node_count(&self) -> usize {
        match self {
            Node::Empty | Node::Covered(_) => 1,
            Node::Fork(left, right) => 1 + left.node_count() + right.node_count(),
        }
    }
}
