//! CIDR aggregation tree.
//!
//! [`CidrTree`] accepts single addresses, inclusive ranges and CIDR blocks
//! and keeps them as the smallest set of disjoint blocks. Adjacent blocks
//! are coalesced with the merge function given at construction.

use super::range::RangeBlocks;
use super::trie::Node;
use crate::error::{AggregateError, Result};
use crate::models::{ipv4_to_u32, CidrBlock};
use std::fmt;
use std::net::Ipv4Addr;

/// One insertion request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entry {
    Ip(Ipv4Addr),
    /// Inclusive range, start first.
    Range(Ipv4Addr, Ipv4Addr),
    Cidr(CidrBlock),
}

impl Entry {
    /// Check the entry the same way the matching `add_*` call would.
    pub fn validate(&self) -> Result<()> {
        match self {
            Entry::Ip(_) => Ok(()),
            Entry::Range(start, end) => {
                RangeBlocks::new(ipv4_to_u32(*start), ipv4_to_u32(*end)).map(|_| ())
            }
            Entry::Cidr(block) => validate_block(block),
        }
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Entry::Ip(addr) => write!(f, "{addr}"),
            Entry::Range(start, end) => write!(f, "{start}-{end}"),
            Entry::Cidr(block) => write!(f, "{block}"),
        }
    }
}

fn validate_block(block: &CidrBlock) -> Result<()> {
    CidrBlock::new(block.base(), block.prefix_len()).map(|_| ())
}

type MergeFn<V> = dyn Fn(V, V) -> V;

/// Aggregates inserted addresses into disjoint, maximally merged CIDR blocks.
///
/// Not synchronised: wrap the whole tree in a mutex to share it between writers.
pub struct CidrTree<V> {
    root: Node<V>,
    merge: Box<MergeFn<V>>,
}

impl<V> CidrTree<V> {
    /// Create an empty tree.
    ///
    /// `merge` combines the values of two sibling blocks (lower block first)
    /// when they collapse into their parent.
    pub fn new<F>(merge: F) -> CidrTree<V>
    where
        F: Fn(V, V) -> V + 'static,
    {
        CidrTree {
            root: Node::Empty,
            merge: Box::new(merge),
        }
    }

    /// Add a single address as a /32.
    pub fn add_ip(&mut self, addr: Ipv4Addr, value: V) {
        self.insert(CidrBlock::host(ipv4_to_u32(addr)), value);
    }

    /// Add a CIDR block.
    ///
    /// Fails without touching the tree if the block is not aligned to its
    /// prefix length.
    pub fn add_cidr(&mut self, block: CidrBlock, value: V) -> Result<()> {
        validate_block(&block)?;
        self.insert(block, value);
        Ok(())
    }

    /// Add every address of the inclusive range `[start, end]`.
    ///
    /// Fails without touching the tree if `start > end`.
    pub fn add_range(&mut self, start: Ipv4Addr, end: Ipv4Addr, value: V) -> Result<()>
    where
        V: Clone,
    {
        let blocks = RangeBlocks::new(ipv4_to_u32(start), ipv4_to_u32(end))?;
        log::trace!("add_range({start}-{end})");
        for block in blocks {
            self.insert(block, value.clone());
        }
        Ok(())
    }

    /// Dispatch an [`Entry`] to the matching `add_*` call.
    pub fn add_entry(&mut self, entry: Entry, value: V) -> Result<()>
    where
        V: Clone,
    {
        match entry {
            Entry::Ip(addr) => {
                self.add_ip(addr, value);
                Ok(())
            }
            Entry::Range(start, end) => self.add_range(start, end, value),
            Entry::Cidr(block) => self.add_cidr(block, value),
        }
    }

    /// Add a batch of entries.
    ///
    /// Every entry is validated before the first insertion, so a bad entry
    /// anywhere in the batch leaves the tree unchanged. The error names the
    /// position of the first bad entry.
    pub fn add_entries<I>(&mut self, entries: I) -> Result<()>
    where
        I: IntoIterator<Item = (Entry, V)>,
        V: Clone,
    {
        let entries: Vec<(Entry, V)> = entries.into_iter().collect();
        for (i, (entry, _)) in entries.iter().enumerate() {
            entry.validate().map_err(|e| match e {
                AggregateError::InvalidArgument(msg) => {
                    AggregateError::InvalidArgument(format!("entry {i} ({entry}): {msg}"))
                }
            })?;
        }
        log::debug!("add_entries() inserting {} entries", entries.len());
        for (entry, value) in entries {
            self.add_entry(entry, value)?;
        }
        Ok(())
    }

    fn insert(&mut self, block: CidrBlock, value: V) {
        log::trace!("insert({block})");
        let root = std::mem::take(&mut self.root);
        self.root = root.insert(block.base(), 0, block.prefix_len(), value, &*self.merge);
    }

    /// Visit each aggregated block and its value in ascending address order.
    pub fn walk<F>(&self, mut emit: F)
    where
        F: FnMut(CidrBlock, &V),
    {
        self.root.walk(0, 0, &mut emit);
    }

    /// List the aggregated blocks in ascending address order.
    pub fn list_cidr(&self) -> Vec<(CidrBlock, V)>
    where
        V: Clone,
    {
        let mut ret = Vec::new();
        self.walk(|block, value| ret.push((block, value.clone())));
        ret
    }

    /// Value of the block containing `addr`, if any.
    pub fn get(&self, addr: Ipv4Addr) -> Option<&V> {
        self.root.lookup(ipv4_to_u32(addr))
    }

    pub fn contains(&self, addr: Ipv4Addr) -> bool {
        self.get(addr).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Number of trie nodes currently allocated.
    pub fn node_count(&self) -> usize {
        self.root.node_count()
    }
}

impl<V: fmt::Debug> fmt::Debug for CidrTree<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut list = f.debug_map();
        self.walk(|block, value| {
            list.entry(&format_args!("{block}"), value);
        });
        list.finish()
    }
}
