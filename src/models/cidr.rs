//! CIDR block value type.

use super::ipv4::{block_size, broadcast_addr, cut_addr, ipv4_from_u32, lo_mask};
use super::mask::MAX_LENGTH;
use crate::error::{AggregateError, Result};
use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

/// A power-of-two sized, power-of-two aligned run of IPv4 addresses.
///
/// The base is always aligned to the prefix length: `base & !mask == 0`.
/// Ordering is by base address, then by prefix length.
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Copy, Clone, Hash)]
pub struct CidrBlock {
    base: u32,
    prefix_len: u8,
}

impl CidrBlock {
    /// Create a block, rejecting prefix lengths over 32 and bases with
    /// host bits set.
    pub fn new(base: u32, prefix_len: u8) -> Result<CidrBlock> {
        let network = cut_addr(base, prefix_len)?;
        if network != base {
            return Err(AggregateError::invalid(format!(
                "{} is not aligned to /{prefix_len} (network address is {})",
                ipv4_from_u32(base),
                ipv4_from_u32(network)
            )));
        }
        Ok(CidrBlock { base, prefix_len })
    }

    /// The block of the given prefix length that contains `addr`.
    ///
    /// This is the normalisation applied to `1.2.3.4/16`, which becomes `1.2.0.0/16`.
    pub fn containing(addr: u32, prefix_len: u8) -> Result<CidrBlock> {
        Ok(CidrBlock {
            base: cut_addr(addr, prefix_len)?,
            prefix_len,
        })
    }

    /// A single address block (/32).
    pub fn host(addr: u32) -> CidrBlock {
        CidrBlock {
            base: addr,
            prefix_len: MAX_LENGTH,
        }
    }

    pub(crate) fn new_unchecked(base: u32, prefix_len: u8) -> CidrBlock {
        debug_assert!(prefix_len <= MAX_LENGTH);
        debug_assert!(lo_mask(base) <= prefix_len);
        CidrBlock { base, prefix_len }
    }

    pub fn base(&self) -> u32 {
        self.base
    }

    pub fn prefix_len(&self) -> u8 {
        self.prefix_len
    }

    /// Lowest (network) address in the block.
    pub fn lo(&self) -> Ipv4Addr {
        ipv4_from_u32(self.base)
    }

    /// Highest (broadcast) address in the block.
    pub fn hi(&self) -> Ipv4Addr {
        ipv4_from_u32(self.last())
    }

    /// Highest address as u32.
    pub fn last(&self) -> u32 {
        // prefix_len is validated on construction
        broadcast_addr(self.base, self.prefix_len).unwrap_or(u32::MAX)
    }

    /// Number of addresses covered.
    pub fn size(&self) -> u64 {
        block_size(self.prefix_len)
    }

    pub fn contains(&self, addr: u32) -> bool {
        self.base <= addr && addr <= self.last()
    }

    /// Whether `other` lies entirely inside this block.
    pub fn covers(&self, other: &CidrBlock) -> bool {
        self.prefix_len <= other.prefix_len && self.contains(other.base)
    }

    pub fn overlaps(&self, other: &CidrBlock) -> bool {
        self.covers(other) || other.covers(self)
    }
}

impl fmt::Display for CidrBlock {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}/{}", self.lo(), self.prefix_len)
    }
}

impl FromStr for CidrBlock {
    type Err = AggregateError;

    /// Parse `a.b.c.d/p`. Host bits must be clear; see [`CidrBlock::containing`]
    /// for the lenient form.
    fn from_str(s: &str) -> Result<CidrBlock> {
        let (addr, len) = split_cidr(s)?;
        CidrBlock::new(u32::from(addr), len)
    }
}

/// Split `a.b.c.d/p` into its address and prefix length without checking
/// alignment.
pub fn split_cidr(s: &str) -> Result<(Ipv4Addr, u8)> {
    let s = s.trim();
    let (addr, len) = s
        .split_once('/')
        .ok_or_else(|| AggregateError::invalid(format!("invalid CIDR format: {s}")))?;
    let addr = Ipv4Addr::from_str(addr)
        .map_err(|_| AggregateError::invalid(format!("invalid IP address: {addr}")))?;
    let len = u8::from_str(len)
        .map_err(|_| AggregateError::invalid(format!("invalid prefix length: {len}")))?;
    if len > MAX_LENGTH {
        return Err(AggregateError::invalid(format!(
            "prefix length /{len} is longer than {MAX_LENGTH}"
        )));
    }
    Ok((addr, len))
}

impl Serialize for CidrBlock {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CidrBlock {
    fn deserialize<D>(deserializer: D) -> std::result::Result<CidrBlock, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        CidrBlock::from_str(&s).map_err(de::Error::custom)
    }
}
