//! IPv4 address utilities.
//!
//! Addresses are handled as big-endian `u32` values, bit 31 being the most
//! significant bit of the first octet.

use super::mask::{prefix_to_mask, MAX_LENGTH};
use crate::error::Result;
use std::net::Ipv4Addr;

/// Turn an IP address into a 32bit uint.
pub fn ipv4_to_u32(ip: Ipv4Addr) -> u32 {
    u32::from(ip)
}

/// Get an IP address from a 32bit uint.
pub fn ipv4_from_u32(u: u32) -> Ipv4Addr {
    Ipv4Addr::from(u)
}

/// Get the network address for a given address and prefix length.
pub fn cut_addr(addr: u32, len: u8) -> Result<u32> {
    Ok(addr & prefix_to_mask(len)?)
}

/// Calculate the broadcast (highest) address for a given address and prefix length.
pub fn broadcast_addr(addr: u32, len: u8) -> Result<u32> {
    let mask = prefix_to_mask(len)?;
    Ok((addr & mask) | !mask)
}

/// Number of addresses in a block of the given prefix length.
///
/// Returned as u64 because a /0 holds 2^32 addresses.
pub fn block_size(len: u8) -> u64 {
    debug_assert!(len <= MAX_LENGTH);
    1u64 << (MAX_LENGTH - len)
}

/// Smallest prefix length for which `addr` is a valid network address,
/// i.e. `32 - trailing_zeros(addr)`. `0.0.0.0` is aligned to every block.
pub fn lo_mask(addr: u32) -> u8 {
    MAX_LENGTH - addr.trailing_zeros() as u8
}
