//! Address and block types used throughout the crate.
//!
//! - [`CidrBlock`] - aligned IPv4 block with prefix length
//! - [`mask`] helpers - prefix length <-> subnet mask
//! - [`ipv4`] helpers - address <-> u32 and block bounds

mod cidr;
mod ipv4;
mod mask;

// Re-export public types
pub use cidr::{split_cidr, CidrBlock};
pub use ipv4::{
    block_size, broadcast_addr, cut_addr, ipv4_from_u32, ipv4_to_u32, lo_mask,
};
pub use mask::{
    mask_to_prefix, mask_to_prefix_checked, octets_to_prefix, prefix_to_mask, prefix_to_octets,
    MAX_LENGTH,
};
