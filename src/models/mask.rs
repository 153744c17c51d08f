//! Prefix length and subnet mask conversions.
//!
//! Helpers for the text parsers that feed the aggregator: a prefix length
//! `p` corresponds to the 32-bit mask with the top `p` bits set.

use crate::error::{AggregateError, Result};

/// Maximum length for an IPv4 subnet mask (32 bits).
pub const MAX_LENGTH: u8 = 32;

/// Convert a CIDR prefix length to a subnet mask as u32.
///
/// # Examples
/// ```
/// use cidr_aggregate::models::prefix_to_mask;
/// assert_eq!(prefix_to_mask(24).unwrap(), 0xFFFFFF00);
/// ```
pub fn prefix_to_mask(len: u8) -> Result<u32> {
    if len > MAX_LENGTH {
        Err(AggregateError::invalid(format!(
            "prefix length /{len} is longer than {MAX_LENGTH}"
        )))
    } else {
        let right_len = MAX_LENGTH - len;
        let all_bits = u32::MAX as u64;

        // u64 keeps the /0 shift by 32 defined
        let mask = (all_bits >> right_len) << right_len;

        Ok(mask as u32)
    }
}

/// Count the leading one bits of a mask.
///
/// The mask is assumed to be in canonical `1..10..0` form and is not
/// revalidated; use [`mask_to_prefix_checked`] for untrusted input.
pub fn mask_to_prefix(mask: u32) -> u8 {
    mask.leading_ones() as u8
}

/// Like [`mask_to_prefix`] but rejects non-contiguous masks such as
/// `255.0.255.0`.
pub fn mask_to_prefix_checked(mask: u32) -> Result<u8> {
    let len = mask_to_prefix(mask);
    if mask.count_ones() != len as u32 {
        return Err(AggregateError::invalid(format!(
            "mask {mask:#010x} is not a contiguous prefix mask"
        )));
    }
    Ok(len)
}

/// Dotted-quad mask bytes for a prefix length, e.g. `/20` is `[255, 255, 240, 0]`.
pub fn prefix_to_octets(len: u8) -> Result<[u8; 4]> {
    Ok(prefix_to_mask(len)?.to_be_bytes())
}

/// Prefix length for dotted-quad mask bytes.
pub fn octets_to_prefix(octets: [u8; 4]) -> Result<u8> {
    mask_to_prefix_checked(u32::from_be_bytes(octets))
}
