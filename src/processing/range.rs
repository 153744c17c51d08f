//! Range decomposition.
//!
//! Splits an inclusive address range into the minimal ordered list of
//! aligned CIDR blocks whose union is exactly that range.

use crate::error::{AggregateError, Result};
use crate::models::{ipv4_from_u32, CidrBlock, MAX_LENGTH};

/// Iterator over the blocks covering `[start, end]`, lowest base first.
///
/// At each step the biggest block aligned on the cursor that does not run
/// past `end` is emitted.
#[derive(Debug, Clone)]
pub struct RangeBlocks {
    // u64 so that stepping past 255.255.255.255 terminates
    next: u64,
    end: u64,
}

impl RangeBlocks {
    pub fn new(start: u32, end: u32) -> Result<RangeBlocks> {
        if start > end {
            return Err(AggregateError::invalid(format!(
                "range start {} is after range end {}",
                ipv4_from_u32(start),
                ipv4_from_u32(end)
            )));
        }
        Ok(RangeBlocks {
            next: start as u64,
            end: end as u64,
        })
    }
}

impl Iterator for RangeBlocks {
    type Item = CidrBlock;

    fn next(&mut self) -> Option<CidrBlock> {
        if self.next > self.end {
            return None;
        }
        let base = self.next as u32;
        // trailing_zeros(0) is 32, the whole address space
        let mut free_bits = base.trailing_zeros() as u8;
        while self.next + (1u64 << free_bits) - 1 > self.end {
            free_bits -= 1;
        }
        self.next += 1u64 << free_bits;
        Some(CidrBlock::new_unchecked(base, MAX_LENGTH - free_bits))
    }
}

impl std::iter::FusedIterator for RangeBlocks {}

/// Decompose the inclusive range `[start, end]` into CIDR blocks.
///
/// # Examples
/// ```
/// use cidr_aggregate::processing::decompose;
/// let blocks = decompose(0xC0A80001, 0xC0A80003).unwrap();
/// let text: Vec<String> = blocks.iter().map(|b| b.to_string()).collect();
/// assert_eq!(text, ["192.168.0.1/32", "192.168.0.2/31"]);
/// ```
pub fn decompose(start: u32, end: u32) -> Result<Vec<CidrBlock>> {
    Ok(RangeBlocks::new(start, end)?.collect())
}
