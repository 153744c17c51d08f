//! Output formatting for aggregated blocks.
//!
//! - [`csv`] - quoted CSV output
//! - [`json`] - JSON array output
//! - [`terminal`] - plain text lines, optionally colored

mod csv;
mod json;
mod terminal;

pub use csv::write_csv;
pub use json::write_json;
pub use terminal::{format_field, write_text};

use crate::config::OutputFormat;
use crate::models::CidrBlock;
use serde::Serialize;
use std::error::Error;
use std::io::Write;

/// One aggregated block ready for printing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CidrRow {
    /// Row index, starting at 1.
    #[serde(skip)]
    pub j: usize,
    pub cidr: String,
    /// First address of the block.
    pub first: String,
    /// Last address of the block.
    pub last: String,
    /// Number of addresses.
    pub size: u64,
    /// Merged label.
    pub value: String,
}

impl CidrRow {
    pub fn new(i: usize, block: CidrBlock, value: String) -> CidrRow {
        CidrRow {
            j: i + 1,
            cidr: block.to_string(),
            first: block.lo().to_string(),
            last: block.hi().to_string(),
            size: block.size(),
            value,
        }
    }
}

/// Build printable rows from an aggregated list.
pub fn to_rows(list: Vec<(CidrBlock, String)>) -> Vec<CidrRow> {
    list.into_iter()
        .enumerate()
        .map(|(i, (block, value))| CidrRow::new(i, block, value))
        .collect()
}

/// Write rows in the requested format.
pub fn write_rows<W: Write>(
    out: &mut W,
    rows: &[CidrRow],
    format: OutputFormat,
    color: bool,
) -> Result<(), Box<dyn Error>> {
    log::debug!("write_rows() {} rows as {:?}", rows.len(), format);
    match format {
        OutputFormat::Text => write_text(out, rows, color)?,
        OutputFormat::Csv => write_csv(out, rows)?,
        OutputFormat::Json => write_json(out, rows)?,
    }
    Ok(())
}
