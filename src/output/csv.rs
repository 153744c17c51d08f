//! CSV output formatting for aggregated blocks.

use super::terminal::format_field;
use super::CidrRow;
use std::io::{self, Write};

/// Write the rows as CSV with a header line.
pub fn write_csv<W: Write>(out: &mut W, rows: &[CidrRow]) -> io::Result<()> {
    writeln!(
        out,
        r#" "cnt",      "cidr_block",           "first",            "last",        "size", "value""#
    )?;
    for row in rows {
        write_csv_row(out, row)?;
    }
    Ok(())
}

/// Write a single CSV row.
fn write_csv_row<W: Write>(out: &mut W, row: &CidrRow) -> io::Result<()> {
    writeln!(
        out,
        r#"{j},{cidr},{first},{last},{size},{value}"#,
        j = format_field(row.j, 6),
        cidr = format_field(&row.cidr, 20),
        first = format_field(&row.first, 17),
        last = format_field(&row.last, 17),
        size = format_field(row.size, 12),
        value = format_field(row.value.replace('"', "\"\""), 0),
    )
}
