//! Terminal output.

use super::CidrRow;
use colored::Colorize;
use std::io::{self, Write};

/// Format a value as a quoted, right-aligned field.
///
/// # Arguments
/// * `value` - The value to format
/// * `width` - The minimum width of the field
pub fn format_field<T: ToString>(value: T, width: usize) -> String {
    let quoted = format!("\"{}\"", value.to_string());
    // a longer value is never truncated
    format!("{quoted:>width$}")
}

/// Write one `cidr label` line per row; the CIDR is highlighted when `color` is set.
pub fn write_text<W: Write>(out: &mut W, rows: &[CidrRow], color: bool) -> io::Result<()> {
    let width = rows.iter().map(|r| r.cidr.len()).max().unwrap_or(0);
    for row in rows {
        let cidr = format!("{:<width$}", row.cidr);
        let cidr = if color {
            cidr.green().to_string()
        } else {
            cidr
        };
        if row.value.is_empty() {
            writeln!(out, "{}", cidr.trim_end())?;
        } else {
            writeln!(out, "{cidr} {}", row.value)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_field_short() {
        assert_eq!(format_field("test", 10), "    \"test\"");
    }

    #[test]
    fn test_format_field_exact() {
        assert_eq!(format_field("test", 6), "\"test\"");
    }

    #[test]
    fn test_format_field_long() {
        assert_eq!(format_field("long_value", 5), "\"long_value\"");
    }

    #[test]
    fn test_format_field_number() {
        assert_eq!(format_field(42, 6), "  \"42\"");
    }

    #[test]
    fn test_write_text_aligns_labels() {
        let rows = vec![
            CidrRow::new(0, "10.0.0.0/8".parse().unwrap(), "corp".to_string()),
            CidrRow::new(1, "135.101.67.33/32".parse().unwrap(), "".to_string()),
        ];
        let mut out = Vec::new();
        write_text(&mut out, &rows, false).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "10.0.0.0/8       corp\n135.101.67.33/32\n"
        );
    }
}
