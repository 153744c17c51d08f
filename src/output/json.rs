//! JSON output.

use super::CidrRow;
use std::error::Error;
use std::io::Write;

/// Write the rows as a pretty-printed JSON array.
pub fn write_json<W: Write>(out: &mut W, rows: &[CidrRow]) -> Result<(), Box<dyn Error>> {
    serde_json::to_writer_pretty(&mut *out, rows)
        .map_err(|e| format!("Error serializing JSON: {e}"))?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_write_json() {
        let rows = vec![
            CidrRow::new(0, "0.0.0.0/30".parse().unwrap(), "v".to_string()),
            CidrRow::new(1, "0.0.0.0/0".parse().unwrap(), "".to_string()),
        ];
        let mut out = Vec::new();
        write_json(&mut out, &rows).unwrap();
        let json: Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(
            json[0],
            serde_json::json!({
                "cidr": "0.0.0.0/30",
                "first": "0.0.0.0",
                "last": "0.0.0.3",
                "size": 4,
                "value": "v",
            })
        );
        assert_eq!(json[1]["size"], 4294967296u64);
        assert!(json[0].get("j").is_none());
    }

    #[test]
    fn test_write_json_empty() {
        let mut out = Vec::new();
        write_json(&mut out, &[]).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "[]\n");
    }
}
