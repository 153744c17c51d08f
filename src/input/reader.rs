//! Reading entry lists from files or stdin.

use super::parse::{parse_line, InputLine};
use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Parse every line of `reader`, reporting failures with their line number.
pub fn read_entries_from<R: BufRead>(
    reader: R,
    strict: bool,
) -> Result<Vec<InputLine>, Box<dyn Error>> {
    let mut entries = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        match parse_line(&line, strict) {
            Ok(Some(parsed)) => entries.push(parsed),
            Ok(None) => log::trace!("skip line {}", i + 1),
            Err(e) => return Err(format!("line {}: {e}", i + 1).into()),
        }
    }
    Ok(entries)
}

/// Read entries from `input_file`, or from stdin when no file is given.
pub fn read_entries(
    input_file: Option<&str>,
    strict: bool,
) -> Result<Vec<InputLine>, Box<dyn Error>> {
    let entries = match input_file {
        Some(file) => {
            if !Path::new(file).exists() {
                return Err(format!("Input file does not exist: {file}").into());
            }
            log::info!("Reading entries from file: {file}");
            let reader = BufReader::new(File::open(file)?);
            read_entries_from(reader, strict)
                .map_err(|e| format!("Error reading {file}: {e}"))?
        }
        None => {
            log::info!("Reading entries from stdin");
            read_entries_from(io::stdin().lock(), strict)?
        }
    };
    log::info!("# Got entry count = {}", entries.len());
    Ok(entries)
}
