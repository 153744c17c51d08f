//! Text line parsing.
//!
//! Accepted forms, optionally followed by whitespace and a label:
//! `10.0.0.1`, `10.0.0.1-10.0.0.9`, `10.0.0.0/24`.
//! Blank lines and `#` comments are skipped.

use crate::error::{AggregateError, Result};
use crate::models::{split_cidr, CidrBlock};
use crate::processing::Entry;
use colored::Colorize;
use lazy_static::lazy_static;
use regex::Regex;
use std::net::Ipv4Addr;
use std::str::FromStr;

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputLine {
    pub entry: Entry,
    pub label: Option<String>,
}

lazy_static! {
    static ref RE: Regex = Regex::new(
        r"^(?P<start>[0-9.]+)(?:\s*-\s*(?P<end>[0-9.]+)|/(?P<len>[0-9]+))?(?:\s+(?P<label>\S.*?))?$"
    )
    .expect("Invalid Regex?");
}

fn parse_addr(s: &str) -> Result<Ipv4Addr> {
    Ipv4Addr::from_str(s).map_err(|_| AggregateError::invalid(format!("invalid IP address: {s}")))
}

/// Parse one line. Returns `Ok(None)` for blank and comment lines.
///
/// With `strict` a CIDR with host bits set is an error; otherwise it is
/// widened to the block that contains it.
pub fn parse_line(line: &str, strict: bool) -> Result<Option<InputLine>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let caps = RE
        .captures(line)
        .ok_or_else(|| AggregateError::invalid(format!("unrecognised entry: {line}")))?;

    let start = &caps["start"];
    let entry = if let Some(end) = caps.name("end") {
        Entry::Range(parse_addr(start)?, parse_addr(end.as_str())?)
    } else if let Some(len) = caps.name("len") {
        let text = format!("{start}/{}", len.as_str());
        let (addr, len) = split_cidr(&text)?;
        let block = if strict {
            CidrBlock::new(u32::from(addr), len)?
        } else {
            let block = CidrBlock::containing(u32::from(addr), len)?;
            if block.lo() != addr {
                log::warn!(
                    "{} has host bits set, using {}",
                    text.on_yellow(),
                    block.to_string().on_blue()
                );
            }
            block
        };
        Entry::Cidr(block)
    } else {
        Entry::Ip(parse_addr(start)?)
    };

    Ok(Some(InputLine {
        entry,
        label: caps.name("label").map(|m| m.as_str().to_string()),
    }))
}
