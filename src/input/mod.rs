//! Input handling for the command line tool.
//!
//! - [`parse`] - one text line to an [`Entry`](crate::processing::Entry)
//! - [`reader`] - whole files or stdin

mod parse;
mod reader;

pub use parse::{parse_line, InputLine};
pub use reader::{read_entries, read_entries_from};
