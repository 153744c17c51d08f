//! Aggregate IPv4 addresses, inclusive ranges and CIDR blocks into the
//! smallest equivalent set of disjoint CIDR blocks.
//!
//! ```
//! use cidr_aggregate::CidrTree;
//!
//! let mut tree = CidrTree::new(|a: String, _b: String| a);
//! tree.add_cidr("192.168.0.0/24".parse().unwrap(), "x".to_string()).unwrap();
//! tree.add_cidr("192.168.1.0/24".parse().unwrap(), "x".to_string()).unwrap();
//! let list = tree.list_cidr();
//! assert_eq!(list.len(), 1);
//! assert_eq!(list[0].0.to_string(), "192.168.0.0/23");
//! ```

pub mod config;
pub mod error;
pub mod input;
pub mod labels;
pub mod models;
pub mod output;
pub mod processing;

pub use error::{AggregateError, Result};
pub use models::CidrBlock;
pub use processing::{CidrTree, Entry};

use config::Config;
use input::InputLine;
use labels::MergeRule;
use std::error::Error;
use std::io::Write;

/// Aggregate parsed input lines, labelling unlabelled lines with `default_label`.
///
/// Nothing is inserted unless every line is valid.
pub fn aggregate_entries(
    entries: Vec<InputLine>,
    merge: MergeRule,
    default_label: &str,
) -> Result<CidrTree<String>> {
    let mut tree = CidrTree::new(merge.merge_fn());
    tree.add_entries(entries.into_iter().map(|line| {
        let label = line.label.unwrap_or_else(|| default_label.to_string());
        (line.entry, label)
    }))?;
    Ok(tree)
}

/// Read, aggregate and print according to `config`.
pub fn run<W: Write>(config: &Config, out: &mut W) -> std::result::Result<(), Box<dyn Error>> {
    let entries = input::read_entries(config.input.as_deref(), config.strict)?;
    let entry_count = entries.len();
    let tree = aggregate_entries(entries, config.merge, &config.label)?;

    let rows = output::to_rows(tree.list_cidr());
    log::info!(
        "# Aggregated {} entries into {} blocks ({} trie nodes)",
        entry_count,
        rows.len(),
        tree.node_count()
    );
    output::write_rows(out, &rows, config.format, !config.no_color)?;
    Ok(())
}
