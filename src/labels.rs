//! Merge rules for the text labels attached to entries by the command line tool.

use itertools::Itertools;

/// How the labels of two sibling blocks are combined when they collapse.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum MergeRule {
    /// Keep the label of the lower block.
    First,
    /// Union of both comma separated label sets, sorted.
    Join,
}

impl MergeRule {
    pub fn merge(self, a: String, b: String) -> String {
        match self {
            MergeRule::First => a,
            MergeRule::Join => join_labels(&a, &b),
        }
    }

    /// The rule as a plain function, ready for [`CidrTree::new`](crate::CidrTree::new).
    pub fn merge_fn(self) -> fn(String, String) -> String {
        match self {
            MergeRule::First => |a, _| a,
            MergeRule::Join => |a, b| join_labels(&a, &b),
        }
    }
}

fn join_labels(a: &str, b: &str) -> String {
    a.split(',')
        .chain(b.split(','))
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .sorted()
        .dedup()
        .join(",")
}
