//! Command line and environment configuration.
//!
//! Every flag can also be set through a `CIDR_AGG_*` environment variable,
//! which may come from a `.env` file loaded by `main`.

use crate::labels::MergeRule;
use clap::Parser;

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// `cidr label` per line
    Text,
    /// Quoted, aligned CSV with a header row
    Csv,
    /// JSON array of `{cidr, first, last, size, value}`
    Json,
}

#[derive(Parser, Debug, Clone)]
#[command(name = "cidr-aggregate")]
#[command(about = "Aggregate IPv4 addresses, ranges and CIDR blocks into minimal CIDR blocks")]
#[command(version)]
pub struct Config {
    /// Entry list to read, one entry per line (stdin when omitted)
    #[arg(short, long, env = "CIDR_AGG_INPUT")]
    pub input: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text", env = "CIDR_AGG_FORMAT")]
    pub format: OutputFormat,

    /// How labels of merged blocks are combined
    #[arg(short, long, value_enum, default_value = "first", env = "CIDR_AGG_MERGE")]
    pub merge: MergeRule,

    /// Label for entries that have none
    #[arg(short, long, default_value = "", env = "CIDR_AGG_LABEL")]
    pub label: String,

    /// Reject CIDR entries with host bits set instead of widening them
    #[arg(long, env = "CIDR_AGG_STRICT")]
    pub strict: bool,

    /// Disable colored text output
    #[arg(long)]
    pub no_color: bool,

    /// log4rs configuration file
    #[arg(long, default_value = "log4rs.yml", env = "CIDR_AGG_LOG_CONFIG")]
    pub log_config: String,
}
