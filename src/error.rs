//! Error types for cidr_aggregate

use thiserror::Error;

/// Result type alias for aggregation operations
pub type Result<T> = std::result::Result<T, AggregateError>;

/// Errors raised by the aggregation core.
///
/// Every failing call is rejected before the tree is touched, so an `Err`
/// always leaves the previous state intact.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AggregateError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl AggregateError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        AggregateError::InvalidArgument(msg.into())
    }
}
