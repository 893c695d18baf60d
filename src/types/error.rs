use thiserror::Error;

/// Rejected while building a [`Statement`](super::Statement). Evaluation itself
/// never fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatementError {
    #[error("'{kind}' statement requires at least one child")]
    EmptyChildren { kind: &'static str },

    #[error("invalid range: min {min} is greater than max {max}")]
    InvalidRange { min: u64, max: u64 },

    #[error("statement tree depth {depth} exceeds limit of {limit}")]
    TooDeep { depth: usize, limit: usize },
}
