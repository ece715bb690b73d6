use thiserror::Error;

/// Raised when an opt-in resource ceiling is hit during flattening.
///
/// The flattening algorithm is total over well-formed JSON; these are the
/// only error conditions it can produce, and only when the caller has
/// configured the corresponding limit.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FlattenError {
    /// The call produced more rows than `ResourceLimits::max_rows` allows
    #[error("flattening produced {produced} rows, exceeding the limit of {limit}")]
    RowLimitExceeded { produced: usize, limit: usize },

    /// Object nesting went deeper than `ResourceLimits::max_nesting`
    #[error("object nesting reached depth {depth}, exceeding the limit of {limit}")]
    NestingLimitExceeded { depth: usize, limit: usize },
}
