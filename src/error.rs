//! Error types for the grant evaluation core

use thiserror::Error;

/// Caller-contract violations detected during queries
///
/// Every other input has a defined result: an unseen resource id, an empty
/// scope string, or an unmatched namespace all answer `false` or yield
/// empty values rather than erroring.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// The wildcard resource was queried without a concrete scope
    ///
    /// The wildcard list applies to every resource, so bare key existence
    /// has no meaning for it; the caller must name the scope it is asking
    /// about.
    #[error("wildcard resource \"*\" cannot be queried without a scope")]
    UnscopedWildcard,
}

/// Result type for fallible queries
pub type Result<T> = std::result::Result<T, QueryError>;
