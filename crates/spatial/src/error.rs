//! Index error types.

use thiserror::Error;

/// Errors that can occur during index operations.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    #[error("no point with id {0}")]
    NotFound(u32),

    #[error("sorted view is stale; call sort() before injecting")]
    StaleView,
}
