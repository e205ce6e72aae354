//! Error type shared by every decoder component.

use thiserror::Error;

/// Errors raised while building or querying a decoding session
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Matrix or prior shapes do not line up
    #[error("invalid dimensions: {0}")]
    InvalidDimensions(String),

    /// An iteration, variable or prior index past the end
    #[error("{what} index {index} out of range (0..{len})")]
    IndexOutOfRange {
        what: &'static str,
        index: usize,
        len: usize,
    },

    /// Input that has the right shape but an unusable value
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn out_of_range(what: &'static str, index: usize, len: usize) -> Self {
        Error::IndexOutOfRange { what, index, len }
    }
}
