// Error type shared by the PRNG core and the typed facade.
//
// Every precondition violation in the core surfaces here, synchronously, to
// the immediate caller. Nothing in the core retries, logs, or substitutes a
// default value on failure.

use thiserror::Error;

/// Failure raised by a draw, a byte marshaling call, or a buffer fill.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RandomError {
    /// A malformed argument: an inverted range, an empty charset, or a byte
    /// buffer whose length does not match the requested word size.
    #[error("invalid argument `{name}`: {reason}")]
    InvalidArgument { name: &'static str, reason: String },

    /// A buffer region that does not fit inside the buffer.
    #[error("`{name}` {index} is out of range [{min}, {max}]")]
    IndexOutOfRange {
        name: &'static str,
        index: usize,
        min: usize,
        max: usize,
    },
}

pub type Result<T> = std::result::Result<T, RandomError>;

impl RandomError {
    pub(crate) fn size_mismatch(name: &'static str, expected: usize, actual: usize) -> Self {
        RandomError::InvalidArgument {
            name,
            reason: format!("expected array size is {expected} but actual is {actual}"),
        }
    }

    /// `max` was below `min` (or a bound was NaN).
    pub fn inverted_range(min: impl std::fmt::Display, max: impl std::fmt::Display) -> Self {
        RandomError::InvalidArgument {
            name: "max",
            reason: format!("`max` ({max}) must be greater than or equal to `min` ({min})"),
        }
    }
}
