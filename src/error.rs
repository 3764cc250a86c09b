//! Error types for key and input validation.

use std::fmt;

/// Validation failures surfaced before any engine interaction.
///
/// Everything else in this crate is infallible resource bookkeeping or a
/// delegated engine call; failures from the engine itself are not modeled
/// at this layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error {
    /// Key bit width not one of 128/192/256, or the key slice does not
    /// match the declared width.
    InvalidKeyLength,
    /// CBC input length not a multiple of the 16-byte block size.
    InvalidInputLength,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidKeyLength => write!(f, "invalid key length"),
            Self::InvalidInputLength => write!(f, "invalid input length"),
        }
    }
}

impl std::error::Error for Error {}
