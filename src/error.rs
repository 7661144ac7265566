use thiserror::Error;

/// Errors returned by the checked operations of [`BoolArray`].
///
/// [`BoolArray`]: crate::BoolArray
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// An offset was not in `0..length`.
    #[error("bit index {index} out of bounds for length {length}")]
    IndexOutOfRange {
        /// The offending offset.
        index: usize,
        /// Length of the array that was accessed.
        length: usize,
    },

    /// A binary operation was given two arrays of different lengths.
    #[error("length mismatch: {left} vs {right}")]
    LengthMismatch {
        /// Length of the receiver.
        left: usize,
        /// Length of the argument.
        right: usize,
    },
}

/// Result alias used throughout the crate.
pub type Result<T> = core::result::Result<T, Error>;
