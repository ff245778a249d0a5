//! Error types for the collaborator containers
//!
//! Map operations are total: absent keys and rejected resize targets are ordinary outcomes.
//! The only fault the crate raises is an out-of-range access on a [`BucketStore`], which the
//! maps use internally to detect the end of their table.
//!
//! [`BucketStore`]: crate::BucketStore

use thiserror::Error;

/// Errors raised by the backing containers
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Index past the end of a bucket store
    #[error("Out of bounds: index {index}, length {len}")]
    OutOfBounds {
        /// The invalid index
        index: usize,
        /// The store length at the time of access
        len: usize,
    },
}

/// Result type alias for container operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_bounds_message() {
        let err = Error::OutOfBounds { index: 7, len: 3 };
        assert_eq!(err.to_string(), "Out of bounds: index 7, length 3");
    }
}
