use thiserror::Error;

/// Failures of `OrderedList` operations whose precondition doesn't hold
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum SeqError {
    /// The index doesn't address an element of the list
    #[error("index {index} out of range for list of length {len}")]
    OutOfRange { index: usize, len: usize },
    /// No element equals the requested value. Holds the value's `Debug` rendering.
    #[error("{0} is not in list")]
    NotFound(String),
    /// Pop from a list with no elements
    #[error("pop from empty list")]
    Empty,
}

impl SeqError {
    pub(crate) fn not_found<T: std::fmt::Debug>(value: &T) -> Self {
        Self::NotFound(format!("{value:?}"))
    }
}
