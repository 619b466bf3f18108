use thiserror::Error;

/// Errors shared by the container types.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CollectionError {
    #[error("The {container} is empty")]
    Empty { container: &'static str },

    #[error("Index {index} is out of bounds for length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("Illegal state: {0}")]
    IllegalState(&'static str),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl CollectionError {
    pub(crate) fn empty(container: &'static str) -> Self {
        Self::Empty { container }
    }

    pub(crate) fn out_of_bounds(index: usize, len: usize) -> Self {
        Self::IndexOutOfBounds { index, len }
    }
}
