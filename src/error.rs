use thiserror::Error;

use crate::node::Priority;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// Lookup or removal of a key that is not in the map.
    #[error("key not found")]
    KeyNotFound,
    #[error("invalid priority range: {low} > {high}")]
    InvalidConstruction { low: Priority, high: Priority },
}

pub type Result<T> = std::result::Result<T, Error>;
