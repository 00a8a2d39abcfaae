//! Error types.
//!
//! Two families:
//!
//! - [`StoreError`] is what a client did wrong. Its `Display` text is the
//!   message that ends up in the `{"error": …}` body.
//! - [`Error`] is what the process could not do: bind a port, read its
//!   configuration.

use thiserror::Error;

/// Outcome of a rejected [`PostStore`](crate::PostStore) operation.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum StoreError {
    /// The body could not be decoded as a JSON object.
    #[error("Invalid JSON")]
    Parse,

    /// One or more required fields (or query parameters) were absent.
    #[error("The following field(s) are required: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("Invalid sort field '{0}'. Allowed values: title, content")]
    InvalidSortField(String),

    #[error("Invalid ID format")]
    InvalidId,

    /// No post carries this id. Holds the id as the client wrote it, so
    /// integers outside the id range can be reported too.
    #[error("No post with id {0} exists.")]
    NotFound(String),

    /// A search ran and matched zero posts.
    #[error("No posts found matching the search criteria.")]
    NoMatches,
}

/// Infrastructure failure: binding a socket or reading configuration.
#[derive(Debug, Error)]
pub enum Error {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid value {value:?} for {key}")]
    Config { key: &'static str, value: String },
}
