//! Error types for the resource crate

use thiserror::Error;

/// Errors that can occur when building or indexing resource names
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A name with an empty base name was given to the index
    #[error("resource name must not be empty")]
    EmptyName,

    /// API string is not of the form namespace:type:subtype
    #[error("invalid API {0:?}: expected namespace:type:subtype")]
    InvalidApi(String),

    /// Fully qualified name could not be parsed
    #[error("invalid resource name {0:?}: expected api/[remote:]name")]
    InvalidName(String),
}

/// Result type for resource operations
pub type Result<T> = std::result::Result<T, Error>;
