//! Error types for the declarative crate

use thiserror::Error;

/// Errors that can occur while validating or diffing configs
#[derive(Error, Debug)]
pub enum Error {
    /// Snapshot could not be serialized or deserialized for the text diff
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] serde_json::Error),

    /// An item in a keyed collection has no name
    #[error("{collection} with an empty name")]
    EmptyName { collection: &'static str },

    /// Two items in one collection share a key
    #[error("duplicate {collection} {key:?}")]
    DuplicateKey {
        collection: &'static str,
        key: String,
    },
}

/// Result type for declarative operations
pub type Result<T> = std::result::Result<T, Error>;
