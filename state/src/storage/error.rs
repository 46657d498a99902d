//! Error types for storage access

use thiserror::Error;

/// The error type emitted by the storage layer
#[derive(Debug, Error)]
pub enum StorageError {
    /// Error deserializing a value read from the store
    #[error("error deserializing stored value: {0}")]
    Deserialization(#[from] flexbuffers::DeserializationError),
    /// Error serializing a value for storage
    #[error("error serializing value for storage: {0}")]
    Serialization(#[from] flexbuffers::SerializationError),
    /// A record the caller requires is absent
    #[error("no stored record under key {0}")]
    NotFound(String),
    /// The underlying key/value store failed
    #[error("store operation failed: {0}")]
    Store(String),
}
