//! Defines traits for storage access

use serde::{de::DeserializeOwned, Serialize};

use super::error::StorageError;

/// An abstraction over values in the store, which are concretely stored as
/// byte slices. Values must be serializable and deserializable from bytes
pub trait Value: Serialize + DeserializeOwned {}

impl<T: Serialize + DeserializeOwned> Value for T {}

/// The host's key/value store, as visible to a single ledger transaction
///
/// Reads see the committed pre-transaction state overlaid with this
/// transaction's own buffered writes; writes become visible to other
/// transactions only when the host commits the transaction. A transaction
/// that fails is dropped without committing, leaving the ledger untouched.
pub trait KvStore {
    /// Read the raw bytes stored under `key`
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;

    /// Buffer a write of `value` under `key`
    fn put(&mut self, key: &str, value: &[u8]) -> Result<(), StorageError>;
}
