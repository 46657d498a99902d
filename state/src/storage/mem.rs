//! An in-memory implementation of the host store
//!
//! We serialize typed values using the `flexbuffers` format (a schema-less
//! version of `flatbuffers`). The store reproduces the host's transaction
//! model: a transaction reads its own buffered writes overlaid on the
//! committed map, and nothing reaches the committed map until `commit`.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::error::StorageError;
use super::traits::KvStore;

// -----------
// | Helpers |
// -----------

/// Serialize a value to a `flexbuffers` byte vector
pub fn serialize_value<V: Serialize>(value: &V) -> Result<Vec<u8>, StorageError> {
    Ok(flexbuffers::to_vec(value)?)
}

/// Deserialize a value from a `flexbuffers` byte vector
pub fn deserialize_value<V: DeserializeOwned>(value_bytes: &[u8]) -> Result<V, StorageError> {
    Ok(flexbuffers::from_slice(value_bytes)?)
}

// ---------
// | Store |
// ---------

/// An in-memory ledger store holding the committed state
///
/// Hosts embedding the engine for testing or simulation open one transaction
/// per invocation via [`MemStore::txn`] and commit it only when the
/// invocation succeeds.
#[derive(Clone, Debug, Default)]
pub struct MemStore {
    /// The committed key/value state
    committed: HashMap<String, Vec<u8>>,
}

impl MemStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a transaction over this store
    pub fn txn(&mut self) -> MemTxn<'_> {
        MemTxn { committed: &mut self.committed, writes: HashMap::new() }
    }

    /// Read the committed bytes under `key`, bypassing any transaction
    pub fn committed(&self, key: &str) -> Option<&[u8]> {
        self.committed.get(key).map(Vec::as_slice)
    }
}

// ---------------
// | Transaction |
// ---------------

/// A transaction in the store
///
/// Writes are buffered locally and applied to the committed map only on
/// [`MemTxn::commit`]; dropping the transaction discards them.
#[derive(Debug)]
pub struct MemTxn<'store> {
    /// The committed state the transaction reads through to
    committed: &'store mut HashMap<String, Vec<u8>>,
    /// Writes buffered by this transaction
    writes: HashMap<String, Vec<u8>>,
}

impl MemTxn<'_> {
    /// Commit the transaction, applying its writes to the committed state
    pub fn commit(self) {
        for (key, value) in self.writes {
            self.committed.insert(key, value);
        }
    }
}

impl KvStore for MemTxn<'_> {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        let value = self.writes.get(key).or_else(|| self.committed.get(key));
        Ok(value.cloned())
    }

    fn put(&mut self, key: &str, value: &[u8]) -> Result<(), StorageError> {
        self.writes.insert(key.to_string(), value.to_vec());
        Ok(())
    }
}

// ---------
// | Tests |
// ---------

#[cfg(test)]
mod mem_store_test {
    use super::{MemStore, *};

    /// A dummy key
    const KEY: &str = "test_key";

    #[test]
    fn test_put_and_get() {
        let mut store = MemStore::new();

        let mut tx = store.txn();
        tx.put(KEY, b"value").unwrap();
        tx.commit();

        let tx = store.txn();
        assert_eq!(tx.get(KEY).unwrap().unwrap(), b"value");
    }

    #[test]
    fn test_get_nonexistent() {
        let mut store = MemStore::new();
        let tx = store.txn();

        assert!(tx.get(KEY).unwrap().is_none());
    }

    #[test]
    fn test_read_own_writes() {
        let mut store = MemStore::new();

        let mut tx = store.txn();
        tx.put(KEY, b"buffered").unwrap();
        assert_eq!(tx.get(KEY).unwrap().unwrap(), b"buffered");
    }

    #[test]
    fn test_dropped_txn_rolls_back() {
        let mut store = MemStore::new();

        let mut tx = store.txn();
        tx.put(KEY, b"doomed").unwrap();
        drop(tx);

        assert!(store.committed(KEY).is_none());
    }

    #[test]
    fn test_overwrite_within_txn() {
        let mut store = MemStore::new();

        let mut tx = store.txn();
        tx.put(KEY, b"first").unwrap();
        tx.put(KEY, b"second").unwrap();
        tx.commit();

        assert_eq!(store.committed(KEY).unwrap(), b"second");
    }
}
