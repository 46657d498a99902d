//! The ledger storage layer of the settlement engine
//!
//! The host runtime owns the durable key/value store and the transaction
//! boundary; this crate abstracts that store behind [`KvStore`], ships an
//! in-memory reference implementation with write-buffered transactions, and
//! layers typed accessors for every persisted entity on top.

pub mod interface;
pub mod keys;
pub mod records;
pub mod storage;

pub use interface::Ledger;
pub use storage::{
    error::StorageError,
    mem::{MemStore, MemTxn},
    traits::KvStore,
};
