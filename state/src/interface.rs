//! Typed accessors over the raw store, one set per persisted entity
//!
//! Queue semantics: reading a queue that has never been written yields an
//! empty queue (queues materialize on first insert); removal is a stable
//! filter that preserves the relative order of surviving ids.

use constants::{BankId, GridlockId, PaymentId};

use crate::{
    keys,
    records::{
        PaymentStatus, StoredBankAccount, StoredGlrConfig, StoredGridlockProposal,
        StoredPaymentMessage, StoredPaymentQueue,
    },
    storage::{
        error::StorageError,
        mem::{deserialize_value, serialize_value},
        traits::{KvStore, Value},
    },
};

/// A typed view over one transaction's key/value store
pub struct Ledger<'a, S: KvStore> {
    /// The underlying store
    store: &'a mut S,
}

impl<'a, S: KvStore> Ledger<'a, S> {
    /// Wrap a store in the typed view
    pub fn new(store: &'a mut S) -> Self {
        Self { store }
    }

    // -----------
    // | Helpers |
    // -----------

    /// Read and decode the value under `key`, if present
    fn read<V: Value>(&self, key: &str) -> Result<Option<V>, StorageError> {
        self.store.get(key)?.map(|bytes| deserialize_value(&bytes)).transpose()
    }

    /// Read and decode the value under `key`, failing if absent
    fn read_required<V: Value>(&self, key: &str) -> Result<V, StorageError> {
        self.read(key)?.ok_or_else(|| StorageError::NotFound(key.to_string()))
    }

    /// Encode and write `value` under `key`
    fn write<V: Value>(&mut self, key: &str, value: &V) -> Result<(), StorageError> {
        let bytes = serialize_value(value)?;
        self.store.put(key, &bytes)
    }

    // ------------
    // | Accounts |
    // ------------

    /// Read a bank's account
    pub fn account(&self, bank_id: BankId) -> Result<StoredBankAccount, StorageError> {
        self.read_required(&keys::account_key(bank_id))
    }

    /// Write a bank's account, overwriting any existing record
    pub fn put_account(
        &mut self,
        bank_id: BankId,
        account: &StoredBankAccount,
    ) -> Result<(), StorageError> {
        self.write(&keys::account_key(bank_id), account)
    }

    // ------------
    // | Payments |
    // ------------

    /// Read a payment message
    pub fn payment(&self, payment_id: PaymentId) -> Result<StoredPaymentMessage, StorageError> {
        self.read_required(&keys::payment_key(payment_id))
    }

    /// Write a payment message
    pub fn put_payment(
        &mut self,
        payment_id: PaymentId,
        payment: &StoredPaymentMessage,
    ) -> Result<(), StorageError> {
        self.write(&keys::payment_key(payment_id), payment)
    }

    /// Mark a stored payment as settled
    pub fn mark_payment_settled(&mut self, payment_id: PaymentId) -> Result<(), StorageError> {
        let mut payment = self.payment(payment_id)?;
        payment.status = PaymentStatus::Settled;
        self.put_payment(payment_id, &payment)
    }

    // ----------
    // | Queues |
    // ----------

    /// Read the queue under `key`; a queue that was never written is empty
    pub fn queue(&self, key: &str) -> Result<StoredPaymentQueue, StorageError> {
        Ok(self.read(key)?.unwrap_or_default())
    }

    /// Write the queue under `key`
    pub fn put_queue(&mut self, key: &str, queue: &StoredPaymentQueue) -> Result<(), StorageError> {
        self.write(key, queue)
    }

    /// Append `payment_id` to the queue under `key`
    pub fn enqueue(&mut self, key: &str, payment_id: PaymentId) -> Result<(), StorageError> {
        let mut queue = self.queue(key)?;
        queue.payment_ids.push(payment_id);
        self.put_queue(key, &queue)
    }

    /// Remove every id in `ids` from the queue under `key`, preserving the
    /// relative order of the survivors
    ///
    /// The queue must exist.
    pub fn remove_from_queue(
        &mut self,
        key: &str,
        ids: &[PaymentId],
    ) -> Result<(), StorageError> {
        let mut queue: StoredPaymentQueue = self.read_required(key)?;
        queue.payment_ids.retain(|id| !ids.contains(id));
        self.put_queue(key, &queue)
    }

    // --------------------
    // | Gridlock Records |
    // --------------------

    /// Read a gridlock session's configuration
    pub fn glr_config(&self, gridlock_id: GridlockId) -> Result<StoredGlrConfig, StorageError> {
        self.read_required(&keys::config_key(gridlock_id))
    }

    /// Write a gridlock session's configuration
    pub fn put_glr_config(&mut self, config: &StoredGlrConfig) -> Result<(), StorageError> {
        self.write(&keys::config_key(config.gridlock_id), config)
    }

    /// Read a bank's latest proposal within a session
    pub fn proposal(
        &self,
        gridlock_id: GridlockId,
        bank_id: BankId,
    ) -> Result<StoredGridlockProposal, StorageError> {
        self.read_required(&keys::proposal_key(gridlock_id, bank_id))
    }

    /// Write a bank's proposal, overwriting the previous round's
    pub fn put_proposal(
        &mut self,
        gridlock_id: GridlockId,
        bank_id: BankId,
        proposal: &StoredGridlockProposal,
    ) -> Result<(), StorageError> {
        self.write(&keys::proposal_key(gridlock_id, bank_id), proposal)
    }

    // ---------------------
    // | Verifier Params |
    // ---------------------

    /// Read the raw marshalled verifier parameters
    pub fn verifier_params_bytes(&self) -> Result<Vec<u8>, StorageError> {
        let key = keys::params_key();
        self.store.get(&key)?.ok_or(StorageError::NotFound(key))
    }

    /// Persist the raw marshalled verifier parameters
    pub fn put_verifier_params_bytes(&mut self, bytes: &[u8]) -> Result<(), StorageError> {
        self.store.put(&keys::params_key(), bytes)
    }
}

// ---------
// | Tests |
// ---------
