//! Error types emitted across the invocation boundary

use state::StorageError;
use thiserror::Error;
use zkrp::VerifierError;

/// The engine error type
///
/// Every failure falls into exactly one kind. No error is recovered locally:
/// the host surfaces the rendered message to the caller and aborts the
/// transaction, leaving the ledger untouched.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Wrong argument count, an undecodable payload, or an unknown method
    #[error("bad input: {0}")]
    BadInput(String),
    /// A bank id outside `[1, N]`, or a sender equal to its receiver
    #[error("out of range: {0}")]
    OutOfRange(String),
    /// A record the operation requires is absent
    #[error("state not found: {0}")]
    StateNotFound(String),
    /// The request conflicts with current ledger state
    #[error("state conflict: {0}")]
    StateConflict(String),
    /// The commitment signed into a proof does not match the one the ledger
    /// expects the proof to attest to
    #[error("commitment mismatch: proof does not attest to the expected commitment")]
    CommitmentMismatch,
    /// A range proof failed to decode or failed its algebraic checks
    #[error("proof invalid: {0}")]
    ProofInvalid(String),
    /// A settlement would skip over an earlier payment in the queue
    #[error("priority violation: settlement must respect queue order")]
    PriorityViolation,
    /// The underlying key/value store failed
    #[error("store error: {0}")]
    StoreError(StorageError),
}

impl From<StorageError> for EngineError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound(key) => EngineError::StateNotFound(key),
            other => EngineError::StoreError(other),
        }
    }
}

impl From<VerifierError> for EngineError {
    fn from(err: VerifierError) -> Self {
        match err {
            VerifierError::CommitmentMismatch => EngineError::CommitmentMismatch,
            other => EngineError::ProofInvalid(other.to_string()),
        }
    }
}
