//! The wire messages accepted by the invocation surface
//!
//! Each invocation carries exactly one argument: a base64-encoded
//! flexbuffers message. Commitments and proofs travel as their marshalled
//! bytes and are decoded against the installed parameters inside the engine.

use base64::engine::{general_purpose as b64_general_purpose, Engine};
use constants::{BankId, GridlockId, PaymentId};
use serde::{Deserialize, Serialize};
use state::records::GlrStatus;

/// One account in a mint batch
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BankAccount {
    /// The bank being capitalized
    pub bank_id: BankId,
    /// The committed opening balance, marshalled
    pub cm_balance: Vec<u8>,
    /// A range proof that the balance is in `[0, u^l)`, marshalled
    pub zkrp: Vec<u8>,
}

/// The `mintAccount` payload: a batch of accounts to capitalize
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MintAccount {
    /// The accounts to write
    pub accounts: Vec<BankAccount>,
}

/// The `addMessage` payload: a payment instruction entering the queues
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PaymentMessage {
    /// The payment identifier
    pub payment_id: PaymentId,
    /// The paying bank
    pub sender: BankId,
    /// The receiving bank
    pub receiver: BankId,
    /// The committed amount, marshalled
    pub cm_amount: Vec<u8>,
    /// A range proof that the amount is in `[0, u^l)`, marshalled
    pub zkrp: Vec<u8>,
}

/// The `grossSettlement` payload: settle one queued payment immediately
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GrossSettlementSet {
    /// The settling bank
    pub bank_id: BankId,
    /// The payment to settle
    pub payment_id: PaymentId,
    /// The bank's view of its current balance commitment, marshalled
    pub cm_balance: Vec<u8>,
    /// A range proof that the post-settlement balance is in `[0, u^l)`,
    /// marshalled
    pub zkrp: Vec<u8>,
}

/// The `startGLResolution` payload: open a gridlock session
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GlrConfiguration {
    /// The session identifier
    pub gridlock_id: GridlockId,
    /// The participating banks
    pub bank_ids: Vec<BankId>,
    /// The caller's view of the status; the engine stores `Start` regardless
    pub status: GlrStatus,
}

/// The `proposeNettableSet` payload: one bank's round proposal
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GridlockProposal {
    /// The session identifier
    pub gridlock_id: GridlockId,
    /// The proposing bank
    pub bank_id: BankId,
    /// The outgoing payments the bank can settle this round
    pub outgoing_ids: Vec<PaymentId>,
    /// The payments the bank declares infeasible this round
    pub infeasible_ids: Vec<PaymentId>,
    /// The bank's view of its current balance commitment, marshalled
    pub cm_balance: Vec<u8>,
    /// The feasibility proof over the post-settlement balance, marshalled
    pub zkrp1: Vec<u8>,
    /// The infeasibility proof over the smallest declared id, marshalled;
    /// empty when `infeasible_ids` is empty
    pub zkrp2: Vec<u8>,
}

/// The `tallyGridlockProposal` payload: conclude the current round
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TallyGridlockProposal {
    /// The session identifier
    pub gridlock_id: GridlockId,
}

/// The `NetGLSettlement` payload: settle the converged session atomically
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NetGridlockProposal {
    /// The session identifier
    pub gridlock_id: GridlockId,
}

// ------------
// | Encoding |
// ------------

/// Encode a message as the single argument of an invocation
pub fn encode_arg<T: Serialize>(message: &T) -> String {
    let bytes = flexbuffers::to_vec(message).unwrap();
    b64_general_purpose::STANDARD.encode(bytes)
}

/// Encode raw bytes as the single argument of an invocation
///
/// Used for `initParams`, whose payload is the marshalled parameters rather
/// than a structured message.
pub fn encode_raw_arg(bytes: &[u8]) -> String {
    b64_general_purpose::STANDARD.encode(bytes)
}
