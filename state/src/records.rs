//! The record types persisted by the settlement engine
//!
//! Each record stores only the authoritative fields of its entity;
//! commitments are carried as their fixed-length marshalled bytes and
//! decoded at the point of use.

use constants::{BankId, GridlockId, PaymentId};
use serde::{Deserialize, Serialize};

/// The settlement status of a payment message
///
/// Transitions only `Active → Settled`, never back.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    /// Queued and eligible for settlement
    Active,
    /// Settled; retained for audit but no longer queued
    Settled,
}

/// The lifecycle status of a gridlock-resolution session
///
/// Transitions only `Start → Success`; a stuck session stays in `Start`
/// until an external coordinator abandons it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GlrStatus {
    /// Accepting proposals and tallies
    Start,
    /// Converged; ready for net settlement
    Success,
}

/// A bank account
///
/// The range proof that admitted the balance is verified once at mint time
/// and not persisted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredBankAccount {
    /// The committed balance, marshalled
    pub cm_balance: Vec<u8>,
}

/// A payment message
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredPaymentMessage {
    /// The paying bank
    pub sender: BankId,
    /// The receiving bank
    pub receiver: BankId,
    /// The committed amount, marshalled
    pub cm_amount: Vec<u8>,
    /// The admission range proof over `cm_amount`, marshalled
    pub zkrp: Vec<u8>,
    /// Whether the payment has settled
    pub status: PaymentStatus,
}

/// An ordered list of payment ids
///
/// Backs the outgoing and incoming queues (insertion order preserved) as
/// well as the per-session infeasible sets (where duplicates are permitted
/// and only the length drives convergence).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredPaymentQueue {
    /// The listed payment ids
    pub payment_ids: Vec<PaymentId>,
}

/// A gridlock session's configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredGlrConfig {
    /// The session identifier
    pub gridlock_id: GridlockId,
    /// The participating banks
    pub bank_ids: Vec<BankId>,
    /// The session status
    pub status: GlrStatus,
}

/// A bank's latest nettable-set proposal within a gridlock session
///
/// Overwritten each round; the tally and the net settlement always read the
/// most recent submission.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredGridlockProposal {
    /// The outgoing payments the bank proposes to settle
    pub outgoing_ids: Vec<PaymentId>,
    /// The payments the bank declares infeasible this round
    pub infeasible_ids: Vec<PaymentId>,
    /// The balance commitment the proposal was built against, marshalled
    pub cm_balance: Vec<u8>,
    /// The feasibility proof over the post-settlement balance, marshalled
    pub zkrp1: Vec<u8>,
    /// The infeasibility proof over the smallest declared id, marshalled;
    /// empty when `infeasible_ids` is empty
    pub zkrp2: Vec<u8>,
}
