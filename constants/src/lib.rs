//! Defines system-wide constants for the settlement engine

#![deny(unsafe_code)]
#![deny(clippy::missing_docs_in_private_items)]
#![deny(missing_docs)]

use ark_ec::Group;

// -------------------------
// | System-Wide Constants |
// -------------------------

/// The number of banks participating in the settlement system
pub const NUM_BANKS: u32 = 5;

/// The base of the digit decomposition used by the range proof; every
/// committed amount must lie in `[0, RANGE_PROOF_BASE^RANGE_PROOF_DIGITS)`
pub const RANGE_PROOF_BASE: u64 = 10;

/// The number of digits in the range-proof decomposition
pub const RANGE_PROOF_DIGITS: u64 = 10;

// ------------------------------------
// | System Specific Type Definitions |
// ------------------------------------

/// The pairing curve that the commitment scheme and range proof operate over
pub type SystemCurve = ark_bn254::Bn254;

/// The group that balance and amount commitments live in
pub type CommitmentGroup = ark_bn254::G2Projective;

/// The affine representation of a commitment group element
pub type CommitmentGroupAffine = ark_bn254::G2Affine;

/// The group that the range proof's per-digit signatures live in
pub type SignatureGroup = ark_bn254::G1Projective;

/// The affine representation of a signature group element
pub type SignatureGroupAffine = ark_bn254::G1Affine;

/// The scalar field shared by both curve groups
pub type ScalarField = <ark_bn254::G2Projective as Group>::ScalarField;

/// The identifier of a participating bank, in `[1, NUM_BANKS]`
pub type BankId = u32;

/// The identifier of a payment message
pub type PaymentId = u32;

/// The identifier of a gridlock-resolution session
pub type GridlockId = u32;

// ---------------------
// | Ledger Table Keys |
// ---------------------

/// Key prefix for bank account records
pub const ACCOUNT_TABLE: &str = "ACCOUNT";

/// Key prefix for payment message records
pub const MESSAGE_TABLE: &str = "PAYMENT_MESSAGE";

/// Key prefix for incoming payment queues
pub const IN_QUEUE_TABLE: &str = "PAYMENT_QUEUE_INCOMING";

/// Key prefix for outgoing payment queues
pub const OUT_QUEUE_TABLE: &str = "PAYMENT_QUEUE_OUTGOING";

/// Key prefix for the persisted range-proof verifier parameters
pub const PEDERSEN_TABLE: &str = "PEDERSEN";

/// Key prefix for gridlock-resolution configuration records
pub const CONFIG_TABLE: &str = "GLR_CONFIGURATION";

/// Key prefix for per-session infeasible payment sets
pub const INFEASIBLE_TABLE: &str = "GLR_INFEASIBLE";

/// Key prefix for per-session, per-bank gridlock proposals
pub const PROPOSAL_TABLE: &str = "PROPOSAL";
