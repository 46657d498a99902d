//! Key construction for every persisted entity
//!
//! Keys are a fixed ASCII prefix immediately followed by the decimal id(s),
//! with no separator.

use constants::{
    BankId, GridlockId, PaymentId, ACCOUNT_TABLE, CONFIG_TABLE, INFEASIBLE_TABLE, IN_QUEUE_TABLE,
    MESSAGE_TABLE, OUT_QUEUE_TABLE, PEDERSEN_TABLE, PROPOSAL_TABLE,
};

/// The key of a bank's account record
pub fn account_key(bank_id: BankId) -> String {
    format!("{ACCOUNT_TABLE}{bank_id}")
}

/// The key of a payment message record
pub fn payment_key(payment_id: PaymentId) -> String {
    format!("{MESSAGE_TABLE}{payment_id}")
}

/// The key of a bank's outgoing payment queue
pub fn out_queue_key(bank_id: BankId) -> String {
    format!("{OUT_QUEUE_TABLE}{bank_id}")
}

/// The key of a bank's incoming payment queue
pub fn in_queue_key(bank_id: BankId) -> String {
    format!("{IN_QUEUE_TABLE}{bank_id}")
}

/// The key the range-proof verifier parameters are persisted under
pub fn params_key() -> String {
    format!("{PEDERSEN_TABLE}_CURVE")
}

/// The key of a gridlock session's configuration
pub fn config_key(gridlock_id: GridlockId) -> String {
    format!("{CONFIG_TABLE}{gridlock_id}")
}

/// The key of a gridlock session's infeasible payment set
pub fn infeasible_key(gridlock_id: GridlockId) -> String {
    format!("{INFEASIBLE_TABLE}{gridlock_id}")
}

/// The key of a bank's latest proposal within a gridlock session
pub fn proposal_key(gridlock_id: GridlockId, bank_id: BankId) -> String {
    format!("{PROPOSAL_TABLE}{gridlock_id}{bank_id}")
}
