//! Settlement: the shared priority rule, immediate gross settlement, and
//! atomic multilateral net settlement

pub(crate) mod gross;
pub(crate) mod net;
pub(crate) mod priority;

use constants::BankId;
use state::{records::StoredBankAccount, KvStore, Ledger};

use crate::{checks::decode_commitment, error::EngineError};

/// Apply a homomorphic delta to a bank's stored balance commitment
///
/// `increase` credits the amount; otherwise it is debited. The cleartext
/// balance is never seen: the commitments add and cancel in the group.
pub(crate) fn update_account<S: KvStore>(
    ledger: &mut Ledger<'_, S>,
    bank_id: BankId,
    cm_amount_bytes: &[u8],
    increase: bool,
) -> Result<(), EngineError> {
    let account = ledger.account(bank_id)?;
    let balance = decode_commitment(&account.cm_balance)?;
    let amount = decode_commitment(cm_amount_bytes)?;

    let updated = if increase { balance + amount } else { balance - amount };
    ledger.put_account(bank_id, &StoredBankAccount { cm_balance: updated.marshal() })?;
    Ok(())
}
