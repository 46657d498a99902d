//! Gross settlement: pay one queued payment immediately

use constants::{BankId, PaymentId};
use state::{keys, records::PaymentStatus, KvStore, Ledger};
use tracing::info;
use zkrp::UlVerifierParams;

use crate::{
    api::GrossSettlementSet,
    checks::{check_bank_id, decode_commitment, verify_range_proof},
    error::EngineError,
    settlement::{priority::verify_strict_priority, update_account},
};

/// Settle one payment at the head of the bank's outgoing queue
///
/// On success the payment is marked settled, the sender is debited, the
/// receiver is credited, and the id leaves both queues, all within the
/// enclosing transaction.
pub(crate) fn gross_settlement<S: KvStore>(
    params: &UlVerifierParams,
    store: &mut S,
    set: GrossSettlementSet,
) -> Result<(), EngineError> {
    info!(bank = set.bank_id, payment = set.payment_id, "gross settlement");

    let mut ledger = Ledger::new(store);
    verify_strict_priority(&ledger, set.bank_id, &[set.payment_id])?;
    verify_settlement_set(
        params,
        &ledger,
        set.bank_id,
        &set.cm_balance,
        &set.zkrp,
        &[set.payment_id],
    )?;

    let payment = ledger.payment(set.payment_id)?;
    ledger.mark_payment_settled(set.payment_id)?;
    update_account(&mut ledger, payment.sender, &payment.cm_amount, false /* increase */)?;
    update_account(&mut ledger, payment.receiver, &payment.cm_amount, true /* increase */)?;
    ledger.remove_from_queue(&keys::out_queue_key(payment.sender), &[set.payment_id])?;
    ledger.remove_from_queue(&keys::in_queue_key(payment.receiver), &[set.payment_id])?;

    Ok(())
}

/// Verify a settlement set against the ledger
///
/// The caller's balance view must match the stored account; each payment
/// must be the bank's own active outgoing payment; and the proof must show
/// the post-settlement balance `cm_balance − Σ cm_amount` is non-negative.
fn verify_settlement_set<S: KvStore>(
    params: &UlVerifierParams,
    ledger: &Ledger<'_, S>,
    bank_id: BankId,
    cm_balance: &[u8],
    zkrp: &[u8],
    payment_ids: &[PaymentId],
) -> Result<(), EngineError> {
    check_bank_id(bank_id)?;

    let account = ledger.account(bank_id)?;
    if account.cm_balance != cm_balance {
        return Err(EngineError::StateConflict(format!(
            "stale balance view for bank {bank_id}"
        )));
    }

    let mut cm_post = decode_commitment(&account.cm_balance)?;
    for payment_id in payment_ids {
        let payment = ledger.payment(*payment_id)?;
        if payment.sender != bank_id {
            return Err(EngineError::StateConflict(format!(
                "payment {payment_id} is not an outgoing payment of bank {bank_id}"
            )));
        }
        if payment.status == PaymentStatus::Settled {
            return Err(EngineError::StateConflict(format!(
                "payment {payment_id} is already settled"
            )));
        }
        cm_post = cm_post - decode_commitment(&payment.cm_amount)?;
    }

    verify_range_proof(params, zkrp, &cm_post)
}
