//! Net settlement: atomically settle every payment in the converged
//! session's proposals

use std::collections::HashMap;

use constants::{BankId, PaymentId};
use gridlock_crypto::Commitment;
use state::{
    keys,
    records::{GlrStatus, StoredBankAccount},
    KvStore, Ledger,
};
use tracing::info;

use crate::{api::NetGridlockProposal, checks::decode_commitment, error::EngineError};

/// Settle the session's latest proposals in one multilateral step
///
/// Balance deltas are accumulated on an in-memory snapshot and written back
/// per bank, so a bank that both pays and receives nets out correctly. The
/// sender and receiver of each delta come from the stored payment, not from
/// the proposing bank.
pub(crate) fn net_settlement<S: KvStore>(
    store: &mut S,
    msg: NetGridlockProposal,
) -> Result<(), EngineError> {
    info!(session = msg.gridlock_id, "net gridlock settlement");

    let mut ledger = Ledger::new(store);
    let config = ledger.glr_config(msg.gridlock_id)?;
    if config.status != GlrStatus::Success {
        return Err(EngineError::StateConflict(format!(
            "gridlock session {} has not converged",
            msg.gridlock_id
        )));
    }

    // Snapshot every participant's balance commitment
    let mut balances: HashMap<BankId, Commitment> = HashMap::new();
    for bank_id in &config.bank_ids {
        let account = ledger.account(*bank_id)?;
        balances.insert(*bank_id, decode_commitment(&account.cm_balance)?);
    }

    // Apply each proposal's outgoing deltas to the snapshot
    let mut outgoing: HashMap<BankId, Vec<PaymentId>> = HashMap::new();
    let mut incoming: HashMap<BankId, Vec<PaymentId>> = HashMap::new();
    for bank_id in &config.bank_ids {
        let proposal = ledger.proposal(msg.gridlock_id, *bank_id)?;
        for payment_id in proposal.outgoing_ids {
            let payment = ledger.payment(payment_id)?;
            let amount = decode_commitment(&payment.cm_amount)?;

            let sender = balances.get_mut(&payment.sender).ok_or_else(|| {
                EngineError::StateConflict(format!(
                    "payment {payment_id} sender {} is outside the session",
                    payment.sender
                ))
            })?;
            *sender = *sender - amount;
            let receiver = balances.get_mut(&payment.receiver).ok_or_else(|| {
                EngineError::StateConflict(format!(
                    "payment {payment_id} receiver {} is outside the session",
                    payment.receiver
                ))
            })?;
            *receiver = *receiver + amount;

            ledger.mark_payment_settled(payment_id)?;
            outgoing.entry(payment.sender).or_default().push(payment_id);
            incoming.entry(payment.receiver).or_default().push(payment_id);
        }
    }

    // Write back the final balances and purge settled ids from the queues
    for bank_id in &config.bank_ids {
        let cm_balance = balances[bank_id].marshal();
        ledger.put_account(*bank_id, &StoredBankAccount { cm_balance })?;

        if let Some(ids) = outgoing.get(bank_id) {
            ledger.remove_from_queue(&keys::out_queue_key(*bank_id), ids)?;
        }
        if let Some(ids) = incoming.get(bank_id) {
            ledger.remove_from_queue(&keys::in_queue_key(*bank_id), ids)?;
        }
    }

    Ok(())
}
