//! Payment admission: queueing a payment instruction for later settlement

use state::{
    keys,
    records::{PaymentStatus, StoredPaymentMessage},
    KvStore, Ledger,
};
use tracing::info;
use zkrp::UlVerifierParams;

use crate::{
    api::PaymentMessage,
    checks::{check_bank_id, decode_commitment, verify_range_proof},
    error::EngineError,
};

/// Admit a payment message into the system
///
/// The hidden amount must carry a valid range proof. There is no overdraft
/// check at admission; amounts are hidden and the queue is FIFO, so
/// overdraft is resolved at settlement time.
pub(crate) fn add_message<S: KvStore>(
    params: &UlVerifierParams,
    store: &mut S,
    msg: PaymentMessage,
) -> Result<(), EngineError> {
    info!(
        payment = msg.payment_id,
        sender = msg.sender,
        receiver = msg.receiver,
        "admitting payment message"
    );

    check_bank_id(msg.sender)?;
    check_bank_id(msg.receiver)?;
    if msg.sender == msg.receiver {
        return Err(EngineError::OutOfRange(format!(
            "sender and receiver are both bank {}",
            msg.sender
        )));
    }

    let cm_amount = decode_commitment(&msg.cm_amount)?;
    verify_range_proof(params, &msg.zkrp, &cm_amount)?;

    let mut ledger = Ledger::new(store);
    ledger.put_payment(
        msg.payment_id,
        &StoredPaymentMessage {
            sender: msg.sender,
            receiver: msg.receiver,
            cm_amount: msg.cm_amount.clone(),
            zkrp: msg.zkrp.clone(),
            status: PaymentStatus::Active,
        },
    )?;
    ledger.enqueue(&keys::out_queue_key(msg.sender), msg.payment_id)?;
    ledger.enqueue(&keys::in_queue_key(msg.receiver), msg.payment_id)?;

    Ok(())
}
