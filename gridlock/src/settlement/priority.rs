//! The FIFO strict-priority rule shared by gross settlement and gridlock
//! proposals
//!
//! For an outgoing queue `Q` and a candidate settlement set `P`, the rule
//! holds iff every id left behind is younger than every id settled:
//! `min(Q \ P) > max(P)`, vacuously true when either side is empty. A queue
//! of `{1, 2, 3, 4}` can settle `{1, 2, 3}` but never `{1, 2, 4}`.

use constants::{BankId, PaymentId};
use state::{keys, KvStore, Ledger};
use tracing::warn;

use crate::error::EngineError;

/// Whether settling `payment_ids` out of `queue` respects strict priority
pub(crate) fn respects_strict_priority(queue: &[PaymentId], payment_ids: &[PaymentId]) -> bool {
    let Some(max_settled) = payment_ids.iter().max() else {
        return true;
    };

    queue
        .iter()
        .filter(|id| !payment_ids.contains(*id))
        .all(|remaining| remaining > max_settled)
}

/// Check `payment_ids` against the bank's outgoing queue, rejecting any
/// settlement that would skip over an earlier entry
pub(crate) fn verify_strict_priority<S: KvStore>(
    ledger: &Ledger<'_, S>,
    bank_id: BankId,
    payment_ids: &[PaymentId],
) -> Result<(), EngineError> {
    let queue = ledger.queue(&keys::out_queue_key(bank_id))?;
    if !respects_strict_priority(&queue.payment_ids, payment_ids) {
        warn!(bank = bank_id, "settlement set skips earlier queued payments");
        return Err(EngineError::PriorityViolation);
    }
    Ok(())
}

// ---------
// | Tests |
// ---------

#[cfg(test)]
mod priority_test {
    use super::respects_strict_priority;

    #[test]
    fn test_prefix_settlement_allowed() {
        assert!(respects_strict_priority(&[1, 2, 3, 4], &[1]));
        assert!(respects_strict_priority(&[1, 2, 3, 4], &[1, 2, 3]));
        assert!(respects_strict_priority(&[1, 2, 3, 4], &[1, 2, 3, 4]));
    }

    #[test]
    fn test_skipping_rejected() {
        assert!(!respects_strict_priority(&[1, 2, 3, 4], &[1, 2, 4]));
        assert!(!respects_strict_priority(&[1, 2, 3], &[2]));
        assert!(!respects_strict_priority(&[1, 2, 3], &[3]));
    }

    #[test]
    fn test_empty_sets() {
        assert!(respects_strict_priority(&[], &[]));
        assert!(respects_strict_priority(&[1, 2], &[]));
        assert!(respects_strict_priority(&[], &[1]));
    }

    #[test]
    fn test_order_within_set_irrelevant() {
        // The rule constrains the set, not the order it is listed in
        assert!(respects_strict_priority(&[1, 2, 3], &[2, 1]));
    }
}
