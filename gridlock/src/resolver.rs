//! The gridlock resolver: session start, per-round proposal verification,
//! and round tallying with convergence detection
//!
//! Each round, every participating bank proposes the subset of its outgoing
//! queue it can settle given the previous round's infeasible set. A bank
//! that declares payments infeasible must prove the declaration: crediting
//! the smallest declared payment on top of its proposed set would push its
//! balance strictly negative. The session converges when the aggregated
//! infeasible set stops growing.

use state::{
    keys,
    records::{GlrStatus, StoredGlrConfig, StoredGridlockProposal, StoredPaymentQueue},
    KvStore, Ledger,
};
use tracing::info;
use zkrp::UlVerifierParams;

use crate::{
    api::{GlrConfiguration, GridlockProposal, TallyGridlockProposal},
    checks::{decode_commitment, verify_range_proof},
    error::EngineError,
    settlement::priority::verify_strict_priority,
};

/// Open a gridlock-resolution session over the given banks
///
/// The stored status is `Start` regardless of what the caller sent; the
/// infeasible set is not initialized (absent reads as empty).
pub(crate) fn start_resolution<S: KvStore>(
    store: &mut S,
    config: GlrConfiguration,
) -> Result<(), EngineError> {
    info!(session = config.gridlock_id, banks = config.bank_ids.len(), "starting resolution");

    if config.bank_ids.is_empty() {
        return Err(EngineError::BadInput("session has no participating banks".to_string()));
    }

    let mut ledger = Ledger::new(store);
    ledger.put_glr_config(&StoredGlrConfig {
        gridlock_id: config.gridlock_id,
        bank_ids: config.bank_ids,
        status: GlrStatus::Start,
    })?;
    Ok(())
}

/// Verify and store one bank's round proposal, overwriting its previous one
pub(crate) fn propose_nettable_set<S: KvStore>(
    params: &UlVerifierParams,
    store: &mut S,
    proposal: GridlockProposal,
) -> Result<(), EngineError> {
    info!(
        session = proposal.gridlock_id,
        bank = proposal.bank_id,
        outgoing = proposal.outgoing_ids.len(),
        infeasible = proposal.infeasible_ids.len(),
        "verifying gridlock proposal"
    );

    let mut ledger = Ledger::new(store);
    verify_gridlock_proposal(params, &ledger, &proposal)?;

    ledger.put_proposal(
        proposal.gridlock_id,
        proposal.bank_id,
        &StoredGridlockProposal {
            outgoing_ids: proposal.outgoing_ids,
            infeasible_ids: proposal.infeasible_ids,
            cm_balance: proposal.cm_balance,
            zkrp1: proposal.zkrp1,
            zkrp2: proposal.zkrp2,
        },
    )?;
    Ok(())
}

/// Run every check of a round proposal
///
/// The feasibility proof covers
/// `cm_balance + Σ incoming not yet infeasible − Σ proposed outgoing`; the
/// infeasibility proof, required only when payments are declared
/// infeasible, covers the negation of that post-balance once the smallest
/// declared payment is also settled.
fn verify_gridlock_proposal<S: KvStore>(
    params: &UlVerifierParams,
    ledger: &Ledger<'_, S>,
    proposal: &GridlockProposal,
) -> Result<(), EngineError> {
    let config = ledger.glr_config(proposal.gridlock_id)?;
    if config.status != GlrStatus::Start {
        return Err(EngineError::StateConflict(format!(
            "gridlock session {} is not accepting proposals",
            proposal.gridlock_id
        )));
    }
    if !config.bank_ids.contains(&proposal.bank_id) {
        return Err(EngineError::OutOfRange(format!(
            "bank {} is not part of session {}",
            proposal.bank_id, proposal.gridlock_id
        )));
    }

    verify_strict_priority(ledger, proposal.bank_id, &proposal.outgoing_ids)?;

    let account = ledger.account(proposal.bank_id)?;
    if account.cm_balance != proposal.cm_balance {
        return Err(EngineError::StateConflict(format!(
            "stale balance view for bank {}",
            proposal.bank_id
        )));
    }

    // Post-balance: credit expected incoming payments unless already known
    // infeasible, debit everything the bank proposes to send
    let infeasible = ledger.queue(&keys::infeasible_key(proposal.gridlock_id))?;
    let in_queue = ledger.queue(&keys::in_queue_key(proposal.bank_id))?;

    let mut cm_post = decode_commitment(&account.cm_balance)?;
    for payment_id in &in_queue.payment_ids {
        if infeasible.payment_ids.contains(payment_id) {
            continue;
        }
        let payment = ledger.payment(*payment_id)?;
        cm_post = cm_post + decode_commitment(&payment.cm_amount)?;
    }
    for payment_id in &proposal.outgoing_ids {
        let payment = ledger.payment(*payment_id)?;
        cm_post = cm_post - decode_commitment(&payment.cm_amount)?;
    }

    verify_range_proof(params, &proposal.zkrp1, &cm_post)?;

    // The infeasibility declaration is bound by a second proof: crediting
    // the smallest declared payment would overdraw the bank
    let Some(smallest) = proposal.infeasible_ids.iter().min() else {
        return Ok(());
    };
    let payment = ledger.payment(*smallest)?;
    let cm_post_ext = cm_post - decode_commitment(&payment.cm_amount)?;
    verify_range_proof(params, &proposal.zkrp2, &(-cm_post_ext))
}

/// Conclude the current round: aggregate declarations and test convergence
///
/// Every configured bank must have a proposal on record, the latest it
/// submitted in this round or an earlier one. Convergence is judged on
/// the length of the aggregated infeasible list alone.
pub(crate) fn tally_proposals<S: KvStore>(
    store: &mut S,
    tally: TallyGridlockProposal,
) -> Result<(), EngineError> {
    let mut ledger = Ledger::new(store);

    let mut config = ledger.glr_config(tally.gridlock_id)?;
    if config.status != GlrStatus::Start {
        return Err(EngineError::StateConflict(format!(
            "gridlock session {} is not accepting tallies",
            tally.gridlock_id
        )));
    }

    let previous = ledger.queue(&keys::infeasible_key(tally.gridlock_id))?;

    let mut infeasible = Vec::new();
    for bank_id in &config.bank_ids {
        let proposal = ledger.proposal(tally.gridlock_id, *bank_id)?;
        infeasible.extend_from_slice(&proposal.infeasible_ids);
    }

    info!(
        session = tally.gridlock_id,
        previous = previous.payment_ids.len(),
        current = infeasible.len(),
        "tallying round"
    );

    let converged = infeasible.len() == previous.payment_ids.len();
    ledger.put_queue(
        &keys::infeasible_key(tally.gridlock_id),
        &StoredPaymentQueue { payment_ids: infeasible },
    )?;

    if converged {
        info!(session = tally.gridlock_id, "converged, resolution successful");
        config.status = GlrStatus::Success;
        ledger.put_glr_config(&config)?;
    }
    Ok(())
}
