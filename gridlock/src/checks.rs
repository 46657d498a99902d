//! Admission checks shared across the pipeline and the resolver

use constants::{BankId, NUM_BANKS};
use gridlock_crypto::Commitment;
use zkrp::{verify_ul, UlProof, UlVerifierParams};

use crate::error::EngineError;

/// Require a bank id in `[1, NUM_BANKS]`
pub(crate) fn check_bank_id(bank_id: BankId) -> Result<(), EngineError> {
    if bank_id == 0 || bank_id > NUM_BANKS {
        return Err(EngineError::OutOfRange(format!(
            "bank id {bank_id} outside [1, {NUM_BANKS}]"
        )));
    }
    Ok(())
}

/// Decode a marshalled commitment carried in a message or a stored record
pub(crate) fn decode_commitment(bytes: &[u8]) -> Result<Commitment, EngineError> {
    Commitment::unmarshal(bytes).map_err(|e| EngineError::BadInput(e.to_string()))
}

/// Decode `proof_bytes` and verify it attests that `expected` commits to a
/// value in `[0, u^l)`
///
/// Byte-level tampering surfaces as an invalid proof; a proof bound to a
/// different commitment surfaces as a commitment mismatch.
pub(crate) fn verify_range_proof(
    params: &UlVerifierParams,
    proof_bytes: &[u8],
    expected: &Commitment,
) -> Result<(), EngineError> {
    let proof = UlProof::unmarshal(proof_bytes, params.l)
        .map_err(|e| EngineError::ProofInvalid(e.to_string()))?;
    verify_ul(&proof, expected, params)?;
    Ok(())
}

// ---------
// | Tests |
// ---------
