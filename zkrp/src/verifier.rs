//! Proof verification for the range proof
//!
//! Verification is a pure function of the proof, the expected commitment,
//! and the public parameters: no randomness, no hidden state. The expected
//! commitment is checked first, then the Fiat-Shamir transcript, then the
//! aggregate recomposition check, then every per-digit set-membership check.

use ark_ec::{pairing::Pairing, AffineRepr, CurveGroup, Group};
use ark_ff::One;
use constants::{CommitmentGroup, CommitmentGroupAffine, ScalarField, SystemCurve};
use gridlock_crypto::Commitment;
use itertools::izip;

use crate::{
    errors::VerifierError,
    params::{pairing_base, UlVerifierParams},
    proof::{compute_challenge, UlProof},
};

/// Verify that `proof` attests that `expected` commits to a value in
/// `[0, u^l)` under `params`
pub fn verify_ul(
    proof: &UlProof,
    expected: &Commitment,
    params: &UlVerifierParams,
) -> Result<(), VerifierError> {
    if proof.commitment != *expected {
        return Err(VerifierError::CommitmentMismatch);
    }

    let l = params.l as usize;
    if proof.v.len() != l
        || proof.a.len() != l
        || proof.z_sig.len() != l
        || proof.z_v.len() != l
    {
        return Err(VerifierError::MalformedProof(format!(
            "digit vectors do not match l = {l}"
        )));
    }

    if compute_challenge(&proof.a, &proof.d) != proof.challenge {
        return Err(VerifierError::ChallengeMismatch);
    }

    // Aggregate check: Σ (uⁱ·zsigᵢ)·g2 + zr·h == D + c·C
    let u_scalar = ScalarField::from(params.u);
    let mut u_pow = ScalarField::one();
    let mut lhs = params.h * proof.z_r;
    for z in &proof.z_sig {
        lhs += CommitmentGroup::generator() * (u_pow * *z);
        u_pow *= u_scalar;
    }
    let rhs = proof.d + proof.commitment.inner() * proof.challenge;
    if lhs != rhs {
        return Err(VerifierError::AggregateCheckFailed);
    }

    // Digit checks: zvᵢ·E == aᵢ + c·e(Vᵢ, y) + zsigᵢ·e(Vᵢ, g2)
    let base_pairing = pairing_base();
    let g2 = CommitmentGroupAffine::generator();
    let pubkey = params.pubkey.into_affine();

    let digit_terms = izip!(&proof.v, &proof.a, &proof.z_sig, &proof.z_v);
    for (i, (v, a, z_sig, z_v)) in digit_terms.enumerate() {
        let v = v.into_affine();
        let lhs = base_pairing * *z_v;
        let rhs = *a
            + SystemCurve::pairing(v, pubkey) * proof.challenge
            + SystemCurve::pairing(v, g2) * *z_sig;
        if lhs != rhs {
            return Err(VerifierError::DigitCheckFailed(i));
        }
    }

    Ok(())
}

// ---------
// | Tests |
// ---------
