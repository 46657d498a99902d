//! Proof generation for the range proof
//!
//! Proving runs on the client side; the ledger only ever verifies. The test
//! suites of the downstream crates drive this module to produce honest
//! proofs.

use ark_ec::{pairing::Pairing, AffineRepr, CurveGroup, Group};
use ark_ff::{One, UniformRand};
use constants::{CommitmentGroupAffine, ScalarField, SystemCurve};
use gridlock_crypto::{decompose, Commitment};
use num_bigint::BigUint;
use rand::{CryptoRng, Rng};

use crate::{
    errors::ProverError,
    params::{pairing_base, UlParams},
    proof::{compute_challenge, UlProof},
};

/// Prove that `commitment` commits to `value` under `blinder`, with
/// `value ∈ [0, u^l)`
///
/// The caller supplies the commitment it already computed; the proof is bound
/// to it and will only verify against that exact commitment.
pub fn prove_ul<R: Rng + CryptoRng>(
    value: &BigUint,
    blinder: &ScalarField,
    commitment: &Commitment,
    params: &UlParams,
    rng: &mut R,
) -> Result<UlProof, ProverError> {
    let digits = decompose(value, params.u, params.l)
        .ok_or(ProverError::ValueOutOfRange { base: params.u, digits: params.l })?;

    let g2 = CommitmentGroupAffine::generator();
    let base_pairing = pairing_base();
    let u_scalar = ScalarField::from(params.u);

    // Blind each digit's signature and commit to the sigma-protocol nonces
    let mut v_points = Vec::with_capacity(digits.len());
    let mut a_terms = Vec::with_capacity(digits.len());
    let mut s_nonces = Vec::with_capacity(digits.len());
    let mut t_nonces = Vec::with_capacity(digits.len());
    let mut v_blinders = Vec::with_capacity(digits.len());

    let m = ScalarField::rand(rng);
    let mut d = params.h * m;
    let mut u_pow = ScalarField::one();

    for digit in &digits {
        let v_blinder = ScalarField::rand(rng);
        let v_point = params.signatures[*digit as usize] * v_blinder;

        let s = ScalarField::rand(rng);
        let t = ScalarField::rand(rng);
        let a = base_pairing * t - SystemCurve::pairing(v_point.into_affine(), g2) * s;

        d += constants::CommitmentGroup::generator() * (u_pow * s);
        u_pow *= u_scalar;

        v_points.push(v_point);
        a_terms.push(a);
        s_nonces.push(s);
        t_nonces.push(t);
        v_blinders.push(v_blinder);
    }

    let challenge = compute_challenge(&a_terms, &d);

    // Responses fold the challenge into each nonce
    let z_sig = digits
        .iter()
        .zip(&s_nonces)
        .map(|(digit, s)| *s + challenge * ScalarField::from(*digit))
        .collect();
    let z_v = t_nonces
        .iter()
        .zip(&v_blinders)
        .map(|(t, v)| *t + challenge * *v)
        .collect();
    let z_r = m + challenge * *blinder;

    Ok(UlProof {
        commitment: *commitment,
        d,
        v: v_points,
        a: a_terms,
        z_sig,
        z_v,
        z_r,
        challenge,
    })
}
