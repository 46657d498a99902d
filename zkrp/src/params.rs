//! Trusted setup and public parameters for the range proof
//!
//! Setup samples a Boneh-Boyen key pair and signs every digit in `[0, u)`;
//! the signatures are the prover's membership witnesses. The verifier needs
//! only the public key, the second Pedersen generator, and the range shape.

use ark_ec::{
    pairing::{Pairing, PairingOutput},
    AffineRepr, Group,
};
use ark_ff::{Field, UniformRand};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use constants::{
    CommitmentGroup, ScalarField, SignatureGroup, SignatureGroupAffine, SystemCurve,
};
use rand::{CryptoRng, Rng};

use crate::errors::{ParamsDecodeError, SetupError};

/// The marshalled length of the verifier parameters: two commitment-group
/// elements plus the two range-shape integers
pub const VERIFIER_PARAMS_BYTES: usize = 64 + 64 + 8 + 8;

/// The pairing of the two group generators, `e(g1, g2)`
///
/// This is the base that digit responses are checked against; it depends only
/// on the curve, so callers may compute it once and reuse it.
pub fn pairing_base() -> PairingOutput<SystemCurve> {
    SystemCurve::pairing(
        SignatureGroupAffine::generator(),
        constants::CommitmentGroupAffine::generator(),
    )
}

// ---------------------
// | Parameter Objects |
// ---------------------

/// Prover-side parameters: the digit signatures plus the public half
#[derive(Clone, Debug)]
pub struct UlParams {
    /// Per-digit signatures `A_i = (x̄ + i)^{-1}·g1` for `i` in `[0, u)`
    pub signatures: Vec<SignatureGroup>,
    /// The signing public key `y = x̄·g2`
    pub pubkey: CommitmentGroup,
    /// The second Pedersen generator
    pub h: CommitmentGroup,
    /// The digit base
    pub u: u64,
    /// The digit count
    pub l: u64,
}

impl UlParams {
    /// Strip the prover-only material, leaving the verifier parameters
    pub fn verifier_params(&self) -> UlVerifierParams {
        UlVerifierParams { pubkey: self.pubkey, h: self.h, u: self.u, l: self.l }
    }
}

/// Verifier-side parameters, installed on the ledger by `initParams`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UlVerifierParams {
    /// The signing public key `y = x̄·g2`
    pub pubkey: CommitmentGroup,
    /// The second Pedersen generator
    pub h: CommitmentGroup,
    /// The digit base
    pub u: u64,
    /// The digit count
    pub l: u64,
}

impl UlVerifierParams {
    /// Marshal to the fixed-length encoding
    pub fn marshal(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(VERIFIER_PARAMS_BYTES);
        self.pubkey.serialize_compressed(&mut bytes).unwrap();
        self.h.serialize_compressed(&mut bytes).unwrap();
        self.u.serialize_compressed(&mut bytes).unwrap();
        self.l.serialize_compressed(&mut bytes).unwrap();
        bytes
    }

    /// Unmarshal from the fixed-length encoding
    pub fn unmarshal(bytes: &[u8]) -> Result<Self, ParamsDecodeError> {
        if bytes.len() != VERIFIER_PARAMS_BYTES {
            return Err(ParamsDecodeError(format!(
                "expected {VERIFIER_PARAMS_BYTES} bytes, got {}",
                bytes.len()
            )));
        }

        let mut cursor = bytes;
        let decode_err = |e: ark_serialize::SerializationError| ParamsDecodeError(e.to_string());

        let pubkey = CommitmentGroup::deserialize_compressed(&mut cursor).map_err(decode_err)?;
        let h = CommitmentGroup::deserialize_compressed(&mut cursor).map_err(decode_err)?;
        let u = u64::deserialize_compressed(&mut cursor).map_err(decode_err)?;
        let l = u64::deserialize_compressed(&mut cursor).map_err(decode_err)?;

        Ok(Self { pubkey, h, u, l })
    }
}

// ----------------
// | Setup (ULRP) |
// ----------------

/// Run the trusted setup for the range `[0, u^l)`
///
/// The signing key is sampled, used to sign each digit, and discarded; the
/// randomness behind the second generator `h` is likewise discarded. The
/// caller is trusted to run this once and distribute only the outputs.
pub fn setup_ul<R: Rng + CryptoRng>(u: u64, l: u64, rng: &mut R) -> Result<UlParams, SetupError> {
    if u < 2 || l == 0 {
        return Err(SetupError::InvalidRange { u, l });
    }

    let signing_key = ScalarField::rand(rng);
    let pubkey = CommitmentGroup::generator() * signing_key;
    let h = CommitmentGroup::generator() * ScalarField::rand(rng);

    let g1 = SignatureGroup::generator();
    let mut signatures = Vec::with_capacity(u as usize);
    for digit in 0..u {
        let exponent = (signing_key + ScalarField::from(digit))
            .inverse()
            .ok_or(SetupError::DegenerateKey)?;
        signatures.push(g1 * exponent);
    }

    Ok(UlParams { signatures, pubkey, h, u, l })
}

// ---------
// | Tests |
// ---------
