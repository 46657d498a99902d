//! The range-proof object and its wire encoding
//!
//! The encoding is a fixed layout whose length is determined by the digit
//! count `l`; decoding therefore takes `l` as an input and rejects any other
//! length outright.

use ark_ec::pairing::PairingOutput;
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use constants::{CommitmentGroup, ScalarField, SignatureGroup, SystemCurve};
use gridlock_crypto::{hash_to_scalar, Commitment};

use crate::errors::VerifierError;

/// Marshalled size of a commitment-group element
const G2_BYTES: usize = 64;
/// Marshalled size of a signature-group element
const G1_BYTES: usize = 32;
/// Marshalled size of a pairing output
const GT_BYTES: usize = 384;
/// Marshalled size of a scalar
const SCALAR_BYTES: usize = 32;

/// A proof that a committed value lies in `[0, u^l)`
///
/// Layout of the marshalled form, in order:
/// `C ‖ D ‖ V[0..l] ‖ a[0..l] ‖ zsig[0..l] ‖ zv[0..l] ‖ zr ‖ c`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UlProof {
    /// The commitment the proof attests to
    pub commitment: Commitment,
    /// The aggregate blinding term `D = m·h + Σ (uⁱ·sᵢ)·g2`
    pub d: CommitmentGroup,
    /// The blinded per-digit signatures `Vᵢ = vᵢ·A_{xᵢ}`
    pub v: Vec<SignatureGroup>,
    /// The per-digit pairing commitment terms `aᵢ = tᵢ·E − sᵢ·e(Vᵢ, g2)`
    pub a: Vec<PairingOutput<SystemCurve>>,
    /// The responses binding the digit values
    pub z_sig: Vec<ScalarField>,
    /// The responses binding the signature blinders
    pub z_v: Vec<ScalarField>,
    /// The response binding the commitment blinder
    pub z_r: ScalarField,
    /// The Fiat-Shamir challenge over the commitment terms
    pub challenge: ScalarField,
}

impl UlProof {
    /// The marshalled length of a proof with `l` digits
    pub fn marshaled_len(l: u64) -> usize {
        let per_digit = G1_BYTES + GT_BYTES + 2 * SCALAR_BYTES;
        2 * G2_BYTES + (l as usize) * per_digit + 2 * SCALAR_BYTES
    }

    /// Marshal to the fixed-layout encoding
    pub fn marshal(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(Self::marshaled_len(self.v.len() as u64));

        self.commitment.inner().serialize_compressed(&mut bytes).unwrap();
        self.d.serialize_compressed(&mut bytes).unwrap();
        for v in &self.v {
            v.serialize_compressed(&mut bytes).unwrap();
        }
        for a in &self.a {
            a.serialize_compressed(&mut bytes).unwrap();
        }
        for z in &self.z_sig {
            z.serialize_compressed(&mut bytes).unwrap();
        }
        for z in &self.z_v {
            z.serialize_compressed(&mut bytes).unwrap();
        }
        self.z_r.serialize_compressed(&mut bytes).unwrap();
        self.challenge.serialize_compressed(&mut bytes).unwrap();

        bytes
    }

    /// Unmarshal a proof with `l` digits from its fixed-layout encoding
    pub fn unmarshal(bytes: &[u8], l: u64) -> Result<Self, VerifierError> {
        if bytes.len() != Self::marshaled_len(l) {
            return Err(VerifierError::MalformedProof(format!(
                "expected {} bytes for {l} digits, got {}",
                Self::marshaled_len(l),
                bytes.len()
            )));
        }

        let mut cursor = bytes;
        let decode_err =
            |e: ark_serialize::SerializationError| VerifierError::MalformedProof(e.to_string());

        let commitment = Commitment::new(
            CommitmentGroup::deserialize_compressed(&mut cursor).map_err(decode_err)?,
        );
        let d = CommitmentGroup::deserialize_compressed(&mut cursor).map_err(decode_err)?;

        let l = l as usize;
        let mut v = Vec::with_capacity(l);
        for _ in 0..l {
            v.push(SignatureGroup::deserialize_compressed(&mut cursor).map_err(decode_err)?);
        }
        let mut a = Vec::with_capacity(l);
        for _ in 0..l {
            a.push(
                PairingOutput::<SystemCurve>::deserialize_compressed(&mut cursor)
                    .map_err(decode_err)?,
            );
        }
        let mut z_sig = Vec::with_capacity(l);
        for _ in 0..l {
            z_sig.push(ScalarField::deserialize_compressed(&mut cursor).map_err(decode_err)?);
        }
        let mut z_v = Vec::with_capacity(l);
        for _ in 0..l {
            z_v.push(ScalarField::deserialize_compressed(&mut cursor).map_err(decode_err)?);
        }
        let z_r = ScalarField::deserialize_compressed(&mut cursor).map_err(decode_err)?;
        let challenge = ScalarField::deserialize_compressed(&mut cursor).map_err(decode_err)?;

        Ok(Self { commitment, d, v, a, z_sig, z_v, z_r, challenge })
    }
}

/// Hash the proof's commitment terms into the challenge scalar
///
/// Both the prover and the verifier derive the challenge from the same
/// transcript; a proof whose carried challenge disagrees is rejected.
pub(crate) fn compute_challenge(
    a: &[PairingOutput<SystemCurve>],
    d: &CommitmentGroup,
) -> ScalarField {
    let mut transcript = Vec::new();
    for term in a {
        term.serialize_compressed(&mut transcript).unwrap();
    }
    d.serialize_compressed(&mut transcript).unwrap();

    hash_to_scalar(&transcript)
}
