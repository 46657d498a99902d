//! Pedersen commitments over the pairing curve's commitment group
//!
//! A commitment to value `x` under blinder `r` is `x·g + r·h`, where `g` is
//! the group generator and `h` is a second generator fixed by trusted setup.
//! The scheme is additively homomorphic: adding two commitments commits to
//! the sum of their values under the sum of their blinders.

use std::ops::{Add, Neg, Sub};

use ark_ec::Group;
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use ark_std::Zero;
use constants::{CommitmentGroup, CommitmentGroupAffine, ScalarField};
use thiserror::Error;

/// The length in bytes of a marshalled commitment
pub const COMMITMENT_BYTES: usize = 64;

/// An error produced when decoding a commitment from bytes
#[derive(Clone, Debug, Error)]
pub enum CommitmentError {
    /// The bytes are not a canonical encoding of a group element
    #[error("invalid commitment encoding: {0}")]
    InvalidEncoding(String),
}

// ----------------------
// | Commitment Algebra |
// ----------------------

/// A Pedersen commitment to a scalar value
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Commitment(CommitmentGroup);

impl Commitment {
    /// Wrap a raw group element as a commitment
    pub fn new(point: CommitmentGroup) -> Self {
        Self(point)
    }

    /// The underlying group element
    pub fn inner(&self) -> CommitmentGroup {
        self.0
    }

    /// The identity commitment, committing to zero under a zero blinder
    pub fn identity() -> Self {
        Self(CommitmentGroup::zero())
    }

    /// Marshal to the fixed-length compressed canonical encoding
    pub fn marshal(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(COMMITMENT_BYTES);
        self.0.serialize_compressed(&mut bytes).unwrap();
        bytes
    }

    /// Unmarshal from the fixed-length compressed canonical encoding
    ///
    /// Rejects encodings that are off-curve or outside the prime-order
    /// subgroup.
    pub fn unmarshal(bytes: &[u8]) -> Result<Self, CommitmentError> {
        let affine = CommitmentGroupAffine::deserialize_compressed(bytes)
            .map_err(|e| CommitmentError::InvalidEncoding(e.to_string()))?;
        Ok(Self(affine.into()))
    }
}

impl Add for Commitment {
    type Output = Commitment;

    fn add(self, rhs: Commitment) -> Commitment {
        Commitment(self.0 + rhs.0)
    }
}

impl Sub for Commitment {
    type Output = Commitment;

    fn sub(self, rhs: Commitment) -> Commitment {
        Commitment(self.0 - rhs.0)
    }
}

impl Neg for Commitment {
    type Output = Commitment;

    fn neg(self) -> Commitment {
        Commitment(-self.0)
    }
}

/// Commit to `value` under blinder `blinder`: `value·g + blinder·h`
pub fn commit(value: ScalarField, blinder: ScalarField, h: &CommitmentGroup) -> Commitment {
    Commitment(CommitmentGroup::generator() * value + *h * blinder)
}

// ---------
// | Tests |
// ---------
