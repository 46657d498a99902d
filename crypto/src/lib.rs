//! Cryptographic primitives shared across the settlement engine: the Pedersen
//! commitment algebra that hides balances and amounts, and helpers for moving
//! between scalars, big integers, and digest outputs

pub mod commitment;
pub mod fields;

pub use commitment::{commit, Commitment, CommitmentError, COMMITMENT_BYTES};
pub use fields::{
    biguint_to_scalar, decompose, hash_to_scalar, scalar_field_modulus, scalar_to_biguint,
};
