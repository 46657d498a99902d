//! Helpers for manipulating values within the scalar field and translating
//! between scalars, big integers, and digest outputs

use ark_ff::PrimeField;
use constants::ScalarField;
use num_bigint::BigUint;
use num_traits::{ToPrimitive, Zero};
use sha2::{Digest, Sha256};

// -----------
// | Helpers |
// -----------

/// Return the modulus of the scalar field as a `BigUint`
pub fn scalar_field_modulus() -> BigUint {
    ScalarField::MODULUS.into()
}

/// Convert a scalar to a `BigUint`
pub fn scalar_to_biguint(a: &ScalarField) -> BigUint {
    (*a).into()
}

/// Convert a `BigUint` to a scalar, reducing modulo the field modulus
pub fn biguint_to_scalar(a: &BigUint) -> ScalarField {
    ScalarField::from(a.clone())
}

/// Hash arbitrary bytes into the scalar field
///
/// The SHA-256 digest is interpreted as a big-endian integer and reduced
/// modulo the field modulus.
pub fn hash_to_scalar(bytes: &[u8]) -> ScalarField {
    let digest = Sha256::digest(bytes);
    let reduced = BigUint::from_bytes_be(&digest) % scalar_field_modulus();
    biguint_to_scalar(&reduced)
}

/// Decompose `value` into exactly `digits` base-`base` digits, least
/// significant first
///
/// Returns `None` when the value does not fit, i.e. `value >= base^digits`.
pub fn decompose(value: &BigUint, base: u64, digits: u64) -> Option<Vec<u64>> {
    let base_big = BigUint::from(base);
    let mut rest = value.clone();

    let mut out = Vec::with_capacity(digits as usize);
    for _ in 0..digits {
        // The remainder is strictly less than `base`, so the cast is total
        out.push((&rest % &base_big).to_u64()?);
        rest /= &base_big;
    }

    rest.is_zero().then_some(out)
}

// ---------
// | Tests |
// ---------
