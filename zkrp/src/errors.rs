//! Groups error types for the range-proof crate

use thiserror::Error;

/// Represents an error during the trusted-setup ceremony
#[derive(Clone, Debug, Error)]
pub enum SetupError {
    /// The sampled signing key cannot sign every digit in `[0, u)`
    #[error("degenerate signing key sampled during setup")]
    DegenerateKey,
    /// The requested range is empty or unrepresentable
    #[error("invalid range parameters: u = {u}, l = {l}")]
    InvalidRange {
        /// The digit base requested
        u: u64,
        /// The digit count requested
        l: u64,
    },
}

/// Represents an error during proof generation
#[derive(Clone, Debug, Error)]
pub enum ProverError {
    /// The witness value lies outside the provable range
    #[error("value out of range: does not decompose into {digits} base-{base} digits")]
    ValueOutOfRange {
        /// The digit base of the range
        base: u64,
        /// The digit count of the range
        digits: u64,
    },
}

/// Represents an error during proof verification
#[derive(Clone, Debug, Error)]
pub enum VerifierError {
    /// The commitment signed into the proof differs from the one the caller
    /// expects the proof to attest to
    #[error("commitment in proof does not match the expected commitment")]
    CommitmentMismatch,
    /// The proof bytes or structure do not decode to a well-formed proof
    #[error("malformed proof: {0}")]
    MalformedProof(String),
    /// The carried challenge does not match the recomputed transcript hash
    #[error("challenge does not match the proof transcript")]
    ChallengeMismatch,
    /// The aggregate digit-recomposition check failed
    #[error("aggregate commitment check failed")]
    AggregateCheckFailed,
    /// A per-digit set-membership check failed
    #[error("digit check failed at position {0}")]
    DigitCheckFailed(usize),
}

/// Represents an error decoding public verifier parameters
#[derive(Clone, Debug, Error)]
#[error("malformed verifier parameters: {0}")]
pub struct ParamsDecodeError(pub String);
