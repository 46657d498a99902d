//! Zero-knowledge range proofs attesting that a committed value lies in
//! `[0, u^l)`
//!
//! The scheme decomposes the committed value into `l` base-`u` digits and
//! proves, per digit, knowledge of a blinded Boneh-Boyen signature on the
//! digit under the setup authority's key: a set-membership argument over
//! `[0, u)`. An aggregate check binds the digit recomposition to the
//! Pedersen commitment.
//!
//! Only [`verify_ul`] runs on the ledger; [`setup_ul`] is a trusted-setup
//! ceremony and [`prove_ul`] runs client-side (and in the test suites of the
//! downstream crates).

pub mod errors;
pub mod params;
pub mod proof;
pub mod prover;
pub mod verifier;

pub use errors::{ParamsDecodeError, ProverError, SetupError, VerifierError};
pub use params::{pairing_base, setup_ul, UlParams, UlVerifierParams};
pub use proof::UlProof;
pub use prover::prove_ul;
pub use verifier::verify_ul;
