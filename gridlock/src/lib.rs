//! The on-ledger verification engine of a privacy-preserving
//! gridlock-resolution protocol for interbank settlement
//!
//! Balances and payment amounts are hidden behind additively-homomorphic
//! commitments; the ledger verifies zero-knowledge range proofs that every
//! balance and post-balance stays non-negative. When gross settlement
//! stalls, a round-based resolver finds the largest feasible subset of
//! queued payments and settles it atomically.
//!
//! Every externally invoked operation runs as a single host transaction:
//! the host hands the engine a transactional [`KvStore`] view, calls
//! [`Engine::invoke`], and commits the view iff the call returns `Ok`.

pub mod api;
pub mod error;

mod accounts;
mod checks;
mod payments;
mod resolver;
mod settlement;

use base64::engine::{general_purpose as b64_general_purpose, Engine as Base64Engine};
use once_cell::sync::OnceCell;
use serde::de::DeserializeOwned;
use state::{KvStore, Ledger, StorageError};
use tracing::{error, info};
use zkrp::UlVerifierParams;

pub use crate::error::EngineError;

// ------------
// | Dispatch |
// ------------

/// The settlement engine
///
/// Holds the process-wide, read-only range-proof parameter handle. The
/// parameters are installed by `initParams` (or lazily reloaded from the
/// ledger after a restart) and never change afterwards, so sharing the
/// engine across invocations is safe without further synchronization.
#[derive(Debug, Default)]
pub struct Engine {
    /// The cached verifier parameters
    params: OnceCell<UlVerifierParams>,
}

impl Engine {
    /// Create an engine with no parameters installed yet
    pub fn new() -> Self {
        Self::default()
    }

    /// Dispatch one invocation against the ledger
    ///
    /// `args` carries exactly one base64-encoded message per the wire
    /// contract; on failure the host must drop the transaction unapplied.
    pub fn invoke<S: KvStore>(
        &self,
        store: &mut S,
        function: &str,
        args: &[String],
    ) -> Result<(), EngineError> {
        info!(function, "invoke");

        match function {
            "initParams" => self.init_params(store, args),
            "mintAccount" => {
                let msg = decode_arg(args)?;
                accounts::mint_account(self.verifier_params(store)?, store, msg)
            },
            "addMessage" => {
                let msg = decode_arg(args)?;
                payments::add_message(self.verifier_params(store)?, store, msg)
            },
            "grossSettlement" => {
                let msg = decode_arg(args)?;
                settlement::gross::gross_settlement(self.verifier_params(store)?, store, msg)
            },
            "startGLResolution" => resolver::start_resolution(store, decode_arg(args)?),
            "proposeNettableSet" => {
                let msg = decode_arg(args)?;
                resolver::propose_nettable_set(self.verifier_params(store)?, store, msg)
            },
            "tallyGridlockProposal" => resolver::tally_proposals(store, decode_arg(args)?),
            "NetGLSettlement" => settlement::net::net_settlement(store, decode_arg(args)?),
            other => {
                error!(function = other, "invalid invocation function");
                Err(EngineError::BadInput(format!("invalid invocation function {other}")))
            },
        }
    }

    /// Install the range-proof verifier parameters
    ///
    /// The payload is validated before it is persisted, so a corrupt blob is
    /// rejected at install time rather than at first use. Re-installing the
    /// same parameters is a no-op; installing different ones is a conflict.
    fn init_params<S: KvStore>(&self, store: &mut S, args: &[String]) -> Result<(), EngineError> {
        let bytes = decode_raw_arg(args)?;
        let parsed = UlVerifierParams::unmarshal(&bytes)
            .map_err(|e| EngineError::BadInput(e.to_string()))?;

        if let Some(existing) = self.params.get() {
            if *existing != parsed {
                return Err(EngineError::StateConflict(
                    "different verifier parameters are already installed".to_string(),
                ));
            }
        }

        Ledger::new(store).put_verifier_params_bytes(&bytes)?;
        let _ = self.params.set(parsed);
        Ok(())
    }

    /// The installed verifier parameters, loading from the ledger on first
    /// use after a restart
    fn verifier_params<S: KvStore>(
        &self,
        store: &mut S,
    ) -> Result<&UlVerifierParams, EngineError> {
        self.params.get_or_try_init(|| {
            let bytes = Ledger::new(store).verifier_params_bytes()?;
            UlVerifierParams::unmarshal(&bytes).map_err(|e| {
                EngineError::StoreError(StorageError::Store(format!(
                    "stored verifier parameters are corrupt: {e}"
                )))
            })
        })
    }
}

// -----------
// | Helpers |
// -----------

/// Decode the single base64 argument of an invocation
fn decode_raw_arg(args: &[String]) -> Result<Vec<u8>, EngineError> {
    let [arg] = args else {
        return Err(EngineError::BadInput(format!(
            "need exactly one argument, got {}",
            args.len()
        )));
    };

    b64_general_purpose::STANDARD
        .decode(arg)
        .map_err(|e| EngineError::BadInput(format!("invalid base64 argument: {e}")))
}

/// Decode the single base64-encoded message argument of an invocation
fn decode_arg<T: DeserializeOwned>(args: &[String]) -> Result<T, EngineError> {
    let bytes = decode_raw_arg(args)?;
    flexbuffers::from_slice(&bytes)
        .map_err(|e| EngineError::BadInput(format!("invalid message payload: {e}")))
}

// ---------
// | Tests |
// ---------

#[cfg(test)]
mod dispatch_test {
    use state::MemStore;

    use super::{Engine, EngineError};

    #[test]
    fn test_unknown_function_rejected() {
        let engine = Engine::new();
        let mut store = MemStore::new();
        let mut tx = store.txn();

        let res = engine.invoke(&mut tx, "notAFunction", &[]);
        assert!(matches!(res, Err(EngineError::BadInput(_))));
    }

    #[test]
    fn test_wrong_argument_count_rejected() {
        let engine = Engine::new();
        let mut store = MemStore::new();
        let mut tx = store.txn();

        let res = engine.invoke(&mut tx, "initParams", &[]);
        assert!(matches!(res, Err(EngineError::BadInput(_))));

        let args = vec!["AAAA".to_string(), "BBBB".to_string()];
        let res = engine.invoke(&mut tx, "initParams", &args);
        assert!(matches!(res, Err(EngineError::BadInput(_))));
    }

    #[test]
    fn test_undecodable_base64_rejected() {
        let engine = Engine::new();
        let mut store = MemStore::new();
        let mut tx = store.txn();

        let args = vec!["not-base64!!".to_string()];
        let res = engine.invoke(&mut tx, "initParams", &args);
        assert!(matches!(res, Err(EngineError::BadInput(_))));
    }

    #[test]
    fn test_params_required_before_minting() {
        let engine = Engine::new();
        let mut store = MemStore::new();
        let mut tx = store.txn();

        let args = vec![crate::api::encode_arg(&crate::api::MintAccount { accounts: vec![] })];
        let res = engine.invoke(&mut tx, "mintAccount", &args);
        assert!(matches!(res, Err(EngineError::StateNotFound(_))));
    }
}
