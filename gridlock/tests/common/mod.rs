//! Shared helpers for the integration scenarios: a host-style harness that
//! commits one transaction per successful invocation, and client-side sample
//! builders that produce honest commitments and proofs

use std::collections::{BTreeMap, HashMap};

use ark_ff::UniformRand;
use constants::{BankId, GridlockId, PaymentId, ScalarField, RANGE_PROOF_BASE, RANGE_PROOF_DIGITS};
use gridlock::{
    api::{
        encode_arg, BankAccount, GridlockProposal, GrossSettlementSet, MintAccount,
        PaymentMessage,
    },
    Engine, EngineError,
};
use gridlock_crypto::{commit, Commitment};
use lazy_static::lazy_static;
use num_bigint::BigUint;
use rand::thread_rng;
use serde::Serialize;
use state::{
    keys,
    records::{StoredBankAccount, StoredGlrConfig, StoredPaymentMessage, StoredPaymentQueue},
    storage::mem::deserialize_value,
    MemStore,
};
use zkrp::{prove_ul, setup_ul, UlParams};

lazy_static! {
    /// One trusted setup shared across the scenarios; the ceremony dominates
    /// the cost of an individual proof
    pub static ref PARAMS: UlParams =
        setup_ul(RANGE_PROOF_BASE, RANGE_PROOF_DIGITS, &mut thread_rng()).unwrap();
}

// -----------
// | Harness |
// -----------

/// Drives the engine the way the host runtime would: every invocation runs
/// in its own transaction, committed only when the engine reports success
pub struct Harness {
    /// The engine under test
    pub engine: Engine,
    /// The committed ledger state
    pub store: MemStore,
}

impl Harness {
    /// A fresh engine over an empty ledger
    pub fn new() -> Self {
        Self { engine: Engine::new(), store: MemStore::new() }
    }

    /// A fresh engine with the shared verifier parameters installed
    pub fn with_params() -> Self {
        let mut harness = Self::new();
        let arg = gridlock::api::encode_raw_arg(&PARAMS.verifier_params().marshal());
        harness.invoke("initParams", &[arg]).unwrap();
        harness
    }

    /// Invoke one function; commit the transaction iff it succeeds
    pub fn invoke(&mut self, function: &str, args: &[String]) -> Result<(), EngineError> {
        let mut tx = self.store.txn();
        let res = self.engine.invoke(&mut tx, function, args);
        if res.is_ok() {
            tx.commit();
        }
        res
    }

    /// Invoke one function with a single encoded message argument
    pub fn invoke_msg<T: Serialize>(
        &mut self,
        function: &str,
        message: &T,
    ) -> Result<(), EngineError> {
        self.invoke(function, &[encode_arg(message)])
    }

    // --------------------
    // | Committed State |
    // --------------------

    /// The committed account record of a bank
    pub fn account(&self, bank_id: BankId) -> StoredBankAccount {
        let bytes = self.store.committed(&keys::account_key(bank_id)).unwrap();
        deserialize_value(bytes).unwrap()
    }

    /// The committed payment record
    pub fn payment(&self, payment_id: PaymentId) -> StoredPaymentMessage {
        let bytes = self.store.committed(&keys::payment_key(payment_id)).unwrap();
        deserialize_value(bytes).unwrap()
    }

    /// The committed ids under a queue key; absent queues read as empty
    pub fn queue(&self, key: &str) -> Vec<PaymentId> {
        self.store
            .committed(key)
            .map(|bytes| deserialize_value::<StoredPaymentQueue>(bytes).unwrap().payment_ids)
            .unwrap_or_default()
    }

    /// The committed session configuration
    pub fn config(&self, gridlock_id: GridlockId) -> StoredGlrConfig {
        let bytes = self.store.committed(&keys::config_key(gridlock_id)).unwrap();
        deserialize_value(bytes).unwrap()
    }

    /// Assert that a bank's committed balance opens to `(value, blinder)`
    pub fn assert_balance(&self, bank_id: BankId, value: u64, blinder: ScalarField) {
        let expected = commit_value(value, blinder).marshal();
        assert_eq!(self.account(bank_id).cm_balance, expected, "balance of bank {bank_id}");
    }

    /// The homomorphic sum of the committed balances of `bank_ids`
    pub fn balance_sum(&self, bank_ids: &[BankId]) -> Commitment {
        bank_ids.iter().fold(Commitment::identity(), |acc, bank_id| {
            acc + Commitment::unmarshal(&self.account(*bank_id).cm_balance).unwrap()
        })
    }
}

// -------------------
// | Sample Builders |
// -------------------

/// Commit to a small integer under `blinder` with the shared generators
pub fn commit_value(value: u64, blinder: ScalarField) -> Commitment {
    commit(ScalarField::from(value), blinder, &PARAMS.h)
}

/// Prove that `cm` commits to `value` under `blinder`
pub fn prove(value: u64, blinder: &ScalarField, cm: &Commitment) -> Vec<u8> {
    prove_ul(&BigUint::from(value), blinder, cm, &PARAMS, &mut thread_rng())
        .unwrap()
        .marshal()
}

/// Build a mint batch for the given opening balances, returning the blinder
/// chosen for each bank
pub fn sample_mint(balances: &BTreeMap<BankId, u64>) -> (MintAccount, HashMap<BankId, ScalarField>) {
    let mut rng = thread_rng();
    let mut accounts = Vec::new();
    let mut blinders = HashMap::new();

    for (&bank_id, &value) in balances {
        let blinder = ScalarField::rand(&mut rng);
        let cm = commit_value(value, blinder);
        accounts.push(BankAccount {
            bank_id,
            cm_balance: cm.marshal(),
            zkrp: prove(value, &blinder, &cm),
        });
        blinders.insert(bank_id, blinder);
    }

    (MintAccount { accounts }, blinders)
}

/// Build an honest payment message, returning the amount blinder
pub fn sample_payment(
    payment_id: PaymentId,
    sender: BankId,
    receiver: BankId,
    amount: u64,
) -> (PaymentMessage, ScalarField) {
    let mut rng = thread_rng();
    let blinder = ScalarField::rand(&mut rng);
    let cm = commit_value(amount, blinder);

    let msg = PaymentMessage {
        payment_id,
        sender,
        receiver,
        cm_amount: cm.marshal(),
        zkrp: prove(amount, &blinder, &cm),
    };
    (msg, blinder)
}

/// Build a gross-settlement request whose proof opens the post-settlement
/// balance to `(post_value, post_blinder)`
pub fn sample_gross(
    bank_id: BankId,
    payment: &PaymentMessage,
    cm_balance: &[u8],
    post_value: u64,
    post_blinder: ScalarField,
) -> GrossSettlementSet {
    let balance = Commitment::unmarshal(cm_balance).unwrap();
    let amount = Commitment::unmarshal(&payment.cm_amount).unwrap();
    let cm_post = balance - amount;

    GrossSettlementSet {
        bank_id,
        payment_id: payment.payment_id,
        cm_balance: cm_balance.to_vec(),
        zkrp: prove(post_value, &post_blinder, &cm_post),
    }
}

// ----------------------
// | Gridlock Scenarios |
// ----------------------

/// A queued payment as the proposing banks see it
pub struct GlMessage {
    /// The paying bank
    pub sender: BankId,
    /// The receiving bank
    pub receiver: BankId,
    /// The cleartext amount, known to sender and receiver
    pub amount: u64,
}

/// One bank's view of a resolution round
pub struct IdList {
    /// The outgoing payments the bank proposes to settle
    pub outgoing: Vec<PaymentId>,
    /// The incoming payments the bank expects to be credited
    pub incoming: Vec<PaymentId>,
    /// The payments the bank declares infeasible
    pub infeasible: Vec<PaymentId>,
}

/// Build honest proposals for one round, returning them alongside each
/// proposing bank's expected post-settlement balance commitment bytes
pub fn sample_proposals(
    gridlock_id: GridlockId,
    balances: &BTreeMap<BankId, u64>,
    messages: &BTreeMap<PaymentId, GlMessage>,
    init_blinders: &HashMap<BankId, ScalarField>,
    payment_blinders: &HashMap<PaymentId, ScalarField>,
    lists: &BTreeMap<BankId, IdList>,
) -> (Vec<GridlockProposal>, HashMap<BankId, Vec<u8>>) {
    let mut rng = thread_rng();
    let mut proposals = Vec::new();
    let mut post_accounts = HashMap::new();

    for (&bank_id, list) in lists {
        let mut post_value = balances[&bank_id] as i128;
        let mut post_blinder = init_blinders[&bank_id];
        let cm_balance = commit_value(balances[&bank_id], init_blinders[&bank_id]);
        let mut cm_post = cm_balance;

        for payment_id in &list.incoming {
            post_value += messages[payment_id].amount as i128;
            post_blinder += payment_blinders[payment_id];
            cm_post =
                cm_post + commit_value(messages[payment_id].amount, payment_blinders[payment_id]);
        }
        for payment_id in &list.outgoing {
            post_value -= messages[payment_id].amount as i128;
            post_blinder -= payment_blinders[payment_id];
            cm_post =
                cm_post - commit_value(messages[payment_id].amount, payment_blinders[payment_id]);
        }

        post_accounts.insert(bank_id, cm_post.marshal());
        let zkrp1 = prove_ul(
            &BigUint::from(post_value as u64),
            &post_blinder,
            &cm_post,
            &PARAMS,
            &mut rng,
        )
        .unwrap()
        .marshal();

        let mut proposal = GridlockProposal {
            gridlock_id,
            bank_id,
            outgoing_ids: list.outgoing.clone(),
            infeasible_ids: list.infeasible.clone(),
            cm_balance: cm_balance.marshal(),
            zkrp1,
            zkrp2: Vec::new(),
        };

        // Including the smallest declared-infeasible payment overdraws the
        // bank; prove the negated post-balance is in range
        if let Some(&smallest) = list.infeasible.iter().min() {
            post_value -= messages[&smallest].amount as i128;
            post_blinder -= payment_blinders[&smallest];
            cm_post = cm_post - commit_value(messages[&smallest].amount, payment_blinders[&smallest]);

            let neg_value = u64::try_from(-post_value).unwrap();
            proposal.zkrp2 =
                prove_ul(&BigUint::from(neg_value), &(-post_blinder), &(-cm_post), &PARAMS, &mut rng)
                    .unwrap()
                    .marshal();
        }

        proposals.push(proposal);
    }

    (proposals, post_accounts)
}
