//! Account minting: initial capitalization of the participating banks

use state::{records::StoredBankAccount, KvStore, Ledger};
use tracing::info;
use zkrp::UlVerifierParams;

use crate::{
    api::MintAccount,
    checks::{check_bank_id, decode_commitment, verify_range_proof},
    error::EngineError,
};

/// Mint a batch of accounts
///
/// Each entry's balance commitment must carry a valid range proof. Minting
/// an existing bank id overwrites its balance: re-capitalization is the
/// host's call to gate.
pub(crate) fn mint_account<S: KvStore>(
    params: &UlVerifierParams,
    store: &mut S,
    msg: MintAccount,
) -> Result<(), EngineError> {
    info!(accounts = msg.accounts.len(), "minting accounts");

    let mut ledger = Ledger::new(store);
    for account in &msg.accounts {
        check_bank_id(account.bank_id)?;

        let cm_balance = decode_commitment(&account.cm_balance)?;
        verify_range_proof(params, &account.zkrp, &cm_balance)?;

        ledger.put_account(
            account.bank_id,
            &StoredBankAccount { cm_balance: account.cm_balance.clone() },
        )?;
    }
    Ok(())
}
