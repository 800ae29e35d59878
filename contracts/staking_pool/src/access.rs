use common::ownable;
use soroban_sdk::{contracttype, token, Address, Env};

use crate::ContractError;

/// The two independent authorities the pool checks against.
///
/// - `Pool`  – owner of this contract: funds and distributes rewards.
/// - `Token` – admin of the asset ledger: may pay out directly from its own
///             balance. Read from the token contract, never stored here.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum OwnerRole {
    Pool = 1,
    Token = 2,
}

/// Guard: revert if `caller` does not currently own the pool.
pub fn require_pool_owner(env: &Env, caller: &Address) -> Result<(), ContractError> {
    if !ownable::is_owner(env, caller) {
        return Err(ContractError::NotPoolOwner);
    }
    Ok(())
}

/// The asset ledger's own admin.
pub fn token_owner(env: &Env, token: &Address) -> Address {
    token::StellarAssetClient::new(env, token).admin()
}

/// Guard: revert if `caller` is not the asset ledger's admin.
pub fn require_token_owner(
    env: &Env,
    token: &Address,
    caller: &Address,
) -> Result<(), ContractError> {
    if token_owner(env, token) != *caller {
        return Err(ContractError::NotTokenOwner);
    }
    Ok(())
}
