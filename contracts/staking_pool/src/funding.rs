//! Pool token accounting against the asset ledger.
//!
//! The pool's token balance splits into three parts: staked principal,
//! the reward fund (allocated but unharvested), and whatever is left over
//! (unallocated). Every pull or push checks the ledger first so a failing
//! transfer surfaces as a `ContractError` instead of a host trap.

use soroban_sdk::{token, Address, Env};

use crate::{ledger, ContractError};

fn pool_balance(env: &Env, token: &Address) -> i128 {
    token::Client::new(env, token).balance(&env.current_contract_address())
}

/// Tokens held by the pool beyond `total_staked + reward_fund`.
///
/// A negative remainder means tokens left the pool outside this contract
/// and is reported as `BadPoolBalance`.
pub fn unallocated(env: &Env, token: &Address) -> Result<i128, ContractError> {
    let committed = ledger::total_staked(env)
        .checked_add(ledger::reward_fund(env))
        .ok_or(ContractError::MathOverflow)?;
    let free = pool_balance(env, token)
        .checked_sub(committed)
        .ok_or(ContractError::MathOverflow)?;
    if free < 0 {
        return Err(ContractError::BadPoolBalance);
    }
    Ok(free)
}

/// Guard for allocating `amount` out of tokens the pool already holds.
pub fn require_unallocated(
    env: &Env,
    token: &Address,
    amount: i128,
) -> Result<(), ContractError> {
    if unallocated(env, token)? < amount {
        return Err(ContractError::InsufficientRewardFund);
    }
    Ok(())
}

/// Moves `amount` from `from` into the pool using the allowance `from`
/// granted the pool.
pub fn pull_approved(
    env: &Env,
    token: &Address,
    from: &Address,
    amount: i128,
) -> Result<(), ContractError> {
    let client = token::Client::new(env, token);
    let pool = env.current_contract_address();

    if client.allowance(from, &pool) < amount {
        return Err(ContractError::InsufficientAllowance);
    }
    if client.balance(from) < amount {
        return Err(ContractError::InsufficientBalance);
    }

    client.transfer_from(&pool, from, &pool, &amount);
    Ok(())
}

/// Moves `amount` from `from` to `to` on `from`'s own authorization.
pub fn transfer_direct(
    env: &Env,
    token: &Address,
    from: &Address,
    to: &Address,
    amount: i128,
) -> Result<(), ContractError> {
    let client = token::Client::new(env, token);
    if client.balance(from) < amount {
        return Err(ContractError::InsufficientBalance);
    }

    client.transfer(from, to, &amount);
    Ok(())
}

/// Pays `amount` out of the pool to `to`.
///
/// Only checks the raw balance; callers paying rewards must check
/// [`unallocated`] first so principal is never used.
pub fn push(env: &Env, token: &Address, to: &Address, amount: i128) -> Result<(), ContractError> {
    if pool_balance(env, token) < amount {
        return Err(ContractError::BadPoolBalance);
    }

    token::Client::new(env, token).transfer(&env.current_contract_address(), to, &amount);
    Ok(())
}
