//! Stake ledger and per-account reward checkpoints.
//!
//! Pool-wide totals live in instance storage; each account's checkpoint is a
//! single persistent entry keyed by `(ACCOUNT, address)`. Accounts are created
//! implicitly on first touch and never deleted.

use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

use crate::{rewards, ContractError};

// ── Storage keys ─────────────────────────────────────────────────────────────

const TOTAL_STAKED: Symbol = symbol_short!("TOT_STK");
const REWARD_PER_TOKEN: Symbol = symbol_short!("RPT");
const REWARD_FUND: Symbol = symbol_short!("RWD_FUND");
const ACCOUNT: Symbol = symbol_short!("ACCOUNT");

const TTL_THRESHOLD: u32 = 5184000;
const TTL_EXTEND_TO: u32 = 10368000;

/// Per-account state. The default value doubles as the record of an account
/// that has never staked.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct AccountCheckpoint {
    pub staked: i128,
    /// Accumulator value at the account's last settlement.
    pub reward_per_token_paid: i128,
    /// Reward settled into the checkpoint but not yet harvested.
    pub rewards_accrued: i128,
}

fn account_key(account: &Address) -> (Symbol, Address) {
    (ACCOUNT, account.clone())
}

// ── Accounts ─────────────────────────────────────────────────────────────────

/// Reads a checkpoint without touching its TTL; views rely on this staying
/// free of writes.
pub fn load_account(env: &Env, account: &Address) -> AccountCheckpoint {
    env.storage()
        .persistent()
        .get(&account_key(account))
        .unwrap_or_default()
}

pub fn store_account(env: &Env, account: &Address, checkpoint: &AccountCheckpoint) {
    let key = account_key(account);
    env.storage().persistent().set(&key, checkpoint);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

/// Commits the reward `account` accrued since its last interaction into its
/// checkpoint, measured against the stake it held over that period.
///
/// Must run before any change to the account's stake in the same call.
/// Nothing is written here: the caller stores the returned checkpoint once
/// the rest of the operation has validated.
pub fn settle(env: &Env, account: &Address) -> Result<AccountCheckpoint, ContractError> {
    let current_rpt = reward_per_token(env);
    let mut checkpoint = load_account(env, account);

    let pending = rewards::pending(
        env,
        checkpoint.staked,
        current_rpt,
        checkpoint.reward_per_token_paid,
    )?;
    checkpoint.rewards_accrued = checkpoint
        .rewards_accrued
        .checked_add(pending)
        .ok_or(ContractError::MathOverflow)?;
    checkpoint.reward_per_token_paid = current_rpt;

    Ok(checkpoint)
}

/// Side-effect-free counterpart of [`settle`]: what the account could
/// harvest right now.
pub fn earned(env: &Env, account: &Address) -> Result<i128, ContractError> {
    let checkpoint = load_account(env, account);
    rewards::earned(
        env,
        checkpoint.staked,
        reward_per_token(env),
        checkpoint.reward_per_token_paid,
        checkpoint.rewards_accrued,
    )
}

// ── Pool totals ──────────────────────────────────────────────────────────────

pub fn total_staked(env: &Env) -> i128 {
    env.storage().instance().get(&TOTAL_STAKED).unwrap_or(0)
}

pub fn set_total_staked(env: &Env, total: i128) {
    env.storage().instance().set(&TOTAL_STAKED, &total);
}

pub fn reward_per_token(env: &Env) -> i128 {
    env.storage().instance().get(&REWARD_PER_TOKEN).unwrap_or(0)
}

pub fn reward_fund(env: &Env) -> i128 {
    env.storage().instance().get(&REWARD_FUND).unwrap_or(0)
}

pub fn set_reward_fund(env: &Env, fund: i128) {
    env.storage().instance().set(&REWARD_FUND, &fund);
}

/// Pool totals after a distribution, computed ahead of any token movement.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Allocation {
    pub reward_per_token: i128,
    pub reward_fund: i128,
}

/// Works out the accumulator advance for distributing `amount` over the
/// current total stake and the matching reward-fund increase.
///
/// Fails with `PoolUnfunded` while nothing is staked. Reads only.
pub fn plan_allocation(env: &Env, amount: i128) -> Result<Allocation, ContractError> {
    let delta = rewards::reward_per_token_delta(env, amount, total_staked(env))?;
    Ok(Allocation {
        reward_per_token: reward_per_token(env)
            .checked_add(delta)
            .ok_or(ContractError::MathOverflow)?,
        reward_fund: reward_fund(env)
            .checked_add(amount)
            .ok_or(ContractError::MathOverflow)?,
    })
}

pub fn commit_allocation(env: &Env, allocation: &Allocation) {
    env.storage()
        .instance()
        .set(&REWARD_PER_TOKEN, &allocation.reward_per_token);
    set_reward_fund(env, allocation.reward_fund);
}
