#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, Env};

// ── Event payloads ──────────────────────────────────────────────────────────

/// Fired once when the pool is bootstrapped.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub owner: Address,
    pub token: Address,
    pub timestamp: u64,
}

/// Fired when an account deposits stake.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakedEvent {
    pub staker: Address,
    pub amount: i128,
    pub new_total_staked: i128,
    pub timestamp: u64,
}

/// Fired when an account withdraws stake.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UnstakedEvent {
    pub staker: Address,
    pub amount: i128,
    pub new_total_staked: i128,
    pub timestamp: u64,
}

/// Fired when an account is paid its accrued reward.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HarvestedEvent {
    pub staker: Address,
    pub amount: i128,
    pub reward_fund: i128,
    pub timestamp: u64,
}

/// Fired when the pool owner moves reward tokens in without distributing.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardInjectedEvent {
    pub owner: Address,
    pub amount: i128,
    pub timestamp: u64,
}

/// Where the tokens behind a distribution came from.
#[soroban_sdk::contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum FundingSource {
    /// Already held by the pool as unallocated balance.
    Unallocated = 1,
    /// Pulled from the owner in the same call.
    Pulled = 2,
}

/// Fired when the accumulator advances.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardDistributedEvent {
    pub owner: Address,
    pub amount: i128,
    pub source: FundingSource,
    pub reward_per_token: i128,
    pub reward_fund: i128,
    pub timestamp: u64,
}

/// Fired when the token owner pays someone directly, outside the pool ledger.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardTransferredEvent {
    pub token_owner: Address,
    pub to: Address,
    pub amount: i128,
    pub timestamp: u64,
}

/// Fired when pool ownership moves. `new_owner` is `None` after a renounce.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OwnershipTransferredEvent {
    pub previous_owner: Address,
    pub new_owner: Option<Address>,
    pub timestamp: u64,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_initialized(env: &Env, owner: Address, token: Address) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent {
            owner,
            token,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_staked(env: &Env, staker: Address, amount: i128, new_total_staked: i128) {
    env.events().publish(
        (symbol_short!("STAKED"), staker.clone()),
        StakedEvent {
            staker,
            amount,
            new_total_staked,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_unstaked(env: &Env, staker: Address, amount: i128, new_total_staked: i128) {
    env.events().publish(
        (symbol_short!("UNSTAKED"), staker.clone()),
        UnstakedEvent {
            staker,
            amount,
            new_total_staked,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_harvested(env: &Env, staker: Address, amount: i128, reward_fund: i128) {
    env.events().publish(
        (symbol_short!("HARVEST"), staker.clone()),
        HarvestedEvent {
            staker,
            amount,
            reward_fund,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_reward_injected(env: &Env, owner: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("RWD_INJ"), owner.clone()),
        RewardInjectedEvent {
            owner,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_reward_distributed(
    env: &Env,
    owner: Address,
    amount: i128,
    source: FundingSource,
    reward_per_token: i128,
    reward_fund: i128,
) {
    env.events().publish(
        (symbol_short!("RWD_DIST"), owner.clone()),
        RewardDistributedEvent {
            owner,
            amount,
            source,
            reward_per_token,
            reward_fund,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_reward_transferred(env: &Env, token_owner: Address, to: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("RWD_XFER"), to.clone()),
        RewardTransferredEvent {
            token_owner,
            to,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_ownership_transferred(
    env: &Env,
    previous_owner: Address,
    new_owner: Option<Address>,
) {
    env.events().publish(
        (symbol_short!("OWN_XFER"), previous_owner.clone()),
        OwnershipTransferredEvent {
            previous_owner,
            new_owner,
            timestamp: env.ledger().timestamp(),
        },
    );
}
