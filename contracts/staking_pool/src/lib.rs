#![no_std]

//! Proportional reward-distribution pool.
//!
//! Accounts stake a single asset token; the pool owner distributes rewards
//! in the same token, and each account's share is tracked with a
//! reward-per-token accumulator so no operation iterates over accounts.
//!
//! Every entry point runs as one Soroban invocation, so the platform's
//! serialized transaction execution gives each call exclusive access to
//! pool and account state. Within a call all checks run before the first
//! token transfer and the first storage write.

pub mod access;
pub mod events;
pub mod funding;
pub mod ledger;
pub mod rewards;

use common::ownable;
use soroban_sdk::{contract, contractimpl, contracttype, symbol_short, token, Address, Env, Symbol};

pub use access::OwnerRole;
use events::FundingSource;

// ── Storage key constants ────────────────────────────────────────────────────

const INITIALIZED: Symbol = symbol_short!("INIT");
const TOKEN: Symbol = symbol_short!("TOKEN");

const TTL_THRESHOLD: u32 = 5184000;
const TTL_EXTEND_TO: u32 = 10368000;

// ── Contract errors ──────────────────────────────────────────────────────────

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    /// Zero or negative where a positive amount is required.
    InvalidAmount = 3,
    InsufficientStakedBalance = 4,
    /// The asset ledger would reject the pull for lack of allowance.
    InsufficientAllowance = 5,
    /// The asset ledger would reject the transfer for lack of balance.
    InsufficientBalance = 6,
    /// Not enough unallocated tokens in the pool to distribute.
    InsufficientRewardFund = 7,
    /// The reward fund cannot cover an account's payout.
    InsufficientRewardBalance = 8,
    NoRewardsToHarvest = 9,
    NotPoolOwner = 10,
    NotTokenOwner = 11,
    /// Distribution attempted while nothing is staked.
    PoolUnfunded = 12,
    /// The pool holds fewer tokens than staked principal plus reward fund.
    BadPoolBalance = 13,
    MathOverflow = 14,
}

impl ContractError {
    /// The role a caller was missing, for the two ownership failures.
    pub fn required_role(&self) -> Option<OwnerRole> {
        match self {
            ContractError::NotPoolOwner => Some(OwnerRole::Pool),
            ContractError::NotTokenOwner => Some(OwnerRole::Token),
            _ => None,
        }
    }
}

// ── Public-facing types ──────────────────────────────────────────────────────

/// Snapshot of an account returned by `account_info`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AccountInfo {
    pub staked: i128,
    pub reward_per_token_paid: i128,
    pub rewards_accrued: i128,
    /// `rewards_accrued` plus everything accrued since the last settlement.
    pub earned: i128,
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct StakingPool;

#[contractimpl]
impl StakingPool {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Bootstrap the pool.
    ///
    /// * `owner` – pool owner, the only caller allowed to fund and distribute.
    /// * `token` – asset ledger used for both stake and rewards.
    pub fn initialize(env: Env, owner: Address, token: Address) -> Result<(), ContractError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::AlreadyInitialized);
        }

        env.storage().instance().set(&INITIALIZED, &true);
        env.storage().instance().set(&TOKEN, &token);
        ownable::set_owner(&env, &owner);
        // TOTAL_STAKED, RPT, and RWD_FUND start at zero; the ledger getters
        // default absent keys, so no explicit init needed.
        Self::extend_instance_ttl(&env);

        events::publish_initialized(&env, owner, token);

        Ok(())
    }

    // ── Staking ─────────────────────────────────────────────────────────────

    /// Deposit `amount` tokens, pulled through the allowance `staker`
    /// granted the pool.
    ///
    /// Pending rewards are settled against the pre-deposit stake first, so
    /// the new tokens earn nothing retroactively.
    pub fn stake(env: Env, staker: Address, amount: i128) -> Result<(), ContractError> {
        let token = Self::require_initialized(&env)?;
        staker.require_auth();

        if amount <= 0 {
            return Err(ContractError::InvalidAmount);
        }

        // 1. Settle against the stake held so far.
        let mut checkpoint = ledger::settle(&env, &staker)?;

        // 2. Compute the new balances before moving any tokens.
        checkpoint.staked = checkpoint
            .staked
            .checked_add(amount)
            .ok_or(ContractError::MathOverflow)?;
        let new_total = ledger::total_staked(&env)
            .checked_add(amount)
            .ok_or(ContractError::MathOverflow)?;

        // 3. Pull the tokens; a rejected pull leaves everything untouched.
        funding::pull_approved(&env, &token, &staker, amount)?;

        ledger::store_account(&env, &staker, &checkpoint);
        ledger::set_total_staked(&env, new_total);
        Self::extend_instance_ttl(&env);

        events::publish_staked(&env, staker, amount, new_total);

        Ok(())
    }

    /// Withdraw `amount` of principal back to `staker`.
    ///
    /// Accounts that never staked fail the same way as accounts asking for
    /// more than they hold.
    pub fn unstake(env: Env, staker: Address, amount: i128) -> Result<(), ContractError> {
        let token = Self::require_initialized(&env)?;
        staker.require_auth();

        if amount <= 0 {
            return Err(ContractError::InvalidAmount);
        }

        // 1. Settle before reducing stake.
        let mut checkpoint = ledger::settle(&env, &staker)?;

        // 2. Verify the account has enough staked.
        if checkpoint.staked < amount {
            return Err(ContractError::InsufficientStakedBalance);
        }
        checkpoint.staked -= amount;
        let new_total = ledger::total_staked(&env)
            .checked_sub(amount)
            .ok_or(ContractError::MathOverflow)?;

        // 3. Return the principal.
        funding::push(&env, &token, &staker, amount)?;

        ledger::store_account(&env, &staker, &checkpoint);
        ledger::set_total_staked(&env, new_total);
        Self::extend_instance_ttl(&env);

        events::publish_unstaked(&env, staker, amount, new_total);

        Ok(())
    }

    // ── Rewards ─────────────────────────────────────────────────────────────

    /// Pay out everything `staker` has earned, from the reward fund.
    ///
    /// Fails with `NoRewardsToHarvest` when nothing is owed, so a repeated
    /// harvest never succeeds with a zero transfer, and with `BadPoolBalance`
    /// when the pool no longer covers stake plus reward fund.
    pub fn harvest(env: Env, staker: Address) -> Result<i128, ContractError> {
        let token = Self::require_initialized(&env)?;
        staker.require_auth();

        let mut checkpoint = ledger::settle(&env, &staker)?;
        let payout = checkpoint.rewards_accrued;
        if payout == 0 {
            return Err(ContractError::NoRewardsToHarvest);
        }

        let fund = ledger::reward_fund(&env);
        if fund < payout {
            return Err(ContractError::InsufficientRewardBalance);
        }
        // Rewards are paid from the reward fund only, never from principal.
        funding::unallocated(&env, &token)?;

        let new_fund = fund - payout;
        checkpoint.rewards_accrued = 0;

        funding::push(&env, &token, &staker, payout)?;

        ledger::store_account(&env, &staker, &checkpoint);
        ledger::set_reward_fund(&env, new_fund);
        Self::extend_instance_ttl(&env);

        events::publish_harvested(&env, staker, payout, new_fund);

        Ok(payout)
    }

    /// Move `amount` reward tokens from the pool owner into the pool without
    /// distributing them. They stay unallocated until `distribute_only`.
    pub fn inject_reward(env: Env, caller: Address, amount: i128) -> Result<(), ContractError> {
        let token = Self::require_initialized(&env)?;
        caller.require_auth();
        access::require_pool_owner(&env, &caller)?;

        if amount <= 0 {
            return Err(ContractError::InvalidAmount);
        }

        funding::transfer_direct(&env, &token, &caller, &env.current_contract_address(), amount)?;
        Self::extend_instance_ttl(&env);

        events::publish_reward_injected(&env, caller, amount);

        Ok(())
    }

    /// Distribute `amount` out of tokens the pool already holds unallocated.
    ///
    /// Any unallocated balance counts, however it arrived. Fails with
    /// `BadPoolBalance` if the pool no longer covers stake plus reward fund,
    /// and with `InsufficientRewardFund` if the unallocated part is short.
    pub fn distribute_only(env: Env, caller: Address, amount: i128) -> Result<(), ContractError> {
        let token = Self::require_initialized(&env)?;
        caller.require_auth();
        access::require_pool_owner(&env, &caller)?;

        if amount <= 0 {
            return Err(ContractError::InvalidAmount);
        }

        let allocation = ledger::plan_allocation(&env, amount)?;
        funding::require_unallocated(&env, &token, amount)?;

        ledger::commit_allocation(&env, &allocation);
        Self::extend_instance_ttl(&env);

        events::publish_reward_distributed(
            &env,
            caller,
            amount,
            FundingSource::Unallocated,
            allocation.reward_per_token,
            allocation.reward_fund,
        );

        Ok(())
    }

    /// Pull `amount` from the pool owner through its allowance and
    /// distribute it in the same call.
    ///
    /// A rejected pull fails the whole call; the accumulator never advances
    /// on tokens that did not arrive.
    pub fn fund_and_distribute(
        env: Env,
        caller: Address,
        amount: i128,
    ) -> Result<(), ContractError> {
        let token = Self::require_initialized(&env)?;
        caller.require_auth();
        access::require_pool_owner(&env, &caller)?;

        if amount <= 0 {
            return Err(ContractError::InvalidAmount);
        }

        let allocation = ledger::plan_allocation(&env, amount)?;
        // Refuse to stack new rewards on a pool that is already short.
        funding::unallocated(&env, &token)?;

        funding::pull_approved(&env, &token, &caller, amount)?;

        ledger::commit_allocation(&env, &allocation);
        Self::extend_instance_ttl(&env);

        events::publish_reward_distributed(
            &env,
            caller,
            amount,
            FundingSource::Pulled,
            allocation.reward_per_token,
            allocation.reward_fund,
        );

        Ok(())
    }

    /// Admin overpayment escape hatch: the token owner pays `to` straight
    /// from its own balance.
    ///
    /// This is not a harvest. The pool's stake, accumulator, and reward fund
    /// are untouched, and nothing `to` has earned in the pool is reduced.
    pub fn reward_transfer(
        env: Env,
        caller: Address,
        to: Address,
        amount: i128,
    ) -> Result<(), ContractError> {
        let token = Self::require_initialized(&env)?;
        caller.require_auth();
        access::require_token_owner(&env, &token, &caller)?;

        if amount <= 0 {
            return Err(ContractError::InvalidAmount);
        }

        funding::transfer_direct(&env, &token, &caller, &to, amount)?;

        events::publish_reward_transferred(&env, caller, to, amount);

        Ok(())
    }

    // ── View functions ───────────────────────────────────────────────────────

    /// Return the account's current staked balance.
    pub fn staked_of(env: Env, account: Address) -> i128 {
        ledger::load_account(&env, &account).staked
    }

    /// Return the sum of all currently staked tokens.
    pub fn total_staked(env: Env) -> i128 {
        ledger::total_staked(&env)
    }

    /// Return what `account` could harvest right now, without settling.
    pub fn earned(env: Env, account: Address) -> Result<i128, ContractError> {
        ledger::earned(&env, &account)
    }

    /// Return the reward allocated to accounts but not yet harvested.
    pub fn reward_fund(env: Env) -> i128 {
        ledger::reward_fund(&env)
    }

    /// Return the accumulator, scaled by `rewards::PRECISION`.
    pub fn reward_per_token_stored(env: Env) -> i128 {
        ledger::reward_per_token(&env)
    }

    /// Return the pool's token balance not backing stake or the reward fund.
    pub fn unallocated_reward(env: Env) -> Result<i128, ContractError> {
        let token = Self::require_initialized(&env)?;
        funding::unallocated(&env, &token)
    }

    /// Return the full checkpoint of `account` plus its live `earned`.
    pub fn account_info(env: Env, account: Address) -> Result<AccountInfo, ContractError> {
        let checkpoint = ledger::load_account(&env, &account);
        let earned = rewards::earned(
            &env,
            checkpoint.staked,
            ledger::reward_per_token(&env),
            checkpoint.reward_per_token_paid,
            checkpoint.rewards_accrued,
        )?;

        Ok(AccountInfo {
            staked: checkpoint.staked,
            reward_per_token_paid: checkpoint.reward_per_token_paid,
            rewards_accrued: checkpoint.rewards_accrued,
            earned,
        })
    }

    pub fn is_initialized(env: Env) -> bool {
        env.storage().instance().has(&INITIALIZED)
    }

    pub fn asset_token(env: Env) -> Result<Address, ContractError> {
        Self::require_initialized(&env)
    }

    /// Token decimals, for display only; all amounts are base units.
    pub fn token_decimals(env: Env) -> Result<u32, ContractError> {
        let token = Self::require_initialized(&env)?;
        Ok(token::Client::new(&env, &token).decimals())
    }

    /// `None` once ownership has been renounced.
    pub fn pool_owner(env: Env) -> Option<Address> {
        ownable::get_owner(&env)
    }

    pub fn token_owner(env: Env) -> Result<Address, ContractError> {
        let token = Self::require_initialized(&env)?;
        Ok(access::token_owner(&env, &token))
    }

    // ── Ownership ────────────────────────────────────────────────────────────

    /// Hand the pool-owner role to `new_owner`. Only the current owner can
    /// call this; the token-owner role is unaffected.
    pub fn transfer_ownership(
        env: Env,
        caller: Address,
        new_owner: Address,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();

        if !ownable::transfer_ownership(&env, &caller, &new_owner) {
            return Err(ContractError::NotPoolOwner);
        }

        events::publish_ownership_transferred(&env, caller, Some(new_owner));

        Ok(())
    }

    /// Give up the pool-owner role for good. Funding and distribution are
    /// closed afterwards; staking, unstaking, and harvesting keep working.
    pub fn renounce_ownership(env: Env, caller: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();

        if !ownable::renounce_ownership(&env, &caller) {
            return Err(ContractError::NotPoolOwner);
        }

        events::publish_ownership_transferred(&env, caller, None);

        Ok(())
    }

    // ── Internal helpers ─────────────────────────────────────────────────────

    /// Guard: revert if the pool is not yet initialized. Returns the asset
    /// token address.
    fn require_initialized(env: &Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&TOKEN)
            .ok_or(ContractError::NotInitialized)
    }

    fn extend_instance_ttl(env: &Env) {
        env.storage()
            .instance()
            .extend_ttl(TTL_THRESHOLD, TTL_EXTEND_TO);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
