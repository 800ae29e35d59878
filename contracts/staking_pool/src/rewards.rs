use soroban_sdk::{Env, U256};

use crate::ContractError;

/// Fixed-point scaling factor.
///
/// All reward-per-token values are multiplied by this constant before storage
/// so that a distribution smaller than the total stake still moves the
/// accumulator. Intermediate products are widened to 256 bits, so token
/// amounts with 18 decimals do not overflow.
pub const PRECISION: i128 = 1_000_000_000_000_000_000;

// ── Fixed-point helpers ─────────────────────────────────────────────────────

fn to_u256(env: &Env, value: i128) -> Result<U256, ContractError> {
    let value = u128::try_from(value).map_err(|_| ContractError::MathOverflow)?;
    Ok(U256::from_u128(env, value))
}

/// `floor(a × b / denominator)` over non-negative operands, computed in
/// 256 bits and narrowed back to `i128`.
pub fn mul_div_floor(
    env: &Env,
    a: i128,
    b: i128,
    denominator: i128,
) -> Result<i128, ContractError> {
    if denominator <= 0 {
        return Err(ContractError::MathOverflow);
    }
    let product = to_u256(env, a)?.mul(&to_u256(env, b)?);
    let quotient = product.div(&to_u256(env, denominator)?);
    quotient
        .to_u128()
        .and_then(|q| i128::try_from(q).ok())
        .ok_or(ContractError::MathOverflow)
}

// ── Core reward engine ──────────────────────────────────────────────────────

/// Accumulator increase for distributing `amount` across `total_staked`.
///
/// ```text
/// Δrpt = amount × PRECISION / total_staked      (floor)
/// ```
///
/// The floor discards less than one fixed-point unit per call, i.e. fewer
/// than `total_staked / PRECISION` base units of reward, regardless of how
/// many accounts share the stake.
///
/// Fails with `PoolUnfunded` when nothing is staked: the reward would have
/// no one to credit.
pub fn reward_per_token_delta(
    env: &Env,
    amount: i128,
    total_staked: i128,
) -> Result<i128, ContractError> {
    if total_staked <= 0 {
        return Err(ContractError::PoolUnfunded);
    }
    mul_div_floor(env, amount, PRECISION, total_staked)
}

/// Reward accrued by `staked` since the snapshot `rpt_paid`.
///
/// ```text
/// pending = staked × (current_rpt − rpt_paid) / PRECISION
/// ```
pub fn pending(
    env: &Env,
    staked: i128,
    current_rpt: i128,
    rpt_paid: i128,
) -> Result<i128, ContractError> {
    let delta = current_rpt
        .checked_sub(rpt_paid)
        .ok_or(ContractError::MathOverflow)?;
    if staked == 0 || delta == 0 {
        return Ok(0);
    }
    mul_div_floor(env, staked, delta, PRECISION)
}

/// Total unclaimed reward for one account: what was already settled into
/// its checkpoint plus whatever accrued since.
pub fn earned(
    env: &Env,
    staked: i128,
    current_rpt: i128,
    rpt_paid: i128,
    accrued: i128,
) -> Result<i128, ContractError> {
    accrued
        .checked_add(pending(env, staked, current_rpt, rpt_paid)?)
        .ok_or(ContractError::MathOverflow)
}

// ── Unit tests ──────────────────────────────────────────────────────────────
