//! Property-based tests for reward distribution arithmetic.
//!
//! Invariants tested:
//! - Stakes in ratio `r:1` earn in ratio `r:1`, off by less than `r` base units
//! - Repeated distributions lose at most one base unit per distribution plus
//!   one per account, and never credit more than was distributed
//! - A harvest directly followed by another harvest always fails
//! - Distributing with nothing staked always fails and moves no tokens

use proptest::prelude::*;
use soroban_sdk::token::Client as TokenClient;
use staking_pool::ContractError;

use crate::fixture::Fixture;

const UNIT: i128 = 10_000_000;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_rewards_follow_stake_ratio(
        ratio in 1i128..50,
        base in 1i128..1_000 * UNIT,
        amount in 1i128..1_000_000 * UNIT,
    ) {
        let f = Fixture::new(2);
        f.stake(0, ratio * base);
        f.stake(1, base);
        f.fund(amount);

        let big = f.client.earned(&f.accounts[0]);
        let small = f.client.earned(&f.accounts[1]);

        prop_assert!(big >= ratio * small, "{} < {} × {}", big, ratio, small);
        prop_assert!(big - ratio * small < ratio, "{} − {} × {} ≥ {}", big, ratio, small, ratio);
        prop_assert!(big + small <= amount);
    }

    #[test]
    fn prop_truncation_bounded_per_distribution(
        stakes in prop::collection::vec(1i128..10_000 * UNIT, 1..6),
        amounts in prop::collection::vec(1i128..1_000 * UNIT, 1..8),
    ) {
        let f = Fixture::new(stakes.len());
        for (i, stake) in stakes.iter().enumerate() {
            f.stake(i, *stake);
        }
        for amount in &amounts {
            f.fund(*amount);
        }

        let distributed: i128 = amounts.iter().sum();
        let credited = f.earned_sum();
        let lost = distributed - credited;

        // Total stake stays below PRECISION, so the accumulator drops less
        // than one base unit per distribution regardless of account count.
        // The `stakes.len()` term is not distribution loss: it comes from
        // `earned` flooring each account's share once when it is read.
        let bound = amounts.len() as i128 + stakes.len() as i128;
        prop_assert!(lost >= 0, "credited {} more than distributed", -lost);
        prop_assert!(lost <= bound, "lost {} > bound {}", lost, bound);
    }

    #[test]
    fn prop_second_harvest_always_fails(
        stake in 1i128..10_000 * UNIT,
        amount in UNIT..1_000 * UNIT,
    ) {
        let f = Fixture::new(1);
        let account = &f.accounts[0];
        f.stake(0, stake);
        f.fund(amount);

        let paid = f.client.harvest(account);
        prop_assert!(paid > 0);

        let token = TokenClient::new(&f.env, &f.token);
        let balance = token.balance(account);
        match f.client.try_harvest(account) {
            Err(Ok(e)) => prop_assert_eq!(e, ContractError::NoRewardsToHarvest),
            other => prop_assert!(false, "expected NoRewardsToHarvest, got {:?}", other),
        }
        prop_assert_eq!(token.balance(account), balance);
    }

    #[test]
    fn prop_distribution_without_stake_fails(amount in 1i128..1_000_000 * UNIT) {
        let f = Fixture::new(1);
        f.provision(&f.owner, amount);

        match f.client.try_fund_and_distribute(&f.owner, &amount) {
            Err(Ok(e)) => prop_assert_eq!(e, ContractError::PoolUnfunded),
            other => prop_assert!(false, "expected PoolUnfunded, got {:?}", other),
        }

        let token = TokenClient::new(&f.env, &f.token);
        prop_assert_eq!(token.balance(&f.owner), amount);
        prop_assert_eq!(f.client.reward_per_token_stored(), 0);
        prop_assert_eq!(f.client.reward_fund(), 0);
    }
}
