//! Property-based state machine tests for the StakingPool contract.
//!
//! Random sequences of stake / unstake / harvest / distribute are applied
//! and the pool is checked after every step.
//!
//! Invariants tested:
//! - `total_staked` equals the sum of every account's stake
//! - `reward_per_token_stored` never decreases
//! - the pool balance covers staked principal plus the reward fund
//! - the reward fund covers everything accounts could harvest
//! - failed operations leave the pool exactly as it was

use proptest::prelude::*;
use proptest_derive::Arbitrary;
use staking_pool::ContractError;

use crate::fixture::Fixture;

const ACCOUNTS: usize = 3;
const UNIT: i128 = 10_000_000;

#[derive(Clone, Debug, Arbitrary)]
enum Op {
    Stake(
        #[proptest(strategy = "0..ACCOUNTS")] usize,
        #[proptest(strategy = "1i128..1_000 * UNIT")] i128,
    ),
    Unstake(
        #[proptest(strategy = "0..ACCOUNTS")] usize,
        #[proptest(strategy = "1i128..1_000 * UNIT")] i128,
    ),
    Harvest(#[proptest(strategy = "0..ACCOUNTS")] usize),
    Distribute(#[proptest(strategy = "1i128..100 * UNIT")] i128),
}

/// Everything a failed call must leave untouched.
#[derive(Debug, PartialEq)]
struct Snapshot {
    total_staked: i128,
    reward_per_token: i128,
    reward_fund: i128,
    stakes: Vec<i128>,
}

fn snapshot(f: &Fixture) -> Snapshot {
    Snapshot {
        total_staked: f.client.total_staked(),
        reward_per_token: f.client.reward_per_token_stored(),
        reward_fund: f.client.reward_fund(),
        stakes: f.accounts.iter().map(|a| f.client.staked_of(a)).collect(),
    }
}

fn apply(f: &Fixture, op: &Op) -> Result<(), TestCaseError> {
    match *op {
        Op::Stake(i, amount) => f.stake(i, amount),
        Op::Unstake(i, amount) => {
            let account = &f.accounts[i];
            let staked = f.client.staked_of(account);
            let before = snapshot(f);
            match f.client.try_unstake(account, &amount) {
                Ok(_) => prop_assert!(amount <= staked),
                Err(Ok(e)) => {
                    prop_assert_eq!(e, ContractError::InsufficientStakedBalance);
                    prop_assert!(amount > staked);
                    prop_assert_eq!(snapshot(f), before);
                }
                Err(Err(e)) => prop_assert!(false, "unstake aborted: {:?}", e),
            }
        }
        Op::Harvest(i) => {
            let account = &f.accounts[i];
            let owed = f.client.earned(account);
            match f.client.try_harvest(account) {
                Ok(Ok(paid)) => prop_assert_eq!(paid, owed),
                Ok(Err(e)) => prop_assert!(false, "bad return value: {:?}", e),
                Err(Ok(e)) => {
                    prop_assert_eq!(e, ContractError::NoRewardsToHarvest);
                    prop_assert_eq!(owed, 0);
                }
                Err(Err(e)) => prop_assert!(false, "harvest aborted: {:?}", e),
            }
        }
        Op::Distribute(amount) => {
            if f.client.total_staked() == 0 {
                f.provision(&f.owner, amount);
                let before = snapshot(f);
                match f.client.try_fund_and_distribute(&f.owner, &amount) {
                    Err(Ok(e)) => prop_assert_eq!(e, ContractError::PoolUnfunded),
                    other => prop_assert!(false, "expected PoolUnfunded, got {:?}", other),
                }
                prop_assert_eq!(snapshot(f), before);
            } else {
                f.fund(amount);
            }
        }
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    /// Pool invariants hold after every step of any operation sequence.
    #[test]
    fn prop_pool_invariants_hold(ops in prop::collection::vec(any::<Op>(), 1..25)) {
        let f = Fixture::new(ACCOUNTS);
        let mut last_rpt = 0i128;

        for op in &ops {
            apply(&f, op)?;

            prop_assert_eq!(f.client.total_staked(), f.staked_sum());

            let rpt = f.client.reward_per_token_stored();
            prop_assert!(rpt >= last_rpt, "accumulator went backwards: {} < {}", rpt, last_rpt);
            last_rpt = rpt;

            prop_assert!(f.client.try_unallocated_reward().is_ok(), "pool balance below commitments");
            prop_assert!(f.earned_sum() <= f.client.reward_fund());
        }
    }
}
