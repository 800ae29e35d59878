#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use soroban_sdk::{
    testutils::Address as _,
    token::{Client as TokenClient, StellarAssetClient},
    Address, Env,
};
use staking_pool::{StakingPool, StakingPoolClient};

#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    Stake { user: u8, amount: u32 },
    Unstake { user: u8, amount: u32 },
    Harvest { user: u8 },
    Inject { amount: u32 },
    DistributeOnly { amount: u32 },
    FundAndDistribute { amount: u32 },
    StrayTransfer { amount: u32 },
}

const USERS: usize = 4;

fuzz_target!(|actions: Vec<FuzzAction>| {
    let env = Env::default();
    env.mock_all_auths();

    let token_admin = Address::generate(&env);
    let token = env
        .register_stellar_asset_contract_v2(token_admin)
        .address();
    let sac = StellarAssetClient::new(&env, &token);
    let token_client = TokenClient::new(&env, &token);

    let contract_id = env.register(StakingPool, ());
    let client = StakingPoolClient::new(&env, &contract_id);

    let owner = Address::generate(&env);
    client.initialize(&owner, &token);

    let users: Vec<Address> = (0..USERS).map(|_| Address::generate(&env)).collect();
    let expiration = env.ledger().sequence() + 100_000;

    // Mint generously up front so the interesting failures are the pool's,
    // not the token's.
    for user in users.iter().chain(core::iter::once(&owner)) {
        sac.mint(user, &(u32::MAX as i128 * 64));
        token_client.approve(user, &contract_id, &(i64::MAX as i128), &expiration);
    }

    let mut last_rpt = 0i128;

    for action in actions {
        match action {
            FuzzAction::Stake { user, amount } => {
                let _ = client.try_stake(&users[user as usize % USERS], &(amount as i128));
            }
            FuzzAction::Unstake { user, amount } => {
                let _ = client.try_unstake(&users[user as usize % USERS], &(amount as i128));
            }
            FuzzAction::Harvest { user } => {
                let _ = client.try_harvest(&users[user as usize % USERS]);
            }
            FuzzAction::Inject { amount } => {
                let _ = client.try_inject_reward(&owner, &(amount as i128));
            }
            FuzzAction::DistributeOnly { amount } => {
                let _ = client.try_distribute_only(&owner, &(amount as i128));
            }
            FuzzAction::FundAndDistribute { amount } => {
                let _ = client.try_fund_and_distribute(&owner, &(amount as i128));
            }
            FuzzAction::StrayTransfer { amount } => {
                sac.mint(&contract_id, &(amount as i128));
            }
        }

        let staked_sum: i128 = users.iter().map(|u| client.staked_of(u)).sum();
        assert_eq!(client.total_staked(), staked_sum);

        let rpt = client.reward_per_token_stored();
        assert!(rpt >= last_rpt);
        last_rpt = rpt;

        let earned_sum: i128 = users.iter().map(|u| client.earned(u)).sum();
        assert!(earned_sum <= client.reward_fund());
        assert!(client.try_unallocated_reward().is_ok());
    }
});
