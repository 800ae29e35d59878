//! Shared fixture for the property suites.

use soroban_sdk::{
    testutils::Address as _,
    token::{Client as TokenClient, StellarAssetClient},
    Address, Env,
};
use staking_pool::{StakingPool, StakingPoolClient};

pub struct Fixture {
    pub env: Env,
    pub client: StakingPoolClient<'static>,
    pub owner: Address,
    pub token: Address,
    pub accounts: Vec<Address>,
}

impl Fixture {
    pub fn new(account_count: usize) -> Self {
        let env = Env::default();
        env.mock_all_auths();

        let token_admin = Address::generate(&env);
        let token = env
            .register_stellar_asset_contract_v2(token_admin)
            .address();

        let contract_id = env.register(StakingPool, ());
        let client = StakingPoolClient::new(&env, &contract_id);

        let owner = Address::generate(&env);
        client.initialize(&owner, &token);

        let accounts = (0..account_count).map(|_| Address::generate(&env)).collect();

        Fixture {
            env,
            client,
            owner,
            token,
            accounts,
        }
    }

    /// Give `holder` exactly `amount` more tokens and let the pool pull them.
    pub fn provision(&self, holder: &Address, amount: i128) {
        StellarAssetClient::new(&self.env, &self.token).mint(holder, &amount);
        let expiration = self.env.ledger().sequence() + 1_000;
        TokenClient::new(&self.env, &self.token).approve(
            holder,
            &self.client.address,
            &amount,
            &expiration,
        );
    }

    pub fn stake(&self, index: usize, amount: i128) {
        let account = &self.accounts[index];
        self.provision(account, amount);
        self.client.stake(account, &amount);
    }

    pub fn fund(&self, amount: i128) {
        self.provision(&self.owner, amount);
        self.client.fund_and_distribute(&self.owner, &amount);
    }

    pub fn staked_sum(&self) -> i128 {
        self.accounts
            .iter()
            .map(|a| self.client.staked_of(a))
            .sum()
    }

    pub fn earned_sum(&self) -> i128 {
        self.accounts.iter().map(|a| self.client.earned(a)).sum()
    }
}
