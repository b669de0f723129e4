#![cfg(test)]
extern crate std;

use crate::contract::{VolatilePool, VolatilePoolClient};
use soroban_sdk::token::{StellarAssetClient, TokenClient};
use soroban_sdk::{testutils::Address as _, Address, Env, Vec};

pub(crate) fn create_token_contract<'a>(e: &Env, admin: &Address) -> TokenClient<'a> {
    TokenClient::new(
        e,
        &e.register_stellar_asset_contract_v2(admin.clone()).address(),
    )
}

pub(crate) fn get_token_admin_client<'a>(e: &Env, address: &Address) -> StellarAssetClient<'a> {
    StellarAssetClient::new(e, address)
}

pub(crate) struct TestConfig {
    pub(crate) users_count: u32,
    pub(crate) mint_to_user: i128,
    pub(crate) swap_fee: u128,
    pub(crate) admin_fee: u128,
}

impl Default for TestConfig {
    fn default() -> Self {
        TestConfig {
            users_count: 2,
            mint_to_user: 1_000_000_0000000,
            swap_fee: 30_000_000, // 0.3%
            admin_fee: 0,
        }
    }
}

pub(crate) struct Setup<'a> {
    pub(crate) env: Env,
    pub(crate) admin: Address,
    pub(crate) operations_admin: Address,
    pub(crate) users: std::vec::Vec<Address>,
    pub(crate) token0: TokenClient<'a>,
    pub(crate) token1: TokenClient<'a>,
    pub(crate) pool: VolatilePoolClient<'a>,
}

impl Default for Setup<'_> {
    fn default() -> Self {
        Self::new_with_config(&TestConfig::default())
    }
}

impl Setup<'_> {
    pub(crate) fn new_with_config(config: &TestConfig) -> Self {
        let e = Env::default();
        e.mock_all_auths();
        e.cost_estimate().budget().reset_unlimited();

        let admin = Address::generate(&e);
        let operations_admin = Address::generate(&e);
        let token_admin = Address::generate(&e);

        let mut token0 = create_token_contract(&e, &token_admin);
        let mut token1 = create_token_contract(&e, &token_admin);
        if token1.address < token0.address {
            std::mem::swap(&mut token0, &mut token1);
        }

        let pool = VolatilePoolClient::new(&e, &e.register(VolatilePool, ()));
        pool.initialize(
            &admin,
            &operations_admin,
            &Vec::from_array(&e, [token0.address.clone(), token1.address.clone()]),
            &config.swap_fee,
            &config.admin_fee,
        );

        let mut users = std::vec::Vec::new();
        for _ in 0..config.users_count {
            let user = Address::generate(&e);
            get_token_admin_client(&e, &token0.address).mint(&user, &config.mint_to_user);
            get_token_admin_client(&e, &token1.address).mint(&user, &config.mint_to_user);
            users.push(user);
        }

        Setup {
            env: e,
            admin,
            operations_admin,
            users,
            token0,
            token1,
            pool,
        }
    }

    // Sends both amounts to the pool and mints shares for `user`.
    pub(crate) fn deposit(&self, user: &Address, amount0: u128, amount1: u128) -> u128 {
        self.token0
            .transfer(user, &self.pool.address, &(amount0 as i128));
        self.token1
            .transfer(user, &self.pool.address, &(amount1 as i128));
        self.pool.mint(user)
    }

    // Sends `amount_in` of the token at `in_idx` and swaps it for the quoted output.
    pub(crate) fn swap_exact_in(&self, user: &Address, in_idx: u32, amount_in: u128) -> u128 {
        let (token_in, token_out) = if in_idx == 0 {
            (&self.token0, &self.token1)
        } else {
            (&self.token1, &self.token0)
        };
        let amount_out = self
            .pool
            .get_amount_out(&token_in.address, &token_out.address, &amount_in);
        token_in.transfer(user, &self.pool.address, &(amount_in as i128));
        let (amount0_out, amount1_out) = if in_idx == 0 {
            (0, amount_out)
        } else {
            (amount_out, 0)
        };
        self.pool.swap(
            &amount0_out,
            &amount1_out,
            user,
            &soroban_sdk::Bytes::new(&self.env),
        );
        amount_out
    }
}
