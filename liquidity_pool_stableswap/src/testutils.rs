#![cfg(test)]
extern crate std;

use crate::contract::{StablePool, StablePoolClient};
use soroban_sdk::token::{self, Interface as _, StellarAssetClient, TokenClient};
use soroban_sdk::{contract, contractimpl, testutils::Address as _, Address, Env, String, Vec};
use token_share::{mint_shares, read_decimal, read_name, read_symbol, write_metadata};

const ASSET_DECIMALS: u32 = 7;

// Plain token with configurable decimals. Stellar assets always have 7.
#[contract]
pub struct TestToken;

#[contractimpl]
impl TestToken {
    pub fn initialize(e: Env, decimal: u32) {
        write_metadata(
            &e,
            decimal,
            String::from_str(&e, "Test Token"),
            String::from_str(&e, "TEST"),
        );
    }

    pub fn mint(e: Env, to: Address, amount: i128) {
        mint_shares(&e, &to, amount as u128);
    }
}

#[contractimpl]
impl token::Interface for TestToken {
    fn allowance(e: Env, from: Address, spender: Address) -> i128 {
        token_share::token::allowance(&e, from, spender)
    }

    fn approve(e: Env, from: Address, spender: Address, amount: i128, expiration_ledger: u32) {
        token_share::token::approve(&e, from, spender, amount, expiration_ledger)
    }

    fn balance(e: Env, id: Address) -> i128 {
        token_share::token::balance(&e, id)
    }

    fn transfer(e: Env, from: Address, to: Address, amount: i128) {
        token_share::token::transfer(&e, from, to, amount)
    }

    fn transfer_from(e: Env, spender: Address, from: Address, to: Address, amount: i128) {
        token_share::token::transfer_from(&e, spender, from, to, amount)
    }

    fn burn(e: Env, from: Address, amount: i128) {
        token_share::token::burn(&e, from, amount)
    }

    fn burn_from(e: Env, spender: Address, from: Address, amount: i128) {
        token_share::token::burn_from(&e, spender, from, amount)
    }

    fn decimals(e: Env) -> u32 {
        read_decimal(&e)
    }

    fn name(e: Env) -> String {
        read_name(&e)
    }

    fn symbol(e: Env) -> String {
        read_symbol(&e)
    }
}

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
    pub(crate) tokens_count: u32,
    // decimals of every token, all Stellar assets when empty
    pub(crate) token_decimals: std::vec::Vec<u32>,
    pub(crate) users_count: u32,
    pub(crate) mint_to_user: i128,
    pub(crate) a: u128,
    pub(crate) swap_fee: u128,
    pub(crate) admin_fee: u128,
}

impl Default for TestConfig {
    fn default() -> Self {
        TestConfig {
            tokens_count: 2,
            token_decimals: std::vec::Vec::new(),
            users_count: 2,
            mint_to_user: 1_000_000_000_0000000,
            a: 85,
            swap_fee: 4_000_000, // 0.04%
            admin_fee: 0,
        }
    }
}

pub(crate) struct Setup<'a> {
    pub(crate) env: Env,
    pub(crate) admin: Address,
    pub(crate) operations_admin: Address,
    pub(crate) users: std::vec::Vec<Address>,
    pub(crate) tokens: std::vec::Vec<TokenClient<'a>>,
    pub(crate) pool: StablePoolClient<'a>,
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

        // (token, decimals) pairs
        let mut tokens = std::vec::Vec::new();
        for i in 0..config.tokens_count as usize {
            match config.token_decimals.get(i) {
                Some(&decimals) if decimals != ASSET_DECIMALS => {
                    let address = e.register(TestToken, ());
                    TestTokenClient::new(&e, &address).initialize(&decimals);
                    tokens.push((TokenClient::new(&e, &address), decimals));
                }
                _ => tokens.push((create_token_contract(&e, &token_admin), ASSET_DECIMALS)),
            }
        }
        tokens.sort_by(|a, b| a.0.address.cmp(&b.0.address));

        let mut token_addresses = Vec::new(&e);
        for (token, _) in tokens.iter() {
            token_addresses.push_back(token.address.clone());
        }

        let pool = StablePoolClient::new(&e, &e.register(StablePool, ()));
        pool.initialize(
            &admin,
            &operations_admin,
            &token_addresses,
            &config.a,
            &config.swap_fee,
            &config.admin_fee,
        );

        let mut users = std::vec::Vec::new();
        for _ in 0..config.users_count {
            let user = Address::generate(&e);
            for (token, decimals) in tokens.iter() {
                if *decimals == ASSET_DECIMALS {
                    get_token_admin_client(&e, &token.address).mint(&user, &config.mint_to_user);
                } else {
                    let amount = if *decimals > ASSET_DECIMALS {
                        config.mint_to_user * 10i128.pow(decimals - ASSET_DECIMALS)
                    } else {
                        config.mint_to_user / 10i128.pow(ASSET_DECIMALS - decimals)
                    };
                    TestTokenClient::new(&e, &token.address).mint(&user, &amount);
                }
            }
            users.push(user);
        }

        Setup {
            env: e,
            admin,
            operations_admin,
            users,
            tokens: tokens.into_iter().map(|(token, _)| token).collect(),
            pool,
        }
    }

    pub(crate) fn amounts(&self, values: &[u128]) -> Vec<u128> {
        Vec::from_slice(&self.env, values)
    }

    pub(crate) fn deadline(&self) -> u64 {
        self.env.ledger().timestamp() + 60
    }

    pub(crate) fn add_liquidity(&self, user: &Address, values: &[u128]) -> u128 {
        self.pool.add_liquidity(
            user,
            &self.amounts(values),
            &0,
            user,
            &self.deadline(),
        )
    }

    // Sends `amount_in` of the token at `in_idx` to the pool and swaps it.
    pub(crate) fn swap(&self, user: &Address, in_idx: u32, out_idx: u32, amount_in: u128) -> u128 {
        self.tokens[in_idx as usize].transfer(user, &self.pool.address, &(amount_in as i128));
        self.pool
            .swap(&in_idx, &out_idx, &0, user, &self.deadline())
    }

    // One whole unit of the token at `idx` in its own decimals.
    pub(crate) fn unit(&self, idx: u32) -> u128 {
        10u128.pow(self.pool.get_decimals().get_unchecked(idx))
    }

    pub(crate) fn pool_d(&self) -> u128 {
        self.pool.get_d()
    }
}
