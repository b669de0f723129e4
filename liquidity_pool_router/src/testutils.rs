#![cfg(test)]
extern crate std;

use crate::constants::{POOL_TYPE_STABLE, POOL_TYPE_VOLATILE};
use crate::contract::{LiquidityPoolRouter, LiquidityPoolRouterClient};
use crate::storage::Route;
use soroban_pool_registry_contract::{PoolRegistry, PoolRegistryClient};
use soroban_sdk::token::{StellarAssetClient, TokenClient};
use soroban_sdk::{testutils::Address as _, Address, Env, String, Vec};
use soroban_stableswap_pool_contract::{StablePool, StablePoolClient};
use soroban_volatile_pool_contract::{VolatilePool, VolatilePoolClient};
use soroban_wrapped_native_contract::{WrappedNative, WrappedNativeClient};

pub(crate) const MINT_TO_USER: i128 = 10_000_000_0000000;
pub(crate) const SEED_AMOUNT: u128 = 100_000_0000000;

pub(crate) fn create_token_contract<'a>(e: &Env, admin: &Address) -> TokenClient<'a> {
    TokenClient::new(
        e,
        &e.register_stellar_asset_contract_v2(admin.clone()).address(),
    )
}

pub(crate) fn sorted(e: &Env, a: &Address, b: &Address) -> Vec<Address> {
    if a < b {
        Vec::from_array(e, [a.clone(), b.clone()])
    } else {
        Vec::from_array(e, [b.clone(), a.clone()])
    }
}

pub(crate) struct Setup<'a> {
    pub(crate) env: Env,
    pub(crate) admin: Address,
    pub(crate) users: std::vec::Vec<Address>,
    pub(crate) native: TokenClient<'a>,
    pub(crate) wrapped: WrappedNativeClient<'a>,
    // sorted by address
    pub(crate) tokens: std::vec::Vec<TokenClient<'a>>,
    pub(crate) registry: PoolRegistryClient<'a>,
    pub(crate) router: LiquidityPoolRouterClient<'a>,
    // tokens[0] / tokens[1]
    pub(crate) volatile_pool: VolatilePoolClient<'a>,
    // tokens[1] / tokens[2]
    pub(crate) stable_pool: StablePoolClient<'a>,
    // wrapped native / tokens[0]
    pub(crate) native_volatile_pool: VolatilePoolClient<'a>,
    // wrapped native / tokens[2]
    pub(crate) native_stable_pool: StablePoolClient<'a>,
}

impl Default for Setup<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl Setup<'_> {
    pub(crate) fn new() -> Self {
        let e = Env::default();
        e.mock_all_auths();
        e.cost_estimate().budget().reset_unlimited();

        let admin = Address::generate(&e);
        let token_admin = Address::generate(&e);

        let native = create_token_contract(&e, &token_admin);
        let wrapped = WrappedNativeClient::new(&e, &e.register(WrappedNative, ()));
        wrapped.initialize(
            &native.address,
            &7,
            &String::from_str(&e, "Wrapped Lumens"),
            &String::from_str(&e, "WXLM"),
        );

        let mut tokens = std::vec::Vec::new();
        for _ in 0..3 {
            tokens.push(create_token_contract(&e, &token_admin));
        }
        tokens.sort_by(|a, b| a.address.cmp(&b.address));

        let registry = PoolRegistryClient::new(&e, &e.register(PoolRegistry, ()));
        registry.initialize(&admin);

        let router = LiquidityPoolRouterClient::new(&e, &e.register(LiquidityPoolRouter, ()));
        router.initialize(&admin, &registry.address, &wrapped.address);

        let mut users = std::vec::Vec::new();
        for _ in 0..3 {
            let user = Address::generate(&e);
            StellarAssetClient::new(&e, &native.address).mint(&user, &MINT_TO_USER);
            for token in tokens.iter() {
                StellarAssetClient::new(&e, &token.address).mint(&user, &MINT_TO_USER);
            }
            users.push(user);
        }

        let volatile_pool = Self::deploy_volatile(
            &e,
            &admin,
            &registry,
            sorted(&e, &tokens[0].address, &tokens[1].address),
        );
        let stable_pool = Self::deploy_stable(
            &e,
            &admin,
            &registry,
            sorted(&e, &tokens[1].address, &tokens[2].address),
        );
        let native_volatile_pool = Self::deploy_volatile(
            &e,
            &admin,
            &registry,
            sorted(&e, &wrapped.address, &tokens[0].address),
        );
        let native_stable_pool = Self::deploy_stable(
            &e,
            &admin,
            &registry,
            sorted(&e, &wrapped.address, &tokens[2].address),
        );

        let setup = Setup {
            env: e,
            admin,
            users,
            native,
            wrapped,
            tokens,
            registry,
            router,
            volatile_pool,
            stable_pool,
            native_volatile_pool,
            native_stable_pool,
        };
        setup.seed_pools();
        setup
    }

    fn deploy_volatile<'a>(
        e: &Env,
        admin: &Address,
        registry: &PoolRegistryClient,
        tokens: Vec<Address>,
    ) -> VolatilePoolClient<'a> {
        let pool = VolatilePoolClient::new(e, &e.register(VolatilePool, ()));
        pool.initialize(admin, admin, &tokens, &30_000_000, &0);
        registry.register_pool(admin, &tokens, &POOL_TYPE_VOLATILE, &pool.address);
        pool
    }

    fn deploy_stable<'a>(
        e: &Env,
        admin: &Address,
        registry: &PoolRegistryClient,
        tokens: Vec<Address>,
    ) -> StablePoolClient<'a> {
        let pool = StablePoolClient::new(e, &e.register(StablePool, ()));
        pool.initialize(admin, admin, &tokens, &85, &4_000_000, &0);
        registry.register_pool(admin, &tokens, &POOL_TYPE_STABLE, &pool.address);
        pool
    }

    // Every pool starts with `SEED_AMOUNT` of each token from a dedicated provider.
    fn seed_pools(&self) {
        let e = &self.env;
        let provider = Address::generate(e);
        StellarAssetClient::new(e, &self.native.address).mint(&provider, &MINT_TO_USER);
        for token in self.tokens.iter() {
            StellarAssetClient::new(e, &token.address).mint(&provider, &MINT_TO_USER);
        }
        self.wrapped
            .deposit(&provider, &provider, &(2 * SEED_AMOUNT));

        for pool in [&self.volatile_pool, &self.native_volatile_pool] {
            for token in pool.get_tokens().iter() {
                TokenClient::new(e, &token).transfer(
                    &provider,
                    &pool.address,
                    &(SEED_AMOUNT as i128),
                );
            }
            pool.mint(&provider);
        }
        for pool in [&self.stable_pool, &self.native_stable_pool] {
            pool.add_liquidity(
                &provider,
                &Vec::from_array(e, [SEED_AMOUNT, SEED_AMOUNT]),
                &0,
                &provider,
                &self.deadline(),
            );
        }
    }

    pub(crate) fn deadline(&self) -> u64 {
        self.env.ledger().timestamp() + 60
    }

    pub(crate) fn amounts(&self, values: &[u128]) -> Vec<u128> {
        Vec::from_slice(&self.env, values)
    }

    pub(crate) fn route(
        &self,
        token_in: &Address,
        token_out: &Address,
        pool: &Address,
        pool_type: u32,
    ) -> Route {
        Route {
            token_in: token_in.clone(),
            token_out: token_out.clone(),
            pool: pool.clone(),
            pool_type,
        }
    }

    pub(crate) fn balance(&self, token: &Address, id: &Address) -> u128 {
        TokenClient::new(&self.env, token).balance(id) as u128
    }

    // Index of the wrapped native token in a native pool.
    pub(crate) fn native_idx(&self, pool_tokens: &Vec<Address>) -> u32 {
        if pool_tokens.get_unchecked(0) == self.wrapped.address {
            0
        } else {
            1
        }
    }

    pub(crate) fn assert_router_empty(&self) {
        let router = &self.router.address;
        let mut held = std::vec![
            self.native.address.clone(),
            self.wrapped.address.clone(),
            self.volatile_pool.address.clone(),
            self.stable_pool.address.clone(),
            self.native_volatile_pool.address.clone(),
            self.native_stable_pool.address.clone(),
        ];
        held.extend(self.tokens.iter().map(|token| token.address.clone()));
        for token in held.iter() {
            assert_eq!(self.balance(token, router), 0);
        }
    }

    pub(crate) fn assert_native_backed(&self) {
        assert_eq!(
            self.wrapped.total_supply(),
            self.balance(&self.native.address, &self.wrapped.address)
        );
    }
}
