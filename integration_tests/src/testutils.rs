#![cfg(test)]
extern crate std;

use soroban_liquidity_pool_router_contract::{
    LiquidityPoolRouter, LiquidityPoolRouterClient, Route,
};
use soroban_pool_registry_contract::constants::{POOL_TYPE_STABLE, POOL_TYPE_VOLATILE};
use soroban_pool_registry_contract::{PoolRegistry, PoolRegistryClient};
use soroban_sdk::testutils::Address as _;
use soroban_sdk::token::{StellarAssetClient, TokenClient};
use soroban_sdk::{Address, Env, String, Vec};
use soroban_stableswap_pool_contract::{StablePool, StablePoolClient};
use soroban_volatile_pool_contract::{VolatilePool, VolatilePoolClient};
use soroban_wrapped_native_contract::{WrappedNative, WrappedNativeClient};

pub(crate) const MINT_TO_USER: i128 = 10_000_000_0000000;

pub(crate) fn create_token_contract<'a>(e: &Env, admin: &Address) -> TokenClient<'a> {
    TokenClient::new(
        e,
        &e.register_stellar_asset_contract_v2(admin.clone()).address(),
    )
}

pub(crate) struct Setup<'a> {
    pub(crate) env: Env,
    pub(crate) admin: Address,
    pub(crate) token_admin: Address,
    pub(crate) native: TokenClient<'a>,
    pub(crate) wrapped: WrappedNativeClient<'a>,
    pub(crate) registry: PoolRegistryClient<'a>,
    pub(crate) router: LiquidityPoolRouterClient<'a>,
}

impl Default for Setup<'_> {
    fn default() -> Self {
        Self::setup()
    }
}

impl Setup<'_> {
    pub(crate) fn setup() -> Self {
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

        let registry = PoolRegistryClient::new(&e, &e.register(PoolRegistry, ()));
        registry.initialize(&admin);

        let router = LiquidityPoolRouterClient::new(&e, &e.register(LiquidityPoolRouter, ()));
        router.initialize(&admin, &registry.address, &wrapped.address);

        Self {
            env: e,
            admin,
            token_admin,
            native,
            wrapped,
            registry,
            router,
        }
    }

    // Fresh tokens sorted by address.
    pub(crate) fn create_tokens(&self, count: usize) -> std::vec::Vec<Address> {
        let mut tokens: std::vec::Vec<Address> = (0..count)
            .map(|_| create_token_contract(&self.env, &self.token_admin).address)
            .collect();
        tokens.sort();
        tokens
    }

    pub(crate) fn pool_tokens(&self, tokens: &[Address]) -> Vec<Address> {
        let mut sorted = std::vec::Vec::from(tokens);
        sorted.sort();
        Vec::from_slice(&self.env, &sorted)
    }

    pub(crate) fn deploy_volatile_pool(&self, tokens: &[Address]) -> VolatilePoolClient {
        let tokens = self.pool_tokens(tokens);
        let pool = VolatilePoolClient::new(&self.env, &self.env.register(VolatilePool, ()));
        pool.initialize(&self.admin, &self.admin, &tokens, &30_000_000, &0);
        self.registry
            .register_pool(&self.admin, &tokens, &POOL_TYPE_VOLATILE, &pool.address);
        pool
    }

    pub(crate) fn deploy_stable_pool(&self, tokens: &[Address]) -> StablePoolClient {
        let tokens = self.pool_tokens(tokens);
        let pool = StablePoolClient::new(&self.env, &self.env.register(StablePool, ()));
        pool.initialize(&self.admin, &self.admin, &tokens, &85, &4_000_000, &0);
        self.registry
            .register_pool(&self.admin, &tokens, &POOL_TYPE_STABLE, &pool.address);
        pool
    }

    // A user holding `MINT_TO_USER` of the native asset and of every token.
    pub(crate) fn funded_user(&self, tokens: &[Address]) -> Address {
        let user = Address::generate(&self.env);
        StellarAssetClient::new(&self.env, &self.native.address).mint(&user, &MINT_TO_USER);
        for token in tokens.iter() {
            StellarAssetClient::new(&self.env, token).mint(&user, &MINT_TO_USER);
        }
        user
    }

    // Deposits `amount` of each pool token through the router.
    pub(crate) fn seed(&self, provider: &Address, pool: &Address, pool_type: u32, amount: u128) {
        let amounts = Vec::from_array(&self.env, [amount, amount]);
        self.router.add_liquidity(
            provider,
            pool,
            &pool_type,
            &amounts,
            &Vec::from_array(&self.env, [0, 0]),
            &0,
            provider,
            &self.deadline(),
        );
    }

    pub(crate) fn deadline(&self) -> u64 {
        self.env.ledger().timestamp() + 60
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

    pub(crate) fn assert_holds_nothing(&self, holder: &Address, tokens: &[Address]) {
        for token in tokens.iter() {
            assert_eq!(self.balance(token, holder), 0);
        }
        assert_eq!(self.balance(&self.native.address, holder), 0);
        assert_eq!(self.balance(&self.wrapped.address, holder), 0);
    }
}
