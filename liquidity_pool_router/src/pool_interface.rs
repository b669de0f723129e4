use soroban_sdk::{contractclient, Address, Bytes, BytesN, Env, Vec};

// Surface shared by both pool kinds.
#[contractclient(name = "LiquidityPoolClient")]
pub trait LiquidityPoolInterface {
    fn pool_type(e: Env) -> u32;

    fn get_tokens(e: Env) -> Vec<Address>;

    fn get_reserves(e: Env) -> Vec<u128>;

    fn get_real_balances(e: Env) -> Vec<u128>;

    fn get_amount_out(e: Env, token_in: Address, token_out: Address, amount_in: u128) -> u128;

    fn get_total_shares(e: Env) -> u128;

    fn permit(
        e: Env,
        owner: Address,
        spender: Address,
        amount: i128,
        expiration_ledger: u32,
        deadline: u64,
        signature: BytesN<64>,
    );
}

#[contractclient(name = "VolatilePoolClient")]
pub trait VolatilePoolInterface {
    fn swap(e: Env, amount0_out: u128, amount1_out: u128, to: Address, data: Bytes);

    fn mint(e: Env, to: Address) -> u128;

    fn burn(e: Env, to: Address) -> Vec<u128>;
}

#[contractclient(name = "StablePoolClient")]
pub trait StablePoolInterface {
    fn swap(e: Env, in_idx: u32, out_idx: u32, out_min: u128, to: Address, deadline: u64) -> u128;

    fn add_liquidity(
        e: Env,
        user: Address,
        amounts: Vec<u128>,
        min_mint: u128,
        to: Address,
        deadline: u64,
    ) -> u128;

    fn remove_liquidity(
        e: Env,
        owner: Address,
        liquidity: u128,
        min_amounts: Vec<u128>,
        to: Address,
        deadline: u64,
    ) -> Vec<u128>;

    fn remove_liquidity_one_token(
        e: Env,
        owner: Address,
        liquidity: u128,
        token_idx: u32,
        min_amount: u128,
        to: Address,
        deadline: u64,
    ) -> u128;

    fn remove_liquidity_imbalance(
        e: Env,
        owner: Address,
        amounts: Vec<u128>,
        max_burn: u128,
        to: Address,
        deadline: u64,
    ) -> u128;

    fn calc_add_liquidity(e: Env, amounts: Vec<u128>) -> u128;

    fn calc_remove_liquidity(e: Env, liquidity: u128) -> Vec<u128>;

    fn calc_remove_liquidity_one_token(e: Env, liquidity: u128, token_idx: u32) -> u128;

    fn calc_remove_liquidity_imbalance(e: Env, amounts: Vec<u128>) -> u128;
}

#[contractclient(name = "RegistryClient")]
pub trait RegistryInterface {
    fn get_pool(e: Env, tokens: Vec<Address>, pool_type: u32) -> Option<Address>;
}

#[contractclient(name = "WrappedNativeClient")]
pub trait WrappedNativeInterface {
    fn deposit(e: Env, from: Address, to: Address, amount: u128);

    fn withdraw(e: Env, from: Address, to: Address, amount: u128);
}
