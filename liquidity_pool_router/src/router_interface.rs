use crate::storage::{PermitParams, Route};
use soroban_sdk::{Address, Env, Vec};

pub trait AdminInterface {
    // Sets the admin, the pool registry and the wrapped native token. Panics if called twice.
    fn initialize(e: Env, admin: Address, registry: Address, wrapped_native: Address);

    fn get_registry(e: Env) -> Address;

    fn get_wrapped_native(e: Env) -> Address;
}

pub trait QuoteInterface {
    // Registered pool of `pool_type` for the sorted `tokens`, if any. Never fails.
    fn pair_for(e: Env, tokens: Vec<Address>, pool_type: u32) -> Option<Address>;

    // Input amount followed by the output of every hop.
    fn get_amounts_out_path(e: Env, amount_in: u128, routes: Vec<Route>) -> Vec<u128>;

    // Amounts a deposit would use and the shares it would mint.
    fn quote_add_liquidity(
        e: Env,
        pool: Address,
        pool_type: u32,
        amounts: Vec<u128>,
    ) -> (Vec<u128>, u128);

    fn quote_remove_liquidity(e: Env, pool: Address, liquidity: u128) -> Vec<u128>;

    fn quote_remove_liquidity_one_token(
        e: Env,
        pool: Address,
        liquidity: u128,
        token_idx: u32,
    ) -> u128;

    fn quote_remove_liquidity_imbalance(e: Env, pool: Address, amounts: Vec<u128>) -> u128;
}

pub trait SwapInterface {
    // Trades `amount_in` of the first hop's input through every hop.
    fn swap(
        e: Env,
        user: Address,
        routes: Vec<Route>,
        amount_in: u128,
        amount_out_min: u128,
        to: Address,
        deadline: u64,
    ) -> u128;

    // Like `swap`, wrapping a native input and unwrapping a native output.
    // `native_amount` is `amount_in` when the input is native and zero otherwise.
    #[allow(clippy::too_many_arguments)]
    fn swap_native(
        e: Env,
        user: Address,
        routes: Vec<Route>,
        amount_in: u128,
        amount_out_min: u128,
        to: Address,
        deadline: u64,
        native_amount: u128,
    ) -> u128;
}

#[allow(clippy::too_many_arguments)]
pub trait LiquidityInterface {
    fn add_liquidity(
        e: Env,
        user: Address,
        pool: Address,
        pool_type: u32,
        desired_amounts: Vec<u128>,
        min_amounts: Vec<u128>,
        min_liquidity: u128,
        to: Address,
        deadline: u64,
    ) -> (Vec<u128>, u128);

    // `native_amount` must equal the desired amount of the wrapped native token.
    fn add_liquidity_native(
        e: Env,
        user: Address,
        pool: Address,
        pool_type: u32,
        desired_amounts: Vec<u128>,
        min_amounts: Vec<u128>,
        min_liquidity: u128,
        to: Address,
        deadline: u64,
        native_amount: u128,
    ) -> (Vec<u128>, u128);

    fn remove_liquidity(
        e: Env,
        user: Address,
        pool: Address,
        pool_type: u32,
        liquidity: u128,
        min_amounts: Vec<u128>,
        to: Address,
        deadline: u64,
    ) -> Vec<u128>;

    fn remove_liquidity_native(
        e: Env,
        user: Address,
        pool: Address,
        pool_type: u32,
        liquidity: u128,
        min_amounts: Vec<u128>,
        to: Address,
        deadline: u64,
    ) -> Vec<u128>;

    fn remove_liquidity_permit(
        e: Env,
        user: Address,
        pool: Address,
        pool_type: u32,
        liquidity: u128,
        min_amounts: Vec<u128>,
        to: Address,
        deadline: u64,
        permit: PermitParams,
    ) -> Vec<u128>;

    fn remove_liquidity_native_permit(
        e: Env,
        user: Address,
        pool: Address,
        pool_type: u32,
        liquidity: u128,
        min_amounts: Vec<u128>,
        to: Address,
        deadline: u64,
        permit: PermitParams,
    ) -> Vec<u128>;

    fn remove_liquidity_one_token(
        e: Env,
        user: Address,
        pool: Address,
        liquidity: u128,
        token_idx: u32,
        min_amount: u128,
        to: Address,
        deadline: u64,
    ) -> u128;

    fn remove_one_token_native(
        e: Env,
        user: Address,
        pool: Address,
        liquidity: u128,
        token_idx: u32,
        min_amount: u128,
        to: Address,
        deadline: u64,
    ) -> u128;

    fn remove_one_token_permit(
        e: Env,
        user: Address,
        pool: Address,
        liquidity: u128,
        token_idx: u32,
        min_amount: u128,
        to: Address,
        deadline: u64,
        permit: PermitParams,
    ) -> u128;

    fn remove_one_token_native_permit(
        e: Env,
        user: Address,
        pool: Address,
        liquidity: u128,
        token_idx: u32,
        min_amount: u128,
        to: Address,
        deadline: u64,
        permit: PermitParams,
    ) -> u128;

    // Unused shares of `max_burn` go back to `user`.
    fn remove_liquidity_imbalance(
        e: Env,
        user: Address,
        pool: Address,
        amounts: Vec<u128>,
        max_burn: u128,
        to: Address,
        deadline: u64,
    ) -> u128;

    fn remove_imbalance_native(
        e: Env,
        user: Address,
        pool: Address,
        amounts: Vec<u128>,
        max_burn: u128,
        to: Address,
        deadline: u64,
    ) -> u128;

    fn remove_imbalance_permit(
        e: Env,
        user: Address,
        pool: Address,
        amounts: Vec<u128>,
        max_burn: u128,
        to: Address,
        deadline: u64,
        permit: PermitParams,
    ) -> u128;

    fn remove_imbalance_native_permit(
        e: Env,
        user: Address,
        pool: Address,
        amounts: Vec<u128>,
        max_burn: u128,
        to: Address,
        deadline: u64,
        permit: PermitParams,
    ) -> u128;
}
