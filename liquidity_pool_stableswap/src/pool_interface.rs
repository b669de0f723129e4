use soroban_sdk::{Address, BytesN, Env, String, Vec};
use utils::reentrancy::LockState;

pub trait StablePoolTrait {
    // Curve identifier, 2 for the StableSwap curve.
    fn pool_type(e: Env) -> u32;

    // Sets tokens, amplification, fees and roles. Reads decimals of every token.
    fn initialize(
        e: Env,
        admin: Address,
        operations_admin: Address,
        tokens: Vec<Address>,
        a: u128,
        swap_fee: u128,
        admin_fee: u128,
    );

    fn get_tokens(e: Env) -> Vec<Address>;

    fn get_decimals(e: Env) -> Vec<u32>;

    fn get_precision_multipliers(e: Env) -> Vec<u128>;

    // The amplification coefficient.
    fn get_a(e: Env) -> u128;

    fn get_reserves(e: Env) -> Vec<u128>;

    // Token balances held by the pool excluding unclaimed admin fees.
    fn get_real_balances(e: Env) -> Vec<u128>;

    fn get_token_balance(e: Env, token: Address) -> u128;

    // The invariant of current reserves.
    fn get_d(e: Env) -> u128;

    // D * 1e18 / total shares.
    fn get_virtual_price(e: Env) -> u128;

    // Quote for selling `amount_in` of `token_in`.
    fn get_amount_out(e: Env, token_in: Address, token_out: Address, amount_in: u128) -> u128;

    // Quote for selling `dx` of the token at `in_idx`.
    fn get_dy(e: Env, in_idx: u32, out_idx: u32, dx: u128) -> u128;

    // Swaps the real balance of `in_idx` above its reserve and sends the output to `to`.
    fn swap(e: Env, in_idx: u32, out_idx: u32, out_min: u128, to: Address, deadline: u64) -> u128;

    // Pulls `amounts` from `user` and mints shares to `to`.
    fn add_liquidity(
        e: Env,
        user: Address,
        amounts: Vec<u128>,
        min_mint: u128,
        to: Address,
        deadline: u64,
    ) -> u128;

    // Burns `liquidity` shares of `owner` for a proportional part of every reserve.
    fn remove_liquidity(
        e: Env,
        owner: Address,
        liquidity: u128,
        min_amounts: Vec<u128>,
        to: Address,
        deadline: u64,
    ) -> Vec<u128>;

    // Burns `liquidity` shares of `owner` for a single token.
    fn remove_liquidity_one_token(
        e: Env,
        owner: Address,
        liquidity: u128,
        token_idx: u32,
        min_amount: u128,
        to: Address,
        deadline: u64,
    ) -> u128;

    // Withdraws exactly `amounts`, burning at most `max_burn` shares of `owner`.
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

    // Moves reserves to the real balances.
    fn sync(e: Env);

    // Sends the real balance above reserves to `to`.
    fn skim(e: Env, to: Address);

    fn get_lock_state(e: Env) -> LockState;
}

pub trait AdminInterfaceTrait {
    fn set_swap_fee(e: Env, user: Address, swap_fee: u128);

    fn set_admin_fee(e: Env, user: Address, admin_fee: u128);

    fn get_fee(e: Env) -> u128;

    fn get_admin_fee(e: Env) -> u128;

    fn get_admin_fees(e: Env) -> Vec<u128>;

    // Sends accrued admin fees to the admin. Returns claimed amounts.
    fn claim_fees(e: Env, user: Address) -> Vec<u128>;
}

pub trait LiquidityPoolShareTrait {
    fn get_total_shares(e: Env) -> u128;

    fn total_supply(e: Env) -> i128;

    fn balance(e: Env, id: Address) -> i128;

    fn allowance(e: Env, from: Address, spender: Address) -> i128;

    fn approve(e: Env, from: Address, spender: Address, amount: i128, expiration_ledger: u32);

    fn transfer(e: Env, from: Address, to: Address, amount: i128);

    fn transfer_from(e: Env, spender: Address, from: Address, to: Address, amount: i128);

    fn decimals(e: Env) -> u32;

    fn name(e: Env) -> String;

    fn symbol(e: Env) -> String;

    fn permit(
        e: Env,
        owner: Address,
        spender: Address,
        amount: i128,
        expiration_ledger: u32,
        deadline: u64,
        signature: BytesN<64>,
    );

    fn nonces(e: Env, owner: Address) -> u64;

    fn permit_digest(
        e: Env,
        owner: Address,
        spender: Address,
        amount: i128,
        expiration_ledger: u32,
        deadline: u64,
    ) -> BytesN<32>;
}
