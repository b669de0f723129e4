use soroban_sdk::{contractclient, Address, Bytes, BytesN, Env, String, Vec};
use utils::reentrancy::LockState;

pub trait VolatilePoolTrait {
    // Curve identifier, 1 for the constant product curve.
    fn pool_type(e: Env) -> u32;

    // Sets tokens, fees and roles. Tokens must be sorted and unique.
    fn initialize(
        e: Env,
        admin: Address,
        operations_admin: Address,
        tokens: Vec<Address>,
        swap_fee: u128,
        admin_fee: u128,
    );

    fn get_tokens(e: Env) -> Vec<Address>;

    // Reserves used for pricing.
    fn get_reserves(e: Env) -> Vec<u128>;

    // Token balances held by the pool excluding unclaimed admin fees.
    fn get_real_balances(e: Env) -> Vec<u128>;

    fn get_token_balance(e: Env, token: Address) -> u128;

    // Quote for selling `amount_in` of `token_in` against current reserves.
    fn get_amount_out(e: Env, token_in: Address, token_out: Address, amount_in: u128) -> u128;

    // Sends the requested outputs to `to`, optionally calls `swap_callback` on `to`
    // when `data` is not empty, then checks that enough input arrived.
    fn swap(e: Env, amount0_out: u128, amount1_out: u128, to: Address, data: Bytes);

    // Mints shares for tokens sent to the pool above its reserves.
    fn mint(e: Env, to: Address) -> u128;

    // Burns shares held by the pool itself and sends the underlying tokens to `to`.
    fn burn(e: Env, to: Address) -> Vec<u128>;

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

    // Approval signed by the owner's ed25519 key over `permit_digest`.
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

    // Digest to sign for the owner's next permit.
    fn permit_digest(
        e: Env,
        owner: Address,
        spender: Address,
        amount: i128,
        expiration_ledger: u32,
        deadline: u64,
    ) -> BytesN<32>;
}

// Receiver of flash swaps.
#[contractclient(name = "SwapCalleeClient")]
pub trait SwapCallee {
    fn swap_callback(e: Env, pool: Address, amount0_out: u128, amount1_out: u128, data: Bytes);
}
