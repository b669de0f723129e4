use crate::errors::VolatilePoolError;
use crate::pool;
use crate::pool_constants::{
    MAX_ADMIN_FEE, MAX_SWAP_FEE, MINIMUM_LIQUIDITY, N_COINS, POOL_TYPE, SHARE_DECIMALS,
    SHARE_NAME, SHARE_SYMBOL,
};
use crate::pool_interface::{
    AdminInterfaceTrait, LiquidityPoolShareTrait, SwapCalleeClient, VolatilePoolTrait,
};
use crate::storage::{
    get_admin_fee, get_admin_fees, get_burn_sink, get_real_balances, get_reserves,
    get_swap_fee, get_tokens, put_admin_fees, put_reserves, set_admin_fee, set_swap_fee,
    set_tokens,
};
use access_control::access::{AccessControl, AccessControlTrait};
use access_control::role::Role;
use access_control::utils::require_pool_manager;
use liquidity_pool_events::{Events as PoolEvents, LiquidityPoolEvents};
use liquidity_pool_validation_errors::LiquidityPoolValidationError;
use soroban_sdk::token::TokenClient as SorobanTokenClient;
use soroban_sdk::{
    contract, contractimpl, log, panic_with_error, Address, Bytes, BytesN, Env, String, Vec,
};
use token_share::permit::{permit, permit_digest, read_nonce};
use token_share::shares::{first_mint_shares, proportional_amount, proportional_shares};
use token_share::{
    burn_shares, get_total_shares, get_user_balance_shares, mint_shares, read_decimal,
    read_name, read_symbol, token, write_metadata,
};
use utils::math::{fee_amount, k_check, to_i128, FEE_DENOMINATOR};
use utils::reentrancy::{get_lock_state, LockState, ReentrancyGuard};
use utils::tokens::assert_tokens_sorted;

#[contract]
pub struct VolatilePool;

fn transfer_out(e: &Env, token: &Address, to: &Address, amount: u128) {
    if amount > 0 {
        SorobanTokenClient::new(e, token).transfer(
            &e.current_contract_address(),
            to,
            &to_i128(e, amount),
        );
    }
}

// Records new reserves and announces them.
fn update_reserves(e: &Env, reserves: &Vec<u128>) {
    put_reserves(e, reserves);
    PoolEvents::new(e).update_reserves(reserves.clone());
}

fn token_indexes(e: &Env, token_in: &Address, token_out: &Address) -> (u32, u32) {
    if token_in == token_out {
        panic_with_error!(e, LiquidityPoolValidationError::CannotSwapSameToken);
    }
    let tokens = get_tokens(e);
    let in_idx = match tokens.first_index_of(token_in) {
        Some(idx) => idx,
        None => panic_with_error!(e, LiquidityPoolValidationError::InTokenOutOfBounds),
    };
    let out_idx = match tokens.first_index_of(token_out) {
        Some(idx) => idx,
        None => panic_with_error!(e, LiquidityPoolValidationError::OutTokenOutOfBounds),
    };
    (in_idx, out_idx)
}

#[contractimpl]
impl VolatilePoolTrait for VolatilePool {
    // Returns the curve identifier used by the router and the registry.
    //
    // # Returns
    //
    // `1` for constant product pools.
    fn pool_type(_e: Env) -> u32 {
        POOL_TYPE
    }

    // Initializes the pool.
    //
    // # Arguments
    //
    // * `admin` - The pool owner. Receives admin fees.
    // * `operations_admin` - Allowed to change fees.
    // * `tokens` - Exactly two token addresses in ascending order.
    // * `swap_fee` - Swap fee in parts of `FEE_DENOMINATOR`.
    // * `admin_fee` - Share of the swap fee kept for the admin, in parts of `FEE_DENOMINATOR`.
    fn initialize(
        e: Env,
        admin: Address,
        operations_admin: Address,
        tokens: Vec<Address>,
        swap_fee: u128,
        admin_fee: u128,
    ) {
        let access_control = AccessControl::new(&e);
        if access_control.get_role_safe(&Role::Admin).is_some() {
            panic_with_error!(&e, VolatilePoolError::AlreadyInitialized);
        }
        if tokens.len() != N_COINS {
            panic_with_error!(&e, LiquidityPoolValidationError::WrongInputVecSize);
        }
        assert_tokens_sorted(&e, &tokens);
        if swap_fee > MAX_SWAP_FEE {
            panic_with_error!(&e, LiquidityPoolValidationError::FeeOutOfBounds);
        }
        if admin_fee > MAX_ADMIN_FEE {
            panic_with_error!(&e, LiquidityPoolValidationError::AdminFeeOutOfBounds);
        }

        access_control.set_role_address(&Role::Admin, &admin);
        access_control.set_role_address(&Role::OperationsAdmin, &operations_admin);

        set_tokens(&e, &tokens);
        set_swap_fee(&e, &swap_fee);
        set_admin_fee(&e, &admin_fee);
        put_reserves(&e, &Vec::from_array(&e, [0; N_COINS as usize]));
        put_admin_fees(&e, &Vec::from_array(&e, [0; N_COINS as usize]));

        write_metadata(
            &e,
            SHARE_DECIMALS,
            String::from_str(&e, SHARE_NAME),
            String::from_str(&e, SHARE_SYMBOL),
        );
    }

    fn get_tokens(e: Env) -> Vec<Address> {
        get_tokens(&e)
    }

    fn get_reserves(e: Env) -> Vec<u128> {
        get_reserves(&e)
    }

    fn get_real_balances(e: Env) -> Vec<u128> {
        get_real_balances(&e)
    }

    fn get_token_balance(e: Env, token: Address) -> u128 {
        let idx = match get_tokens(&e).first_index_of(&token) {
            Some(idx) => idx,
            None => panic_with_error!(&e, LiquidityPoolValidationError::UnknownToken),
        };
        get_real_balances(&e).get_unchecked(idx)
    }

    // Calculates the output of a swap against current reserves.
    //
    // # Arguments
    //
    // * `token_in` - The token sold.
    // * `token_out` - The token bought.
    // * `amount_in` - The amount of `token_in` sold.
    //
    // # Returns
    //
    // The amount of `token_out` the pool would send, rounded down.
    fn get_amount_out(e: Env, token_in: Address, token_out: Address, amount_in: u128) -> u128 {
        let (in_idx, out_idx) = token_indexes(&e, &token_in, &token_out);
        let reserves = get_reserves(&e);
        pool::get_amount_out(
            &e,
            amount_in,
            reserves.get_unchecked(in_idx),
            reserves.get_unchecked(out_idx),
            get_swap_fee(&e),
        )
    }

    // Executes a swap. The input has to be sent to the pool beforehand or during the callback.
    //
    // # Arguments
    //
    // * `amount0_out` - The amount of the first token to send.
    // * `amount1_out` - The amount of the second token to send.
    // * `to` - The receiver of the outputs. Must not be one of the pool tokens.
    // * `data` - Passed to `swap_callback` on `to` when not empty.
    fn swap(e: Env, amount0_out: u128, amount1_out: u128, to: Address, data: Bytes) {
        let _guard = ReentrancyGuard::acquire(&e);

        if amount0_out == 0 && amount1_out == 0 {
            panic_with_error!(&e, VolatilePoolError::InsufficientOutput);
        }
        let tokens = get_tokens(&e);
        let reserves = get_reserves(&e);
        let amounts_out = Vec::from_array(&e, [amount0_out, amount1_out]);
        for i in 0..N_COINS {
            if amounts_out.get_unchecked(i) >= reserves.get_unchecked(i) {
                panic_with_error!(&e, VolatilePoolError::InsufficientLiquidity);
            }
        }
        if tokens.contains(&to) {
            panic_with_error!(&e, VolatilePoolError::InvalidTo);
        }

        for i in 0..N_COINS {
            transfer_out(&e, &tokens.get_unchecked(i), &to, amounts_out.get_unchecked(i));
        }
        if !data.is_empty() {
            SwapCalleeClient::new(&e, &to).swap_callback(
                &e.current_contract_address(),
                &amount0_out,
                &amount1_out,
                &data,
            );
        }

        let balances = get_real_balances(&e);
        let mut amounts_in = Vec::new(&e);
        for i in 0..N_COINS {
            amounts_in.push_back(pool::get_amount_in(
                balances.get_unchecked(i),
                reserves.get_unchecked(i),
                amounts_out.get_unchecked(i),
            ));
        }
        if amounts_in.get_unchecked(0) == 0 && amounts_in.get_unchecked(1) == 0 {
            panic_with_error!(&e, VolatilePoolError::InsufficientInput);
        }

        let swap_fee = get_swap_fee(&e);
        let adjusted0 =
            pool::fee_adjusted_balance(&e, balances.get_unchecked(0), amounts_in.get_unchecked(0), swap_fee);
        let adjusted1 =
            pool::fee_adjusted_balance(&e, balances.get_unchecked(1), amounts_in.get_unchecked(1), swap_fee);
        if !k_check(
            &e,
            &adjusted0,
            &adjusted1,
            reserves.get_unchecked(0),
            reserves.get_unchecked(1),
            FEE_DENOMINATOR,
        ) {
            panic_with_error!(&e, VolatilePoolError::KInvariantFailed);
        }

        // admin part of the fee leaves the reserves
        let admin_fee = get_admin_fee(&e);
        let mut admin_fees = get_admin_fees(&e);
        let mut new_reserves = Vec::new(&e);
        let events = PoolEvents::new(&e);
        for i in 0..N_COINS {
            let amount_in = amounts_in.get_unchecked(i);
            let trade_fee = fee_amount(&e, amount_in, swap_fee);
            let admin_part = fee_amount(&e, trade_fee, admin_fee);
            admin_fees.set(i, admin_fees.get_unchecked(i) + admin_part);
            new_reserves.push_back(balances.get_unchecked(i) - admin_part);

            if amount_in > 0 {
                let out_idx = 1 - i;
                events.trade(
                    to.clone(),
                    tokens.get_unchecked(i),
                    tokens.get_unchecked(out_idx),
                    amount_in,
                    amounts_out.get_unchecked(out_idx),
                    trade_fee,
                );
            }
        }
        put_admin_fees(&e, &admin_fees);
        update_reserves(&e, &new_reserves);
    }

    // Mints pool shares for tokens transferred to the pool above its reserves.
    //
    // # Arguments
    //
    // * `to` - The receiver of the minted shares.
    //
    // # Returns
    //
    // The amount of shares minted.
    fn mint(e: Env, to: Address) -> u128 {
        let _guard = ReentrancyGuard::acquire(&e);

        let reserves = get_reserves(&e);
        let balances = get_real_balances(&e);
        let mut amounts = Vec::new(&e);
        for i in 0..N_COINS {
            amounts.push_back(balances.get_unchecked(i).saturating_sub(reserves.get_unchecked(i)));
        }
        let amount0 = amounts.get_unchecked(0);
        let amount1 = amounts.get_unchecked(1);

        let total_shares = get_total_shares(&e);
        let liquidity = if total_shares == 0 {
            let root = first_mint_shares(&e, amount0, amount1);
            if root <= MINIMUM_LIQUIDITY {
                panic_with_error!(&e, VolatilePoolError::InsufficientLiquidityMinted);
            }
            mint_shares(&e, &get_burn_sink(&e), MINIMUM_LIQUIDITY);
            root - MINIMUM_LIQUIDITY
        } else {
            let shares0 = proportional_shares(&e, amount0, reserves.get_unchecked(0), total_shares);
            let shares1 = proportional_shares(&e, amount1, reserves.get_unchecked(1), total_shares);
            shares0.min(shares1)
        };
        if liquidity == 0 {
            panic_with_error!(&e, VolatilePoolError::InsufficientLiquidityMinted);
        }

        mint_shares(&e, &to, liquidity);
        update_reserves(&e, &balances);
        PoolEvents::new(&e).deposit_liquidity(get_tokens(&e), amounts, liquidity);
        liquidity
    }

    // Burns all pool shares held by the pool and sends the underlying tokens out.
    //
    // # Arguments
    //
    // * `to` - The receiver of the withdrawn tokens.
    //
    // # Returns
    //
    // The amounts of tokens withdrawn.
    fn burn(e: Env, to: Address) -> Vec<u128> {
        let _guard = ReentrancyGuard::acquire(&e);

        let pool = e.current_contract_address();
        let liquidity = get_user_balance_shares(&e, &pool);
        let total_shares = get_total_shares(&e);
        let tokens = get_tokens(&e);
        let balances = get_real_balances(&e);

        let mut amounts = Vec::new(&e);
        let mut new_reserves = Vec::new(&e);
        for i in 0..N_COINS {
            let amount = if total_shares == 0 {
                0
            } else {
                proportional_amount(&e, liquidity, balances.get_unchecked(i), total_shares)
            };
            if amount == 0 {
                panic_with_error!(&e, VolatilePoolError::InsufficientLiquidityBurned);
            }
            amounts.push_back(amount);
            new_reserves.push_back(balances.get_unchecked(i) - amount);
        }

        burn_shares(&e, &pool, liquidity);
        for i in 0..N_COINS {
            transfer_out(&e, &tokens.get_unchecked(i), &to, amounts.get_unchecked(i));
        }
        update_reserves(&e, &new_reserves);
        PoolEvents::new(&e).withdraw_liquidity(tokens, amounts.clone(), liquidity);
        amounts
    }

    fn sync(e: Env) {
        let _guard = ReentrancyGuard::acquire(&e);
        update_reserves(&e, &get_real_balances(&e));
    }

    fn skim(e: Env, to: Address) {
        let _guard = ReentrancyGuard::acquire(&e);

        let tokens = get_tokens(&e);
        let reserves = get_reserves(&e);
        let balances = get_real_balances(&e);
        let mut amounts = Vec::new(&e);
        for i in 0..N_COINS {
            let surplus = balances.get_unchecked(i).saturating_sub(reserves.get_unchecked(i));
            transfer_out(&e, &tokens.get_unchecked(i), &to, surplus);
            amounts.push_back(surplus);
        }
        PoolEvents::new(&e).skim(to, amounts);
    }

    fn get_lock_state(e: Env) -> LockState {
        get_lock_state(&e)
    }
}

#[contractimpl]
impl AdminInterfaceTrait for VolatilePool {
    // Sets the swap fee.
    //
    // # Arguments
    //
    // * `user` - The admin or the operations admin.
    // * `swap_fee` - New fee in parts of `FEE_DENOMINATOR`.
    fn set_swap_fee(e: Env, user: Address, swap_fee: u128) {
        user.require_auth();
        require_pool_manager(&e, &user);
        let _guard = ReentrancyGuard::acquire(&e);

        if swap_fee > MAX_SWAP_FEE {
            panic_with_error!(&e, LiquidityPoolValidationError::FeeOutOfBounds);
        }
        set_swap_fee(&e, &swap_fee);
        PoolEvents::new(&e).set_fee(swap_fee);
    }

    // Sets the admin share of the swap fee.
    //
    // # Arguments
    //
    // * `user` - The admin or the operations admin.
    // * `admin_fee` - New admin share in parts of `FEE_DENOMINATOR`.
    fn set_admin_fee(e: Env, user: Address, admin_fee: u128) {
        user.require_auth();
        require_pool_manager(&e, &user);
        let _guard = ReentrancyGuard::acquire(&e);

        if admin_fee > MAX_ADMIN_FEE {
            panic_with_error!(&e, LiquidityPoolValidationError::AdminFeeOutOfBounds);
        }
        set_admin_fee(&e, &admin_fee);
        PoolEvents::new(&e).set_admin_fee(admin_fee);
    }

    fn get_fee(e: Env) -> u128 {
        get_swap_fee(&e)
    }

    fn get_admin_fee(e: Env) -> u128 {
        get_admin_fee(&e)
    }

    fn get_admin_fees(e: Env) -> Vec<u128> {
        get_admin_fees(&e)
    }

    // Sends accrued admin fees to the admin and resets the counters.
    //
    // # Arguments
    //
    // * `user` - The admin or the operations admin.
    //
    // # Returns
    //
    // The amounts claimed per token.
    fn claim_fees(e: Env, user: Address) -> Vec<u128> {
        user.require_auth();
        require_pool_manager(&e, &user);
        let _guard = ReentrancyGuard::acquire(&e);

        let destination = AccessControl::new(&e).get_role(&Role::Admin);
        let tokens = get_tokens(&e);
        let admin_fees = get_admin_fees(&e);
        let events = PoolEvents::new(&e);
        for i in 0..N_COINS {
            let amount = admin_fees.get_unchecked(i);
            transfer_out(&e, &tokens.get_unchecked(i), &destination, amount);
            events.claim_fees(tokens.get_unchecked(i), destination.clone(), amount);
        }
        log!(&e, "admin fees claimed", admin_fees.clone());
        put_admin_fees(&e, &Vec::from_array(&e, [0; N_COINS as usize]));
        admin_fees
    }
}

#[contractimpl]
impl LiquidityPoolShareTrait for VolatilePool {
    fn get_total_shares(e: Env) -> u128 {
        get_total_shares(&e)
    }

    fn total_supply(e: Env) -> i128 {
        to_i128(&e, get_total_shares(&e))
    }

    fn balance(e: Env, id: Address) -> i128 {
        token::balance(&e, id)
    }

    fn allowance(e: Env, from: Address, spender: Address) -> i128 {
        token::allowance(&e, from, spender)
    }

    fn approve(e: Env, from: Address, spender: Address, amount: i128, expiration_ledger: u32) {
        token::approve(&e, from, spender, amount, expiration_ledger)
    }

    fn transfer(e: Env, from: Address, to: Address, amount: i128) {
        token::transfer(&e, from, to, amount)
    }

    fn transfer_from(e: Env, spender: Address, from: Address, to: Address, amount: i128) {
        token::transfer_from(&e, spender, from, to, amount)
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

    fn permit(
        e: Env,
        owner: Address,
        spender: Address,
        amount: i128,
        expiration_ledger: u32,
        deadline: u64,
        signature: BytesN<64>,
    ) {
        permit(
            &e,
            owner,
            spender,
            amount,
            expiration_ledger,
            deadline,
            signature,
        )
    }

    fn nonces(e: Env, owner: Address) -> u64 {
        read_nonce(&e, &owner)
    }

    fn permit_digest(
        e: Env,
        owner: Address,
        spender: Address,
        amount: i128,
        expiration_ledger: u32,
        deadline: u64,
    ) -> BytesN<32> {
        let nonce = read_nonce(&e, &owner);
        permit_digest(
            &e,
            &owner,
            &spender,
            amount,
            expiration_ledger,
            nonce,
            deadline,
        )
    }
}
