use crate::errors::StablePoolError;
use crate::normalize::{compute_precision_multipliers, read_decimals};
use crate::pool::{LiquidityChange, PoolState};
use crate::pool_constants::{
    A_PRECISION, MAX_A, MAX_ADMIN_FEE, MAX_COINS, MAX_SWAP_FEE, MIN_COINS, POOL_TYPE,
    SHARE_DECIMALS, SHARE_NAME, SHARE_SYMBOL, VIRTUAL_PRICE_PRECISION,
};
use crate::pool_interface::{AdminInterfaceTrait, LiquidityPoolShareTrait, StablePoolTrait};
use crate::storage::{
    accrue_admin_fees, get_a, get_admin_fee, get_admin_fees, get_decimals,
    get_precision_multipliers, get_real_balances, get_reserves,
    get_swap_fee, get_tokens, put_admin_fees, put_reserves, set_admin_fee, set_amp,
    set_decimals, set_precision_multipliers, set_swap_fee, set_tokens,
};
use access_control::access::{AccessControl, AccessControlTrait};
use access_control::role::Role;
use access_control::utils::require_pool_manager;
use liquidity_pool_events::{Events as PoolEvents, LiquidityPoolEvents};
use liquidity_pool_validation_errors::LiquidityPoolValidationError;
use soroban_fixed_point_math::SorobanFixedPoint;
use soroban_sdk::token::TokenClient as SorobanTokenClient;
use soroban_sdk::{
    contract, contractimpl, log, panic_with_error, Address, BytesN, Env, String, Vec,
};
use token_share::permit::{permit, permit_digest, read_nonce};
use token_share::{
    burn_shares, get_total_shares, get_user_balance_shares, mint_shares, read_decimal,
    read_name, read_symbol, token, write_metadata,
};
use utils::math::to_i128;
use utils::reentrancy::{get_lock_state, LockState, ReentrancyGuard};
use utils::tokens::{assert_tokens_sorted, token_index};

#[contract]
pub struct StablePool;

fn assert_deadline(e: &Env, deadline: u64) {
    if e.ledger().timestamp() > deadline {
        panic_with_error!(e, StablePoolError::DeadlineNotMet);
    }
}

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

fn zeros(e: &Env, n: u32) -> Vec<u128> {
    let mut result = Vec::new(e);
    for _ in 0..n {
        result.push_back(0);
    }
    result
}

// Burns `liquidity` shares of `owner`, who must hold them.
fn burn_owner_shares(e: &Env, owner: &Address, liquidity: u128) {
    if liquidity > get_user_balance_shares(e, owner) {
        panic_with_error!(e, StablePoolError::WithdrawExceedsAvailable);
    }
    burn_shares(e, owner, liquidity);
}

fn apply_liquidity_change(e: &Env, change: &LiquidityChange) {
    accrue_admin_fees(e, &change.admin_fees);
    update_reserves(e, &change.reserves);
}

#[contractimpl]
impl StablePoolTrait for StablePool {
    // Returns the curve identifier used by the router and the registry.
    //
    // # Returns
    //
    // `2` for StableSwap pools.
    fn pool_type(_e: Env) -> u32 {
        POOL_TYPE
    }

    // Initializes the pool.
    //
    // # Arguments
    //
    // * `admin` - The pool owner. Receives admin fees.
    // * `operations_admin` - Allowed to change fees.
    // * `tokens` - From 2 to 32 token addresses in ascending order.
    // * `a` - The amplification coefficient.
    // * `swap_fee` - Swap fee in parts of `FEE_DENOMINATOR`.
    // * `admin_fee` - Share of the fees kept for the admin, in parts of `FEE_DENOMINATOR`.
    fn initialize(
        e: Env,
        admin: Address,
        operations_admin: Address,
        tokens: Vec<Address>,
        a: u128,
        swap_fee: u128,
        admin_fee: u128,
    ) {
        let access_control = AccessControl::new(&e);
        if access_control.get_role_safe(&Role::Admin).is_some() {
            panic_with_error!(&e, StablePoolError::AlreadyInitialized);
        }
        if tokens.len() < MIN_COINS {
            panic_with_error!(&e, LiquidityPoolValidationError::WrongInputVecSize);
        }
        if tokens.len() > MAX_COINS {
            panic_with_error!(&e, LiquidityPoolValidationError::TooManyTokens);
        }
        assert_tokens_sorted(&e, &tokens);
        if a == 0 || a > MAX_A {
            panic_with_error!(&e, StablePoolError::AOutOfBounds);
        }
        if swap_fee > MAX_SWAP_FEE {
            panic_with_error!(&e, LiquidityPoolValidationError::FeeOutOfBounds);
        }
        if admin_fee > MAX_ADMIN_FEE {
            panic_with_error!(&e, LiquidityPoolValidationError::AdminFeeOutOfBounds);
        }

        access_control.set_role_address(&Role::Admin, &admin);
        access_control.set_role_address(&Role::OperationsAdmin, &operations_admin);

        let decimals = read_decimals(&e, &tokens);
        set_precision_multipliers(&e, &compute_precision_multipliers(&e, &decimals));
        set_decimals(&e, &decimals);
        set_tokens(&e, &tokens);
        set_amp(&e, &(a * A_PRECISION));
        set_swap_fee(&e, &swap_fee);
        set_admin_fee(&e, &admin_fee);
        put_reserves(&e, &zeros(&e, tokens.len()));
        put_admin_fees(&e, &zeros(&e, tokens.len()));

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

    fn get_decimals(e: Env) -> Vec<u32> {
        get_decimals(&e)
    }

    fn get_precision_multipliers(e: Env) -> Vec<u128> {
        get_precision_multipliers(&e)
    }

    fn get_a(e: Env) -> u128 {
        get_a(&e)
    }

    fn get_reserves(e: Env) -> Vec<u128> {
        get_reserves(&e)
    }

    fn get_real_balances(e: Env) -> Vec<u128> {
        get_real_balances(&e)
    }

    fn get_token_balance(e: Env, token: Address) -> u128 {
        let idx = token_index(&e, &get_tokens(&e), &token);
        get_real_balances(&e).get_unchecked(idx)
    }

    fn get_d(e: Env) -> u128 {
        PoolState::load(&e).get_d(&e)
    }

    // Returns the value of one share in D units, scaled by 1e18.
    fn get_virtual_price(e: Env) -> u128 {
        let state = PoolState::load(&e);
        if state.total_shares == 0 {
            panic_with_error!(&e, LiquidityPoolValidationError::EmptyPool);
        }
        state
            .get_d(&e)
            .fixed_mul_floor(&e, &VIRTUAL_PRICE_PRECISION, &state.total_shares)
    }

    fn get_amount_out(e: Env, token_in: Address, token_out: Address, amount_in: u128) -> u128 {
        if token_in == token_out {
            panic_with_error!(&e, LiquidityPoolValidationError::CannotSwapSameToken);
        }
        let tokens = get_tokens(&e);
        let in_idx = match tokens.first_index_of(&token_in) {
            Some(idx) => idx,
            None => panic_with_error!(&e, LiquidityPoolValidationError::InTokenOutOfBounds),
        };
        let out_idx = match tokens.first_index_of(&token_out) {
            Some(idx) => idx,
            None => panic_with_error!(&e, LiquidityPoolValidationError::OutTokenOutOfBounds),
        };
        PoolState::load(&e)
            .calc_swap(&e, in_idx, out_idx, amount_in)
            .amount_out
    }

    fn get_dy(e: Env, in_idx: u32, out_idx: u32, dx: u128) -> u128 {
        PoolState::load(&e)
            .calc_swap(&e, in_idx, out_idx, dx)
            .amount_out
    }

    // Executes a swap. The input has to be sent to the pool beforehand.
    //
    // # Arguments
    //
    // * `in_idx` - Index of the token sold.
    // * `out_idx` - Index of the token bought.
    // * `out_min` - Minimum amount of the token bought.
    // * `to` - The receiver of the output.
    // * `deadline` - Latest ledger timestamp the swap may execute at.
    //
    // # Returns
    //
    // The amount of the token bought.
    fn swap(e: Env, in_idx: u32, out_idx: u32, out_min: u128, to: Address, deadline: u64) -> u128 {
        assert_deadline(&e, deadline);
        let _guard = ReentrancyGuard::acquire(&e);

        let state = PoolState::load(&e);
        if in_idx >= state.n_coins() {
            panic_with_error!(&e, LiquidityPoolValidationError::InTokenOutOfBounds);
        }
        let amount_in = get_real_balances(&e)
            .get_unchecked(in_idx)
            .saturating_sub(state.reserves.get_unchecked(in_idx));
        let result = state.calc_swap(&e, in_idx, out_idx, amount_in);
        if result.amount_out == 0 {
            panic_with_error!(&e, StablePoolError::InsufficientOutput);
        }
        if result.amount_out < out_min {
            panic_with_error!(&e, LiquidityPoolValidationError::OutMinNotSatisfied);
        }

        let tokens = get_tokens(&e);
        transfer_out(&e, &tokens.get_unchecked(out_idx), &to, result.amount_out);
        accrue_admin_fees(&e, &result.admin_fees);
        update_reserves(&e, &result.reserves);

        PoolEvents::new(&e).trade(
            to,
            tokens.get_unchecked(in_idx),
            tokens.get_unchecked(out_idx),
            amount_in,
            result.amount_out,
            result.fee,
        );
        result.amount_out
    }

    // Deposits tokens and mints pool shares.
    //
    // # Arguments
    //
    // * `user` - The depositor. Must authorize the call.
    // * `amounts` - One amount per pool token, zero allowed.
    // * `min_mint` - Minimum amount of shares to receive.
    // * `to` - The receiver of the shares.
    // * `deadline` - Latest ledger timestamp the deposit may execute at.
    //
    // # Returns
    //
    // The amount of shares minted.
    fn add_liquidity(
        e: Env,
        user: Address,
        amounts: Vec<u128>,
        min_mint: u128,
        to: Address,
        deadline: u64,
    ) -> u128 {
        user.require_auth();
        assert_deadline(&e, deadline);
        let _guard = ReentrancyGuard::acquire(&e);

        let change = PoolState::load(&e).calc_add_liquidity(&e, &amounts);
        if change.shares < min_mint {
            panic_with_error!(&e, StablePoolError::MintBelowMinimum);
        }

        let tokens = get_tokens(&e);
        let pool = e.current_contract_address();
        for (i, amount) in amounts.iter().enumerate() {
            if amount > 0 {
                SorobanTokenClient::new(&e, &tokens.get_unchecked(i as u32)).transfer(
                    &user,
                    &pool,
                    &to_i128(&e, amount),
                );
            }
        }

        mint_shares(&e, &to, change.shares);
        apply_liquidity_change(&e, &change);
        PoolEvents::new(&e).deposit_liquidity(tokens, amounts, change.shares);
        change.shares
    }

    // Burns shares for a proportional part of every reserve.
    //
    // # Arguments
    //
    // * `owner` - The holder of the shares. Must authorize the call.
    // * `liquidity` - The amount of shares to burn.
    // * `min_amounts` - Minimum amount to receive per token.
    // * `to` - The receiver of the tokens.
    // * `deadline` - Latest ledger timestamp the withdrawal may execute at.
    //
    // # Returns
    //
    // The amounts withdrawn per token.
    fn remove_liquidity(
        e: Env,
        owner: Address,
        liquidity: u128,
        min_amounts: Vec<u128>,
        to: Address,
        deadline: u64,
    ) -> Vec<u128> {
        owner.require_auth();
        assert_deadline(&e, deadline);
        let _guard = ReentrancyGuard::acquire(&e);

        let state = PoolState::load(&e);
        if min_amounts.len() != state.n_coins() {
            panic_with_error!(&e, LiquidityPoolValidationError::WrongInputVecSize);
        }
        let amounts = state.calc_remove_liquidity(&e, liquidity);
        let tokens = get_tokens(&e);
        let mut reserves = state.reserves.clone();
        for i in 0..state.n_coins() {
            let amount = amounts.get_unchecked(i);
            if amount < min_amounts.get_unchecked(i) {
                panic_with_error!(&e, StablePoolError::BelowMinAmount);
            }
            reserves.set(i, reserves.get_unchecked(i) - amount);
        }

        burn_owner_shares(&e, &owner, liquidity);
        for i in 0..state.n_coins() {
            transfer_out(&e, &tokens.get_unchecked(i), &to, amounts.get_unchecked(i));
        }
        update_reserves(&e, &reserves);
        PoolEvents::new(&e).withdraw_liquidity(tokens, amounts.clone(), liquidity);
        amounts
    }

    // Burns shares for a single token.
    //
    // # Arguments
    //
    // * `owner` - The holder of the shares. Must authorize the call.
    // * `liquidity` - The amount of shares to burn.
    // * `token_idx` - Index of the token to receive.
    // * `min_amount` - Minimum amount of the token to receive.
    // * `to` - The receiver of the token.
    // * `deadline` - Latest ledger timestamp the withdrawal may execute at.
    //
    // # Returns
    //
    // The amount of the token withdrawn.
    fn remove_liquidity_one_token(
        e: Env,
        owner: Address,
        liquidity: u128,
        token_idx: u32,
        min_amount: u128,
        to: Address,
        deadline: u64,
    ) -> u128 {
        owner.require_auth();
        assert_deadline(&e, deadline);
        let _guard = ReentrancyGuard::acquire(&e);

        let state = PoolState::load(&e);
        let withdrawal = state.calc_withdraw_one_token(&e, liquidity, token_idx);
        if withdrawal.amount < min_amount {
            panic_with_error!(&e, StablePoolError::BelowMinAmount);
        }

        burn_owner_shares(&e, &owner, liquidity);
        let tokens = get_tokens(&e);
        transfer_out(&e, &tokens.get_unchecked(token_idx), &to, withdrawal.amount);
        accrue_admin_fees(&e, &withdrawal.admin_fees);
        update_reserves(&e, &withdrawal.reserves);

        let mut amounts = zeros(&e, state.n_coins());
        amounts.set(token_idx, withdrawal.amount);
        PoolEvents::new(&e).withdraw_liquidity(tokens, amounts, liquidity);
        withdrawal.amount
    }

    // Withdraws exact amounts of tokens.
    //
    // # Arguments
    //
    // * `owner` - The holder of the shares. Must authorize the call.
    // * `amounts` - The amounts to withdraw per token.
    // * `max_burn` - Maximum amount of shares to burn.
    // * `to` - The receiver of the tokens.
    // * `deadline` - Latest ledger timestamp the withdrawal may execute at.
    //
    // # Returns
    //
    // The amount of shares burned.
    fn remove_liquidity_imbalance(
        e: Env,
        owner: Address,
        amounts: Vec<u128>,
        max_burn: u128,
        to: Address,
        deadline: u64,
    ) -> u128 {
        owner.require_auth();
        assert_deadline(&e, deadline);
        let _guard = ReentrancyGuard::acquire(&e);

        let change = PoolState::load(&e).calc_remove_liquidity_imbalance(&e, &amounts);
        if change.shares > max_burn {
            panic_with_error!(&e, StablePoolError::ExceedsMaxBurn);
        }

        burn_owner_shares(&e, &owner, change.shares);
        let tokens = get_tokens(&e);
        for (i, amount) in amounts.iter().enumerate() {
            transfer_out(&e, &tokens.get_unchecked(i as u32), &to, amount);
        }
        apply_liquidity_change(&e, &change);
        PoolEvents::new(&e).withdraw_liquidity(tokens, amounts, change.shares);
        change.shares
    }

    fn calc_add_liquidity(e: Env, amounts: Vec<u128>) -> u128 {
        PoolState::load(&e).calc_add_liquidity(&e, &amounts).shares
    }

    fn calc_remove_liquidity(e: Env, liquidity: u128) -> Vec<u128> {
        PoolState::load(&e).calc_remove_liquidity(&e, liquidity)
    }

    fn calc_remove_liquidity_one_token(e: Env, liquidity: u128, token_idx: u32) -> u128 {
        PoolState::load(&e)
            .calc_withdraw_one_token(&e, liquidity, token_idx)
            .amount
    }

    fn calc_remove_liquidity_imbalance(e: Env, amounts: Vec<u128>) -> u128 {
        PoolState::load(&e)
            .calc_remove_liquidity_imbalance(&e, &amounts)
            .shares
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
        for i in 0..tokens.len() {
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
impl AdminInterfaceTrait for StablePool {
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

    fn claim_fees(e: Env, user: Address) -> Vec<u128> {
        user.require_auth();
        require_pool_manager(&e, &user);
        let _guard = ReentrancyGuard::acquire(&e);

        let destination = AccessControl::new(&e).get_role(&Role::Admin);
        let tokens = get_tokens(&e);
        let admin_fees = get_admin_fees(&e);
        let events = PoolEvents::new(&e);
        for i in 0..tokens.len() {
            let amount = admin_fees.get_unchecked(i);
            transfer_out(&e, &tokens.get_unchecked(i), &destination, amount);
            events.claim_fees(tokens.get_unchecked(i), destination.clone(), amount);
        }
        log!(&e, "admin fees claimed", admin_fees.clone());
        put_admin_fees(&e, &zeros(&e, tokens.len()));
        admin_fees
    }
}

#[contractimpl]
impl LiquidityPoolShareTrait for StablePool {
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
