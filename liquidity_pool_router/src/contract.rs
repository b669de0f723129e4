use crate::constants::{POOL_TYPE_STABLE, POOL_TYPE_VOLATILE};
use crate::errors::RouterError;
use crate::events::{Events, RouterEvents};
use crate::pool_interface::{
    LiquidityPoolClient, RegistryClient, StablePoolClient, VolatilePoolClient, WrappedNativeClient,
};
use crate::pool_utils::{
    assert_deadline, is_known_pool_type, is_sorted_set, native_index, optimal_amounts,
    validate_routes, validated_pool_tokens, volatile_mint_quote,
};
use crate::router_interface::{AdminInterface, LiquidityInterface, QuoteInterface, SwapInterface};
use crate::storage::{
    get_registry, get_wrapped_native, set_registry, set_wrapped_native, PermitParams, Route,
};
use access_control::access::{AccessControl, AccessControlTrait};
use access_control::role::Role;
use liquidity_pool_validation_errors::LiquidityPoolValidationError;
use soroban_sdk::token::TokenClient as SorobanTokenClient;
use soroban_sdk::{contract, contractimpl, panic_with_error, vec, Address, Bytes, Env, Vec};
use token_share::shares::proportional_amount;
use utils::math::to_i128;
use utils::tokens::token_index;

#[contract]
pub struct LiquidityPoolRouter;

fn zeros(e: &Env, n: u32) -> Vec<u128> {
    let mut result = Vec::new(e);
    for _ in 0..n {
        result.push_back(0);
    }
    result
}

fn transfer(e: &Env, token: &Address, from: &Address, to: &Address, amount: u128) {
    if amount > 0 {
        SorobanTokenClient::new(e, token).transfer(from, to, &to_i128(e, amount));
    }
}

// Moves `amount` of `token` from `user` to `to`, wrapping it from the native
// asset when `wrap` is set.
fn fund(e: &Env, user: &Address, token: &Address, to: &Address, amount: u128, wrap: bool) {
    if amount == 0 {
        return;
    }
    if wrap {
        WrappedNativeClient::new(e, &get_wrapped_native(e)).deposit(user, to, &amount);
    } else {
        transfer(e, token, user, to, amount);
    }
}

// Sends tokens held by the router to `to`, unwrapping the wrapped native token.
fn deliver(e: &Env, tokens: &Vec<Address>, amounts: &Vec<u128>, to: &Address) {
    let router = e.current_contract_address();
    let wrapped_native = get_wrapped_native(e);
    for i in 0..tokens.len() {
        let token = tokens.get_unchecked(i);
        let amount = amounts.get_unchecked(i);
        if amount == 0 {
            continue;
        }
        if token == wrapped_native {
            WrappedNativeClient::new(e, &wrapped_native).withdraw(&router, to, &amount);
        } else {
            transfer(e, &token, &router, to, amount);
        }
    }
}

// Moves pool shares of `user` to `to`, through a signed approval when given.
fn pull_shares(
    e: &Env,
    pool: &Address,
    user: &Address,
    to: &Address,
    liquidity: u128,
    permit: Option<PermitParams>,
) {
    let shares = SorobanTokenClient::new(e, pool);
    match permit {
        Some(permit) => {
            let router = e.current_contract_address();
            LiquidityPoolClient::new(e, pool).permit(
                user,
                &router,
                &permit.amount,
                &permit.expiration_ledger,
                &permit.deadline,
                &permit.signature,
            );
            shares.transfer_from(&router, user, to, &to_i128(e, liquidity));
        }
        None => shares.transfer(user, to, &to_i128(e, liquidity)),
    }
}

fn swap_hop(
    e: &Env,
    route: &Route,
    tokens: &Vec<Address>,
    amount_in: u128,
    to: &Address,
    deadline: u64,
) -> u128 {
    let out_idx = token_index(e, tokens, &route.token_out);
    if route.pool_type == POOL_TYPE_VOLATILE {
        let amount_out = LiquidityPoolClient::new(e, &route.pool).get_amount_out(
            &route.token_in,
            &route.token_out,
            &amount_in,
        );
        let (amount0_out, amount1_out) = if out_idx == 0 {
            (amount_out, 0)
        } else {
            (0, amount_out)
        };
        VolatilePoolClient::new(e, &route.pool).swap(&amount0_out, &amount1_out, to, &Bytes::new(e));
        amount_out
    } else {
        let in_idx = token_index(e, tokens, &route.token_in);
        StablePoolClient::new(e, &route.pool).swap(&in_idx, &out_idx, &0, to, &deadline)
    }
}

#[allow(clippy::too_many_arguments)]
fn execute_swap(
    e: &Env,
    user: Address,
    routes: Vec<Route>,
    amount_in: u128,
    amount_out_min: u128,
    to: Address,
    deadline: u64,
    native_amount: Option<u128>,
) -> u128 {
    user.require_auth();
    assert_deadline(e, deadline);
    if amount_in == 0 {
        panic_with_error!(e, LiquidityPoolValidationError::ZeroAmount);
    }
    let pools_tokens = validate_routes(e, &routes);
    let first = routes.get_unchecked(0);
    let last = routes.get_unchecked(routes.len() - 1);

    let (wrap_input, unwrap_output) = match native_amount {
        Some(native_amount) => {
            let wrapped_native = get_wrapped_native(e);
            let wrap_input = first.token_in == wrapped_native;
            let expected = if wrap_input { amount_in } else { 0 };
            if native_amount != expected {
                panic_with_error!(e, RouterError::ValueMismatch);
            }
            (wrap_input, last.token_out == wrapped_native)
        }
        None => (false, false),
    };

    let router = e.current_contract_address();
    fund(e, &user, &first.token_in, &first.pool, amount_in, wrap_input);

    // every pool pays the next one directly
    let mut amount = amount_in;
    for i in 0..routes.len() {
        let recipient = if i + 1 < routes.len() {
            routes.get_unchecked(i + 1).pool
        } else if unwrap_output {
            router.clone()
        } else {
            to.clone()
        };
        amount = swap_hop(
            e,
            &routes.get_unchecked(i),
            &pools_tokens.get_unchecked(i),
            amount,
            &recipient,
            deadline,
        );
    }
    if amount < amount_out_min {
        panic_with_error!(e, RouterError::InsufficientOutputAmount);
    }
    if unwrap_output {
        WrappedNativeClient::new(e, &get_wrapped_native(e)).withdraw(&router, &to, &amount);
    }

    Events::new(e).swap(user, first.token_in, last.token_out, amount_in, amount);
    amount
}

#[allow(clippy::too_many_arguments)]
fn execute_add_liquidity(
    e: &Env,
    user: Address,
    pool: Address,
    pool_type: u32,
    desired_amounts: Vec<u128>,
    min_amounts: Vec<u128>,
    min_liquidity: u128,
    to: Address,
    deadline: u64,
    native_amount: Option<u128>,
) -> (Vec<u128>, u128) {
    user.require_auth();
    assert_deadline(e, deadline);
    let tokens = validated_pool_tokens(e, &pool, pool_type);
    if desired_amounts.len() != tokens.len() || min_amounts.len() != tokens.len() {
        panic_with_error!(e, RouterError::MustSupplyAllTokens);
    }
    let native_idx = match native_amount {
        Some(native_amount) => {
            let idx = native_index(e, &tokens);
            if desired_amounts.get_unchecked(idx) != native_amount {
                panic_with_error!(e, RouterError::ValueMismatch);
            }
            Some(idx)
        }
        None => None,
    };

    let (amounts, liquidity) = if pool_type == POOL_TYPE_VOLATILE {
        let reserves = LiquidityPoolClient::new(e, &pool).get_reserves();
        let (amount_a, amount_b) = optimal_amounts(e, &reserves, &desired_amounts, &min_amounts);
        let amounts = vec![e, amount_a, amount_b];
        for i in 0..tokens.len() {
            fund(
                e,
                &user,
                &tokens.get_unchecked(i),
                &pool,
                amounts.get_unchecked(i),
                native_idx == Some(i),
            );
        }
        (amounts, VolatilePoolClient::new(e, &pool).mint(&to))
    } else {
        // the stable pool pulls deposits from the user itself
        if let Some(idx) = native_idx {
            let wrapped_native = tokens.get_unchecked(idx);
            fund(e, &user, &wrapped_native, &user, desired_amounts.get_unchecked(idx), true);
        }
        let shares = StablePoolClient::new(e, &pool).add_liquidity(
            &user,
            &desired_amounts,
            &min_liquidity,
            &to,
            &deadline,
        );
        (desired_amounts, shares)
    };
    if liquidity < min_liquidity {
        panic_with_error!(e, RouterError::InsufficientLiquidityMinted);
    }

    Events::new(e).add_liquidity(user, pool, amounts.clone(), liquidity);
    (amounts, liquidity)
}

#[allow(clippy::too_many_arguments)]
fn execute_remove_liquidity(
    e: &Env,
    user: Address,
    pool: Address,
    pool_type: u32,
    liquidity: u128,
    min_amounts: Vec<u128>,
    to: Address,
    deadline: u64,
    native: bool,
    permit: Option<PermitParams>,
) -> Vec<u128> {
    user.require_auth();
    assert_deadline(e, deadline);
    let tokens = validated_pool_tokens(e, &pool, pool_type);
    if min_amounts.len() != tokens.len() {
        panic_with_error!(e, RouterError::MustSupplyAllTokens);
    }
    if native {
        native_index(e, &tokens);
    }

    let router = e.current_contract_address();
    let receiver = if native { router.clone() } else { to.clone() };
    let amounts = if pool_type == POOL_TYPE_VOLATILE {
        // the volatile pool burns the shares it holds
        pull_shares(e, &pool, &user, &pool, liquidity, permit);
        let amounts = VolatilePoolClient::new(e, &pool).burn(&receiver);
        if amounts.get_unchecked(0) < min_amounts.get_unchecked(0) {
            panic_with_error!(e, RouterError::InsufficientAAmount);
        }
        if amounts.get_unchecked(1) < min_amounts.get_unchecked(1) {
            panic_with_error!(e, RouterError::InsufficientBAmount);
        }
        amounts
    } else {
        pull_shares(e, &pool, &user, &router, liquidity, permit);
        StablePoolClient::new(e, &pool).remove_liquidity(
            &router,
            &liquidity,
            &min_amounts,
            &receiver,
            &deadline,
        )
    };
    if native {
        deliver(e, &tokens, &amounts, &to);
    }

    Events::new(e).remove_liquidity(user, pool, amounts.clone(), liquidity);
    amounts
}

#[allow(clippy::too_many_arguments)]
fn execute_remove_one_token(
    e: &Env,
    user: Address,
    pool: Address,
    liquidity: u128,
    token_idx: u32,
    min_amount: u128,
    to: Address,
    deadline: u64,
    native: bool,
    permit: Option<PermitParams>,
) -> u128 {
    user.require_auth();
    assert_deadline(e, deadline);
    let tokens = validated_pool_tokens(e, &pool, POOL_TYPE_STABLE);
    if native && tokens.get(token_idx) != Some(get_wrapped_native(e)) {
        panic_with_error!(e, RouterError::NativeTokenMissing);
    }

    let router = e.current_contract_address();
    let receiver = if native { router.clone() } else { to.clone() };
    pull_shares(e, &pool, &user, &router, liquidity, permit);
    let amount = StablePoolClient::new(e, &pool).remove_liquidity_one_token(
        &router,
        &liquidity,
        &token_idx,
        &min_amount,
        &receiver,
        &deadline,
    );
    if native {
        WrappedNativeClient::new(e, &get_wrapped_native(e)).withdraw(&router, &to, &amount);
    }

    let mut amounts = zeros(e, tokens.len());
    amounts.set(token_idx, amount);
    Events::new(e).remove_liquidity(user, pool, amounts, liquidity);
    amount
}

#[allow(clippy::too_many_arguments)]
fn execute_remove_imbalance(
    e: &Env,
    user: Address,
    pool: Address,
    amounts: Vec<u128>,
    max_burn: u128,
    to: Address,
    deadline: u64,
    native: bool,
    permit: Option<PermitParams>,
) -> u128 {
    user.require_auth();
    assert_deadline(e, deadline);
    let tokens = validated_pool_tokens(e, &pool, POOL_TYPE_STABLE);
    if native {
        native_index(e, &tokens);
    }

    let router = e.current_contract_address();
    let receiver = if native { router.clone() } else { to.clone() };
    pull_shares(e, &pool, &user, &router, max_burn, permit);
    let burned = StablePoolClient::new(e, &pool).remove_liquidity_imbalance(
        &router,
        &amounts,
        &max_burn,
        &receiver,
        &deadline,
    );
    transfer(e, &pool, &router, &user, max_burn - burned);
    if native {
        deliver(e, &tokens, &amounts, &to);
    }

    Events::new(e).remove_liquidity(user, pool, amounts, burned);
    burned
}

#[contractimpl]
impl AdminInterface for LiquidityPoolRouter {
    fn initialize(e: Env, admin: Address, registry: Address, wrapped_native: Address) {
        let access_control = AccessControl::new(&e);
        if access_control.get_role_safe(&Role::Admin).is_some() {
            panic_with_error!(&e, RouterError::AlreadyInitialized);
        }
        access_control.set_role_address(&Role::Admin, &admin);
        set_registry(&e, &registry);
        set_wrapped_native(&e, &wrapped_native);
    }

    fn get_registry(e: Env) -> Address {
        get_registry(&e)
    }

    fn get_wrapped_native(e: Env) -> Address {
        get_wrapped_native(&e)
    }
}

#[contractimpl]
impl QuoteInterface for LiquidityPoolRouter {
    fn pair_for(e: Env, tokens: Vec<Address>, pool_type: u32) -> Option<Address> {
        if !is_known_pool_type(pool_type) || !is_sorted_set(&tokens) {
            return None;
        }
        RegistryClient::new(&e, &get_registry(&e)).get_pool(&tokens, &pool_type)
    }

    fn get_amounts_out_path(e: Env, amount_in: u128, routes: Vec<Route>) -> Vec<u128> {
        validate_routes(&e, &routes);
        let mut amounts = vec![&e, amount_in];
        let mut amount = amount_in;
        for route in routes.iter() {
            amount = LiquidityPoolClient::new(&e, &route.pool).get_amount_out(
                &route.token_in,
                &route.token_out,
                &amount,
            );
            amounts.push_back(amount);
        }
        amounts
    }

    fn quote_add_liquidity(
        e: Env,
        pool: Address,
        pool_type: u32,
        amounts: Vec<u128>,
    ) -> (Vec<u128>, u128) {
        let tokens = validated_pool_tokens(&e, &pool, pool_type);
        if amounts.len() != tokens.len() {
            panic_with_error!(&e, RouterError::MustSupplyAllTokens);
        }
        if pool_type == POOL_TYPE_VOLATILE {
            let pool_client = LiquidityPoolClient::new(&e, &pool);
            let (amount_a, amount_b) = optimal_amounts(
                &e,
                &pool_client.get_reserves(),
                &amounts,
                &zeros(&e, tokens.len()),
            );
            let liquidity = volatile_mint_quote(&e, &pool_client, amount_a, amount_b);
            (vec![&e, amount_a, amount_b], liquidity)
        } else {
            let liquidity = StablePoolClient::new(&e, &pool).calc_add_liquidity(&amounts);
            (amounts, liquidity)
        }
    }

    fn quote_remove_liquidity(e: Env, pool: Address, liquidity: u128) -> Vec<u128> {
        let pool_client = LiquidityPoolClient::new(&e, &pool);
        let pool_type = pool_client.pool_type();
        validated_pool_tokens(&e, &pool, pool_type);
        if pool_type == POOL_TYPE_STABLE {
            return StablePoolClient::new(&e, &pool).calc_remove_liquidity(&liquidity);
        }

        let total_shares = pool_client.get_total_shares();
        let mut amounts = Vec::new(&e);
        for balance in pool_client.get_real_balances().iter() {
            amounts.push_back(if total_shares == 0 {
                0
            } else {
                proportional_amount(&e, liquidity, balance, total_shares)
            });
        }
        amounts
    }

    fn quote_remove_liquidity_one_token(
        e: Env,
        pool: Address,
        liquidity: u128,
        token_idx: u32,
    ) -> u128 {
        validated_pool_tokens(&e, &pool, POOL_TYPE_STABLE);
        StablePoolClient::new(&e, &pool).calc_remove_liquidity_one_token(&liquidity, &token_idx)
    }

    fn quote_remove_liquidity_imbalance(e: Env, pool: Address, amounts: Vec<u128>) -> u128 {
        validated_pool_tokens(&e, &pool, POOL_TYPE_STABLE);
        StablePoolClient::new(&e, &pool).calc_remove_liquidity_imbalance(&amounts)
    }
}

#[contractimpl]
impl SwapInterface for LiquidityPoolRouter {
    // Executes a multi hop trade.
    //
    // # Arguments
    //
    // * `user` - Pays the input. Must authorize the call.
    // * `routes` - The hops, each continuing the previous one's output token.
    // * `amount_in` - Amount of the first hop's input token.
    // * `amount_out_min` - Minimum amount of the last hop's output token.
    // * `to` - The receiver of the output.
    // * `deadline` - Latest ledger timestamp the trade may execute at.
    //
    // # Returns
    //
    // The amount of the last hop's output token received.
    fn swap(
        e: Env,
        user: Address,
        routes: Vec<Route>,
        amount_in: u128,
        amount_out_min: u128,
        to: Address,
        deadline: u64,
    ) -> u128 {
        execute_swap(&e, user, routes, amount_in, amount_out_min, to, deadline, None)
    }

    fn swap_native(
        e: Env,
        user: Address,
        routes: Vec<Route>,
        amount_in: u128,
        amount_out_min: u128,
        to: Address,
        deadline: u64,
        native_amount: u128,
    ) -> u128 {
        execute_swap(
            &e,
            user,
            routes,
            amount_in,
            amount_out_min,
            to,
            deadline,
            Some(native_amount),
        )
    }
}

#[contractimpl]
impl LiquidityInterface for LiquidityPoolRouter {
    // Deposits into a pool.
    //
    // Volatile pools take the desired amounts adjusted to the current price,
    // stable pools take exactly the desired amounts.
    //
    // # Returns
    //
    // The amounts deposited and the shares minted to `to`.
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
    ) -> (Vec<u128>, u128) {
        execute_add_liquidity(
            &e,
            user,
            pool,
            pool_type,
            desired_amounts,
            min_amounts,
            min_liquidity,
            to,
            deadline,
            None,
        )
    }

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
    ) -> (Vec<u128>, u128) {
        execute_add_liquidity(
            &e,
            user,
            pool,
            pool_type,
            desired_amounts,
            min_amounts,
            min_liquidity,
            to,
            deadline,
            Some(native_amount),
        )
    }

    fn remove_liquidity(
        e: Env,
        user: Address,
        pool: Address,
        pool_type: u32,
        liquidity: u128,
        min_amounts: Vec<u128>,
        to: Address,
        deadline: u64,
    ) -> Vec<u128> {
        execute_remove_liquidity(
            &e, user, pool, pool_type, liquidity, min_amounts, to, deadline, false, None,
        )
    }

    fn remove_liquidity_native(
        e: Env,
        user: Address,
        pool: Address,
        pool_type: u32,
        liquidity: u128,
        min_amounts: Vec<u128>,
        to: Address,
        deadline: u64,
    ) -> Vec<u128> {
        execute_remove_liquidity(
            &e, user, pool, pool_type, liquidity, min_amounts, to, deadline, true, None,
        )
    }

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
    ) -> Vec<u128> {
        execute_remove_liquidity(
            &e,
            user,
            pool,
            pool_type,
            liquidity,
            min_amounts,
            to,
            deadline,
            false,
            Some(permit),
        )
    }

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
    ) -> Vec<u128> {
        execute_remove_liquidity(
            &e,
            user,
            pool,
            pool_type,
            liquidity,
            min_amounts,
            to,
            deadline,
            true,
            Some(permit),
        )
    }

    fn remove_liquidity_one_token(
        e: Env,
        user: Address,
        pool: Address,
        liquidity: u128,
        token_idx: u32,
        min_amount: u128,
        to: Address,
        deadline: u64,
    ) -> u128 {
        execute_remove_one_token(
            &e, user, pool, liquidity, token_idx, min_amount, to, deadline, false, None,
        )
    }

    fn remove_one_token_native(
        e: Env,
        user: Address,
        pool: Address,
        liquidity: u128,
        token_idx: u32,
        min_amount: u128,
        to: Address,
        deadline: u64,
    ) -> u128 {
        execute_remove_one_token(
            &e, user, pool, liquidity, token_idx, min_amount, to, deadline, true, None,
        )
    }

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
    ) -> u128 {
        execute_remove_one_token(
            &e,
            user,
            pool,
            liquidity,
            token_idx,
            min_amount,
            to,
            deadline,
            false,
            Some(permit),
        )
    }

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
    ) -> u128 {
        execute_remove_one_token(
            &e,
            user,
            pool,
            liquidity,
            token_idx,
            min_amount,
            to,
            deadline,
            true,
            Some(permit),
        )
    }

    fn remove_liquidity_imbalance(
        e: Env,
        user: Address,
        pool: Address,
        amounts: Vec<u128>,
        max_burn: u128,
        to: Address,
        deadline: u64,
    ) -> u128 {
        execute_remove_imbalance(&e, user, pool, amounts, max_burn, to, deadline, false, None)
    }

    fn remove_imbalance_native(
        e: Env,
        user: Address,
        pool: Address,
        amounts: Vec<u128>,
        max_burn: u128,
        to: Address,
        deadline: u64,
    ) -> u128 {
        execute_remove_imbalance(&e, user, pool, amounts, max_burn, to, deadline, true, None)
    }

    fn remove_imbalance_permit(
        e: Env,
        user: Address,
        pool: Address,
        amounts: Vec<u128>,
        max_burn: u128,
        to: Address,
        deadline: u64,
        permit: PermitParams,
    ) -> u128 {
        execute_remove_imbalance(
            &e,
            user,
            pool,
            amounts,
            max_burn,
            to,
            deadline,
            false,
            Some(permit),
        )
    }

    fn remove_imbalance_native_permit(
        e: Env,
        user: Address,
        pool: Address,
        amounts: Vec<u128>,
        max_burn: u128,
        to: Address,
        deadline: u64,
        permit: PermitParams,
    ) -> u128 {
        execute_remove_imbalance(
            &e,
            user,
            pool,
            amounts,
            max_burn,
            to,
            deadline,
            true,
            Some(permit),
        )
    }
}
