use crate::constants::{POOL_TYPE_STABLE, POOL_TYPE_VOLATILE, VOLATILE_MINIMUM_LIQUIDITY};
use crate::errors::RouterError;
use crate::pool_interface::{LiquidityPoolClient, RegistryClient};
use crate::storage::{get_registry, get_wrapped_native, Route};
use soroban_fixed_point_math::SorobanFixedPoint;
use soroban_sdk::{panic_with_error, Address, Env, Vec};
use token_share::shares::{first_mint_shares, proportional_shares};

pub(crate) fn assert_deadline(e: &Env, deadline: u64) {
    if e.ledger().timestamp() > deadline {
        panic_with_error!(e, RouterError::Expired);
    }
}

pub(crate) fn is_known_pool_type(pool_type: u32) -> bool {
    pool_type == POOL_TYPE_VOLATILE || pool_type == POOL_TYPE_STABLE
}

pub(crate) fn is_sorted_set(tokens: &Vec<Address>) -> bool {
    for i in 1..tokens.len() {
        if tokens.get_unchecked(i - 1) >= tokens.get_unchecked(i) {
            return false;
        }
    }
    true
}

// Tokens of `pool` once it is confirmed to be the registered pool of `pool_type`
// for them.
pub(crate) fn validated_pool_tokens(e: &Env, pool: &Address, pool_type: u32) -> Vec<Address> {
    if !is_known_pool_type(pool_type) {
        panic_with_error!(e, RouterError::InvalidPairType);
    }
    let tokens = LiquidityPoolClient::new(e, pool).get_tokens();
    let registered = RegistryClient::new(e, &get_registry(e)).get_pool(&tokens, &pool_type);
    if registered.as_ref() != Some(pool) {
        if pool_type == POOL_TYPE_VOLATILE {
            panic_with_error!(e, RouterError::NotVolatilePair);
        }
        panic_with_error!(e, RouterError::NotStablePair);
    }
    tokens
}

// Checks every hop and returns the tokens of each hop's pool.
pub(crate) fn validate_routes(e: &Env, routes: &Vec<Route>) -> Vec<Vec<Address>> {
    if routes.is_empty() {
        panic_with_error!(e, RouterError::EmptyRoute);
    }

    let mut pools_tokens = Vec::new(e);
    for i in 0..routes.len() {
        let route = routes.get_unchecked(i);
        if i > 0 && routes.get_unchecked(i - 1).token_out != route.token_in {
            panic_with_error!(e, RouterError::InvalidPath);
        }
        if route.token_in == route.token_out {
            panic_with_error!(e, RouterError::InvalidPath);
        }

        let tokens = validated_pool_tokens(e, &route.pool, route.pool_type);
        if !tokens.contains(&route.token_in) || !tokens.contains(&route.token_out) {
            panic_with_error!(e, RouterError::InvalidPath);
        }
        pools_tokens.push_back(tokens);
    }
    pools_tokens
}

pub(crate) fn native_index(e: &Env, tokens: &Vec<Address>) -> u32 {
    match tokens.first_index_of(get_wrapped_native(e)) {
        Some(idx) => idx,
        None => panic_with_error!(e, RouterError::NativeTokenMissing),
    }
}

// Volatile deposit amounts at the current price, bounded by the desired amounts.
pub(crate) fn optimal_amounts(
    e: &Env,
    reserves: &Vec<u128>,
    desired: &Vec<u128>,
    mins: &Vec<u128>,
) -> (u128, u128) {
    let reserve_a = reserves.get_unchecked(0);
    let reserve_b = reserves.get_unchecked(1);
    let desired_a = desired.get_unchecked(0);
    let desired_b = desired.get_unchecked(1);
    if reserve_a == 0 || reserve_b == 0 {
        return (desired_a, desired_b);
    }

    let optimal_b = desired_a.fixed_mul_floor(e, &reserve_b, &reserve_a);
    if optimal_b <= desired_b {
        if optimal_b < mins.get_unchecked(1) {
            panic_with_error!(e, RouterError::InsufficientBAmount);
        }
        return (desired_a, optimal_b);
    }

    let optimal_a = desired_b.fixed_mul_floor(e, &reserve_a, &reserve_b);
    if optimal_a < mins.get_unchecked(0) {
        panic_with_error!(e, RouterError::InsufficientAAmount);
    }
    (optimal_a, desired_b)
}

// Shares a volatile pool would mint for depositing `amount_a` and `amount_b`.
pub(crate) fn volatile_mint_quote(
    e: &Env,
    pool: &LiquidityPoolClient,
    amount_a: u128,
    amount_b: u128,
) -> u128 {
    let total_shares = pool.get_total_shares();
    if total_shares == 0 {
        return first_mint_shares(e, amount_a, amount_b).saturating_sub(VOLATILE_MINIMUM_LIQUIDITY);
    }
    let reserves = pool.get_reserves();
    let shares_a = proportional_shares(e, amount_a, reserves.get_unchecked(0), total_shares);
    let shares_b = proportional_shares(e, amount_b, reserves.get_unchecked(1), total_shares);
    shares_a.min(shares_b)
}
