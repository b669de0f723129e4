#![cfg(test)]
extern crate std;

use crate::testutils::Setup;
use proptest::prelude::*;
use soroban_fixed_point_math::SorobanFixedPoint;
use soroban_pool_registry_contract::constants::{POOL_TYPE_STABLE, POOL_TYPE_VOLATILE};
use soroban_sdk::token::TokenClient;
use soroban_sdk::{vec, Address, Vec};

const SEED: u128 = 100_000_0000000;

// Precision of the invariant solver, in 18 decimals units.
const D_TOLERANCE: u128 = 1000;

#[derive(Clone, Debug)]
enum VolatileOp {
    Swap { zero_for_one: bool, amount: u128 },
    Add { amount: u128 },
    // withdraws 1/parts of the user's shares
    Remove { parts: u128 },
    // plain transfer to the pool, outside of any pool call
    Donate { token1: bool, amount: u128 },
    Sync,
    Skim,
}

fn volatile_op_strategy() -> impl Strategy<Value = VolatileOp> {
    prop_oneof![
        (any::<bool>(), 1_0000000u128..=5_000_0000000u128)
            .prop_map(|(zero_for_one, amount)| VolatileOp::Swap { zero_for_one, amount }),
        (1_0000000u128..=5_000_0000000u128).prop_map(|amount| VolatileOp::Add { amount }),
        (1u128..=4u128).prop_map(|parts| VolatileOp::Remove { parts }),
        (any::<bool>(), 1u128..=1_000_0000000u128)
            .prop_map(|(token1, amount)| VolatileOp::Donate { token1, amount }),
        Just(VolatileOp::Sync),
        Just(VolatileOp::Skim),
    ]
}

#[derive(Clone, Debug)]
enum StableOp {
    Swap { zero_for_one: bool, amount: u128 },
    Add { amount0: u128, amount1: u128 },
    // withdraws 1/parts of the user's shares
    Remove { parts: u128 },
    RemoveOneToken { token_idx: u32, parts: u128 },
    // exact amounts, in percent of the user's proportional claim
    RemoveImbalance { percent0: u128, percent1: u128 },
}

impl StableOp {
    fn is_withdrawal(&self) -> bool {
        matches!(
            self,
            StableOp::Remove { .. } | StableOp::RemoveOneToken { .. } | StableOp::RemoveImbalance { .. }
        )
    }
}

fn stable_op_strategy() -> impl Strategy<Value = StableOp> {
    prop_oneof![
        (any::<bool>(), 1_0000000u128..=2_000_0000000u128)
            .prop_map(|(zero_for_one, amount)| StableOp::Swap { zero_for_one, amount }),
        (0u128..=1_000_0000000u128, 1_0000000u128..=1_000_0000000u128)
            .prop_map(|(amount0, amount1)| StableOp::Add { amount0, amount1 }),
        (1u128..=4u128).prop_map(|parts| StableOp::Remove { parts }),
        (0u32..2, 1u128..=4u128)
            .prop_map(|(token_idx, parts)| StableOp::RemoveOneToken { token_idx, parts }),
        (0u128..=50, 0u128..=50).prop_map(|(percent0, percent1)| StableOp::RemoveImbalance {
            percent0,
            percent1
        }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn prop_volatile_reserves_follow_balances(
        ops in prop::collection::vec(volatile_op_strategy(), 1..24)
    ) {
        let setup = Setup::default();
        let e = &setup.env;
        let tokens = setup.create_tokens(2);
        let pool = setup.deploy_volatile_pool(&tokens);
        let provider = setup.funded_user(&tokens);
        let user = setup.funded_user(&tokens);
        setup.seed(&provider, &pool.address, POOL_TYPE_VOLATILE, SEED);

        for op in ops {
            let reserves = pool.get_reserves();
            let k_before = reserves.get_unchecked(0) * reserves.get_unchecked(1);
            let reconciled = !matches!(op, VolatileOp::Donate { .. });
            match op {
                VolatileOp::Swap { zero_for_one, amount } => {
                    let (token_in, token_out) = if zero_for_one {
                        (&tokens[0], &tokens[1])
                    } else {
                        (&tokens[1], &tokens[0])
                    };
                    let routes = vec![
                        e,
                        setup.route(token_in, token_out, &pool.address, POOL_TYPE_VOLATILE),
                    ];
                    let quote = pool.get_amount_out(token_in, token_out, &amount);
                    let out = setup
                        .router
                        .swap(&user, &routes, &amount, &0, &user, &setup.deadline());
                    prop_assert_eq!(out, quote);

                    let reserves = pool.get_reserves();
                    prop_assert!(reserves.get_unchecked(0) * reserves.get_unchecked(1) >= k_before);
                }
                VolatileOp::Add { amount } => {
                    let (amounts, shares) = setup.router.add_liquidity(
                        &user,
                        &pool.address,
                        &POOL_TYPE_VOLATILE,
                        &vec![e, amount, amount],
                        &vec![e, 0, 0],
                        &0,
                        &user,
                        &setup.deadline(),
                    );
                    prop_assert!(shares > 0);
                    prop_assert!(amounts.get_unchecked(0) <= amount);
                    prop_assert!(amounts.get_unchecked(1) <= amount);
                }
                VolatileOp::Remove { parts } => {
                    let liquidity = pool.balance(&user) as u128 / parts;
                    if liquidity == 0 {
                        continue;
                    }
                    let quote = setup.router.quote_remove_liquidity(&pool.address, &liquidity);
                    let amounts = setup.router.remove_liquidity(
                        &user,
                        &pool.address,
                        &POOL_TYPE_VOLATILE,
                        &liquidity,
                        &vec![e, 0, 0],
                        &user,
                        &setup.deadline(),
                    );
                    prop_assert_eq!(amounts, quote);
                }
                VolatileOp::Donate { token1, amount } => {
                    let token = &tokens[token1 as usize];
                    TokenClient::new(e, token).transfer(&user, &pool.address, &(amount as i128));
                }
                VolatileOp::Sync => pool.sync(),
                VolatileOp::Skim => {
                    let surplus0 = pool.get_real_balances().get_unchecked(0) - reserves.get_unchecked(0);
                    let balance_before = setup.balance(&tokens[0], &provider);
                    pool.skim(&provider);
                    prop_assert_eq!(setup.balance(&tokens[0], &provider), balance_before + surplus0);
                }
            }

            let reserves = pool.get_reserves();
            let real_balances = pool.get_real_balances();
            if reconciled {
                prop_assert_eq!(reserves, real_balances);
            } else {
                prop_assert!(reserves.get_unchecked(0) <= real_balances.get_unchecked(0));
                prop_assert!(reserves.get_unchecked(1) <= real_balances.get_unchecked(1));
            }
            prop_assert_eq!(
                pool.get_total_shares(),
                pool.balance(&provider) as u128 + pool.balance(&user) as u128 + 1000
            );
            setup.assert_holds_nothing(&setup.router.address, &tokens);
        }
    }

    #[test]
    fn prop_stable_invariant_never_drops(
        ops in prop::collection::vec(stable_op_strategy(), 1..24)
    ) {
        let setup = Setup::default();
        let e = &setup.env;
        let tokens = setup.create_tokens(2);
        let pool = setup.deploy_stable_pool(&tokens);
        let provider = setup.funded_user(&tokens);
        let user = setup.funded_user(&tokens);
        setup.seed(&provider, &pool.address, POOL_TYPE_STABLE, SEED);

        for op in ops {
            let d_before = pool.get_d();
            let total_before = pool.get_total_shares();
            let virtual_price_before = pool.get_virtual_price();
            let withdrawal = op.is_withdrawal();
            let user_shares = pool.balance(&user) as u128;
            match op {
                StableOp::Swap { zero_for_one, amount } => {
                    let (token_in, token_out) = if zero_for_one {
                        (&tokens[0], &tokens[1])
                    } else {
                        (&tokens[1], &tokens[0])
                    };
                    let routes = vec![
                        e,
                        setup.route(token_in, token_out, &pool.address, POOL_TYPE_STABLE),
                    ];
                    setup
                        .router
                        .swap(&user, &routes, &amount, &0, &user, &setup.deadline());
                }
                StableOp::Add { amount0, amount1 } => {
                    let amounts = vec![e, amount0, amount1];
                    let quote = setup
                        .router
                        .quote_add_liquidity(&pool.address, &POOL_TYPE_STABLE, &amounts)
                        .1;
                    let (_, shares) = setup.router.add_liquidity(
                        &user,
                        &pool.address,
                        &POOL_TYPE_STABLE,
                        &amounts,
                        &vec![e, 0, 0],
                        &quote,
                        &user,
                        &setup.deadline(),
                    );
                    prop_assert_eq!(shares, quote);
                }
                StableOp::Remove { parts } => {
                    let liquidity = user_shares / parts;
                    if liquidity == 0 {
                        continue;
                    }
                    let quote = setup.router.quote_remove_liquidity(&pool.address, &liquidity);
                    let amounts = setup.router.remove_liquidity(
                        &user,
                        &pool.address,
                        &POOL_TYPE_STABLE,
                        &liquidity,
                        &vec![e, 0, 0],
                        &user,
                        &setup.deadline(),
                    );
                    prop_assert_eq!(amounts, quote);
                }
                StableOp::RemoveOneToken { token_idx, parts } => {
                    let liquidity = user_shares / parts;
                    if liquidity == 0 {
                        continue;
                    }
                    let quote = setup.router.quote_remove_liquidity_one_token(
                        &pool.address,
                        &liquidity,
                        &token_idx,
                    );
                    let amount = setup.router.remove_liquidity_one_token(
                        &user,
                        &pool.address,
                        &liquidity,
                        &token_idx,
                        &quote,
                        &user,
                        &setup.deadline(),
                    );
                    prop_assert_eq!(amount, quote);
                }
                StableOp::RemoveImbalance { percent0, percent1 } => {
                    if user_shares == 0 {
                        continue;
                    }
                    let claim = setup.router.quote_remove_liquidity(&pool.address, &user_shares);
                    let amounts = vec![
                        e,
                        claim.get_unchecked(0) * percent0 / 100,
                        claim.get_unchecked(1) * percent1 / 100,
                    ];
                    if amounts.iter().all(|amount| amount == 0) {
                        continue;
                    }
                    let quote = setup
                        .router
                        .quote_remove_liquidity_imbalance(&pool.address, &amounts);
                    let burned = setup.router.remove_liquidity_imbalance(
                        &user,
                        &pool.address,
                        &amounts,
                        &user_shares,
                        &user,
                        &setup.deadline(),
                    );
                    prop_assert_eq!(burned, quote);
                    // unused shares come back to the user
                    prop_assert_eq!(pool.balance(&user) as u128, user_shares - burned);
                }
            }

            let d_after = pool.get_d();
            if withdrawal {
                // D falls, but never below its pre-burn value scaled to the remaining supply
                let total_after = pool.get_total_shares();
                prop_assert!(total_after < total_before);
                prop_assert!(d_after <= d_before);
                prop_assert!(
                    d_after + D_TOLERANCE >= d_before.fixed_mul_floor(e, &total_after, &total_before)
                );
            } else {
                prop_assert!(d_after >= d_before);
            }
            // one unit of rounding in the share price
            prop_assert!(pool.get_virtual_price() + 1 >= virtual_price_before);
            prop_assert_eq!(pool.get_reserves(), pool.get_real_balances());
            setup.assert_holds_nothing(&setup.router.address, &tokens);
        }
    }

    #[test]
    fn prop_router_keeps_nothing_on_any_route(
        hops in 1usize..=4,
        stable_hops in prop::array::uniform4(any::<bool>()),
        reverse in any::<bool>(),
        amount_in in 1_0000000u128..=1_000_0000000u128,
    ) {
        let setup = Setup::default();
        let e = &setup.env;
        let tokens = setup.create_tokens(5);
        let provider = setup.funded_user(&tokens);
        let user = setup.funded_user(&tokens);

        // a volatile and a stable pool for every neighbouring pair
        let mut volatile_pools = std::vec::Vec::new();
        let mut stable_pools = std::vec::Vec::new();
        for pair in tokens.windows(2) {
            let volatile = setup.deploy_volatile_pool(pair);
            let stable = setup.deploy_stable_pool(pair);
            setup.seed(&provider, &volatile.address, POOL_TYPE_VOLATILE, SEED);
            setup.seed(&provider, &stable.address, POOL_TYPE_STABLE, SEED);
            volatile_pools.push(volatile.address.clone());
            stable_pools.push(stable.address.clone());
        }

        let mut path: std::vec::Vec<usize> = (0..=hops).collect();
        if reverse {
            path.reverse();
        }
        let mut routes = Vec::new(e);
        for (i, hop) in path.windows(2).enumerate() {
            let pair_idx = hop[0].min(hop[1]);
            let (pool, pool_type) = if stable_hops[i] {
                (&stable_pools[pair_idx], POOL_TYPE_STABLE)
            } else {
                (&volatile_pools[pair_idx], POOL_TYPE_VOLATILE)
            };
            routes.push_back(setup.route(&tokens[hop[0]], &tokens[hop[1]], pool, pool_type));
        }

        let token_out = &tokens[path[hops]];
        let quote = setup.router.get_amounts_out_path(&amount_in, &routes);
        let out_before = setup.balance(token_out, &user);
        let out = setup.router.swap(
            &user,
            &routes,
            &amount_in,
            &quote.get_unchecked(hops as u32),
            &user,
            &setup.deadline(),
        );

        prop_assert_eq!(out, quote.get_unchecked(hops as u32));
        prop_assert_eq!(setup.balance(token_out, &user), out_before + out);
        setup.assert_holds_nothing(&setup.router.address, &tokens);
        let pools: std::vec::Vec<&Address> = volatile_pools.iter().chain(stable_pools.iter()).collect();
        for pool in pools {
            prop_assert_eq!(setup.balance(pool, &setup.router.address), 0);
        }
    }
}
