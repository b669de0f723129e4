#![cfg(test)]
extern crate std;

use crate::testutils::Setup;
use soroban_pool_registry_contract::constants::{POOL_TYPE_STABLE, POOL_TYPE_VOLATILE};
use soroban_sdk::{vec, Vec};

#[test]
fn test_integration() {
    let setup = Setup::default();
    let e = &setup.env;
    let tokens = setup.create_tokens(2);
    let usdc = &tokens[0];
    let usdt = &tokens[1];
    let xlm = &setup.wrapped.address;
    let router = &setup.router;

    let xlm_pool = setup.deploy_volatile_pool(&[xlm.clone(), usdc.clone()]);
    let stable_pool = setup.deploy_stable_pool(&[usdc.clone(), usdt.clone()]);
    assert_eq!(
        router.pair_for(&setup.pool_tokens(&[usdc.clone(), usdt.clone()]), &POOL_TYPE_STABLE),
        Some(stable_pool.address.clone())
    );
    assert_eq!(
        router.pair_for(&setup.pool_tokens(&[usdc.clone(), usdt.clone()]), &POOL_TYPE_VOLATILE),
        None
    );

    // seed both pools through the router
    let provider = setup.funded_user(&tokens);
    let (_, xlm_shares) = router.add_liquidity_native(
        &provider,
        &xlm_pool.address,
        &POOL_TYPE_VOLATILE,
        &vec![e, 100_000_0000000, 100_000_0000000],
        &vec![e, 0, 0],
        &0,
        &provider,
        &setup.deadline(),
        &100_000_0000000,
    );
    let (_, stable_shares) = router.add_liquidity(
        &provider,
        &stable_pool.address,
        &POOL_TYPE_STABLE,
        &vec![e, 100_000_0000000, 100_000_0000000],
        &vec![e, 0, 0],
        &0,
        &provider,
        &setup.deadline(),
    );
    assert_eq!(xlm_shares, 100_000_0000000 - 1000);
    assert_eq!(stable_shares, 200_000_000000000000000000);

    // native in, through both pools
    let user = setup.funded_user(&[]);
    let routes = vec![
        e,
        setup.route(xlm, usdc, &xlm_pool.address, POOL_TYPE_VOLATILE),
        setup.route(usdc, usdt, &stable_pool.address, POOL_TYPE_STABLE),
    ];
    let path = router.get_amounts_out_path(&10_0000000, &routes);
    let usdt_out = router.swap_native(
        &user,
        &routes,
        &10_0000000,
        &path.get_unchecked(2),
        &user,
        &setup.deadline(),
        &10_0000000,
    );
    assert_eq!(usdt_out, path.get_unchecked(2));
    assert_eq!(setup.balance(usdt, &user), usdt_out);

    // and back to native
    let routes = vec![
        e,
        setup.route(usdt, usdc, &stable_pool.address, POOL_TYPE_STABLE),
        setup.route(usdc, xlm, &xlm_pool.address, POOL_TYPE_VOLATILE),
    ];
    let native_before = setup.balance(&setup.native.address, &user);
    let xlm_out = router.swap_native(
        &user,
        &routes,
        &usdt_out,
        &0,
        &user,
        &setup.deadline(),
        &0,
    );
    assert!(xlm_out < 10_0000000);
    assert_eq!(setup.balance(&setup.native.address, &user), native_before + xlm_out);
    assert_eq!(setup.balance(usdt, &user), 0);

    // withdraw everything
    router.remove_liquidity_native(
        &provider,
        &xlm_pool.address,
        &POOL_TYPE_VOLATILE,
        &xlm_shares,
        &vec![e, 0, 0],
        &provider,
        &setup.deadline(),
    );
    router.remove_liquidity(
        &provider,
        &stable_pool.address,
        &POOL_TYPE_STABLE,
        &stable_shares,
        &vec![e, 0, 0],
        &provider,
        &setup.deadline(),
    );
    assert_eq!(stable_pool.get_total_shares(), 0);
    assert_eq!(stable_pool.get_reserves(), Vec::from_array(e, [0, 0]));
    // locked minimum liquidity keeps the volatile pool priced
    assert_eq!(xlm_pool.get_total_shares(), 1000);
    assert_eq!(xlm_pool.get_reserves(), xlm_pool.get_real_balances());

    setup.assert_holds_nothing(&router.address, &tokens);
    assert_eq!(
        setup.wrapped.total_supply(),
        setup.balance(&setup.native.address, &setup.wrapped.address)
    );
}

#[test]
fn test_registry_tracks_both_pool_types() {
    let setup = Setup::default();
    let tokens = setup.create_tokens(2);
    let volatile = setup.deploy_volatile_pool(&tokens);
    let stable = setup.deploy_stable_pool(&tokens);

    let pools = setup.registry.get_pools(&setup.pool_tokens(&tokens));
    assert_eq!(pools.len(), 2);
    assert_eq!(pools.get(POOL_TYPE_VOLATILE), Some(volatile.address.clone()));
    assert_eq!(pools.get(POOL_TYPE_STABLE), Some(stable.address.clone()));

    setup
        .registry
        .remove_pool(&setup.admin, &setup.pool_tokens(&tokens), &POOL_TYPE_STABLE);
    assert_eq!(
        setup
            .router
            .pair_for(&setup.pool_tokens(&tokens), &POOL_TYPE_STABLE),
        None
    );
    assert_eq!(
        setup
            .router
            .pair_for(&setup.pool_tokens(&tokens), &POOL_TYPE_VOLATILE),
        Some(volatile.address)
    );
}
