#![cfg(test)]
extern crate std;

use crate::testutils::{create_token_contract, get_token_admin_client, Setup, TestConfig};
use crate::{VolatilePool, VolatilePoolClient};
use soroban_sdk::testutils::Address as _;
use soroban_sdk::token::TokenClient;
use soroban_sdk::{contract, contractimpl, contracttype, vec, Address, Bytes, Env, Vec};
use utils::math::FEE_DENOMINATOR;
use utils::reentrancy::LockState;

#[contract]
pub struct FlashBorrower;

#[derive(Clone)]
#[contracttype]
enum FlashKey {
    Repay,
}

#[contractimpl]
impl FlashBorrower {
    pub fn set_repay(e: Env, token: Address, amount: i128) {
        e.storage().instance().set(&FlashKey::Repay, &(token, amount));
    }

    pub fn swap_callback(e: Env, pool: Address, _amount0_out: u128, _amount1_out: u128, data: Bytes) {
        if data.get(0) == Some(1) {
            VolatilePoolClient::new(&e, &pool).sync();
        }
        let (token, amount): (Address, i128) =
            e.storage().instance().get(&FlashKey::Repay).unwrap();
        TokenClient::new(&e, &token).transfer(&e.current_contract_address(), &pool, &amount);
    }
}

fn quote(amount_in: u128, reserve_in: u128, reserve_out: u128, fee: u128) -> u128 {
    let amount_in_net = amount_in * (FEE_DENOMINATOR - fee);
    reserve_out * amount_in_net / (reserve_in * FEE_DENOMINATOR + amount_in_net)
}

fn example_setup<'a>(reserve0: u128, reserve1: u128) -> Setup<'a> {
    let setup = Setup::new_with_config(&TestConfig {
        swap_fee: 10_000_000,
        admin_fee: 5_000_000_000,
        ..TestConfig::default()
    });
    let user = &setup.users[0];
    setup
        .token0
        .transfer(user, &setup.pool.address, &(reserve0 as i128));
    setup
        .token1
        .transfer(user, &setup.pool.address, &(reserve1 as i128));
    setup.pool.sync();
    setup
}

#[test]
fn test_example_quote_matches_formula() {
    let setup = example_setup(1000, 10);
    let e = &setup.env;
    assert_eq!(setup.pool.get_reserves(), vec![e, 1000, 10]);
    assert_eq!(
        setup
            .pool
            .get_amount_out(&setup.token0.address, &setup.token1.address, &100),
        quote(100, 1000, 10, 10_000_000),
    );
}

#[test]
#[should_panic(expected = "Error(Contract, #206)")]
fn test_example_output_above_quote_fails_k_check() {
    let setup = example_setup(1000, 10);
    let user = &setup.users[0];
    let amount_out = setup
        .pool
        .get_amount_out(&setup.token0.address, &setup.token1.address, &100);

    setup.token0.transfer(user, &setup.pool.address, &100);
    setup
        .pool
        .swap(&0, &(amount_out + 1), user, &Bytes::new(&setup.env));
}

#[test]
fn test_exact_quote_swap_accrues_admin_fee() {
    let reserve0 = 1000_0000000;
    let reserve1 = 10_0000000;
    let setup = example_setup(reserve0, reserve1);
    let e = &setup.env;
    let user = &setup.users[0];
    let amount_in = 100_0000000;

    let expected_out = quote(amount_in, reserve0, reserve1, 10_000_000);
    assert_eq!(setup.swap_exact_in(user, 0, amount_in), expected_out);

    // 0.1% of the input is the swap fee, half of it goes to the admin
    let admin_part = 500_000;
    assert_eq!(setup.pool.get_admin_fees(), vec![e, admin_part, 0]);
    let reserves = setup.pool.get_reserves();
    assert_eq!(
        reserves,
        vec![e, reserve0 + amount_in - admin_part, reserve1 - expected_out]
    );
    assert_eq!(setup.pool.get_real_balances(), reserves);
    assert!(reserves.get(0).unwrap() * reserves.get(1).unwrap() >= reserve0 * reserve1);
}

#[test]
#[should_panic(expected = "Error(Contract, #206)")]
fn test_scaled_output_above_quote_fails_k_check() {
    let setup = example_setup(1000_0000000, 10_0000000);
    let user = &setup.users[0];
    let amount_out = setup.pool.get_amount_out(
        &setup.token0.address,
        &setup.token1.address,
        &100_0000000,
    );

    setup
        .token0
        .transfer(user, &setup.pool.address, &100_0000000);
    setup
        .pool
        .swap(&0, &(amount_out + 1), user, &Bytes::new(&setup.env));
}

#[test]
fn test_swaps_never_decrease_k() {
    let setup = Setup::default();
    let user = &setup.users[0];
    setup.deposit(user, 100_0000000, 300_0000000);

    let mut previous = setup.pool.get_reserves();
    for i in 0..20_u32 {
        let amount_in = 1_0000000 + (i as u128) * 7_3456789;
        setup.swap_exact_in(user, i % 2, amount_in);

        let reserves = setup.pool.get_reserves();
        assert!(
            reserves.get(0).unwrap() * reserves.get(1).unwrap()
                >= previous.get(0).unwrap() * previous.get(1).unwrap()
        );
        assert_eq!(setup.pool.get_real_balances(), reserves);
        previous = reserves;
    }
    assert_eq!(setup.pool.get_lock_state(), LockState::Unlocked);
}

#[test]
fn test_mint_and_burn() {
    let setup = Setup::default();
    let e = &setup.env;
    let user1 = &setup.users[0];
    let user2 = &setup.users[1];

    let liquidity1 = setup.deposit(user1, 100_0000000, 100_0000000);
    assert_eq!(liquidity1, 100_0000000 - 1000);
    assert_eq!(setup.pool.balance(user1), liquidity1 as i128);
    assert_eq!(setup.pool.get_total_shares(), 100_0000000);

    let liquidity2 = setup.deposit(user2, 50_0000000, 60_0000000);
    assert_eq!(liquidity2, 50_0000000);
    assert_eq!(setup.pool.get_reserves(), vec![e, 150_0000000, 160_0000000]);

    setup
        .pool
        .transfer(user2, &setup.pool.address, &(liquidity2 as i128));
    let amounts = setup.pool.burn(user2);
    assert_eq!(amounts, vec![e, 50_0000000, 53_3333333]);
    assert_eq!(setup.pool.balance(user2), 0);
    assert_eq!(setup.pool.get_total_shares(), 100_0000000);
    assert_eq!(setup.pool.get_reserves(), vec![e, 100_0000000, 106_6666667]);
    assert_eq!(setup.pool.get_real_balances(), setup.pool.get_reserves());

    setup
        .pool
        .transfer(user1, &setup.pool.address, &(liquidity1 as i128));
    setup.pool.burn(user1);
    // only the locked minimum liquidity is left
    assert_eq!(setup.pool.get_total_shares(), 1000);
    assert_eq!(setup.pool.get_reserves(), vec![e, 1000, 1067]);
}

#[test]
#[should_panic(expected = "Error(Contract, #207)")]
fn test_first_mint_below_minimum_liquidity() {
    let setup = Setup::default();
    setup.deposit(&setup.users[0], 1000, 1000);
}

#[test]
#[should_panic(expected = "Error(Contract, #207)")]
fn test_mint_without_deposit() {
    let setup = Setup::default();
    let user = &setup.users[0];
    setup.deposit(user, 100_0000000, 100_0000000);
    setup.pool.mint(user);
}

#[test]
#[should_panic(expected = "Error(Contract, #208)")]
fn test_burn_without_shares() {
    let setup = Setup::default();
    let user = &setup.users[0];
    setup.deposit(user, 100_0000000, 100_0000000);
    setup.pool.burn(user);
}

#[test]
fn test_skim_and_sync() {
    let setup = Setup::default();
    let e = &setup.env;
    let user1 = &setup.users[0];
    let user2 = &setup.users[1];
    setup.deposit(user1, 100_0000000, 100_0000000);

    setup.token0.transfer(user1, &setup.pool.address, &500);
    assert_eq!(setup.pool.get_real_balances(), vec![e, 100_0000500, 100_0000000]);
    let user2_balance = setup.token0.balance(user2);
    setup.pool.skim(user2);
    assert_eq!(setup.token0.balance(user2), user2_balance + 500);
    assert_eq!(setup.pool.get_real_balances(), setup.pool.get_reserves());

    setup.token1.transfer(user1, &setup.pool.address, &700);
    setup.pool.sync();
    assert_eq!(setup.pool.get_reserves(), vec![e, 100_0000000, 100_0000700]);
    assert_eq!(setup.pool.get_real_balances(), setup.pool.get_reserves());
}

#[test]
#[should_panic(expected = "Error(Contract, #209)")]
fn test_sync_overflow() {
    let setup = Setup::default();
    let user = &setup.users[0];
    let too_much = 1_i128 << 112;
    get_token_admin_client(&setup.env, &setup.token0.address).mint(user, &too_much);
    setup.token0.transfer(user, &setup.pool.address, &too_much);
    setup.pool.sync();
}

#[test]
#[should_panic(expected = "Error(Contract, #205)")]
fn test_swap_to_pool_token() {
    let setup = Setup::default();
    setup.deposit(&setup.users[0], 100_0000000, 100_0000000);
    setup
        .pool
        .swap(&0, &1000, &setup.token0.address, &Bytes::new(&setup.env));
}

#[test]
#[should_panic(expected = "Error(Contract, #203)")]
fn test_swap_zero_output() {
    let setup = Setup::default();
    let user = &setup.users[0];
    setup.deposit(user, 100_0000000, 100_0000000);
    setup.pool.swap(&0, &0, user, &Bytes::new(&setup.env));
}

#[test]
#[should_panic(expected = "Error(Contract, #204)")]
fn test_swap_output_above_reserve() {
    let setup = Setup::default();
    let user = &setup.users[0];
    setup.deposit(user, 100_0000000, 100_0000000);
    setup
        .pool
        .swap(&0, &100_0000000, user, &Bytes::new(&setup.env));
}

#[test]
#[should_panic(expected = "Error(Contract, #202)")]
fn test_swap_without_input() {
    let setup = Setup::default();
    let user = &setup.users[0];
    setup.deposit(user, 100_0000000, 100_0000000);
    setup.pool.swap(&0, &1000, user, &Bytes::new(&setup.env));
}

#[test]
#[should_panic(expected = "Error(Contract, #202)")]
fn test_quote_zero_input() {
    let setup = Setup::default();
    setup.deposit(&setup.users[0], 100_0000000, 100_0000000);
    setup
        .pool
        .get_amount_out(&setup.token0.address, &setup.token1.address, &0);
}

#[test]
#[should_panic(expected = "Error(Contract, #204)")]
fn test_quote_empty_pool() {
    let setup = Setup::default();
    setup
        .pool
        .get_amount_out(&setup.token0.address, &setup.token1.address, &100);
}

#[test]
#[should_panic(expected = "Error(Contract, #2007)")]
fn test_quote_same_token() {
    let setup = Setup::default();
    setup
        .pool
        .get_amount_out(&setup.token0.address, &setup.token0.address, &100);
}

#[test]
#[should_panic(expected = "Error(Contract, #2008)")]
fn test_quote_unknown_token() {
    let setup = Setup::default();
    setup.pool.get_amount_out(
        &Address::generate(&setup.env),
        &setup.token0.address,
        &100,
    );
}

#[test]
fn test_flash_swap() {
    let setup = Setup::default();
    let e = &setup.env;
    setup.deposit(&setup.users[0], 100_0000000, 100_0000000);

    let borrower = FlashBorrowerClient::new(e, &e.register(FlashBorrower, ()));
    get_token_admin_client(e, &setup.token1.address).mint(&borrower.address, &10_0000000);
    // borrow 1 token and return it with more than the 0.3% fee
    borrower.set_repay(&setup.token1.address, &1_0040000);
    setup
        .pool
        .swap(&0, &1_0000000, &borrower.address, &Bytes::from_array(e, &[0]));

    assert_eq!(setup.token1.balance(&borrower.address), 10_0000000 - 40000);
    assert_eq!(setup.pool.get_reserves(), vec![e, 100_0000000, 100_0040000]);
    assert_eq!(setup.pool.get_lock_state(), LockState::Unlocked);
}

// The host refuses the nested call before the pool's own guard is reached.
// The guard's Locked error is covered in utils.
#[test]
fn test_flash_swap_reentrancy() {
    let setup = Setup::default();
    let e = &setup.env;
    setup.deposit(&setup.users[0], 100_0000000, 100_0000000);

    let borrower = FlashBorrowerClient::new(e, &e.register(FlashBorrower, ()));
    get_token_admin_client(e, &setup.token1.address).mint(&borrower.address, &10_0000000);
    borrower.set_repay(&setup.token1.address, &1_0040000);
    let result = setup
        .pool
        .try_swap(&0, &1_0000000, &borrower.address, &Bytes::from_array(e, &[1]));

    assert!(result.is_err());
    assert_eq!(setup.token1.balance(&borrower.address), 10_0000000);
    assert_eq!(setup.pool.get_reserves(), vec![e, 100_0000000, 100_0000000]);
    assert_eq!(setup.pool.get_lock_state(), LockState::Unlocked);
}

#[test]
fn test_fees_management_and_claim() {
    let setup = Setup::new_with_config(&TestConfig {
        admin_fee: 5_000_000_000,
        ..TestConfig::default()
    });
    let e = &setup.env;
    let user = &setup.users[0];
    setup.deposit(user, 100_0000000, 100_0000000);

    setup.pool.set_swap_fee(&setup.operations_admin, &100_000_000);
    assert_eq!(setup.pool.get_fee(), 100_000_000);
    setup.pool.set_admin_fee(&setup.admin, &2_000_000_000);
    assert_eq!(setup.pool.get_admin_fee(), 2_000_000_000);

    // 1% fee, 20% of it to the admin
    setup.swap_exact_in(user, 1, 10_0000000);
    assert_eq!(setup.pool.get_admin_fees(), vec![e, 0, 200_000]);
    let reserves_before = setup.pool.get_reserves();

    assert_eq!(setup.pool.claim_fees(&setup.admin), vec![e, 0, 200_000]);
    assert_eq!(setup.token1.balance(&setup.admin), 200_000);
    assert_eq!(setup.pool.get_admin_fees(), vec![e, 0, 0]);
    assert_eq!(setup.pool.get_reserves(), reserves_before);
    assert_eq!(setup.pool.get_real_balances(), reserves_before);
}

#[test]
#[should_panic(expected = "Error(Contract, #510)")]
fn test_real_balances_below_admin_fees() {
    let setup = Setup::default();
    let e = &setup.env;
    setup.deposit(&setup.users[0], 100_0000000, 100_0000000);

    // accrued fees above what the pool still holds, as after a clawback
    e.as_contract(&setup.pool.address, || {
        crate::storage::put_admin_fees(e, &vec![e, 0, 100_0000001]);
    });
    setup.pool.get_real_balances();
}

#[test]
#[should_panic(expected = "Error(Contract, #102)")]
fn test_set_fee_unauthorized() {
    let setup = Setup::default();
    setup
        .pool
        .set_swap_fee(&Address::generate(&setup.env), &100);
}

#[test]
#[should_panic(expected = "Error(Contract, #2003)")]
fn test_set_fee_above_maximum() {
    let setup = Setup::default();
    setup.pool.set_swap_fee(&setup.admin, &1_000_000_001);
}

#[test]
#[should_panic(expected = "Error(Contract, #2012)")]
fn test_set_admin_fee_above_maximum() {
    let setup = Setup::default();
    setup
        .pool
        .set_admin_fee(&setup.admin, &(FEE_DENOMINATOR + 1));
}

#[test]
#[should_panic(expected = "Error(Contract, #102)")]
fn test_claim_fees_unauthorized() {
    let setup = Setup::default();
    setup.pool.claim_fees(&setup.users[0]);
}

#[test]
#[should_panic(expected = "Error(Contract, #201)")]
fn test_initialize_twice() {
    let setup = Setup::default();
    setup.pool.initialize(
        &setup.admin,
        &setup.admin,
        &setup.pool.get_tokens(),
        &0,
        &0,
    );
}

#[test]
#[should_panic(expected = "Error(Contract, #2021)")]
fn test_initialize_unsorted_tokens() {
    let e = Env::default();
    e.mock_all_auths();
    let admin = Address::generate(&e);
    let mut token0 = create_token_contract(&e, &admin).address;
    let mut token1 = create_token_contract(&e, &admin).address;
    if token0 < token1 {
        std::mem::swap(&mut token0, &mut token1);
    }
    let pool = VolatilePoolClient::new(&e, &e.register(VolatilePool, ()));
    pool.initialize(&admin, &admin, &Vec::from_array(&e, [token0, token1]), &0, &0);
}

#[test]
#[should_panic(expected = "Error(Contract, #2001)")]
fn test_initialize_three_tokens() {
    let e = Env::default();
    e.mock_all_auths();
    let admin = Address::generate(&e);
    let mut tokens = std::vec::Vec::new();
    for _ in 0..3 {
        tokens.push(create_token_contract(&e, &admin).address);
    }
    tokens.sort();
    let pool = VolatilePoolClient::new(&e, &e.register(VolatilePool, ()));
    pool.initialize(
        &admin,
        &admin,
        &Vec::from_slice(&e, tokens.as_slice()),
        &0,
        &0,
    );
}
