#![cfg(test)]
extern crate std;

use crate::constants::{POOL_TYPE_STABLE, POOL_TYPE_VOLATILE};
use crate::{PoolRegistry, PoolRegistryClient};
use soroban_sdk::testutils::Address as _;
use soroban_sdk::{vec, Address, Env, Vec};

struct Setup<'a> {
    env: Env,
    admin: Address,
    registry: PoolRegistryClient<'a>,
}

impl Setup<'_> {
    fn new() -> Self {
        let e = Env::default();
        e.mock_all_auths();

        let admin = Address::generate(&e);
        let registry = PoolRegistryClient::new(&e, &e.register(PoolRegistry, ()));
        registry.initialize(&admin);
        Setup {
            env: e,
            admin,
            registry,
        }
    }

    fn sorted_tokens(&self, count: usize) -> Vec<Address> {
        let mut tokens = std::vec::Vec::new();
        for _ in 0..count {
            tokens.push(Address::generate(&self.env));
        }
        tokens.sort();
        Vec::from_slice(&self.env, tokens.as_slice())
    }
}

#[test]
fn test_register_and_get_pool() {
    let setup = Setup::new();
    let e = &setup.env;
    let tokens = setup.sorted_tokens(2);
    let volatile = Address::generate(e);
    let stable = Address::generate(e);

    assert_eq!(setup.registry.get_pool(&tokens, &POOL_TYPE_VOLATILE), None);
    setup
        .registry
        .register_pool(&setup.admin, &tokens, &POOL_TYPE_VOLATILE, &volatile);
    setup
        .registry
        .register_pool(&setup.admin, &tokens, &POOL_TYPE_STABLE, &stable);

    assert_eq!(
        setup.registry.get_pool(&tokens, &POOL_TYPE_VOLATILE),
        Some(volatile.clone())
    );
    assert_eq!(
        setup.registry.get_pool(&tokens, &POOL_TYPE_STABLE),
        Some(stable.clone())
    );
    let pools = setup.registry.get_pools(&tokens);
    assert_eq!(pools.len(), 2);
    assert_eq!(pools.get(POOL_TYPE_STABLE), Some(stable));

    // unknown types and reversed order resolve to nothing
    assert_eq!(setup.registry.get_pool(&tokens, &3), None);
    let reversed = vec![e, tokens.get(1).unwrap(), tokens.get(0).unwrap()];
    assert_eq!(setup.registry.get_pool(&reversed, &POOL_TYPE_VOLATILE), None);
}

#[test]
fn test_remove_pool() {
    let setup = Setup::new();
    let tokens = setup.sorted_tokens(3);
    let pool = Address::generate(&setup.env);

    setup
        .registry
        .register_pool(&setup.admin, &tokens, &POOL_TYPE_STABLE, &pool);
    setup
        .registry
        .remove_pool(&setup.admin, &tokens, &POOL_TYPE_STABLE);
    assert_eq!(setup.registry.get_pool(&tokens, &POOL_TYPE_STABLE), None);
    assert_eq!(setup.registry.get_pools(&tokens).len(), 0);

    // the slot can be taken again
    setup
        .registry
        .register_pool(&setup.admin, &tokens, &POOL_TYPE_STABLE, &pool);
}

#[test]
#[should_panic(expected = "Error(Contract, #401)")]
fn test_register_twice() {
    let setup = Setup::new();
    let tokens = setup.sorted_tokens(2);
    let pool = Address::generate(&setup.env);
    setup
        .registry
        .register_pool(&setup.admin, &tokens, &POOL_TYPE_VOLATILE, &pool);
    setup
        .registry
        .register_pool(&setup.admin, &tokens, &POOL_TYPE_VOLATILE, &pool);
}

#[test]
#[should_panic(expected = "Error(Contract, #404)")]
fn test_remove_missing_pool() {
    let setup = Setup::new();
    let tokens = setup.sorted_tokens(2);
    setup
        .registry
        .remove_pool(&setup.admin, &tokens, &POOL_TYPE_VOLATILE);
}

#[test]
#[should_panic(expected = "Error(Contract, #2013)")]
fn test_unknown_pool_type() {
    let setup = Setup::new();
    let tokens = setup.sorted_tokens(2);
    let pool = Address::generate(&setup.env);
    setup
        .registry
        .register_pool(&setup.admin, &tokens, &7, &pool);
}

#[test]
#[should_panic(expected = "Error(Contract, #2021)")]
fn test_unsorted_tokens() {
    let setup = Setup::new();
    let tokens = setup.sorted_tokens(2);
    let reversed = vec![&setup.env, tokens.get(1).unwrap(), tokens.get(0).unwrap()];
    let pool = Address::generate(&setup.env);
    setup
        .registry
        .register_pool(&setup.admin, &reversed, &POOL_TYPE_VOLATILE, &pool);
}

#[test]
#[should_panic(expected = "Error(Contract, #102)")]
fn test_register_not_admin() {
    let setup = Setup::new();
    let tokens = setup.sorted_tokens(2);
    let stranger = Address::generate(&setup.env);
    setup
        .registry
        .register_pool(&stranger, &tokens, &POOL_TYPE_VOLATILE, &stranger);
}

#[test]
#[should_panic(expected = "Error(Contract, #402)")]
fn test_initialize_twice() {
    let setup = Setup::new();
    setup.registry.initialize(&setup.admin);
}
