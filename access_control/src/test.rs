#![cfg(test)]

use crate::access::{AccessControl, AccessControlTrait};
use crate::role::Role;
use crate::utils::require_pool_manager;
use soroban_sdk::testutils::Address as _;
use soroban_sdk::{contract, contractimpl, Address, Env};

#[contract]
struct Dummy;

#[contractimpl]
impl Dummy {}

#[test]
fn test_roles() {
    let e = Env::default();
    let contract = e.register(Dummy, ());
    let admin = Address::generate(&e);
    let operator = Address::generate(&e);
    let stranger = Address::generate(&e);

    e.as_contract(&contract, || {
        let access_control = AccessControl::new(&e);
        assert_eq!(access_control.get_role_safe(&Role::Admin), None);

        access_control.set_role_address(&Role::Admin, &admin);
        access_control.set_role_address(&Role::OperationsAdmin, &operator);
        assert_eq!(access_control.get_role(&Role::Admin), admin);
        assert!(access_control.address_has_role(&operator, &Role::OperationsAdmin));
        assert!(!access_control.address_has_role(&stranger, &Role::Admin));

        require_pool_manager(&e, &admin);
        require_pool_manager(&e, &operator);
    });
}

#[test]
#[should_panic(expected = "Error(Contract, #102)")]
fn test_stranger_is_not_operations_admin() {
    let e = Env::default();
    let contract = e.register(Dummy, ());
    let admin = Address::generate(&e);
    let stranger = Address::generate(&e);

    e.as_contract(&contract, || {
        AccessControl::new(&e).set_role_address(&Role::Admin, &admin);
        require_pool_manager(&e, &stranger);
    });
}

#[test]
#[should_panic(expected = "Error(Contract, #103)")]
fn test_admin_set_once() {
    let e = Env::default();
    let contract = e.register(Dummy, ());

    e.as_contract(&contract, || {
        let access_control = AccessControl::new(&e);
        access_control.set_role_address(&Role::Admin, &Address::generate(&e));
        access_control.set_role_address(&Role::Admin, &Address::generate(&e));
    });
}
