use crate::errors::VolatilePoolError;
use crate::pool_constants::{LOCKED_LIQUIDITY_SALT, MAX_RESERVE, N_COINS};
use paste::paste;
use soroban_sdk::token::TokenClient as SorobanTokenClient;
use soroban_sdk::{contracttype, panic_with_error, Address, Bytes, Env, Vec};
use utils::bump::bump_instance;
use utils::math::{checked_sub, to_u128};
use utils::storage_errors::StorageError;
use utils::{
    generate_instance_storage_getter, generate_instance_storage_getter_and_setter,
    generate_instance_storage_setter,
};

#[derive(Clone)]
#[contracttype]
enum DataKey {
    Tokens,
    Reserves,
    SwapFee,
    AdminFee,
    AdminFees,
}

generate_instance_storage_getter_and_setter!(tokens, DataKey::Tokens, Vec<Address>);
generate_instance_storage_getter_and_setter!(swap_fee, DataKey::SwapFee, u128);
generate_instance_storage_getter_and_setter!(admin_fee, DataKey::AdminFee, u128);

// Reserves and accrued admin fees are only changed through the functions below.

pub(crate) fn get_reserves(e: &Env) -> Vec<u128> {
    bump_instance(e);
    match e.storage().instance().get(&DataKey::Reserves) {
        Some(value) => value,
        None => panic_with_error!(e, StorageError::ValueNotInitialized),
    }
}

pub(crate) fn put_reserves(e: &Env, reserves: &Vec<u128>) {
    for reserve in reserves.iter() {
        if reserve > MAX_RESERVE {
            panic_with_error!(e, VolatilePoolError::Overflow);
        }
    }
    bump_instance(e);
    e.storage().instance().set(&DataKey::Reserves, reserves)
}

pub(crate) fn get_admin_fees(e: &Env) -> Vec<u128> {
    bump_instance(e);
    match e.storage().instance().get(&DataKey::AdminFees) {
        Some(value) => value,
        None => Vec::from_array(e, [0; N_COINS as usize]),
    }
}

pub(crate) fn put_admin_fees(e: &Env, admin_fees: &Vec<u128>) {
    bump_instance(e);
    e.storage().instance().set(&DataKey::AdminFees, admin_fees)
}

// Token balances held by the pool minus the admin fees waiting to be claimed.
pub(crate) fn get_real_balances(e: &Env) -> Vec<u128> {
    let contract = e.current_contract_address();
    let admin_fees = get_admin_fees(e);
    let mut balances = Vec::new(e);
    for (i, token) in get_tokens(e).iter().enumerate() {
        let balance = to_u128(e, SorobanTokenClient::new(e, &token).balance(&contract));
        balances.push_back(checked_sub(e, balance, admin_fees.get_unchecked(i as u32)));
    }
    balances
}

// Address nobody can ever deploy to, used to lock the minimum liquidity.
pub(crate) fn get_burn_sink(e: &Env) -> Address {
    let salt = e
        .crypto()
        .sha256(&Bytes::from_slice(e, LOCKED_LIQUIDITY_SALT))
        .to_bytes();
    e.deployer().with_current_contract(salt).deployed_address()
}
