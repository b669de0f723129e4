use crate::pool_constants::A_PRECISION;
use paste::paste;
use soroban_sdk::token::TokenClient as SorobanTokenClient;
use soroban_sdk::{contracttype, panic_with_error, Address, Env, Vec};
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
    Decimals,
    // Scales raw token amounts to the normalized precision.
    PrecisionMultipliers,
    // Amplification multiplied by A_PRECISION.
    Amp,
    SwapFee,
    AdminFee,
    Reserves,
    AdminFees,
}

generate_instance_storage_getter_and_setter!(tokens, DataKey::Tokens, Vec<Address>);
generate_instance_storage_getter_and_setter!(decimals, DataKey::Decimals, Vec<u32>);
generate_instance_storage_getter_and_setter!(
    precision_multipliers,
    DataKey::PrecisionMultipliers,
    Vec<u128>
);
generate_instance_storage_getter_and_setter!(amp, DataKey::Amp, u128);
generate_instance_storage_getter_and_setter!(swap_fee, DataKey::SwapFee, u128);
generate_instance_storage_getter_and_setter!(admin_fee, DataKey::AdminFee, u128);

pub(crate) fn get_a(e: &Env) -> u128 {
    get_amp(e) / A_PRECISION
}

// Reserves and accrued admin fees are only changed through the functions below.

pub(crate) fn get_reserves(e: &Env) -> Vec<u128> {
    bump_instance(e);
    match e.storage().instance().get(&DataKey::Reserves) {
        Some(value) => value,
        None => panic_with_error!(e, StorageError::ValueNotInitialized),
    }
}

pub(crate) fn put_reserves(e: &Env, reserves: &Vec<u128>) {
    bump_instance(e);
    e.storage().instance().set(&DataKey::Reserves, reserves)
}

pub(crate) fn get_admin_fees(e: &Env) -> Vec<u128> {
    bump_instance(e);
    match e.storage().instance().get(&DataKey::AdminFees) {
        Some(value) => value,
        None => {
            let mut fees = Vec::new(e);
            for _ in 0..get_tokens(e).len() {
                fees.push_back(0);
            }
            fees
        }
    }
}

pub(crate) fn put_admin_fees(e: &Env, admin_fees: &Vec<u128>) {
    bump_instance(e);
    e.storage().instance().set(&DataKey::AdminFees, admin_fees)
}

// Adds per-token amounts to the accrued admin fees.
pub(crate) fn accrue_admin_fees(e: &Env, amounts: &Vec<u128>) {
    let mut admin_fees = get_admin_fees(e);
    for (i, amount) in amounts.iter().enumerate() {
        let i = i as u32;
        admin_fees.set(i, admin_fees.get_unchecked(i) + amount);
    }
    put_admin_fees(e, &admin_fees);
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
