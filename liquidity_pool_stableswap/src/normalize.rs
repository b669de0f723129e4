use crate::pool_constants::TARGET_DECIMALS;
use soroban_sdk::token::TokenClient as SorobanTokenClient;
use soroban_sdk::{Address, Env, Vec};
use utils::math::{checked_mul, precision_multiplier};

// Get decimals for all pool tokens
pub(crate) fn read_decimals(e: &Env, tokens: &Vec<Address>) -> Vec<u32> {
    let mut decimals = Vec::new(e);
    for token in tokens.iter() {
        decimals.push_back(SorobanTokenClient::new(e, &token).decimals());
    }
    decimals
}

// Lifts raw token amounts to `TARGET_DECIMALS` digits.
pub(crate) fn compute_precision_multipliers(e: &Env, decimals: &Vec<u32>) -> Vec<u128> {
    let mut multipliers = Vec::new(e);
    for token_decimals in decimals.iter() {
        multipliers.push_back(precision_multiplier(e, token_decimals, TARGET_DECIMALS));
    }
    multipliers
}

// Reserves in normalized form
pub(crate) fn xp(e: &Env, balances: &Vec<u128>, multipliers: &Vec<u128>) -> Vec<u128> {
    let mut result = Vec::new(e);
    for (balance, multiplier) in balances.iter().zip(multipliers.iter()) {
        result.push_back(checked_mul(e, balance, multiplier));
    }
    result
}
