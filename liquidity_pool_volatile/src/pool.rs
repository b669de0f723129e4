use crate::errors::VolatilePoolError;
use soroban_sdk::{panic_with_error, Env, U256};
use utils::math::FEE_DENOMINATOR;

// amount_in_net = amount_in * (FEE_DENOMINATOR - fee)
// amount_out = reserve_out * amount_in_net / (reserve_in * FEE_DENOMINATOR + amount_in_net)
pub(crate) fn get_amount_out(
    e: &Env,
    amount_in: u128,
    reserve_in: u128,
    reserve_out: u128,
    fee: u128,
) -> u128 {
    if amount_in == 0 {
        panic_with_error!(e, VolatilePoolError::InsufficientInput);
    }
    if reserve_in == 0 || reserve_out == 0 {
        panic_with_error!(e, VolatilePoolError::InsufficientLiquidity);
    }

    let amount_in_net = U256::from_u128(e, amount_in).mul(&U256::from_u128(e, FEE_DENOMINATOR - fee));
    let numerator = amount_in_net.mul(&U256::from_u128(e, reserve_out));
    let denominator = U256::from_u128(e, reserve_in)
        .mul(&U256::from_u128(e, FEE_DENOMINATOR))
        .add(&amount_in_net);

    // strictly below reserve_out, always fits
    numerator.div(&denominator).to_u128().unwrap_or(0)
}

// balance * FEE_DENOMINATOR - amount_in * fee
pub(crate) fn fee_adjusted_balance(e: &Env, balance: u128, amount_in: u128, fee: u128) -> U256 {
    U256::from_u128(e, balance)
        .mul(&U256::from_u128(e, FEE_DENOMINATOR))
        .sub(&U256::from_u128(e, amount_in).mul(&U256::from_u128(e, fee)))
}

// Amount received on top of the reserve left after sending `amount_out`.
pub(crate) fn get_amount_in(balance: u128, reserve: u128, amount_out: u128) -> u128 {
    let remaining = reserve - amount_out;
    if balance > remaining {
        balance - remaining
    } else {
        0
    }
}
