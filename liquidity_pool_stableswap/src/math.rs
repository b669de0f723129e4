// StableSwap invariant solvers.
//
// All balances passed here are normalized to the same precision. `amp` is the
// amplification coefficient multiplied by `a_precision`. Intermediate values
// are kept in 256 bits; results that do not fit into u128 are reported as
// `InvariantOverflow`.

use crate::errors::StablePoolError;
use soroban_sdk::{Env, Vec, U256};

fn to_u128(value: &U256) -> Result<u128, StablePoolError> {
    value.to_u128().ok_or(StablePoolError::InvariantOverflow)
}

// |a - b| <= 1
fn within_one(e: &Env, a: &U256, b: &U256) -> bool {
    let one = U256::from_u32(e, 1);
    if a > b {
        a.sub(b) <= one
    } else {
        b.sub(a) <= one
    }
}

// Computes the invariant D for the given balances with Newton's method.
//
// D_P = D^(n+1) / (n^n * prod(xp))
// D = (Ann * S / A_PRECISION + D_P * n) * D / ((Ann - A_PRECISION) * D / A_PRECISION + (n + 1) * D_P)
//
// Returns zero for an empty pool or when any balance is zero.
pub fn get_d(
    e: &Env,
    xp: &Vec<u128>,
    amp: u128,
    a_precision: u128,
    max_iterations: u32,
) -> Result<u128, StablePoolError> {
    let mut sum = U256::from_u32(e, 0);
    for x in xp.iter() {
        if x == 0 {
            return Ok(0);
        }
        sum = sum.add(&U256::from_u128(e, x));
    }
    if xp.is_empty() {
        return Ok(0);
    }

    let n_coins = U256::from_u32(e, xp.len());
    let a_precision = U256::from_u128(e, a_precision);
    let ann = U256::from_u128(e, amp).mul(&n_coins);
    let ann_sum = ann.mul(&sum).div(&a_precision);
    let ann_minus_one = ann.sub(&a_precision);
    let n_plus_one = n_coins.add(&U256::from_u32(e, 1));

    let mut d = sum;
    for _ in 0..max_iterations {
        let mut d_p = d.clone();
        for x in xp.iter() {
            d_p = d_p.mul(&d).div(&U256::from_u128(e, x).mul(&n_coins));
        }
        let d_prev = d.clone();
        let numerator = ann_sum.add(&d_p.mul(&n_coins)).mul(&d);
        let denominator = ann_minus_one
            .mul(&d)
            .div(&a_precision)
            .add(&n_plus_one.mul(&d_p));
        d = numerator.div(&denominator);
        if within_one(e, &d, &d_prev) {
            return to_u128(&d);
        }
    }
    Err(StablePoolError::DidNotConverge)
}

// Solves y*y + (b - D)*y = c for the missing balance, where every other balance
// is listed in `others`.
fn solve_y(
    e: &Env,
    n_coins: u32,
    others: &Vec<u128>,
    d: u128,
    amp: u128,
    a_precision: u128,
    max_iterations: u32,
) -> Result<u128, StablePoolError> {
    let n_coins = U256::from_u32(e, n_coins);
    let a_precision = U256::from_u128(e, a_precision);
    let ann = U256::from_u128(e, amp).mul(&n_coins);
    let d = U256::from_u128(e, d);

    let mut c = d.clone();
    let mut sum = U256::from_u32(e, 0);
    for x in others.iter() {
        if x == 0 {
            return Err(StablePoolError::ZeroBalance);
        }
        let x = U256::from_u128(e, x);
        sum = sum.add(&x);
        c = c.mul(&d).div(&x.mul(&n_coins));
    }
    c = c.mul(&d).mul(&a_precision).div(&ann.mul(&n_coins));
    let b = sum.add(&d.mul(&a_precision).div(&ann));

    let two = U256::from_u32(e, 2);
    let mut y = d.clone();
    for _ in 0..max_iterations {
        let y_prev = y.clone();
        let denominator = y.mul(&two).add(&b);
        if denominator <= d {
            return Err(StablePoolError::DidNotConverge);
        }
        y = y.mul(&y).add(&c).div(&denominator.sub(&d));
        if within_one(e, &y, &y_prev) {
            return to_u128(&y);
        }
    }
    Err(StablePoolError::DidNotConverge)
}

// Balance of `out_idx` keeping D of `xp` when the balance of `in_idx` becomes `x`.
#[allow(clippy::too_many_arguments)]
pub fn get_y(
    e: &Env,
    in_idx: u32,
    out_idx: u32,
    x: u128,
    xp: &Vec<u128>,
    amp: u128,
    a_precision: u128,
    max_iterations: u32,
) -> Result<u128, StablePoolError> {
    let d = get_d(e, xp, amp, a_precision, max_iterations)?;

    let mut others = Vec::new(e);
    for (i, balance) in xp.iter().enumerate() {
        let i = i as u32;
        if i == in_idx {
            others.push_back(x);
        } else if i != out_idx {
            others.push_back(balance);
        }
    }
    solve_y(e, xp.len(), &others, d, amp, a_precision, max_iterations)
}

// Balance of `idx` giving invariant `d` with all other balances of `xp` unchanged.
pub fn get_y_d(
    e: &Env,
    idx: u32,
    xp: &Vec<u128>,
    d: u128,
    amp: u128,
    a_precision: u128,
    max_iterations: u32,
) -> Result<u128, StablePoolError> {
    let mut others = Vec::new(e);
    for (i, balance) in xp.iter().enumerate() {
        if i as u32 != idx {
            others.push_back(balance);
        }
    }
    solve_y(e, xp.len(), &others, d, amp, a_precision, max_iterations)
}

// Fee charged on the imbalanced part of a deposit or withdrawal.
pub fn imbalance_fee(swap_fee: u128, n_coins: u32) -> u128 {
    let n_coins = n_coins as u128;
    swap_fee * n_coins / (4 * (n_coins - 1))
}
