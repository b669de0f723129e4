use crate::errors::StablePoolError;
use crate::math::{get_d, get_y, get_y_d, imbalance_fee};
use crate::normalize::xp;
use crate::pool_constants::{A_PRECISION, MAX_ITERATIONS};
use crate::storage::{
    get_admin_fee, get_amp, get_precision_multipliers, get_reserves, get_swap_fee,
};
use liquidity_pool_validation_errors::LiquidityPoolValidationError;
use soroban_fixed_point_math::SorobanFixedPoint;
use soroban_sdk::{log, panic_with_error, Env, Vec};
use token_share::get_total_shares;
use token_share::shares::proportional_amount;
use utils::math::{checked_add, checked_mul, checked_sub, fee_amount};

// Snapshot of everything the pricing functions read. Calculations never write
// storage, so quotes and mutations share them.
pub(crate) struct PoolState {
    pub(crate) reserves: Vec<u128>,
    pub(crate) multipliers: Vec<u128>,
    pub(crate) amp: u128,
    pub(crate) swap_fee: u128,
    pub(crate) admin_fee: u128,
    pub(crate) total_shares: u128,
}

// New reserves and admin fee increments after a liquidity change.
pub(crate) struct LiquidityChange {
    pub(crate) shares: u128,
    pub(crate) reserves: Vec<u128>,
    pub(crate) admin_fees: Vec<u128>,
}

pub(crate) struct Withdrawal {
    pub(crate) amount: u128,
    pub(crate) reserves: Vec<u128>,
    pub(crate) admin_fees: Vec<u128>,
}

pub(crate) struct SwapResult {
    pub(crate) amount_out: u128,
    pub(crate) fee: u128,
    pub(crate) reserves: Vec<u128>,
    pub(crate) admin_fees: Vec<u128>,
}

fn zeros(e: &Env, n: u32) -> Vec<u128> {
    let mut result = Vec::new(e);
    for _ in 0..n {
        result.push_back(0);
    }
    result
}

fn solved(e: &Env, result: Result<u128, StablePoolError>) -> u128 {
    match result {
        Ok(value) => value,
        Err(err) => {
            log!(e, "stable invariant solver failed", err as u32);
            panic_with_error!(e, err)
        }
    }
}

impl PoolState {
    pub(crate) fn load(e: &Env) -> Self {
        PoolState {
            reserves: get_reserves(e),
            multipliers: get_precision_multipliers(e),
            amp: get_amp(e),
            swap_fee: get_swap_fee(e),
            admin_fee: get_admin_fee(e),
            total_shares: get_total_shares(e),
        }
    }

    pub(crate) fn n_coins(&self) -> u32 {
        self.reserves.len()
    }

    fn d_of(&self, e: &Env, balances: &Vec<u128>) -> u128 {
        let xp = xp(e, balances, &self.multipliers);
        solved(e, get_d(e, &xp, self.amp, A_PRECISION, MAX_ITERATIONS))
    }

    pub(crate) fn get_d(&self, e: &Env) -> u128 {
        self.d_of(e, &self.reserves)
    }

    // Charges the imbalance fee on the distance between `new_balances` and the
    // ideal proportional balances for invariant `d1`.
    //
    // # Returns
    //
    // Balances with the full fee removed (used to price the change), reserves
    // with only the admin part removed, and the admin parts.
    fn charge_imbalance_fee(
        &self,
        e: &Env,
        new_balances: &Vec<u128>,
        d0: u128,
        d1: u128,
    ) -> (Vec<u128>, Vec<u128>, Vec<u128>) {
        let fee = imbalance_fee(self.swap_fee, self.n_coins());
        let mut fee_adjusted = Vec::new(e);
        let mut reserves = Vec::new(e);
        let mut admin_fees = Vec::new(e);
        for i in 0..self.n_coins() {
            let new_balance = new_balances.get_unchecked(i);
            let ideal_balance = d1.fixed_mul_floor(e, &self.reserves.get_unchecked(i), &d0);
            let difference = ideal_balance.abs_diff(new_balance);
            let token_fee = fee_amount(e, difference, fee);
            let admin_part = fee_amount(e, token_fee, self.admin_fee);

            fee_adjusted.push_back(checked_sub(e, new_balance, token_fee));
            reserves.push_back(checked_sub(e, new_balance, admin_part));
            admin_fees.push_back(admin_part);
        }
        (fee_adjusted, reserves, admin_fees)
    }

    // Shares minted for depositing `amounts`.
    //
    // The first deposit mints D. Later deposits pay the imbalance fee and mint
    // `total_shares * (D2 - D0) / D0`.
    pub(crate) fn calc_add_liquidity(&self, e: &Env, amounts: &Vec<u128>) -> LiquidityChange {
        let n_coins = self.n_coins();
        if amounts.len() != n_coins {
            panic_with_error!(e, LiquidityPoolValidationError::WrongInputVecSize);
        }

        let d0 = if self.total_shares > 0 {
            let d0 = self.get_d(e);
            if d0 == 0 {
                panic_with_error!(e, LiquidityPoolValidationError::EmptyPool);
            }
            d0
        } else {
            0
        };

        let mut new_balances = Vec::new(e);
        for i in 0..n_coins {
            new_balances.push_back(checked_add(
                e,
                self.reserves.get_unchecked(i),
                amounts.get_unchecked(i),
            ));
        }
        let d1 = self.d_of(e, &new_balances);

        if self.total_shares == 0 {
            if d1 == 0 {
                panic_with_error!(e, StablePoolError::CannotMintZero);
            }
            return LiquidityChange {
                shares: d1,
                reserves: new_balances,
                admin_fees: zeros(e, n_coins),
            };
        }

        if d1 <= d0 {
            panic_with_error!(e, StablePoolError::DMustIncrease);
        }
        let (fee_adjusted, reserves, admin_fees) =
            self.charge_imbalance_fee(e, &new_balances, d0, d1);
        let d2 = self.d_of(e, &fee_adjusted);
        if d2 <= d0 {
            panic_with_error!(e, StablePoolError::DMustIncrease);
        }

        let shares = self.total_shares.fixed_mul_floor(e, &(d2 - d0), &d0);
        if shares == 0 {
            panic_with_error!(e, StablePoolError::CannotMintZero);
        }
        LiquidityChange {
            shares,
            reserves,
            admin_fees,
        }
    }

    fn assert_liquidity(&self, e: &Env, liquidity: u128) {
        if liquidity == 0 {
            panic_with_error!(e, LiquidityPoolValidationError::ZeroAmount);
        }
        if liquidity > self.total_shares {
            panic_with_error!(e, StablePoolError::WithdrawExceedsAvailable);
        }
    }

    // Proportional withdrawal, `reserves[i] * liquidity / total_shares`.
    pub(crate) fn calc_remove_liquidity(&self, e: &Env, liquidity: u128) -> Vec<u128> {
        self.assert_liquidity(e, liquidity);
        let mut amounts = Vec::new(e);
        for reserve in self.reserves.iter() {
            amounts.push_back(proportional_amount(e, liquidity, reserve, self.total_shares));
        }
        amounts
    }

    // Withdrawal of a single token for `liquidity` shares.
    //
    // D1 = D0 - liquidity * D0 / total_shares. The new balance of the token is
    // solved for D1 after every balance was charged the imbalance fee on its
    // deviation from the proportional withdrawal.
    pub(crate) fn calc_withdraw_one_token(
        &self,
        e: &Env,
        liquidity: u128,
        token_idx: u32,
    ) -> Withdrawal {
        let n_coins = self.n_coins();
        if token_idx >= n_coins {
            panic_with_error!(e, LiquidityPoolValidationError::OutTokenOutOfBounds);
        }
        self.assert_liquidity(e, liquidity);

        let xp = xp(e, &self.reserves, &self.multipliers);
        let d0 = solved(e, get_d(e, &xp, self.amp, A_PRECISION, MAX_ITERATIONS));
        if d0 == 0 {
            panic_with_error!(e, LiquidityPoolValidationError::EmptyPool);
        }
        let d1 = d0 - liquidity.fixed_mul_floor(e, &d0, &self.total_shares);
        let new_y = solved(
            e,
            get_y_d(e, token_idx, &xp, d1, self.amp, A_PRECISION, MAX_ITERATIONS),
        );

        let fee = imbalance_fee(self.swap_fee, n_coins);
        let mut xp_reduced = Vec::new(e);
        for (j, balance) in xp.iter().enumerate() {
            let expected = balance.fixed_mul_floor(e, &d1, &d0);
            let dx_expected = if j as u32 == token_idx {
                expected.saturating_sub(new_y)
            } else {
                balance - expected
            };
            xp_reduced.push_back(checked_sub(e, balance, fee_amount(e, dx_expected, fee)));
        }
        let y_reduced = solved(
            e,
            get_y_d(e, token_idx, &xp_reduced, d1, self.amp, A_PRECISION, MAX_ITERATIONS),
        );

        let multiplier = self.multipliers.get_unchecked(token_idx);
        // one unit less against rounding
        let amount = xp_reduced
            .get_unchecked(token_idx)
            .saturating_sub(y_reduced)
            .saturating_sub(1)
            / multiplier;
        let amount_without_fee = xp.get_unchecked(token_idx).saturating_sub(new_y) / multiplier;
        let admin_part = fee_amount(e, amount_without_fee.saturating_sub(amount), self.admin_fee);

        let mut reserves = self.reserves.clone();
        reserves.set(
            token_idx,
            checked_sub(
                e,
                self.reserves.get_unchecked(token_idx),
                checked_add(e, amount, admin_part),
            ),
        );
        let mut admin_fees = zeros(e, n_coins);
        admin_fees.set(token_idx, admin_part);

        Withdrawal {
            amount,
            reserves,
            admin_fees,
        }
    }

    // Shares burned for withdrawing exactly `amounts`.
    //
    // burn = total_shares * (D0 - D2) / D0 + 1, where D2 is the invariant of the
    // remaining balances after the imbalance fee.
    pub(crate) fn calc_remove_liquidity_imbalance(
        &self,
        e: &Env,
        amounts: &Vec<u128>,
    ) -> LiquidityChange {
        let n_coins = self.n_coins();
        if amounts.len() != n_coins {
            panic_with_error!(e, LiquidityPoolValidationError::WrongInputVecSize);
        }
        if self.total_shares == 0 {
            panic_with_error!(e, LiquidityPoolValidationError::EmptyPool);
        }
        let d0 = self.get_d(e);
        if d0 == 0 {
            panic_with_error!(e, LiquidityPoolValidationError::EmptyPool);
        }

        let mut new_balances = Vec::new(e);
        for i in 0..n_coins {
            let reserve = self.reserves.get_unchecked(i);
            let amount = amounts.get_unchecked(i);
            if amount > reserve {
                panic_with_error!(e, StablePoolError::WithdrawExceedsAvailable);
            }
            new_balances.push_back(reserve - amount);
        }
        let d1 = self.d_of(e, &new_balances);
        let (fee_adjusted, reserves, admin_fees) =
            self.charge_imbalance_fee(e, &new_balances, d0, d1);
        let d2 = self.d_of(e, &fee_adjusted);
        if d2 >= d0 {
            panic_with_error!(e, StablePoolError::BurntAmountZero);
        }

        let burn = self.total_shares.fixed_mul_floor(e, &(d0 - d2), &d0);
        if burn == 0 {
            panic_with_error!(e, StablePoolError::BurntAmountZero);
        }
        LiquidityChange {
            shares: burn + 1,
            reserves,
            admin_fees,
        }
    }

    // Output for selling `dx` of `in_idx`. The swap fee is taken from the input
    // before solving, the admin part of it leaves the reserves.
    pub(crate) fn calc_swap(&self, e: &Env, in_idx: u32, out_idx: u32, dx: u128) -> SwapResult {
        let n_coins = self.n_coins();
        if in_idx >= n_coins {
            panic_with_error!(e, LiquidityPoolValidationError::InTokenOutOfBounds);
        }
        if out_idx >= n_coins {
            panic_with_error!(e, LiquidityPoolValidationError::OutTokenOutOfBounds);
        }
        if in_idx == out_idx {
            panic_with_error!(e, LiquidityPoolValidationError::CannotSwapSameToken);
        }
        if dx == 0 {
            panic_with_error!(e, StablePoolError::InsufficientInput);
        }
        if self.reserves.iter().any(|reserve| reserve == 0) {
            panic_with_error!(e, LiquidityPoolValidationError::EmptyPool);
        }

        let xp = xp(e, &self.reserves, &self.multipliers);
        let fee = fee_amount(e, dx, self.swap_fee);
        let x = checked_add(
            e,
            xp.get_unchecked(in_idx),
            checked_mul(e, dx - fee, self.multipliers.get_unchecked(in_idx)),
        );
        let y = solved(
            e,
            get_y(e, in_idx, out_idx, x, &xp, self.amp, A_PRECISION, MAX_ITERATIONS),
        );
        // one unit less against rounding
        let amount_out = xp
            .get_unchecked(out_idx)
            .saturating_sub(y)
            .saturating_sub(1)
            / self.multipliers.get_unchecked(out_idx);

        let admin_part = fee_amount(e, fee, self.admin_fee);
        let mut reserves = self.reserves.clone();
        reserves.set(
            in_idx,
            checked_sub(
                e,
                checked_add(e, self.reserves.get_unchecked(in_idx), dx),
                admin_part,
            ),
        );
        reserves.set(
            out_idx,
            checked_sub(e, self.reserves.get_unchecked(out_idx), amount_out),
        );
        let mut admin_fees = zeros(e, n_coins);
        admin_fees.set(in_idx, admin_part);

        SwapResult {
            amount_out,
            fee,
            reserves,
            admin_fees,
        }
    }
}
