#![no_std]

use soroban_sdk::{Address, Env, IntoVal, Symbol, Val, Vec};

#[derive(Clone)]
pub struct Events(Env);

impl Events {
    #[inline(always)]
    pub fn env(&self) -> &Env {
        &self.0
    }

    #[inline(always)]
    pub fn new(env: &Env) -> Events {
        Events(env.clone())
    }
}

// Events emitted by both pool kinds. Topics carry identifiers, bodies carry amounts,
// so indexers can follow any pool without knowing its curve.
pub trait LiquidityPoolEvents {
    fn deposit_liquidity(&self, tokens: Vec<Address>, amounts: Vec<u128>, share_amount: u128);

    fn withdraw_liquidity(&self, tokens: Vec<Address>, amounts: Vec<u128>, share_amount: u128);

    fn trade(
        &self,
        to: Address,
        token_in: Address,
        token_out: Address,
        in_amount: u128,
        out_amount: u128,
        fee_amount: u128,
    );

    fn update_reserves(&self, reserves: Vec<u128>);

    fn skim(&self, to: Address, amounts: Vec<u128>);

    fn set_fee(&self, fee: u128);

    fn set_admin_fee(&self, admin_fee: u128);

    fn claim_fees(&self, token: Address, destination: Address, amount: u128);
}

impl LiquidityPoolEvents for Events {
    fn deposit_liquidity(&self, tokens: Vec<Address>, amounts: Vec<u128>, share_amount: u128) {
        // topics
        // [
        //   "deposit_liquidity": Symbol, // event identifier
        //   token0: Address,             // asset deposited to the pool
        //   ...                          // one topic per pooled asset
        // ]
        //
        // body
        // [
        //   share_amount: i128,  // amount of pool shares minted
        //   amount0: i128,       // amount deposited for token0
        //   ...                  // one amount per pooled asset
        // ]
        let e = self.env();
        let mut topics: Vec<Val> =
            Vec::from_array(e, [Symbol::new(e, "deposit_liquidity").into_val(e)]);
        let mut body: Vec<Val> = Vec::from_array(e, [(share_amount as i128).into_val(e)]);
        for i in 0..tokens.len() {
            topics.push_back(tokens.get_unchecked(i).into_val(e));
            body.push_back((amounts.get_unchecked(i) as i128).into_val(e));
        }
        e.events().publish(topics, body);
    }

    fn withdraw_liquidity(&self, tokens: Vec<Address>, amounts: Vec<u128>, share_amount: u128) {
        // same layout as deposit_liquidity, share_amount is the amount burned
        let e = self.env();
        let mut topics: Vec<Val> =
            Vec::from_array(e, [Symbol::new(e, "withdraw_liquidity").into_val(e)]);
        let mut body: Vec<Val> = Vec::from_array(e, [(share_amount as i128).into_val(e)]);
        for i in 0..tokens.len() {
            topics.push_back(tokens.get_unchecked(i).into_val(e));
            body.push_back((amounts.get_unchecked(i) as i128).into_val(e));
        }
        e.events().publish(topics, body);
    }

    fn trade(
        &self,
        to: Address,
        token_in: Address,
        token_out: Address,
        in_amount: u128,
        out_amount: u128,
        fee_amount: u128,
    ) {
        // topics
        // [
        //   "trade": Symbol,       // event identifier
        //   sold_asset: Address,   // asset sent to the pool
        //   bought_asset: Address, // asset received from the pool
        //   to: Address            // receiver of the bought asset
        // ]
        // body
        // [
        //   sold_amount: i128,   // amount of tokens sent to the pool
        //   bought_amount: i128, // amount of tokens received from the pool
        //   fee: i128            // swap fee charged in the sold asset
        // ]
        let e = self.env();
        e.events().publish(
            (Symbol::new(e, "trade"), token_in, token_out, to),
            (in_amount as i128, out_amount as i128, fee_amount as i128),
        );
    }

    fn update_reserves(&self, reserves: Vec<u128>) {
        let e = self.env();
        let mut body: Vec<Val> = Vec::new(e);
        for reserve in reserves.iter() {
            body.push_back((reserve as i128).into_val(e));
        }
        e.events().publish((Symbol::new(e, "update_reserves"),), body);
    }

    fn skim(&self, to: Address, amounts: Vec<u128>) {
        let e = self.env();
        let mut body: Vec<Val> = Vec::new(e);
        for amount in amounts.iter() {
            body.push_back((amount as i128).into_val(e));
        }
        e.events().publish((Symbol::new(e, "skim"), to), body);
    }

    fn set_fee(&self, fee: u128) {
        let e = self.env();
        e.events().publish((Symbol::new(e, "set_fee"),), (fee,));
    }

    fn set_admin_fee(&self, admin_fee: u128) {
        let e = self.env();
        e.events().publish((Symbol::new(e, "set_admin_fee"),), (admin_fee,));
    }

    fn claim_fees(&self, token: Address, destination: Address, amount: u128) {
        let e = self.env();
        e.events().publish(
            (Symbol::new(e, "claim_fees"), token, destination),
            (amount as i128,),
        );
    }
}
