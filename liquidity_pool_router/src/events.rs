use soroban_sdk::{Address, Env, Symbol, Vec};

#[derive(Clone)]
pub(crate) struct Events(Env);

impl Events {
    #[inline(always)]
    pub(crate) fn env(&self) -> &Env {
        &self.0
    }

    #[inline(always)]
    pub(crate) fn new(env: &Env) -> Events {
        Events(env.clone())
    }
}

pub(crate) trait RouterEvents {
    fn swap(
        &self,
        user: Address,
        token_in: Address,
        token_out: Address,
        in_amount: u128,
        out_amount: u128,
    );

    fn add_liquidity(&self, user: Address, pool: Address, amounts: Vec<u128>, share_amount: u128);

    fn remove_liquidity(
        &self,
        user: Address,
        pool: Address,
        amounts: Vec<u128>,
        share_amount: u128,
    );
}

impl RouterEvents for Events {
    fn swap(
        &self,
        user: Address,
        token_in: Address,
        token_out: Address,
        in_amount: u128,
        out_amount: u128,
    ) {
        self.env().events().publish(
            (Symbol::new(self.env(), "swap"), user),
            (token_in, token_out, in_amount, out_amount),
        );
    }

    fn add_liquidity(&self, user: Address, pool: Address, amounts: Vec<u128>, share_amount: u128) {
        self.env().events().publish(
            (Symbol::new(self.env(), "add_liquidity"), user, pool),
            (amounts, share_amount),
        );
    }

    fn remove_liquidity(
        &self,
        user: Address,
        pool: Address,
        amounts: Vec<u128>,
        share_amount: u128,
    ) {
        self.env().events().publish(
            (Symbol::new(self.env(), "remove_liquidity"), user, pool),
            (amounts, share_amount),
        );
    }
}
