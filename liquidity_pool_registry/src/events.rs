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

pub(crate) trait RegistryEvents {
    fn add_pool(&self, tokens: Vec<Address>, pool_type: u32, pool: Address);

    fn remove_pool(&self, tokens: Vec<Address>, pool_type: u32, pool: Address);
}

impl RegistryEvents for Events {
    fn add_pool(&self, tokens: Vec<Address>, pool_type: u32, pool: Address) {
        self.env().events().publish(
            (Symbol::new(self.env(), "add_pool"), tokens),
            (pool_type, pool),
        );
    }

    fn remove_pool(&self, tokens: Vec<Address>, pool_type: u32, pool: Address) {
        self.env().events().publish(
            (Symbol::new(self.env(), "remove_pool"), tokens),
            (pool_type, pool),
        );
    }
}
