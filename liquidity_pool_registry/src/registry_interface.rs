use soroban_sdk::{Address, Env, Map, Vec};

pub trait RegistryTrait {
    fn initialize(e: Env, admin: Address);

    // Records `pool` as the pool of `pool_type` for the sorted `tokens` set.
    fn register_pool(e: Env, admin: Address, tokens: Vec<Address>, pool_type: u32, pool: Address);

    fn remove_pool(e: Env, admin: Address, tokens: Vec<Address>, pool_type: u32);

    fn get_pool(e: Env, tokens: Vec<Address>, pool_type: u32) -> Option<Address>;

    // Every registered pool of the token set, keyed by pool type.
    fn get_pools(e: Env, tokens: Vec<Address>) -> Map<u32, Address>;
}
