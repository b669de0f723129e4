use crate::constants::{POOL_TYPE_STABLE, POOL_TYPE_VOLATILE};
use crate::errors::RegistryError;
use crate::events::{Events, RegistryEvents};
use crate::registry_interface::RegistryTrait;
use crate::storage::{get_pools, get_tokens_salt, put_pools};
use access_control::access::{AccessControl, AccessControlTrait};
use access_control::role::Role;
use liquidity_pool_validation_errors::LiquidityPoolValidationError;
use soroban_sdk::{contract, contractimpl, panic_with_error, Address, Env, Map, Vec};
use utils::tokens::assert_tokens_sorted;

#[contract]
pub struct PoolRegistry;

fn require_admin(e: &Env, admin: &Address) {
    admin.require_auth();
    AccessControl::new(e).assert_address_has_role(admin, &Role::Admin);
}

#[contractimpl]
impl RegistryTrait for PoolRegistry {
    fn initialize(e: Env, admin: Address) {
        let access_control = AccessControl::new(&e);
        if access_control.get_role_safe(&Role::Admin).is_some() {
            panic_with_error!(&e, RegistryError::AlreadyInitialized);
        }
        access_control.set_role_address(&Role::Admin, &admin);
    }

    // Registers an existing pool.
    //
    // # Arguments
    //
    // * `admin` - The registry admin.
    // * `tokens` - Pool tokens in ascending order.
    // * `pool_type` - `1` for volatile, `2` for stable pools.
    // * `pool` - The pool contract.
    fn register_pool(e: Env, admin: Address, tokens: Vec<Address>, pool_type: u32, pool: Address) {
        require_admin(&e, &admin);
        if tokens.len() < 2 {
            panic_with_error!(&e, LiquidityPoolValidationError::WrongInputVecSize);
        }
        assert_tokens_sorted(&e, &tokens);
        if pool_type != POOL_TYPE_VOLATILE && pool_type != POOL_TYPE_STABLE {
            panic_with_error!(&e, LiquidityPoolValidationError::UnknownPoolType);
        }

        let salt = get_tokens_salt(&e, &tokens);
        let mut pools = get_pools(&e, &salt);
        if pools.contains_key(pool_type) {
            panic_with_error!(&e, RegistryError::PoolAlreadyExists);
        }
        pools.set(pool_type, pool.clone());
        put_pools(&e, &salt, &pools);

        Events::new(&e).add_pool(tokens, pool_type, pool);
    }

    fn remove_pool(e: Env, admin: Address, tokens: Vec<Address>, pool_type: u32) {
        require_admin(&e, &admin);

        let salt = get_tokens_salt(&e, &tokens);
        let mut pools = get_pools(&e, &salt);
        let pool = match pools.get(pool_type) {
            Some(pool) => pool,
            None => panic_with_error!(&e, RegistryError::PoolNotFound),
        };
        pools.remove(pool_type);
        put_pools(&e, &salt, &pools);

        Events::new(&e).remove_pool(tokens, pool_type, pool);
    }

    fn get_pool(e: Env, tokens: Vec<Address>, pool_type: u32) -> Option<Address> {
        get_pools(&e, &get_tokens_salt(&e, &tokens)).get(pool_type)
    }

    fn get_pools(e: Env, tokens: Vec<Address>) -> Map<u32, Address> {
        get_pools(&e, &get_tokens_salt(&e, &tokens))
    }
}
