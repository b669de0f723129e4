use paste::paste;
use soroban_sdk::{contracttype, panic_with_error, Address, BytesN, Env};
use utils::bump::bump_instance;
use utils::storage_errors::StorageError;
use utils::{
    generate_instance_storage_getter, generate_instance_storage_getter_and_setter,
    generate_instance_storage_setter,
};

// One hop of a trade. `pool_type` is `1` for volatile and `2` for stable pools.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Route {
    pub token_in: Address,
    pub token_out: Address,
    pub pool: Address,
    pub pool_type: u32,
}

// Signed approval of pool shares to the router.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PermitParams {
    pub amount: i128,
    pub expiration_ledger: u32,
    pub deadline: u64,
    pub signature: BytesN<64>,
}

#[derive(Clone)]
#[contracttype]
enum DataKey {
    Registry,
    WrappedNative,
}

generate_instance_storage_getter_and_setter!(registry, DataKey::Registry, Address);
generate_instance_storage_getter_and_setter!(wrapped_native, DataKey::WrappedNative, Address);
