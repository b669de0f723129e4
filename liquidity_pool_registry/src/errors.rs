use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum RegistryError {
    PoolAlreadyExists = 401,
    AlreadyInitialized = 402,
    PoolNotFound = 404,
}
