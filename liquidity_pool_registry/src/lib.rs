#![no_std]

pub mod constants;
mod contract;
mod errors;
mod events;
mod registry_interface;
mod storage;
mod test;

pub use contract::{PoolRegistry, PoolRegistryClient};
pub use errors::RegistryError;
pub use storage::get_tokens_salt;
