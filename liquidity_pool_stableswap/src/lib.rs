#![no_std]

mod contract;
mod errors;
pub mod math;
mod normalize;
mod pool;
mod pool_constants;
mod pool_interface;
mod storage;
mod testutils;

pub use contract::{StablePool, StablePoolClient};
pub use errors::StablePoolError;
