#![no_std]

mod contract;
mod errors;
mod pool;
mod pool_constants;
mod pool_interface;
mod storage;
mod test;
mod testutils;

pub use contract::{VolatilePool, VolatilePoolClient};
pub use errors::VolatilePoolError;
pub use pool_interface::{SwapCallee, SwapCalleeClient};
