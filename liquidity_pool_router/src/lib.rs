#![no_std]

mod constants;
mod contract;
mod errors;
mod events;
mod pool_interface;
mod pool_utils;
mod router_interface;
mod storage;
mod testutils;

pub use contract::{LiquidityPoolRouter, LiquidityPoolRouterClient};
pub use errors::RouterError;
pub use storage::{PermitParams, Route};
