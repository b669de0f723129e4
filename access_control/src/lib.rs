#![no_std]
pub mod access;
pub mod errors;
pub mod role;
pub mod utils;

mod test;
