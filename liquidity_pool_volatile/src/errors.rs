use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum VolatilePoolError {
    AlreadyInitialized = 201,
    InsufficientInput = 202,
    InsufficientOutput = 203,
    InsufficientLiquidity = 204,
    InvalidTo = 205,
    KInvariantFailed = 206,
    InsufficientLiquidityMinted = 207,
    InsufficientLiquidityBurned = 208,
    Overflow = 209,
}
