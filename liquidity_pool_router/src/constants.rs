pub(crate) const POOL_TYPE_VOLATILE: u32 = 1;
pub(crate) const POOL_TYPE_STABLE: u32 = 2;

// locked by the volatile pool on its first mint
pub(crate) const VOLATILE_MINIMUM_LIQUIDITY: u128 = 1000;
