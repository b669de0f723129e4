pub const POOL_TYPE_VOLATILE: u32 = 1;
pub const POOL_TYPE_STABLE: u32 = 2;
