pub(crate) const POOL_TYPE: u32 = 1;
pub(crate) const N_COINS: u32 = 2;

pub(crate) const MAX_SWAP_FEE: u128 = 1_000_000_000; // 10% of FEE_DENOMINATOR
pub(crate) const MAX_ADMIN_FEE: u128 = utils::math::FEE_DENOMINATOR;

// minted to the burn sink on the first mint
pub(crate) const MINIMUM_LIQUIDITY: u128 = 1000;
pub(crate) const MAX_RESERVE: u128 = (1 << 112) - 1;

pub(crate) const SHARE_DECIMALS: u32 = 7;
pub(crate) const SHARE_NAME: &str = "Volatile Pool Share";
pub(crate) const SHARE_SYMBOL: &str = "VPS";
pub(crate) const LOCKED_LIQUIDITY_SALT: &[u8] = b"locked_liquidity";
