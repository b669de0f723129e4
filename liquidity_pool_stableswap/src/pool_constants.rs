pub(crate) const POOL_TYPE: u32 = 2;
pub(crate) const MIN_COINS: u32 = 2;
pub(crate) const MAX_COINS: u32 = 32;

// amplification is stored multiplied by A_PRECISION
pub(crate) const A_PRECISION: u128 = 100;
pub(crate) const MAX_A: u128 = 1_000_000;
pub(crate) const MAX_ITERATIONS: u32 = 255;

pub(crate) const MAX_SWAP_FEE: u128 = 1_000_000_000; // 10% of FEE_DENOMINATOR
pub(crate) const MAX_ADMIN_FEE: u128 = utils::math::FEE_DENOMINATOR;

// balances are normalized to this many decimals before solving
pub(crate) const TARGET_DECIMALS: u32 = 18;
pub(crate) const VIRTUAL_PRICE_PRECISION: u128 = 1_000_000_000_000_000_000;

pub(crate) const SHARE_DECIMALS: u32 = 18;
pub(crate) const SHARE_NAME: &str = "Stable Pool Share";
pub(crate) const SHARE_SYMBOL: &str = "SPS";
