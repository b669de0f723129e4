use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum RouterError {
    AlreadyInitialized = 301,
    Expired = 302,
    EmptyRoute = 303,
    InvalidPath = 304,
    InvalidPairType = 305,
    NotVolatilePair = 306,
    NotStablePair = 307,
    InsufficientOutputAmount = 308,
    InsufficientAAmount = 309,
    InsufficientBAmount = 310,
    InsufficientLiquidityMinted = 311,
    MustSupplyAllTokens = 312,
    ValueMismatch = 313,
    NativeTokenMissing = 314,
}
