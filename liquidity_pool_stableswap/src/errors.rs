use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum StablePoolError {
    AlreadyInitialized = 251,
    DeadlineNotMet = 252,
    AOutOfBounds = 253,
    DMustIncrease = 254,
    CannotMintZero = 255,
    MintBelowMinimum = 256,
    BelowMinAmount = 257,
    WithdrawExceedsAvailable = 258,
    BurntAmountZero = 259,
    ExceedsMaxBurn = 260,
    InsufficientInput = 261,
    InsufficientOutput = 262,
    // solution did not converge
    DidNotConverge = 263,
    InvariantOverflow = 264,
    ZeroBalance = 265,
}
