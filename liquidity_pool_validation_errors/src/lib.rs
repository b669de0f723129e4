#![no_std]

use soroban_sdk::contracterror;

// Input validation failures shared by pools, registry and router.
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum LiquidityPoolValidationError {
    WrongInputVecSize = 2001,
    FeeOutOfBounds = 2003,
    AllCoinsRequired = 2004,
    OutMinNotSatisfied = 2006,
    CannotSwapSameToken = 2007,
    InTokenOutOfBounds = 2008,
    OutTokenOutOfBounds = 2009,
    EmptyPool = 2010,
    AdminFeeOutOfBounds = 2012,
    UnknownPoolType = 2013,
    ZeroAmount = 2018,
    TokensNotSorted = 2021,
    DuplicateTokens = 2022,
    TooManyTokens = 2023,
    DecimalsTooLarge = 2024,
    UnknownToken = 2025,
}
