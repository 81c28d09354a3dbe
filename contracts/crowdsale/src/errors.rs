use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    InvalidConfig = 3,
    NotOwner = 4,
    NotWhitelisted = 5,
    SaleNotOpen = 6,
    SaleClosed = 7,
    SaleStillOngoing = 8,
    GoalReached = 9,
    BelowMinimum = 10,
    AboveMaximum = 11,
    InsufficientPayment = 12,
    SupplyExceeded = 13,
    AlreadyFinalized = 14,
}
