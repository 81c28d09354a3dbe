use soroban_sdk::{contracttype, Address, Env};

/// Smallest accepted purchase, in whole tokens.
pub const MIN_PURCHASE: u128 = 1;
/// Largest accepted single purchase, in whole tokens.
pub const MAX_PURCHASE: u128 = 1_000;

#[derive(Clone)]
#[contracttype]
pub struct SaleConfig {
    pub token: Address,         // sale token held by this contract
    pub payment_token: Address, // currency accepted for purchases
    pub price_per_token: u128,  // payment units per whole token
    pub max_tokens: u128,       // whole tokens allocated to the sale
    pub goal: u128,             // payment units that must be raised
    pub start_time: u64,
    pub end_time: u64,
}

/// Derived from the clock, the finalized flag and raised-vs-goal;
/// never stored.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[contracttype]
pub enum SaleStatus {
    Pending = 0,
    Active = 1,
    Succeeded = 2,
    Refundable = 3,
    Finalized = 4,
}

#[contracttype]
pub enum DataKey {
    Config,
    Owner,
    TokensSold,
    Raised,
    Finalized,
    Whitelisted(Address),
    Contribution(Address),
}

pub fn get_ledger_timestamp(env: &Env) -> u64 {
    env.ledger().timestamp()
}
