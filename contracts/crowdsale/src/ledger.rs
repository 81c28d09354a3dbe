//! Per-address record of payment still held on deposit and eligible
//! for refund. An absent entry reads as zero.

use crate::types::DataKey;
use soroban_sdk::{Address, Env};

pub fn record(env: &Env, addr: &Address, amount: u128) {
    let key = DataKey::Contribution(addr.clone());
    let current: u128 = env.storage().persistent().get(&key).unwrap_or(0);
    env.storage().persistent().set(&key, &(current + amount));
}

/// Returns the outstanding contribution and resets it to zero.
/// Clearing an address with no contribution returns zero.
pub fn clear(env: &Env, addr: &Address) -> u128 {
    let key = DataKey::Contribution(addr.clone());
    let current: u128 = env.storage().persistent().get(&key).unwrap_or(0);
    if current > 0 {
        env.storage().persistent().remove(&key);
    }
    current
}

pub fn outstanding(env: &Env, addr: &Address) -> u128 {
    env.storage()
        .persistent()
        .get(&DataKey::Contribution(addr.clone()))
        .unwrap_or(0)
}
