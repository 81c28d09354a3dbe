//! Membership set of addresses permitted to purchase.
//!
//! Both mutations are idempotent: re-adding a member and removing a
//! non-member are no-ops.

use crate::types::DataKey;
use soroban_sdk::{Address, Env};

pub fn add(env: &Env, addr: &Address) {
    env.storage()
        .persistent()
        .set(&DataKey::Whitelisted(addr.clone()), &true);
}

pub fn remove(env: &Env, addr: &Address) {
    env.storage()
        .persistent()
        .remove(&DataKey::Whitelisted(addr.clone()));
}

pub fn is_whitelisted(env: &Env, addr: &Address) -> bool {
    env.storage()
        .persistent()
        .get(&DataKey::Whitelisted(addr.clone()))
        .unwrap_or(false)
}
