use crate::types::*;
use soroban_sdk::{Address, Env};

pub fn has_config(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Config)
}

pub fn get_config(env: &Env) -> Option<SaleConfig> {
    env.storage().instance().get(&DataKey::Config)
}

pub fn set_config(env: &Env, config: &SaleConfig) {
    env.storage().instance().set(&DataKey::Config, config);
}

pub fn get_owner(env: &Env) -> Option<Address> {
    env.storage().instance().get(&DataKey::Owner)
}

pub fn set_owner(env: &Env, owner: &Address) {
    env.storage().instance().set(&DataKey::Owner, owner);
}

pub fn get_tokens_sold(env: &Env) -> u128 {
    env.storage()
        .instance()
        .get(&DataKey::TokensSold)
        .unwrap_or(0)
}

pub fn set_tokens_sold(env: &Env, amount: u128) {
    env.storage().instance().set(&DataKey::TokensSold, &amount);
}

pub fn get_raised(env: &Env) -> u128 {
    env.storage().instance().get(&DataKey::Raised).unwrap_or(0)
}

pub fn set_raised(env: &Env, amount: u128) {
    env.storage().instance().set(&DataKey::Raised, &amount);
}

pub fn is_finalized(env: &Env) -> bool {
    env.storage()
        .instance()
        .get(&DataKey::Finalized)
        .unwrap_or(false)
}

pub fn set_finalized(env: &Env, finalized: bool) {
    env.storage()
        .instance()
        .set(&DataKey::Finalized, &finalized);
}
