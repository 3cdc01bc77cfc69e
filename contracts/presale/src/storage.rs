use crate::errors::Error;
use crate::types::{DataKey, SaleConfig};
use soroban_sdk::{Address, Env};

pub fn has_config(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Config)
}

pub fn get_config(env: &Env) -> Result<SaleConfig, Error> {
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(Error::NotInitialized)
}

pub fn set_config(env: &Env, config: &SaleConfig) {
    env.storage().instance().set(&DataKey::Config, config);
}

pub fn get_start_time(env: &Env) -> Option<u64> {
    env.storage().instance().get(&DataKey::StartTime)
}

pub fn set_start_time(env: &Env, start_time: u64) {
    env.storage()
        .instance()
        .set(&DataKey::StartTime, &start_time);
}

pub fn get_total_raised(env: &Env) -> i128 {
    env.storage()
        .instance()
        .get(&DataKey::TotalRaised)
        .unwrap_or(0)
}

pub fn set_total_raised(env: &Env, amount: i128) {
    env.storage().instance().set(&DataKey::TotalRaised, &amount);
}

pub fn is_closed(env: &Env) -> bool {
    env.storage()
        .instance()
        .get(&DataKey::Closed)
        .unwrap_or(false)
}

pub fn set_closed(env: &Env) {
    env.storage().instance().set(&DataKey::Closed, &true);
}

pub fn get_purchase_count(env: &Env, purchaser: &Address) -> u32 {
    env.storage()
        .persistent()
        .get(&DataKey::PurchaseCount(purchaser.clone()))
        .unwrap_or(0)
}

pub fn set_purchase_count(env: &Env, purchaser: &Address, count: u32) {
    env.storage()
        .persistent()
        .set(&DataKey::PurchaseCount(purchaser.clone()), &count);
}

pub fn get_purchase(env: &Env, purchaser: &Address, index: u32) -> Option<i128> {
    env.storage()
        .persistent()
        .get(&DataKey::Purchase(purchaser.clone(), index))
}

pub fn set_purchase(env: &Env, purchaser: &Address, index: u32, amount: i128) {
    env.storage()
        .persistent()
        .set(&DataKey::Purchase(purchaser.clone(), index), &amount);
}
