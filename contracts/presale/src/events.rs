use soroban_sdk::{symbol_short, Address, Env};

pub fn emit_started(env: &Env, start_time: u64) {
    env.events().publish((symbol_short!("started"),), start_time);
}

pub fn emit_purchase(env: &Env, purchaser: &Address, amount: i128, tokens: i128, index: u32) {
    env.events().publish(
        (symbol_short!("purchase"), purchaser.clone()),
        (amount, tokens, index),
    );
}

pub fn emit_closed(env: &Env, total_raised: i128) {
    env.events().publish((symbol_short!("closed"),), total_raised);
}

pub fn emit_refund(env: &Env, purchaser: &Address, index: u32, amount: i128) {
    env.events().publish(
        (symbol_short!("refund"), purchaser.clone()),
        (index, amount),
    );
}
