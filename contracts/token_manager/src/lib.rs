#![no_std]

use soroban_sdk::{
    contract, contracterror, contractimpl, contractmeta, contracttype, symbol_short, Address, Env,
    Vec,
};

// Metadata that is added on to every WASM custom section
contractmeta!(
    key = "Description",
    val = "Project Token Ledger with Vested Issuance"
);

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    Unauthorized = 3,
    InvalidAmount = 4,
    InvalidSchedule = 5,
    InsufficientBalance = 6,
    VestingLocked = 7,
    Overflow = 8,
}

/// One vested issuance. Tokens unlock linearly between `start` and
/// `complete`; nothing unlocks before `cliff`.
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct VestingGrant {
    pub amount: i128,
    pub start: u64,
    pub cliff: u64,
    pub complete: u64,
}

#[derive(Clone)]
#[contracttype]
pub enum DataKey {
    Admin,
    Minter,
    TotalSupply,
    Balance(Address),
    Grants(Address),
}

#[contract]
pub struct TokenManager;

#[contractimpl]
impl TokenManager {
    pub fn initialize(env: Env, admin: Address) -> Result<(), Error> {
        if env.storage().instance().has(&DataKey::Admin) {
            return Err(Error::AlreadyInitialized);
        }

        admin.require_auth();

        env.storage().instance().set(&DataKey::Admin, &admin);
        env.storage().instance().set(&DataKey::TotalSupply, &0i128);

        Ok(())
    }

    /// Appoint the single address allowed to issue and revoke, normally the
    /// sale contract.
    pub fn set_minter(env: Env, caller: Address, minter: Address) -> Result<(), Error> {
        caller.require_auth();

        let admin = read_admin(&env)?;
        if caller != admin {
            return Err(Error::Unauthorized);
        }

        env.storage().instance().set(&DataKey::Minter, &minter);
        env.events()
            .publish((symbol_short!("minter"),), minter.clone());

        Ok(())
    }

    /// Mint `amount` to `to` under a vesting schedule starting now.
    pub fn issue_vested(
        env: Env,
        to: Address,
        amount: i128,
        cliff: u64,
        complete: u64,
    ) -> Result<(), Error> {
        let minter = read_minter(&env)?;
        minter.require_auth();

        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }
        if cliff > complete {
            return Err(Error::InvalidSchedule);
        }

        let now = env.ledger().timestamp();
        let mut grants = read_grants(&env, &to);
        grants.push_back(VestingGrant {
            amount,
            start: now,
            cliff,
            complete,
        });
        write_grants(&env, &to, &grants);

        let balance = read_balance(&env, &to)
            .checked_add(amount)
            .ok_or(Error::Overflow)?;
        write_balance(&env, &to, balance);

        let supply = read_total_supply(&env)
            .checked_add(amount)
            .ok_or(Error::Overflow)?;
        write_total_supply(&env, supply);

        env.events()
            .publish((symbol_short!("issue"), to), (amount, cliff, complete));

        Ok(())
    }

    /// Claw back `amount` from `from` without the holder's signature,
    /// consuming vesting grants newest first. Used when a sale refunds a
    /// purchase.
    pub fn revoke_vested(env: Env, from: Address, amount: i128) -> Result<(), Error> {
        let minter = read_minter(&env)?;
        minter.require_auth();

        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }
        let balance = read_balance(&env, &from);
        if balance < amount {
            return Err(Error::InsufficientBalance);
        }

        let mut grants = read_grants(&env, &from);
        let mut remaining = amount;
        while remaining > 0 && !grants.is_empty() {
            let last = grants.len() - 1;
            let mut grant = grants.get_unchecked(last);
            if grant.amount <= remaining {
                remaining -= grant.amount;
                grants.pop_back_unchecked();
            } else {
                grant.amount -= remaining;
                remaining = 0;
                grants.set(last, grant);
            }
        }
        write_grants(&env, &from, &grants);

        write_balance(&env, &from, balance - amount);
        write_total_supply(&env, read_total_supply(&env) - amount);

        env.events()
            .publish((symbol_short!("revoke"), from), amount);

        Ok(())
    }

    /// Move tokens out of the spendable part of the balance. The amount still
    /// locked by vesting grants cannot leave the holder's account.
    pub fn transfer(env: Env, from: Address, to: Address, amount: i128) -> Result<(), Error> {
        from.require_auth();

        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }
        let from_balance = read_balance(&env, &from);
        if from_balance < amount {
            return Err(Error::InsufficientBalance);
        }
        if from_balance - amount < locked_amount(&env, &from) {
            return Err(Error::VestingLocked);
        }

        write_balance(&env, &from, from_balance - amount);
        let to_balance = read_balance(&env, &to)
            .checked_add(amount)
            .ok_or(Error::Overflow)?;
        write_balance(&env, &to, to_balance);

        env.events()
            .publish((symbol_short!("transfer"), from, to), amount);

        Ok(())
    }

    pub fn balance(env: Env, holder: Address) -> i128 {
        read_balance(&env, &holder)
    }

    pub fn spendable_balance(env: Env, holder: Address) -> i128 {
        let balance = read_balance(&env, &holder);
        let locked = locked_amount(&env, &holder);
        if locked > balance {
            0
        } else {
            balance - locked
        }
    }

    pub fn grants(env: Env, holder: Address) -> Vec<VestingGrant> {
        read_grants(&env, &holder)
    }

    pub fn total_supply(env: Env) -> i128 {
        read_total_supply(&env)
    }

    pub fn admin(env: Env) -> Result<Address, Error> {
        read_admin(&env)
    }

    pub fn minter(env: Env) -> Result<Address, Error> {
        read_minter(&env)
    }
}

fn read_admin(env: &Env) -> Result<Address, Error> {
    env.storage()
        .instance()
        .get(&DataKey::Admin)
        .ok_or(Error::NotInitialized)
}

fn read_minter(env: &Env) -> Result<Address, Error> {
    env.storage()
        .instance()
        .get(&DataKey::Minter)
        .ok_or(Error::Unauthorized)
}

fn read_balance(env: &Env, holder: &Address) -> i128 {
    env.storage()
        .persistent()
        .get(&DataKey::Balance(holder.clone()))
        .unwrap_or(0)
}

fn write_balance(env: &Env, holder: &Address, amount: i128) {
    env.storage()
        .persistent()
        .set(&DataKey::Balance(holder.clone()), &amount);
}

fn read_grants(env: &Env, holder: &Address) -> Vec<VestingGrant> {
    env.storage()
        .persistent()
        .get(&DataKey::Grants(holder.clone()))
        .unwrap_or(Vec::new(env))
}

fn write_grants(env: &Env, holder: &Address, grants: &Vec<VestingGrant>) {
    env.storage()
        .persistent()
        .set(&DataKey::Grants(holder.clone()), grants);
}

fn read_total_supply(env: &Env) -> i128 {
    env.storage()
        .instance()
        .get(&DataKey::TotalSupply)
        .unwrap_or(0)
}

fn write_total_supply(env: &Env, supply: i128) {
    env.storage().instance().set(&DataKey::TotalSupply, &supply);
}

fn locked_amount(env: &Env, holder: &Address) -> i128 {
    let now = env.ledger().timestamp();
    let mut locked: i128 = 0;
    for grant in read_grants(env, holder).iter() {
        locked += unvested_part(&grant, now);
    }
    locked
}

fn unvested_part(grant: &VestingGrant, now: u64) -> i128 {
    if now >= grant.complete {
        return 0;
    }
    if now < grant.cliff {
        return grant.amount;
    }
    // Linear from start to complete; the cliff only delays the first unlock.
    // A grant too large to scale stays fully locked until `complete`.
    let total = (grant.complete - grant.start) as i128;
    let elapsed = (now - grant.start) as i128;
    grant
        .amount
        .checked_mul(elapsed)
        .map(|scaled| grant.amount - scaled / total)
        .unwrap_or(grant.amount)
}

#[cfg(test)]
mod test;
