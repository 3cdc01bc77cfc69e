#![no_std]

use soroban_sdk::{
    contract, contracterror, contractimpl, contractmeta, contracttype, symbol_short, Address, Env,
};

// Metadata that is added on to every WASM custom section
contractmeta!(
    key = "Description",
    val = "Fundraising Target Bootstrapped at Sale Close"
);

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    AlreadyInitialized = 1,
    NotInitialized = 2,
}

/// Collateral parameters handed over by the sale when it closes.
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct CollateralConfig {
    pub token: Address,
    pub virtual_supply: i128,
    pub virtual_balance: i128,
    pub reserve_ratio: u32,
    pub tap: i128,
}

#[derive(Clone)]
#[contracttype]
pub enum DataKey {
    Collateral,
}

#[contract]
pub struct Fundraising;

#[contractimpl]
impl Fundraising {
    /// Record the collateral token and its market-maker parameters. Callable
    /// exactly once; the sale invokes this as part of its close settlement.
    pub fn initialize(
        env: Env,
        token: Address,
        virtual_supply: i128,
        virtual_balance: i128,
        reserve_ratio: u32,
        tap: i128,
    ) -> Result<(), Error> {
        if env.storage().instance().has(&DataKey::Collateral) {
            return Err(Error::AlreadyInitialized);
        }

        let config = CollateralConfig {
            token: token.clone(),
            virtual_supply,
            virtual_balance,
            reserve_ratio,
            tap,
        };
        env.storage().instance().set(&DataKey::Collateral, &config);

        env.events()
            .publish((symbol_short!("tap_add"), token.clone()), tap);
        env.events().publish(
            (symbol_short!("collat"), token),
            (virtual_supply, virtual_balance, reserve_ratio),
        );

        Ok(())
    }

    pub fn collateral(env: Env) -> Result<CollateralConfig, Error> {
        read_collateral(&env)
    }

    pub fn token(env: Env) -> Result<Address, Error> {
        Ok(read_collateral(&env)?.token)
    }

    pub fn virtual_supply(env: Env) -> Result<i128, Error> {
        Ok(read_collateral(&env)?.virtual_supply)
    }

    pub fn virtual_balance(env: Env) -> Result<i128, Error> {
        Ok(read_collateral(&env)?.virtual_balance)
    }

    pub fn reserve_ratio(env: Env) -> Result<u32, Error> {
        Ok(read_collateral(&env)?.reserve_ratio)
    }

    pub fn tap(env: Env) -> Result<i128, Error> {
        Ok(read_collateral(&env)?.tap)
    }
}

fn read_collateral(env: &Env) -> Result<CollateralConfig, Error> {
    env.storage()
        .instance()
        .get(&DataKey::Collateral)
        .ok_or(Error::NotInitialized)
}
