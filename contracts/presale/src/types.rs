use soroban_sdk::{contracttype, Address, Env};

/// Ratios are expressed in basis points, 10_000 = 100%.
pub const BPS_DENOMINATOR: u32 = 10_000;

/// Sale lifecycle. Derived from storage on every read, never cached.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[contracttype]
pub enum SaleState {
    Pending = 0,
    Funding = 1,
    Refunding = 2,
    GoalReached = 3,
    Closed = 4,
}

/// Caller-supplied sale parameters, passed to `initialize` as one value.
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct SaleParams {
    pub owner: Address,
    pub funding_token: Address,
    pub token_manager: Address,
    pub pool: Address,
    pub fundraising: Address,
    pub funding_goal: i128,
    pub percent_offered_bps: u32,
    pub connector_weight_bps: u32,
    pub funding_period: u64,
    pub vesting_cliff_date: u64,
    pub vesting_complete_date: u64,
    pub tap_rate: i128,
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct SaleConfig {
    pub owner: Address, // may call start
    pub funding_token: Address,
    pub token_manager: Address, // issues and revokes vested project tokens
    pub pool: Address,          // receives the raised funds at close
    pub fundraising: Address,   // market maker bootstrapped at close
    pub funding_goal: i128,
    pub percent_offered_bps: u32,  // share of supply put up for sale
    pub connector_weight_bps: u32, // downstream reserve ratio
    pub funding_period: u64,       // seconds the window stays open after start
    pub vesting_cliff_date: u64,
    pub vesting_complete_date: u64,
    pub tap_rate: i128,     // passed through to the fundraising target
    pub exchange_rate: i128, // project token units per funding token unit
}

#[derive(Clone)]
#[contracttype]
pub enum DataKey {
    Config,
    StartTime,
    TotalRaised,
    Closed,
    PurchaseCount(Address),
    Purchase(Address, u32),
}

pub fn get_ledger_timestamp(env: &Env) -> u64 {
    env.ledger().timestamp()
}
