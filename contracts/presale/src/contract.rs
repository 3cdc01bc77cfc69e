use crate::errors::Error;
use crate::events::{emit_closed, emit_purchase, emit_refund, emit_started};
use crate::storage::*;
use crate::types::*;
use soroban_sdk::{
    contract, contractimpl, contractmeta, token, Address, Env, IntoVal, Symbol, Vec,
};

// Metadata that is added on to every WASM custom section
contractmeta!(
    key = "Description",
    val = "Fixed Supply Token Presale with Vested Allocation"
);

#[contract]
pub struct PresaleContract;

#[contractimpl]
impl PresaleContract {
    /// Set the sale parameters and derive the exchange rate. The rate is
    /// `floor(funding_goal * percent_offered / connector_weight)`, fixed for
    /// the lifetime of the sale.
    pub fn initialize(env: Env, params: SaleParams) -> Result<(), Error> {
        if has_config(&env) {
            return Err(Error::AlreadyInitialized);
        }

        let SaleParams {
            owner,
            funding_token,
            token_manager,
            pool,
            fundraising,
            funding_goal,
            percent_offered_bps,
            connector_weight_bps,
            funding_period,
            vesting_cliff_date,
            vesting_complete_date,
            tap_rate,
        } = params;

        owner.require_auth();

        if funding_goal <= 0
            || funding_period == 0
            || percent_offered_bps == 0
            || percent_offered_bps > BPS_DENOMINATOR
            || connector_weight_bps == 0
            || connector_weight_bps > BPS_DENOMINATOR
            || vesting_cliff_date > vesting_complete_date
            || tap_rate < 0
        {
            return Err(Error::InvalidConfig);
        }

        // Both ratios are in basis points, so their scale factors cancel.
        let scaled = funding_goal
            .checked_mul(percent_offered_bps as i128)
            .ok_or(Error::Overflow)?;
        let exchange_rate = scaled / connector_weight_bps as i128;
        if exchange_rate == 0 {
            return Err(Error::InvalidConfig);
        }

        let config = SaleConfig {
            owner,
            funding_token,
            token_manager,
            pool,
            fundraising,
            funding_goal,
            percent_offered_bps,
            connector_weight_bps,
            funding_period,
            vesting_cliff_date,
            vesting_complete_date,
            tap_rate,
            exchange_rate,
        };
        set_config(&env, &config);
        set_total_raised(&env, 0);

        Ok(())
    }

    /// Open the funding window. Only the configured owner may start the sale;
    /// everything else (buy, close, refund) is open to any caller.
    pub fn start(env: Env, caller: Address) -> Result<(), Error> {
        caller.require_auth();

        let config = get_config(&env)?;
        if caller != config.owner {
            return Err(Error::Unauthorized);
        }
        if derive_state(&env, &config) != SaleState::Pending {
            return Err(Error::InvalidState);
        }

        let now = get_ledger_timestamp(&env);
        set_start_time(&env, now);

        emit_started(&env, now);
        Ok(())
    }

    /// Accept a contribution: pull the funding tokens from the purchaser,
    /// issue the vested project tokens, and append a ledger record. Rejects
    /// any amount that would push the running total past the goal; the caller
    /// must retry with a smaller amount.
    pub fn buy(env: Env, purchaser: Address, amount: i128) -> Result<(), Error> {
        purchaser.require_auth();

        let config = get_config(&env)?;
        if derive_state(&env, &config) != SaleState::Funding {
            return Err(Error::InvalidState);
        }
        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }

        let new_total = get_total_raised(&env)
            .checked_add(amount)
            .ok_or(Error::Overflow)?;
        if new_total > config.funding_goal {
            return Err(Error::ExceedsFundingGoal);
        }

        let tokens = tokens_for_amount(&config, amount)?;

        let token_client = token::Client::new(&env, &config.funding_token);
        if token_client
            .try_transfer_from(
                &env.current_contract_address(),
                &purchaser,
                &env.current_contract_address(),
                &amount,
            )
            .is_err()
        {
            return Err(Error::TransferFailed);
        }

        issue_vested(&env, &config, &purchaser, tokens);

        let index = get_purchase_count(&env, &purchaser);
        set_purchase(&env, &purchaser, index, amount);
        set_purchase_count(&env, &purchaser, index + 1);
        set_total_raised(&env, new_total);

        emit_purchase(&env, &purchaser, amount, tokens, index);
        Ok(())
    }

    /// Settle a successful sale: hand the custodied funds to the pool and
    /// bootstrap the fundraising target. Only callable once the goal has been
    /// reached, and only once.
    pub fn close(env: Env) -> Result<(), Error> {
        let config = get_config(&env)?;
        if derive_state(&env, &config) != SaleState::GoalReached {
            return Err(Error::InvalidState);
        }

        let token_client = token::Client::new(&env, &config.funding_token);
        let custody = token_client.balance(&env.current_contract_address());
        if custody > 0 {
            token_client.transfer(&env.current_contract_address(), &config.pool, &custody);
        }

        let reserve_ratio = BPS_DENOMINATOR / config.connector_weight_bps;
        let args = Vec::from_array(
            &env,
            [
                config.funding_token.clone().into_val(&env),
                0i128.into_val(&env),
                0i128.into_val(&env),
                reserve_ratio.into_val(&env),
                config.tap_rate.into_val(&env),
            ],
        );
        env.invoke_contract::<()>(&config.fundraising, &Symbol::new(&env, "initialize"), args);

        set_closed(&env);

        emit_closed(&env, get_total_raised(&env));
        Ok(())
    }

    /// Return one recorded purchase to its purchaser and revoke the matching
    /// project tokens. Available to anyone while the sale is Refunding; each
    /// record must be refunded individually.
    pub fn refund(env: Env, purchaser: Address, index: u32) -> Result<(), Error> {
        let config = get_config(&env)?;
        if derive_state(&env, &config) != SaleState::Refunding {
            return Err(Error::InvalidState);
        }

        let amount = match get_purchase(&env, &purchaser, index) {
            Some(amount) if amount > 0 => amount,
            _ => return Err(Error::InvalidPurchase),
        };

        let token_client = token::Client::new(&env, &config.funding_token);
        token_client.transfer(&env.current_contract_address(), &purchaser, &amount);

        let tokens = tokens_for_amount(&config, amount)?;
        revoke_vested(&env, &config, &purchaser, tokens);

        // The record is zeroed, not deleted; the raised total keeps the full
        // audit history and is never decremented.
        set_purchase(&env, &purchaser, index, 0);

        emit_refund(&env, &purchaser, index, amount);
        Ok(())
    }

    pub fn current_state(env: Env) -> Result<SaleState, Error> {
        let config = get_config(&env)?;
        Ok(derive_state(&env, &config))
    }

    pub fn total_raised(env: Env) -> i128 {
        get_total_raised(&env)
    }

    pub fn exchange_rate(env: Env) -> Result<i128, Error> {
        Ok(get_config(&env)?.exchange_rate)
    }

    pub fn tokens_for(env: Env, amount: i128) -> Result<i128, Error> {
        let config = get_config(&env)?;
        tokens_for_amount(&config, amount)
    }

    pub fn purchase(env: Env, purchaser: Address, index: u32) -> Option<i128> {
        get_purchase(&env, &purchaser, index)
    }

    pub fn purchase_count(env: Env, purchaser: Address) -> u32 {
        get_purchase_count(&env, &purchaser)
    }

    pub fn config(env: Env) -> Result<SaleConfig, Error> {
        get_config(&env)
    }
}

fn derive_state(env: &Env, config: &SaleConfig) -> SaleState {
    if is_closed(env) {
        return SaleState::Closed;
    }
    let start_time = match get_start_time(env) {
        Some(start_time) => start_time,
        None => return SaleState::Pending,
    };
    // Reaching the goal takes precedence over the window expiring.
    if get_total_raised(env) >= config.funding_goal {
        return SaleState::GoalReached;
    }
    if get_ledger_timestamp(env) < start_time.saturating_add(config.funding_period) {
        SaleState::Funding
    } else {
        SaleState::Refunding
    }
}

fn tokens_for_amount(config: &SaleConfig, amount: i128) -> Result<i128, Error> {
    if amount < 0 {
        return Err(Error::InvalidAmount);
    }
    amount
        .checked_mul(config.exchange_rate)
        .ok_or(Error::Overflow)
}

fn issue_vested(env: &Env, config: &SaleConfig, to: &Address, tokens: i128) {
    let args = Vec::from_array(
        env,
        [
            to.clone().into_val(env),
            tokens.into_val(env),
            config.vesting_cliff_date.into_val(env),
            config.vesting_complete_date.into_val(env),
        ],
    );
    env.invoke_contract::<()>(
        &config.token_manager,
        &Symbol::new(env, "issue_vested"),
        args,
    );
}

fn revoke_vested(env: &Env, config: &SaleConfig, from: &Address, tokens: i128) {
    let args = Vec::from_array(env, [from.clone().into_val(env), tokens.into_val(env)]);
    env.invoke_contract::<()>(
        &config.token_manager,
        &Symbol::new(env, "revoke_vested"),
        args,
    );
}
