use super::{Error, TokenManager, TokenManagerClient, VestingGrant};
use soroban_sdk::testutils::{Address as _, Ledger};
use soroban_sdk::{Address, Env};

const DAY: u64 = 24 * 60 * 60;
const START_TS: u64 = 1_700_000_000;

fn setup() -> (Env, TokenManagerClient<'static>, Address, Address) {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().with_mut(|l| l.timestamp = START_TS);

    let admin = Address::generate(&env);
    let minter = Address::generate(&env);

    let contract_id = env.register_contract(None, TokenManager);
    let client = TokenManagerClient::new(&env, &contract_id);

    client.initialize(&admin);
    client.set_minter(&admin, &minter);

    (env, client, admin, minter)
}

#[test]
fn initialize_sets_admin_and_minter() {
    let (_env, client, admin, minter) = setup();

    assert_eq!(client.admin(), admin);
    assert_eq!(client.minter(), minter);
    assert_eq!(client.total_supply(), 0);
}

#[test]
fn initialize_twice_fails() {
    let (env, client, _admin, _minter) = setup();

    let other = Address::generate(&env);
    assert_eq!(
        client.try_initialize(&other),
        Err(Ok(Error::AlreadyInitialized))
    );
}

#[test]
fn set_minter_requires_admin() {
    let (env, client, _admin, minter) = setup();

    let intruder = Address::generate(&env);
    let res = client.try_set_minter(&intruder, &intruder);
    assert_eq!(res, Err(Ok(Error::Unauthorized)));

    assert_eq!(client.minter(), minter);
}

#[test]
fn issue_vested_mints_with_grant() {
    let (env, client, _admin, _minter) = setup();
    let holder = Address::generate(&env);

    client.issue_vested(
        &holder,
        &1000,
        &(START_TS + 90 * DAY),
        &(START_TS + 180 * DAY),
    );

    assert_eq!(client.balance(&holder), 1000);
    assert_eq!(client.total_supply(), 1000);
    assert_eq!(client.spendable_balance(&holder), 0);

    let grants = client.grants(&holder);
    assert_eq!(grants.len(), 1);
    assert_eq!(
        grants.get_unchecked(0),
        VestingGrant {
            amount: 1000,
            start: START_TS,
            cliff: START_TS + 90 * DAY,
            complete: START_TS + 180 * DAY,
        }
    );
}

#[test]
fn issue_without_minter_fails() {
    let env = Env::default();
    env.mock_all_auths();

    let admin = Address::generate(&env);
    let holder = Address::generate(&env);
    let contract_id = env.register_contract(None, TokenManager);
    let client = TokenManagerClient::new(&env, &contract_id);
    client.initialize(&admin);

    let res = client.try_issue_vested(&holder, &1000, &0, &0);
    assert_eq!(res, Err(Ok(Error::Unauthorized)));
}

#[test]
fn issue_rejects_bad_arguments() {
    let (env, client, _admin, _minter) = setup();
    let holder = Address::generate(&env);

    assert_eq!(
        client.try_issue_vested(&holder, &0, &0, &0),
        Err(Ok(Error::InvalidAmount))
    );
    assert_eq!(
        client.try_issue_vested(&holder, &10, &5, &1),
        Err(Ok(Error::InvalidSchedule))
    );
}

#[test]
fn transfer_honors_vesting_lock() {
    let (env, client, _admin, _minter) = setup();
    let holder = Address::generate(&env);
    let recipient = Address::generate(&env);

    client.issue_vested(
        &holder,
        &1000,
        &(START_TS + 90 * DAY),
        &(START_TS + 180 * DAY),
    );

    // Everything is locked before the cliff.
    assert_eq!(
        client.try_transfer(&holder, &recipient, &1),
        Err(Ok(Error::VestingLocked))
    );

    // At the cliff, half the schedule has elapsed.
    env.ledger().set_timestamp(START_TS + 90 * DAY);
    assert_eq!(client.spendable_balance(&holder), 500);

    client.transfer(&holder, &recipient, &400);
    assert_eq!(client.balance(&recipient), 400);
    assert_eq!(client.spendable_balance(&holder), 100);
    assert_eq!(
        client.try_transfer(&holder, &recipient, &200),
        Err(Ok(Error::VestingLocked))
    );

    // Fully unlocked after completion.
    env.ledger().set_timestamp(START_TS + 180 * DAY);
    client.transfer(&holder, &recipient, &600);
    assert_eq!(client.balance(&holder), 0);
    assert_eq!(client.balance(&recipient), 1000);
}

#[test]
fn transfer_rejects_bad_amounts() {
    let (env, client, _admin, _minter) = setup();
    let holder = Address::generate(&env);
    let recipient = Address::generate(&env);

    client.issue_vested(&holder, &100, &START_TS, &START_TS);

    assert_eq!(
        client.try_transfer(&holder, &recipient, &0),
        Err(Ok(Error::InvalidAmount))
    );
    assert_eq!(
        client.try_transfer(&holder, &recipient, &101),
        Err(Ok(Error::InsufficientBalance))
    );

    // A degenerate schedule vests immediately.
    client.transfer(&holder, &recipient, &100);
    assert_eq!(client.balance(&recipient), 100);
}

#[test]
fn oversized_grant_locks_until_complete() {
    let (env, client, _admin, _minter) = setup();
    let holder = Address::generate(&env);
    let recipient = Address::generate(&env);

    // Large enough that amount * elapsed exceeds i128 mid-schedule.
    let amount: i128 = 1_000_000_000_000_000_000_000_000_000_000;
    let complete = START_TS + 4_000_000_000;
    client.issue_vested(&holder, &amount, &START_TS, &complete);

    env.ledger().set_timestamp(START_TS + 2_000_000_000);
    assert_eq!(client.spendable_balance(&holder), 0);
    assert_eq!(
        client.try_transfer(&holder, &recipient, &1),
        Err(Ok(Error::VestingLocked))
    );

    env.ledger().set_timestamp(complete);
    client.transfer(&holder, &recipient, &amount);
    assert_eq!(client.balance(&recipient), amount);
}

#[test]
fn revoke_vested_claws_back() {
    let (env, client, _admin, _minter) = setup();
    let holder = Address::generate(&env);

    client.issue_vested(
        &holder,
        &1000,
        &(START_TS + 90 * DAY),
        &(START_TS + 180 * DAY),
    );
    client.revoke_vested(&holder, &400);

    assert_eq!(client.balance(&holder), 600);
    assert_eq!(client.total_supply(), 600);

    let grants = client.grants(&holder);
    assert_eq!(grants.len(), 1);
    assert_eq!(grants.get_unchecked(0).amount, 600);

    assert_eq!(
        client.try_revoke_vested(&holder, &601),
        Err(Ok(Error::InsufficientBalance))
    );
}

#[test]
fn revoke_consumes_newest_grant_first() {
    let (env, client, _admin, _minter) = setup();
    let holder = Address::generate(&env);

    client.issue_vested(
        &holder,
        &300,
        &(START_TS + 30 * DAY),
        &(START_TS + 60 * DAY),
    );
    client.issue_vested(
        &holder,
        &200,
        &(START_TS + 90 * DAY),
        &(START_TS + 180 * DAY),
    );

    client.revoke_vested(&holder, &400);

    let grants = client.grants(&holder);
    assert_eq!(grants.len(), 1);
    assert_eq!(grants.get_unchecked(0).amount, 100);
    assert_eq!(grants.get_unchecked(0).cliff, START_TS + 30 * DAY);
    assert_eq!(client.balance(&holder), 100);
    assert_eq!(client.total_supply(), 100);
}
