//! Grant Ledger.
//!
//! Per-contributor balances keyed by `(project_id, user)`. Repeated grants
//! accumulate into the same entry. The sum of a project's grant balances is
//! always equal to its `current_raised`.

use soroban_sdk::{panic_with_error, Address, Env};

use crate::config;
use crate::events;
use crate::storage;
use crate::token_adapter;
use crate::Error;

/// Commit `amount` of the value token to `project_id`.
///
/// A grant that would push the raise above the hard cap is rejected
/// outright rather than clamped.
pub fn grant(env: &Env, project_id: u64, user: &Address, amount: i128) {
    let value_token = config::load(env).value_token;

    let Some(project) = storage::load_project_config(env, project_id) else {
        panic_with_error!(env, Error::ProjectNotFound)
    };
    let Some(mut state) = storage::load_project_state(env, project_id) else {
        panic_with_error!(env, Error::ProjectNotFound)
    };

    if amount <= 0 {
        panic_with_error!(env, Error::InvalidAmount);
    }

    let now = env.ledger().timestamp();
    if now < project.start_time {
        panic_with_error!(env, Error::FundingNotStarted);
    }
    if now > project.end_time {
        panic_with_error!(env, Error::FundingEnded);
    }

    if state.current_raised >= project.hard_cap {
        panic_with_error!(env, Error::FullyFunded);
    }
    let Some(raised) = state.current_raised.checked_add(amount) else {
        panic_with_error!(env, Error::ArithmeticOverflow)
    };
    if raised > project.hard_cap {
        panic_with_error!(env, Error::HardCapExceeded);
    }

    let balance = storage::load_grant(env, project_id, user);
    let Some(balance) = balance.checked_add(amount) else {
        panic_with_error!(env, Error::ArithmeticOverflow)
    };

    state.current_raised = raised;
    storage::save_project_state(env, project_id, &state);
    storage::save_grant(env, project_id, user, balance);

    token_adapter::pull(env, &value_token, user, amount);

    events::publish_grant_funds(env, user.clone(), project_id, amount);
}

/// Return the caller's whole grant while the soft cap is still unmet.
///
/// Returns the refunded amount.
pub fn withdraw(env: &Env, project_id: u64, user: &Address) -> i128 {
    let value_token = config::load(env).value_token;

    let amount = storage::load_grant(env, project_id, user);
    if amount <= 0 {
        panic_with_error!(env, Error::NotEligible);
    }

    let Some(project) = storage::load_project_config(env, project_id) else {
        panic_with_error!(env, Error::ProjectNotFound)
    };
    let Some(mut state) = storage::load_project_state(env, project_id) else {
        panic_with_error!(env, Error::ProjectNotFound)
    };

    if state.current_raised >= project.soft_cap {
        panic_with_error!(env, Error::SoftCapReached);
    }
    if amount > state.current_raised - state.released {
        panic_with_error!(env, Error::InsufficientBalance);
    }

    // Zero the balance before the refund leaves custody.
    storage::save_grant(env, project_id, user, 0);
    state.current_raised -= amount;
    storage::save_project_state(env, project_id, &state);

    token_adapter::push(env, &value_token, user, amount);

    events::publish_grants_withdrawed(env, user.clone(), project_id, amount);
    amount
}
