//! Reward Pool.
//!
//! A project's creator seeds reward tokens into a per-project pool. Once the
//! soft cap is reached each contributor may claim, exactly once,
//!
//! ```text
//! payout = floor(pool.amount * grant / current_raised)
//! ```
//!
//! computed against the raise *at claim time*. Grants that arrive after a
//! claim dilute later claimants only; earlier payouts are never adjusted.
//! Because of that, recomputed shares can add up to more than the pool, so
//! each payout is also capped at what is left undistributed.

use soroban_sdk::{panic_with_error, Address, Env};

use crate::events;
use crate::math;
use crate::storage;
use crate::token_adapter;
use crate::types::RewardPool;
use crate::Error;

/// Deposit `amount` of `reward_token` into the project's pool.
///
/// The first deposit fixes the pool's asset; later deposits must use the
/// same token (`RewardTokenMismatch`).
pub fn seed(env: &Env, project_id: u64, creator: &Address, reward_token: Address, amount: i128) {
    let Some(project) = storage::load_project_config(env, project_id) else {
        panic_with_error!(env, Error::ProjectNotFound)
    };
    if project.creator != *creator {
        panic_with_error!(env, Error::NotAuthorized);
    }
    if amount <= 0 {
        panic_with_error!(env, Error::InvalidAmount);
    }

    let mut pool =
        storage::load_pool(env, project_id).unwrap_or_else(|| RewardPool::empty(project_id));
    match &pool.token {
        Some(token) if *token != reward_token => {
            panic_with_error!(env, Error::RewardTokenMismatch)
        }
        _ => {}
    }

    let Some(total) = pool.amount.checked_add(amount) else {
        panic_with_error!(env, Error::ArithmeticOverflow)
    };
    pool.token = Some(reward_token.clone());
    pool.amount = total;
    storage::save_pool(env, &pool);

    token_adapter::pull(env, &reward_token, creator, amount);

    events::publish_rewards_seeded(env, creator.clone(), project_id, reward_token, amount);
}

/// Pay the caller's share of the pool. Returns the amount paid.
pub fn withdraw(env: &Env, project_id: u64, user: &Address) -> i128 {
    let grant = storage::load_grant(env, project_id, user);
    if grant <= 0 {
        panic_with_error!(env, Error::NotEligible);
    }

    let Some(project) = storage::load_project(env, project_id) else {
        panic_with_error!(env, Error::ProjectNotFound)
    };
    if project.current_raised < project.soft_cap {
        panic_with_error!(env, Error::SoftCapNotReached);
    }
    if storage::is_paid(env, project_id, user) {
        panic_with_error!(env, Error::AlreadyPaid);
    }

    let Some(mut pool) = storage::load_pool(env, project_id) else {
        panic_with_error!(env, Error::NothingToClaim)
    };
    let Some(token) = pool.token.clone() else {
        panic_with_error!(env, Error::NothingToClaim)
    };

    let Some(share) = math::proportional_share(pool.amount, grant, project.current_raised) else {
        panic_with_error!(env, Error::ArithmeticOverflow)
    };
    let payout = share.min(pool.remaining());
    if payout <= 0 {
        panic_with_error!(env, Error::NothingToClaim);
    }

    // Flag and book the payout before the transfer leaves custody.
    storage::set_paid(env, project_id, user);
    pool.distributed += payout;
    storage::save_pool(env, &pool);

    token_adapter::push(env, &token, user, payout);

    events::publish_rewards_withdrawn(env, user.clone(), project_id, payout);
    payout
}
