//! Project Registry.
//!
//! Issues sequential project IDs (first ID is 1) and enforces the schedule
//! and cap invariants at registration time. Records are never deleted.

use soroban_sdk::{panic_with_error, Address, Env};

use crate::events;
use crate::storage;
use crate::types::Project;
use crate::Error;

/// Register a new project and return its ID.
///
/// Checks run in a fixed order and the first failure wins:
/// 1. `start_time` and `end_time` not in the past (`TimeInPast`)
/// 2. `end_time > start_time` (`InvalidTimeRange`)
/// 3. both caps positive (`InvalidCaps`)
/// 4. caps differ (`CapsEqual`)
/// 5. `soft_cap < hard_cap` (`SoftCapAboveHardCap`)
pub fn register(
    env: &Env,
    creator: Address,
    start_time: u64,
    end_time: u64,
    soft_cap: i128,
    hard_cap: i128,
) -> u64 {
    let now = env.ledger().timestamp();

    if start_time < now || end_time < now {
        panic_with_error!(env, Error::TimeInPast);
    }
    if end_time <= start_time {
        panic_with_error!(env, Error::InvalidTimeRange);
    }
    if soft_cap <= 0 || hard_cap <= 0 {
        panic_with_error!(env, Error::InvalidCaps);
    }
    if soft_cap == hard_cap {
        panic_with_error!(env, Error::CapsEqual);
    }
    if soft_cap > hard_cap {
        panic_with_error!(env, Error::SoftCapAboveHardCap);
    }

    let id = storage::get_and_increment_project_id(env);

    let project = Project {
        id,
        creator: creator.clone(),
        start_time,
        end_time,
        soft_cap,
        hard_cap,
        current_raised: 0,
        released: 0,
    };
    storage::save_project(env, &project);

    events::publish_project_created(env, creator, id);
    id
}
