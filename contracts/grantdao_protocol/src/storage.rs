//! # Storage
//!
//! Provides typed helpers over Soroban's two storage tiers used by GrantDAO:
//!
//! ## Instance storage (contract-lifetime TTL)
//!
//! | Key              | Type      | Description                          |
//! |------------------|-----------|--------------------------------------|
//! | `Config`         | `Config`  | Operator, value token, exec policy   |
//! | `ProjectCount`   | `u64`     | Last issued project ID               |
//!
//! Instance TTL is bumped by **7 days** whenever it falls below 1 day remaining.
//!
//! ## Persistent storage (per-entry TTL)
//!
//! | Key                     | Type            | Description                       |
//! |-------------------------|-----------------|-----------------------------------|
//! | `ProjConfig(id)`        | `ProjectConfig` | Immutable project configuration   |
//! | `ProjState(id)`         | `ProjectState`  | Raised / released accumulators    |
//! | `Grant(id, user)`       | `i128`          | Live contribution balance         |
//! | `Pool(id)`              | `RewardPool`    | Seeded reward pool                |
//! | `Paid(id, user)`        | `bool`          | Reward claim flag                 |
//! | `Proposal(id)`          | `Proposal`      | Current unlock proposal           |
//! | `Receipt(id, round, v)` | `VoteReceipt`   | Ballot for one proposal round     |
//!
//! Persistent TTL is bumped by **30 days** whenever it falls below 7 days remaining.
//!
//! Missing entries read as `None` (or the zero value) and are never bumped.

use core::fmt::Debug;

use soroban_sdk::{contracttype, Address, Env, IntoVal, TryFromVal, Val};

use crate::types::{
    Config, Project, ProjectConfig, ProjectState, Proposal, RewardPool, VoteReceipt,
};

// ── TTL Constants ────────────────────────────────────────────────────

/// Approximate ledgers per day (~5 seconds per ledger).
const DAY_IN_LEDGERS: u32 = 17_280;

/// Instance storage: bump by 7 days when below 1 day remaining.
const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
const INSTANCE_LIFETIME_THRESHOLD: u32 = DAY_IN_LEDGERS;

/// Persistent storage: bump by 30 days when below 7 days remaining.
const PERSISTENT_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
const PERSISTENT_LIFETIME_THRESHOLD: u32 = 7 * DAY_IN_LEDGERS;

// ── Storage Keys ─────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    /// Contract configuration (Instance).
    Config,
    /// Last issued project ID (Instance).
    ProjectCount,
    ProjConfig(u64),
    ProjState(u64),
    Grant(u64, Address),
    Pool(u64),
    Paid(u64, Address),
    Proposal(u64),
    Receipt(u64, u32, Address),
}

// ── Instance Storage Helpers ─────────────────────────────────────────

/// Extend instance storage TTL if it falls below the threshold.
fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

pub fn has_config(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Config)
}

pub fn load_config(env: &Env) -> Option<Config> {
    bump_instance(env);
    env.storage().instance().get(&DataKey::Config)
}

pub fn save_config(env: &Env, config: &Config) {
    env.storage().instance().set(&DataKey::Config, config);
    bump_instance(env);
}

/// Reads, increments, and stores the project counter.
/// Returns the ID to use for the *new* project; the first ID is 1 so that
/// 0 stays free as a "no such project" sentinel.
pub fn get_and_increment_project_id(env: &Env) -> u64 {
    bump_instance(env);
    let next = project_count(env) + 1;
    env.storage().instance().set(&DataKey::ProjectCount, &next);
    next
}

/// Number of projects registered so far (also the highest issued ID).
pub fn project_count(env: &Env) -> u64 {
    env.storage()
        .instance()
        .get(&DataKey::ProjectCount)
        .unwrap_or(0)
}

// ── Persistent Storage Helpers ───────────────────────────────────────

/// Extend the TTL for a persistent storage key.
fn bump_persistent(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

fn get_persistent<T>(env: &Env, key: &DataKey) -> Option<T>
where
    T: TryFromVal<Env, Val>,
    T::Error: Debug,
{
    let value = env.storage().persistent().get(key);
    if value.is_some() {
        bump_persistent(env, key);
    }
    value
}

fn set_persistent<T>(env: &Env, key: &DataKey, value: &T)
where
    T: IntoVal<Env, Val>,
{
    env.storage().persistent().set(key, value);
    bump_persistent(env, key);
}

// Projects

/// Save both the immutable config and initial mutable state for a new project.
pub fn save_project(env: &Env, project: &Project) {
    let config = ProjectConfig {
        id: project.id,
        creator: project.creator.clone(),
        start_time: project.start_time,
        end_time: project.end_time,
        soft_cap: project.soft_cap,
        hard_cap: project.hard_cap,
    };

    let state = ProjectState {
        current_raised: project.current_raised,
        released: project.released,
    };

    set_persistent(env, &DataKey::ProjConfig(project.id), &config);
    set_persistent(env, &DataKey::ProjState(project.id), &state);
}

/// Load the full `Project` by combining config and state.
pub fn load_project(env: &Env, id: u64) -> Option<Project> {
    let config = load_project_config(env, id)?;
    let state = load_project_state(env, id)?;
    Some(Project::from_parts(config, state))
}

/// Load only the immutable project configuration.
pub fn load_project_config(env: &Env, id: u64) -> Option<ProjectConfig> {
    get_persistent(env, &DataKey::ProjConfig(id))
}

/// Load only the mutable project state.
pub fn load_project_state(env: &Env, id: u64) -> Option<ProjectState> {
    get_persistent(env, &DataKey::ProjState(id))
}

/// Save only the mutable project state.
pub fn save_project_state(env: &Env, id: u64, state: &ProjectState) {
    set_persistent(env, &DataKey::ProjState(id), state);
}

// Grants

pub fn load_grant(env: &Env, id: u64, user: &Address) -> i128 {
    get_persistent(env, &DataKey::Grant(id, user.clone())).unwrap_or(0)
}

/// Store a grant balance; a zero balance removes the entry.
pub fn save_grant(env: &Env, id: u64, user: &Address, amount: i128) {
    let key = DataKey::Grant(id, user.clone());
    if amount == 0 {
        env.storage().persistent().remove(&key);
    } else {
        set_persistent(env, &key, &amount);
    }
}

// Reward pools

pub fn load_pool(env: &Env, id: u64) -> Option<RewardPool> {
    get_persistent(env, &DataKey::Pool(id))
}

pub fn save_pool(env: &Env, pool: &RewardPool) {
    set_persistent(env, &DataKey::Pool(pool.project_id), pool);
}

pub fn is_paid(env: &Env, id: u64, user: &Address) -> bool {
    get_persistent(env, &DataKey::Paid(id, user.clone())).unwrap_or(false)
}

pub fn set_paid(env: &Env, id: u64, user: &Address) {
    set_persistent(env, &DataKey::Paid(id, user.clone()), &true);
}

// Governance

pub fn load_proposal(env: &Env, id: u64) -> Option<Proposal> {
    get_persistent(env, &DataKey::Proposal(id))
}

pub fn save_proposal(env: &Env, proposal: &Proposal) {
    set_persistent(env, &DataKey::Proposal(proposal.project_id), proposal);
}

pub fn load_receipt(env: &Env, id: u64, round: u32, voter: &Address) -> Option<VoteReceipt> {
    get_persistent(env, &DataKey::Receipt(id, round, voter.clone()))
}

pub fn save_receipt(env: &Env, id: u64, round: u32, voter: &Address, receipt: &VoteReceipt) {
    set_persistent(env, &DataKey::Receipt(id, round, voter.clone()), receipt);
}
