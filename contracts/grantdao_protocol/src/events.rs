//! # Events
//!
//! Every successful state change publishes exactly one event. Topics are
//! `(symbol, project_id)` so indexers can filter per project; the data is
//! one of the `#[contracttype]` structs below.
//!
//! Events are published last in each entry point, after any token transfer,
//! so they are never observed for a rolled-back invocation.

use soroban_sdk::{contracttype, symbol_short, Address, Env};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProjectCreated {
    pub creator: Address,
    pub project_id: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GrantFunds {
    pub user: Address,
    pub project_id: u64,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GrantsWithdrawed {
    pub user: Address,
    pub project_id: u64,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardsSeeded {
    pub creator: Address,
    pub project_id: u64,
    pub token: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardsWithdrawn {
    pub user: Address,
    pub project_id: u64,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProposalCreated {
    pub proposer: Address,
    pub project_id: u64,
    pub start_time: u64,
    pub end_time: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Voted {
    pub project_id: u64,
    pub voter: Address,
    /// Total ballots cast on the proposal, this one included.
    pub votes: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProposalExecuted {
    pub project_id: u64,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OperatorChanged {
    pub previous: Address,
    pub operator: Address,
}

pub fn publish_project_created(env: &Env, creator: Address, project_id: u64) {
    env.events().publish(
        (symbol_short!("created"), project_id),
        ProjectCreated {
            creator,
            project_id,
        },
    );
}

pub fn publish_grant_funds(env: &Env, user: Address, project_id: u64, amount: i128) {
    env.events().publish(
        (symbol_short!("granted"), project_id),
        GrantFunds {
            user,
            project_id,
            amount,
        },
    );
}

pub fn publish_grants_withdrawed(env: &Env, user: Address, project_id: u64, amount: i128) {
    env.events().publish(
        (symbol_short!("withdrawn"), project_id),
        GrantsWithdrawed {
            user,
            project_id,
            amount,
        },
    );
}

pub fn publish_rewards_seeded(
    env: &Env,
    creator: Address,
    project_id: u64,
    token: Address,
    amount: i128,
) {
    env.events().publish(
        (symbol_short!("seeded"), project_id),
        RewardsSeeded {
            creator,
            project_id,
            token,
            amount,
        },
    );
}

pub fn publish_rewards_withdrawn(env: &Env, user: Address, project_id: u64, amount: i128) {
    env.events().publish(
        (symbol_short!("rewarded"), project_id),
        RewardsWithdrawn {
            user,
            project_id,
            amount,
        },
    );
}

pub fn publish_proposal_created(
    env: &Env,
    proposer: Address,
    project_id: u64,
    start_time: u64,
    end_time: u64,
) {
    env.events().publish(
        (symbol_short!("proposed"), project_id),
        ProposalCreated {
            proposer,
            project_id,
            start_time,
            end_time,
        },
    );
}

pub fn publish_voted(env: &Env, project_id: u64, voter: Address, votes: u32) {
    env.events().publish(
        (symbol_short!("voted"), project_id),
        Voted {
            project_id,
            voter,
            votes,
        },
    );
}

pub fn publish_proposal_executed(env: &Env, project_id: u64, amount: i128) {
    env.events().publish(
        (symbol_short!("executed"), project_id),
        ProposalExecuted { project_id, amount },
    );
}

pub fn publish_operator_changed(env: &Env, previous: Address, operator: Address) {
    env.events().publish(
        (symbol_short!("operator"),),
        OperatorChanged { previous, operator },
    );
}
