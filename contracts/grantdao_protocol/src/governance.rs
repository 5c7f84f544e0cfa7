//! Governance Module.
//!
//! One proposal per project at a time. The creator proposes to unlock a fixed
//! `withdrawal_amount` of raised value; every address holding a live grant
//! casts one ballot while the window `[start_time, end_time)` is open; once the
//! window has closed anyone may execute, which pays the creator exactly once.
//!
//! A terminal proposal (`Executed` or `Defeated`) may be replaced. Each
//! replacement bumps the proposal `round`, and ballots are keyed by round so
//! receipts from an earlier proposal never block voting on the next.

use soroban_sdk::{panic_with_error, Address, Bytes, Env};

use crate::config;
use crate::events;
use crate::storage;
use crate::token_adapter;
use crate::types::{ExecutionPolicy, Proposal, ProposalStatus, VoteReceipt};
use crate::Error;

/// Open (or replace) the project's proposal.
pub fn create(
    env: &Env,
    project_id: u64,
    proposer: &Address,
    description: Bytes,
    start_time: u64,
    end_time: u64,
    withdrawal_amount: i128,
) {
    let policy = config::load(env).policy;

    let Some(project) = storage::load_project_config(env, project_id) else {
        panic_with_error!(env, Error::ProjectNotFound)
    };
    let Some(state) = storage::load_project_state(env, project_id) else {
        panic_with_error!(env, Error::ProjectNotFound)
    };
    if project.creator != *proposer {
        panic_with_error!(env, Error::NotAuthorized);
    }
    if description.is_empty() {
        panic_with_error!(env, Error::EmptyDescription);
    }

    let now = env.ledger().timestamp();
    if start_time < now || end_time < now {
        panic_with_error!(env, Error::TimeInPast);
    }
    if end_time <= start_time {
        panic_with_error!(env, Error::InvalidTimeRange);
    }
    if withdrawal_amount <= 0 {
        panic_with_error!(env, Error::InvalidAmount);
    }
    let unlocked = state.current_raised - state.released;
    if withdrawal_amount > unlocked {
        panic_with_error!(env, Error::InsufficientBalance);
    }

    // Refunds may shrink custody after a proposal opens, so a closed
    // proposal that can no longer be paid is replaceable too.
    let round = match storage::load_proposal(env, project_id) {
        None => 0,
        Some(current) => match current.status(now, policy) {
            ProposalStatus::Executed | ProposalStatus::Defeated => current.round + 1,
            ProposalStatus::Succeeded if current.withdrawal_amount > unlocked => {
                current.round + 1
            }
            _ => panic_with_error!(env, Error::ProposalActive),
        },
    };

    let proposal = Proposal {
        project_id,
        round,
        proposer: proposer.clone(),
        description,
        start_time,
        end_time,
        for_votes: 0,
        against_votes: 0,
        total_votes: 0,
        executed: false,
        withdrawal_amount,
    };
    storage::save_proposal(env, &proposal);

    events::publish_proposal_created(env, proposer.clone(), project_id, start_time, end_time);
}

/// Cast `voter`'s single ballot on the current proposal.
pub fn vote(env: &Env, project_id: u64, voter: &Address, support: bool) {
    let Some(mut proposal) = storage::load_proposal(env, project_id) else {
        panic_with_error!(env, Error::ProposalNotFound)
    };

    let now = env.ledger().timestamp();
    if now < proposal.start_time || now >= proposal.end_time || proposal.executed {
        panic_with_error!(env, Error::VotingNotActive);
    }

    // Eligibility is read at vote time, not snapshotted.
    if storage::load_grant(env, project_id, voter) <= 0 {
        panic_with_error!(env, Error::NotAllowedToVote);
    }
    if storage::load_receipt(env, project_id, proposal.round, voter).is_some() {
        panic_with_error!(env, Error::DuplicateVote);
    }

    // Each side is bounded by the total, so only the total can overflow.
    let Some(total) = proposal.total_votes.checked_add(1) else {
        panic_with_error!(env, Error::ArithmeticOverflow)
    };
    if support {
        proposal.for_votes += 1;
    } else {
        proposal.against_votes += 1;
    }
    proposal.total_votes = total;

    storage::save_proposal(env, &proposal);
    storage::save_receipt(
        env,
        project_id,
        proposal.round,
        voter,
        &VoteReceipt {
            has_voted: true,
            support,
        },
    );

    events::publish_voted(env, project_id, voter.clone(), total);
}

/// Unlock the proposal's `withdrawal_amount` to the project creator.
///
/// Returns the amount transferred.
pub fn execute(env: &Env, project_id: u64) -> i128 {
    let config = config::load(env);

    let Some(mut proposal) = storage::load_proposal(env, project_id) else {
        panic_with_error!(env, Error::ProposalNotFound)
    };
    if proposal.executed {
        panic_with_error!(env, Error::AlreadyExecuted);
    }

    let now = env.ledger().timestamp();
    if now < proposal.end_time {
        panic_with_error!(env, Error::VotingNotEnded);
    }
    if config.policy == ExecutionPolicy::Majority && proposal.for_votes <= proposal.against_votes
    {
        panic_with_error!(env, Error::ProposalDefeated);
    }

    let Some(project) = storage::load_project_config(env, project_id) else {
        panic_with_error!(env, Error::ProjectNotFound)
    };
    let Some(mut state) = storage::load_project_state(env, project_id) else {
        panic_with_error!(env, Error::ProjectNotFound)
    };

    let amount = proposal.withdrawal_amount;
    if amount > state.current_raised - state.released {
        panic_with_error!(env, Error::InsufficientBalance);
    }

    proposal.executed = true;
    storage::save_proposal(env, &proposal);
    state.released += amount;
    storage::save_project_state(env, project_id, &state);

    token_adapter::push(env, &config.value_token, &project.creator, amount);

    events::publish_proposal_executed(env, project_id, amount);
    amount
}

/// Current status of the project's proposal, if any.
pub fn status(env: &Env, project_id: u64) -> Option<ProposalStatus> {
    let proposal = storage::load_proposal(env, project_id)?;
    let config = storage::load_config(env)?;
    Some(proposal.status(env.ledger().timestamp(), config.policy))
}

/// The caller's ballot on the project's current proposal.
pub fn receipt(env: &Env, project_id: u64, voter: &Address) -> VoteReceipt {
    storage::load_proposal(env, project_id)
        .and_then(|proposal| storage::load_receipt(env, project_id, proposal.round, voter))
        .unwrap_or_default()
}

/// Amount the project's proposal would unlock; zero without a proposal.
pub fn unlock_funds(env: &Env, project_id: u64) -> i128 {
    storage::load_proposal(env, project_id)
        .map(|proposal| proposal.withdrawal_amount)
        .unwrap_or(0)
}
