//! # Types
//!
//! Shared data structures used across all modules of the GrantDAO protocol.
//!
//! ## Design decisions
//!
//! ### Config / State split
//!
//! A `Project` is internally stored as two separate ledger entries:
//!
//! - [`ProjectConfig`]: written once at registration; never mutated.
//! - [`ProjectState`]: written on every grant, withdrawal and unlock.
//!
//! The public API exposes the reconstructed [`Project`] struct for convenience.
//!
//! ### Proposal status as a Finite-State Machine
//!
//! [`ProposalStatus`] is derived from the ledger clock and the tallies, and
//! only ever moves forward:
//!
//! ```text
//! Pending ──► Active ──► Succeeded ──► Executed
//!                   └──► Defeated
//! ```
//!
//! `Executed` and `Defeated` are terminal. A project may open a new proposal
//! only once its current one is terminal.

use soroban_sdk::{contracttype, Address, Bytes};

/// Whether a closed proposal needs a majority before it can be executed.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ExecutionPolicy {
    /// Executable as soon as the voting window has closed.
    WindowClosed,
    /// Executable once closed and only if `for_votes > against_votes`.
    Majority,
}

/// Contract-wide configuration, written by `init`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    /// Privileged ledger operator. Has no power over project funds.
    pub operator: Address,
    /// Token every grant is denominated in.
    pub value_token: Address,
    pub policy: ExecutionPolicy,
}

/// Immutable project configuration, written once at registration.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProjectConfig {
    pub id: u64,
    pub creator: Address,
    pub start_time: u64,
    pub end_time: u64,
    pub soft_cap: i128,
    pub hard_cap: i128,
}

/// Mutable project state, updated on grants, withdrawals and unlocks.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProjectState {
    /// Sum of all live grants.
    pub current_raised: i128,
    /// Value already unlocked to the creator by executed proposals.
    pub released: i128,
}

/// Full on-chain representation of a fundraising campaign.
///
/// Used as the public API return type; reconstructed internally from
/// the split `ProjectConfig` + `ProjectState` storage entries.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Project {
    /// Sequential identifier, starting at 1.
    pub id: u64,
    /// Address that registered the project; receives unlocked funds.
    pub creator: Address,
    /// Ledger timestamp at which grants open.
    pub start_time: u64,
    /// Ledger timestamp after which grants close.
    pub end_time: u64,
    /// Minimum raise that unlocks rewards and disables withdrawals.
    pub soft_cap: i128,
    /// Maximum raise the project accepts.
    pub hard_cap: i128,
    /// Current funded amount.
    pub current_raised: i128,
    /// Amount already unlocked to the creator.
    pub released: i128,
}

impl Project {
    pub fn from_parts(config: ProjectConfig, state: ProjectState) -> Self {
        Project {
            id: config.id,
            creator: config.creator,
            start_time: config.start_time,
            end_time: config.end_time,
            soft_cap: config.soft_cap,
            hard_cap: config.hard_cap,
            current_raised: state.current_raised,
            released: state.released,
        }
    }
}

/// Creator-seeded rewards earmarked for a project's contributors.
///
/// `amount` is the total ever seeded and is never reduced by payouts;
/// `distributed` tracks what has already left custody.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardPool {
    pub project_id: u64,
    /// Reward asset, fixed by the first deposit.
    pub token: Option<Address>,
    pub amount: i128,
    pub distributed: i128,
}

impl RewardPool {
    pub fn empty(project_id: u64) -> Self {
        RewardPool {
            project_id,
            token: None,
            amount: 0,
            distributed: 0,
        }
    }

    pub fn remaining(&self) -> i128 {
        self.amount - self.distributed
    }
}

/// A creator's request to unlock part of the raised funds.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Proposal {
    pub project_id: u64,
    /// Incremented each time the project's proposal is replaced.
    pub round: u32,
    pub proposer: Address,
    pub description: Bytes,
    pub start_time: u64,
    pub end_time: u64,
    pub for_votes: u32,
    pub against_votes: u32,
    pub total_votes: u32,
    pub executed: bool,
    pub withdrawal_amount: i128,
}

impl Proposal {
    /// Derive the lifecycle status at ledger time `now`.
    pub fn status(&self, now: u64, policy: ExecutionPolicy) -> ProposalStatus {
        if self.executed {
            ProposalStatus::Executed
        } else if now < self.start_time {
            ProposalStatus::Pending
        } else if now < self.end_time {
            ProposalStatus::Active
        } else if policy == ExecutionPolicy::Majority && self.for_votes <= self.against_votes {
            ProposalStatus::Defeated
        } else {
            ProposalStatus::Succeeded
        }
    }
}

/// Lifecycle status of a proposal.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ProposalStatus {
    /// Created; voting has not opened yet.
    Pending,
    /// Voting window is open.
    Active,
    /// Window closed and the execution policy is satisfied.
    Succeeded,
    /// Window closed without a majority (only under `Majority`).
    Defeated,
    /// Funds unlocked.
    Executed,
}

/// A contributor's ballot on the current proposal of a project.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct VoteReceipt {
    pub has_voted: bool,
    pub support: bool,
}
