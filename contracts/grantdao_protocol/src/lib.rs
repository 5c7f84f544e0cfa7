//! # GrantDAO Protocol Contract
//!
//! Crowdfunding ledger with an attached governance layer. Contributors grant
//! value tokens to registered projects; projects that clear their soft cap
//! distribute creator-seeded reward tokens pro rata; creators unlock raised
//! funds through a contributor vote.
//!
//! | Phase        | Entry Point(s)                                        |
//! |--------------|-------------------------------------------------------|
//! | Bootstrap    | [`GrantDao::init`], `set_operator`                    |
//! | Registration | [`GrantDao::register_project`]                        |
//! | Funding      | [`GrantDao::grant_funds`], `withdraw_grants`          |
//! | Rewards      | [`GrantDao::seed_tokens_to_project`], `withdraw_rewards` |
//! | Governance   | `create_proposal`, `vote`, `execute`                  |
//! | Queries      | `projects`, `grants`, `rewards_pool`, `rewards_paid`  |
//! |              | `proposals`, `receipts`, `unlock_funds`, `proposal_status` |
//!
//! ## Architecture
//!
//! This file contains only the public entry points: authorization is checked
//! here, then each call is delegated to [`registry`], [`grants`], [`rewards`]
//! or [`governance`]. Storage access lives in [`storage`] and every token
//! movement goes through [`token_adapter`].
//!
//! Every entry point that both mutates state and moves tokens writes its state
//! first and transfers last. Any rejection aborts the invocation via
//! `panic_with_error!`, which discards all writes.

#![no_std]

#[cfg(test)]
#[macro_use]
extern crate std;

use soroban_sdk::{contract, contracterror, contractimpl, Address, Bytes, Env};

mod config;
mod events;
mod governance;
mod grants;
mod math;
mod registry;
mod rewards;
mod storage;
mod token_adapter;
mod types;

#[cfg(test)]
mod test_rewards;

pub use events::{
    GrantFunds, GrantsWithdrawed, OperatorChanged, ProjectCreated, ProposalCreated,
    ProposalExecuted, RewardsSeeded, RewardsWithdrawn, Voted,
};
pub use types::{
    ExecutionPolicy, Project, Proposal, ProposalStatus, RewardPool, VoteReceipt,
};

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    ProjectNotFound     = 1,
    ProposalNotFound    = 2,
    NotAuthorized       = 3,
    TimeInPast          = 4,
    InvalidTimeRange    = 5,
    InvalidCaps         = 6,
    CapsEqual           = 7,
    SoftCapAboveHardCap = 8,
    InvalidAmount       = 9,
    FundingNotStarted   = 10,
    FundingEnded        = 11,
    FullyFunded         = 12,
    HardCapExceeded     = 13,
    NotEligible         = 14,
    SoftCapReached      = 15,
    SoftCapNotReached   = 16,
    AlreadyPaid         = 17,
    RewardTokenMismatch = 18,
    NothingToClaim      = 19,
    EmptyDescription    = 20,
    NotAllowedToVote    = 21,
    DuplicateVote       = 22,
    VotingNotActive     = 23,
    VotingNotEnded      = 24,
    AlreadyExecuted     = 25,
    ProposalDefeated    = 26,
    ProposalActive      = 27,
    InsufficientBalance = 28,
    TransferFailed      = 29,
    AlreadyInitialized  = 30,
    NotInitialized      = 31,
    ArithmeticOverflow  = 32,
}

#[cfg(test)]
impl Error {
    /// The host error a `try_*` client call reports when this code aborts it.
    pub(crate) fn into_host(self) -> soroban_sdk::Error {
        soroban_sdk::Error::from_contract_error(self as u32)
    }
}

#[contract]
pub struct GrantDao;

#[contractimpl]
impl GrantDao {
    // ─────────────────────────────────────────────────────────
    // Initialisation
    // ─────────────────────────────────────────────────────────

    /// Initialise the contract.
    ///
    /// Must be called exactly once immediately after deployment.
    /// Subsequent calls panic with `Error::AlreadyInitialized`.
    ///
    /// - `operator` is the privileged ledger operator and must sign.
    /// - `value_token` is the token all grants are made in.
    /// - `policy` decides whether execution needs a majority.
    pub fn init(env: Env, operator: Address, value_token: Address, policy: ExecutionPolicy) {
        operator.require_auth();
        config::init(&env, operator, value_token, policy);
    }

    /// Transfer the operator role. The current operator must sign.
    pub fn set_operator(env: Env, new_operator: Address) {
        config::set_operator(&env, new_operator);
    }

    pub fn operator(env: Env) -> Address {
        config::load(&env).operator
    }

    pub fn value_token(env: Env) -> Address {
        config::load(&env).value_token
    }

    pub fn execution_policy(env: Env) -> ExecutionPolicy {
        config::load(&env).policy
    }

    // ─────────────────────────────────────────────────────────
    // Project Registry
    // ─────────────────────────────────────────────────────────

    /// Register a new project and return its ID (starting at 1).
    pub fn register_project(
        env: Env,
        creator: Address,
        start_time: u64,
        end_time: u64,
        soft_cap: i128,
        hard_cap: i128,
    ) -> u64 {
        creator.require_auth();
        registry::register(&env, creator, start_time, end_time, soft_cap, hard_cap)
    }

    /// Retrieve a project by its ID; `None` for 0 or unknown IDs.
    pub fn projects(env: Env, id: u64) -> Option<Project> {
        storage::load_project(&env, id)
    }

    pub fn project_count(env: Env) -> u64 {
        storage::project_count(&env)
    }

    // ─────────────────────────────────────────────────────────
    // Grant Ledger
    // ─────────────────────────────────────────────────────────

    /// Grant `amount` of the value token to a project.
    ///
    /// `user` must authorize; the token transfer into custody is part of
    /// the same invocation.
    pub fn grant_funds(env: Env, project_id: u64, user: Address, amount: i128) {
        user.require_auth();
        grants::grant(&env, project_id, &user, amount);
    }

    /// Withdraw the caller's full grant while the soft cap is unmet.
    pub fn withdraw_grants(env: Env, project_id: u64, user: Address) -> i128 {
        user.require_auth();
        grants::withdraw(&env, project_id, &user)
    }

    /// The caller's live grant balance; zero if none.
    pub fn grants(env: Env, project_id: u64, user: Address) -> i128 {
        storage::load_grant(&env, project_id, &user)
    }

    // ─────────────────────────────────────────────────────────
    // Reward Pool
    // ─────────────────────────────────────────────────────────

    /// Seed reward tokens for a project's contributors. Creator only.
    pub fn seed_tokens_to_project(
        env: Env,
        project_id: u64,
        creator: Address,
        reward_token: Address,
        amount: i128,
    ) {
        creator.require_auth();
        rewards::seed(&env, project_id, &creator, reward_token, amount);
    }

    /// Claim the caller's proportional reward. Returns the amount paid.
    pub fn withdraw_rewards(env: Env, project_id: u64, user: Address) -> i128 {
        user.require_auth();
        rewards::withdraw(&env, project_id, &user)
    }

    /// The project's reward pool; an all-zero record (`project_id` 0) if never seeded.
    pub fn rewards_pool(env: Env, project_id: u64) -> RewardPool {
        storage::load_pool(&env, project_id).unwrap_or_else(|| RewardPool::empty(0))
    }

    pub fn rewards_paid(env: Env, project_id: u64, user: Address) -> bool {
        storage::is_paid(&env, project_id, &user)
    }

    // ─────────────────────────────────────────────────────────
    // Governance
    // ─────────────────────────────────────────────────────────

    /// Open a proposal to unlock `withdrawal_amount` of raised value.
    ///
    /// `proposer` must be the project creator. Replaces the project's
    /// previous proposal only if that one is executed or defeated.
    pub fn create_proposal(
        env: Env,
        project_id: u64,
        proposer: Address,
        description: Bytes,
        start_time: u64,
        end_time: u64,
        withdrawal_amount: i128,
    ) {
        proposer.require_auth();
        governance::create(
            &env,
            project_id,
            &proposer,
            description,
            start_time,
            end_time,
            withdrawal_amount,
        );
    }

    /// Cast one ballot. Only addresses with a live grant may vote.
    pub fn vote(env: Env, project_id: u64, voter: Address, support: bool) {
        voter.require_auth();
        governance::vote(&env, project_id, &voter, support);
    }

    /// Execute a closed proposal, paying the creator. Callable by anyone.
    pub fn execute(env: Env, project_id: u64, caller: Address) -> i128 {
        caller.require_auth();
        governance::execute(&env, project_id)
    }

    pub fn proposals(env: Env, project_id: u64) -> Option<Proposal> {
        storage::load_proposal(&env, project_id)
    }

    pub fn proposal_status(env: Env, project_id: u64) -> Option<ProposalStatus> {
        governance::status(&env, project_id)
    }

    /// The caller's ballot on the current proposal.
    pub fn receipts(env: Env, project_id: u64, voter: Address) -> VoteReceipt {
        governance::receipt(&env, project_id, &voter)
    }

    /// Amount the current proposal unlocks; zero without a proposal.
    pub fn unlock_funds(env: Env, project_id: u64) -> i128 {
        governance::unlock_funds(&env, project_id)
    }
}
