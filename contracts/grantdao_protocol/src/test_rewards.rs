extern crate std;

use soroban_sdk::{
    testutils::{Address as _, Ledger},
    token, Address, Env,
};

use crate::invariants::assert_pool_solvent;
use crate::{Error, ExecutionPolicy, GrantDao, GrantDaoClient, RewardPool};

const NOW: u64 = 1_000;
const UNIT: i128 = 10_000_000;

struct Fixture {
    env: Env,
    client: GrantDaoClient<'static>,
    token: token::Client<'static>,
    reward: token::Client<'static>,
    creator: Address,
    user2: Address,
    user3: Address,
    project_id: u64,
}

fn create_token<'a>(env: &Env, admin: &Address) -> token::Client<'a> {
    let addr = env.register_stellar_asset_contract_v2(admin.clone());
    token::Client::new(env, &addr.address())
}

fn mint(env: &Env, token: &token::Client, to: &Address, amount: i128) {
    token::StellarAssetClient::new(env, &token.address).mint(to, &amount);
}

/// Project with soft cap 30 / hard cap 150. The creator holds 100 reward
/// tokens, both users hold 100 value tokens. Nothing is granted or seeded.
fn setup() -> Fixture {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_timestamp(NOW);
    let contract_id = env.register(GrantDao, ());
    let client = GrantDaoClient::new(&env, &contract_id);

    let admin = Address::generate(&env);
    let token = create_token(&env, &admin);
    let reward = create_token(&env, &admin);
    client.init(&Address::generate(&env), &token.address, &ExecutionPolicy::Majority);

    let creator = Address::generate(&env);
    let user2 = Address::generate(&env);
    let user3 = Address::generate(&env);
    mint(&env, &reward, &creator, 100 * UNIT);
    mint(&env, &token, &user2, 100 * UNIT);
    mint(&env, &token, &user3, 100 * UNIT);

    let project_id =
        client.register_project(&creator, &NOW, &(NOW + 3_600), &(30 * UNIT), &(150 * UNIT));

    Fixture {
        env,
        client,
        token,
        reward,
        creator,
        user2,
        user3,
        project_id,
    }
}

// ─────────────────────────────────────────────────────────
// Seeding
// ─────────────────────────────────────────────────────────

#[test]
fn test_unseeded_pool_reads_as_zero_record() {
    let f = setup();
    f.client.grant_funds(&f.project_id, &f.user2, &(10 * UNIT));

    let pool = f.client.rewards_pool(&f.project_id);
    assert_eq!(pool, RewardPool::empty(0));
    assert_eq!(pool.project_id, 0);
    assert_eq!(pool.token, None);
}

#[test]
fn test_seed_tokens_to_project() {
    let f = setup();
    f.client.grant_funds(&f.project_id, &f.user2, &(10 * UNIT));
    f.client
        .seed_tokens_to_project(&f.project_id, &f.creator, &f.reward.address, &(30 * UNIT));

    let pool = f.client.rewards_pool(&f.project_id);
    assert_eq!(pool.project_id, f.project_id);
    assert_eq!(pool.token, Some(f.reward.address.clone()));
    assert_eq!(pool.amount, 30 * UNIT);
    assert_eq!(pool.distributed, 0);

    assert_eq!(f.reward.balance(&f.client.address), 30 * UNIT);
    assert_eq!(f.reward.balance(&f.creator), 70 * UNIT);
}

#[test]
fn test_seed_accumulates_same_token() {
    let f = setup();
    f.client
        .seed_tokens_to_project(&f.project_id, &f.creator, &f.reward.address, &(10 * UNIT));
    f.client
        .seed_tokens_to_project(&f.project_id, &f.creator, &f.reward.address, &(15 * UNIT));

    assert_eq!(f.client.rewards_pool(&f.project_id).amount, 25 * UNIT);
}

#[test]
fn test_seed_only_by_creator() {
    let f = setup();
    mint(&f.env, &f.reward, &f.user2, 50 * UNIT);

    assert_eq!(
        f.client
            .try_seed_tokens_to_project(&f.project_id, &f.user2, &f.reward.address, &(30 * UNIT)),
        Err(Ok(Error::NotAuthorized.into_host()))
    );
    assert_eq!(f.reward.balance(&f.user2), 50 * UNIT);
}

#[test]
fn test_seed_unknown_project() {
    let f = setup();
    assert_eq!(
        f.client
            .try_seed_tokens_to_project(&7, &f.creator, &f.reward.address, &UNIT),
        Err(Ok(Error::ProjectNotFound.into_host()))
    );
}

#[test]
fn test_seed_rejects_non_positive_amount() {
    let f = setup();
    assert_eq!(
        f.client
            .try_seed_tokens_to_project(&f.project_id, &f.creator, &f.reward.address, &0),
        Err(Ok(Error::InvalidAmount.into_host()))
    );
}

#[test]
fn test_seed_rejects_different_reward_token() {
    let f = setup();
    let other = create_token(&f.env, &Address::generate(&f.env));
    mint(&f.env, &other, &f.creator, 10 * UNIT);

    f.client
        .seed_tokens_to_project(&f.project_id, &f.creator, &f.reward.address, &(10 * UNIT));
    assert_eq!(
        f.client
            .try_seed_tokens_to_project(&f.project_id, &f.creator, &other.address, &(10 * UNIT)),
        Err(Ok(Error::RewardTokenMismatch.into_host()))
    );
    assert_eq!(other.balance(&f.creator), 10 * UNIT);
    assert_eq!(f.client.rewards_pool(&f.project_id).amount, 10 * UNIT);
}

// ─────────────────────────────────────────────────────────
// Claims
// ─────────────────────────────────────────────────────────

#[test]
fn test_withdraw_rewards_before_soft_cap() {
    let f = setup();
    f.client
        .seed_tokens_to_project(&f.project_id, &f.creator, &f.reward.address, &(30 * UNIT));
    f.client.grant_funds(&f.project_id, &f.user2, &(10 * UNIT));
    f.client.grant_funds(&f.project_id, &f.user3, &(5 * UNIT));

    assert_eq!(f.client.projects(&f.project_id).unwrap().current_raised, 15 * UNIT);
    assert_eq!(
        f.client.try_withdraw_rewards(&f.project_id, &f.user2),
        Err(Ok(Error::SoftCapNotReached.into_host()))
    );
}

#[test]
fn test_withdraw_rewards_pays_proportional_share() {
    let f = setup();
    f.client
        .seed_tokens_to_project(&f.project_id, &f.creator, &f.reward.address, &(30 * UNIT));
    f.client.grant_funds(&f.project_id, &f.user2, &(10 * UNIT));
    f.client.grant_funds(&f.project_id, &f.user3, &(5 * UNIT));
    f.client.grant_funds(&f.project_id, &f.user3, &(30 * UNIT));

    // 30 * 10 / 45 = 6.6666666 after truncation.
    let paid = f.client.withdraw_rewards(&f.project_id, &f.user2);
    assert_eq!(paid, 66_666_666);
    assert_eq!(f.reward.balance(&f.user2), 66_666_666);
    assert!(f.client.rewards_paid(&f.project_id, &f.user2));

    // The pool amount is a fixed snapshot; payouts are booked separately.
    let pool = f.client.rewards_pool(&f.project_id);
    assert_eq!(pool.amount, 30 * UNIT);
    assert_eq!(pool.distributed, 66_666_666);
    assert_pool_solvent(&pool);
}

#[test]
fn test_withdraw_rewards_only_once() {
    let f = setup();
    f.client
        .seed_tokens_to_project(&f.project_id, &f.creator, &f.reward.address, &(30 * UNIT));
    f.client.grant_funds(&f.project_id, &f.user2, &(10 * UNIT));
    f.client.grant_funds(&f.project_id, &f.user3, &(35 * UNIT));

    f.client.withdraw_rewards(&f.project_id, &f.user2);
    let balance = f.reward.balance(&f.user2);

    assert_eq!(
        f.client.try_withdraw_rewards(&f.project_id, &f.user2),
        Err(Ok(Error::AlreadyPaid.into_host()))
    );
    assert_eq!(f.reward.balance(&f.user2), balance);
}

#[test]
fn test_withdraw_rewards_not_eligible() {
    let f = setup();
    f.client.grant_funds(&f.project_id, &f.user3, &(35 * UNIT));

    assert_eq!(
        f.client.try_withdraw_rewards(&10, &f.user2),
        Err(Ok(Error::NotEligible.into_host()))
    );
    assert_eq!(
        f.client.try_withdraw_rewards(&f.project_id, &f.user2),
        Err(Ok(Error::NotEligible.into_host()))
    );
}

#[test]
fn test_withdraw_rewards_without_pool_keeps_claim() {
    let f = setup();
    f.client.grant_funds(&f.project_id, &f.user2, &(35 * UNIT));

    assert_eq!(
        f.client.try_withdraw_rewards(&f.project_id, &f.user2),
        Err(Ok(Error::NothingToClaim.into_host()))
    );
    assert!(!f.client.rewards_paid(&f.project_id, &f.user2));

    // Seeding later still lets the contributor claim.
    f.client
        .seed_tokens_to_project(&f.project_id, &f.creator, &f.reward.address, &(7 * UNIT));
    assert_eq!(f.client.withdraw_rewards(&f.project_id, &f.user2), 7 * UNIT);
}

#[test]
fn test_late_grants_dilute_later_claims_only() {
    let f = setup();
    let user4 = Address::generate(&f.env);
    mint(&f.env, &f.token, &user4, 100 * UNIT);

    f.client
        .seed_tokens_to_project(&f.project_id, &f.creator, &f.reward.address, &(100 * UNIT));
    f.client.grant_funds(&f.project_id, &f.user2, &(20 * UNIT));
    f.client.grant_funds(&f.project_id, &f.user3, &(10 * UNIT));

    // Raised 30: user2 takes 100 * 20 / 30.
    let first = f.client.withdraw_rewards(&f.project_id, &f.user2);
    assert_eq!(first, 666_666_666);

    // Raised 60: user3 now takes 100 * 10 / 60.
    f.client.grant_funds(&f.project_id, &user4, &(30 * UNIT));
    let second = f.client.withdraw_rewards(&f.project_id, &f.user3);
    assert_eq!(second, 166_666_666);

    // user4's recomputed share (50) exceeds what is left, so it is capped.
    let third = f.client.withdraw_rewards(&f.project_id, &user4);
    assert_eq!(third, 100 * UNIT - first - second);

    // Already-paid user2 is not adjusted.
    assert_eq!(f.reward.balance(&f.user2), first);

    let pool = f.client.rewards_pool(&f.project_id);
    assert_eq!(pool.distributed, pool.amount);
    assert_pool_solvent(&pool);
    assert_eq!(f.reward.balance(&f.client.address), 0);
}

#[test]
fn test_claims_against_fixed_raise_never_exceed_pool() {
    let f = setup();
    let user4 = Address::generate(&f.env);
    mint(&f.env, &f.token, &user4, 100 * UNIT);

    f.client
        .seed_tokens_to_project(&f.project_id, &f.creator, &f.reward.address, &(10 * UNIT));
    f.client.grant_funds(&f.project_id, &f.user2, &(11 * UNIT));
    f.client.grant_funds(&f.project_id, &f.user3, &(13 * UNIT));
    f.client.grant_funds(&f.project_id, &user4, &(17 * UNIT));

    let total: i128 = [&f.user2, &f.user3, &user4]
        .iter()
        .map(|user| f.client.withdraw_rewards(&f.project_id, user))
        .sum();

    assert!(total <= 10 * UNIT);
    // Truncation loses at most one unit per claimant.
    assert!(10 * UNIT - total < 3);
    assert_eq!(f.reward.balance(&f.client.address), 10 * UNIT - total);
}
