//! End-to-end PvE encounter scenarios against the full handle.

use std::sync::Arc;

use arena_core::{
    AccountId, CombatAction, CombatAttributes, CombatPhase, DifficultyTier, OpponentDescriptor,
    OpponentOracle,
};
use arena_runtime::{
    ArenaHandle, AuthContext, EngineError, ErrorKind, InMemoryArena, PlayerAccount,
    StaticAttributeOracle,
};

/// Fixed catalog: a one-shot boss for reward checks and a bulky one for
/// multi-turn flows.
struct TestOpponents;

impl OpponentOracle for TestOpponents {
    fn descriptor(&self, id: &str) -> Option<OpponentDescriptor> {
        match id {
            "dummy" => Some(OpponentDescriptor::new("dummy", "Training Dummy", 5, 10)),
            "bulwark" => Some(OpponentDescriptor::new("bulwark", "Bulwark", 5, 1_000)),
            _ => None,
        }
    }
}

struct Fixture {
    handle: ArenaHandle,
    arena: Arc<InMemoryArena>,
    attributes: Arc<StaticAttributeOracle>,
}

fn fixture() -> Fixture {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("arena_runtime=debug")
        .with_test_writer()
        .try_init();
    let arena = Arc::new(InMemoryArena::new());
    let attributes = Arc::new(StaticAttributeOracle::new());
    let handle = ArenaHandle::builder()
        .repository(arena.clone())
        .attributes(attributes.clone())
        .opponents(Arc::new(TestOpponents))
        .build();
    Fixture {
        handle,
        arena,
        attributes,
    }
}

fn seed_fighter(fixture: &Fixture, account: AccountId) {
    // 550 max HP; enough offense to one-shot the dummy at any roll.
    fixture
        .attributes
        .set(account, CombatAttributes::new(20, 10, 50, 10));
}

#[tokio::test]
async fn anonymous_callers_touch_nothing() {
    let fixture = fixture();
    let err = fixture
        .handle
        .start_encounter(&AuthContext::anonymous(), "dummy", DifficultyTier::Standard)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unauthorized);
}

#[tokio::test]
async fn unknown_opponent_and_missing_attributes_are_not_found() {
    let fixture = fixture();
    let auth = AuthContext::authenticated(AccountId(1));

    // Attributes exist but the opponent does not.
    seed_fighter(&fixture, AccountId(1));
    let err = fixture
        .handle
        .start_encounter(&auth, "nobody", DifficultyTier::Standard)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::OpponentNotFound { .. }));

    // The opponent exists but account 2 has no derived attributes.
    let err = fixture
        .handle
        .start_encounter(
            &AuthContext::authenticated(AccountId(2)),
            "dummy",
            DifficultyTier::Standard,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::AttributesUnavailable { .. }));
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn tier_scales_opponent_hp() {
    let fixture = fixture();
    for (account, tier, expected_hp) in [
        (AccountId(1), DifficultyTier::Standard, 1_000),
        (AccountId(2), DifficultyTier::Elite, 1_500),
        (AccountId(3), DifficultyTier::Casual, 700),
    ] {
        seed_fighter(&fixture, account);
        let view = fixture
            .handle
            .start_encounter(&AuthContext::authenticated(account), "bulwark", tier)
            .await
            .unwrap();
        assert_eq!(view.state.opponent_hp.maximum, expected_hp);
        assert_eq!(view.state.opponent_hp.current, expected_hp);
    }
}

#[tokio::test]
async fn one_live_encounter_per_account() {
    let fixture = fixture();
    let auth = AuthContext::authenticated(AccountId(1));
    seed_fighter(&fixture, AccountId(1));

    fixture
        .handle
        .start_encounter(&auth, "bulwark", DifficultyTier::Standard)
        .await
        .unwrap();
    let err = fixture
        .handle
        .start_encounter(&auth, "dummy", DifficultyTier::Standard)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::SessionAlreadyActive { .. }));
    assert_eq!(err.kind(), ErrorKind::Conflict);
}

#[tokio::test]
async fn action_without_session_is_rejected() {
    let fixture = fixture();
    let err = fixture
        .handle
        .submit_action(&AuthContext::authenticated(AccountId(1)), CombatAction::Attack)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::NoActiveSession { .. }));
    assert_eq!(err.kind(), ErrorKind::InvalidState);
}

#[tokio::test]
async fn victory_grants_the_boss_reward_exactly_once() {
    let fixture = fixture();
    let account = AccountId(1);
    let auth = AuthContext::authenticated(account);
    seed_fighter(&fixture, account);

    fixture
        .handle
        .start_encounter(&auth, "dummy", DifficultyTier::Standard)
        .await
        .unwrap();
    let report = fixture
        .handle
        .submit_action(&auth, CombatAction::Attack)
        .await
        .unwrap();

    assert_eq!(report.state.phase, CombatPhase::Victory);
    assert_eq!(report.state.turn, 1);
    let reward = report.reward.unwrap();
    // Level-5 boss at baseline tier: 5×50 / 5×25.
    assert_eq!(reward.experience, 250);
    assert_eq!(reward.gold, 125);

    use arena_runtime::AccountRepository;
    let wallet = fixture.arena.get_or_create_account(account).unwrap();
    assert_eq!(wallet.experience, 250);
    assert_eq!(wallet.gold, PlayerAccount::STARTING_GOLD + 125);

    // The session is gone; a retry cannot double-grant.
    let err = fixture
        .handle
        .submit_action(&auth, CombatAction::Attack)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::NoActiveSession { .. }));
    let wallet = fixture.arena.get_or_create_account(account).unwrap();
    assert_eq!(wallet.experience, 250);
}

#[tokio::test]
async fn casual_tier_halves_the_reward() {
    let fixture = fixture();
    let auth = AuthContext::authenticated(AccountId(1));
    seed_fighter(&fixture, AccountId(1));

    fixture
        .handle
        .start_encounter(&auth, "dummy", DifficultyTier::Casual)
        .await
        .unwrap();
    let report = fixture
        .handle
        .submit_action(&auth, CombatAction::Attack)
        .await
        .unwrap();
    let reward = report.reward.unwrap();
    assert_eq!(reward.experience, 125);
    assert_eq!(reward.gold, 62);
}

#[tokio::test]
async fn defeat_clears_the_session_without_reward() {
    let fixture = fixture();
    let account = AccountId(1);
    let auth = AuthContext::authenticated(account);
    // A glass fighter: 15 HP against the bulwark's heavy retaliation.
    fixture
        .attributes
        .set(account, CombatAttributes::new(1, 0, 1, 1));

    fixture
        .handle
        .start_encounter(&auth, "bulwark", DifficultyTier::Standard)
        .await
        .unwrap();
    let report = fixture
        .handle
        .submit_action(&auth, CombatAction::Attack)
        .await
        .unwrap();
    assert_eq!(report.state.phase, CombatPhase::Defeat);
    assert!(report.reward.is_none());

    use arena_runtime::AccountRepository;
    let wallet = fixture.arena.get_or_create_account(account).unwrap();
    assert_eq!(wallet.experience, 0);
    assert_eq!(wallet.gold, PlayerAccount::STARTING_GOLD);

    let err = fixture
        .handle
        .submit_action(&auth, CombatAction::Attack)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::NoActiveSession { .. }));
}

#[tokio::test]
async fn flee_costs_gold_and_shortfall_keeps_the_session() {
    let fixture = fixture();
    let account = AccountId(1);
    let auth = AuthContext::authenticated(account);
    seed_fighter(&fixture, account);

    fixture
        .handle
        .start_encounter(&auth, "bulwark", DifficultyTier::Standard)
        .await
        .unwrap();

    // More than the starting balance: rejected, nothing deducted, session
    // intact.
    let err = fixture
        .handle
        .flee(&auth, PlayerAccount::STARTING_GOLD + 1)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InsufficientFunds { .. }));
    assert_eq!(err.kind(), ErrorKind::InsufficientResource);

    use arena_runtime::AccountRepository;
    let wallet = fixture.arena.get_or_create_account(account).unwrap();
    assert_eq!(wallet.gold, PlayerAccount::STARTING_GOLD);
    let report = fixture
        .handle
        .submit_action(&auth, CombatAction::Defend)
        .await
        .unwrap();
    assert_eq!(report.state.turn, 1);

    // An affordable flee pays exactly once and removes the session.
    let flee = fixture.handle.flee(&auth, 50).await.unwrap();
    assert_eq!(flee.cost_paid, 50);
    assert_eq!(flee.remaining_gold, PlayerAccount::STARTING_GOLD - 50);
    let err = fixture
        .handle
        .submit_action(&auth, CombatAction::Attack)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::NoActiveSession { .. }));
}

#[tokio::test(flavor = "multi_thread")]
async fn concurrent_actions_for_one_account_serialize() {
    let fixture = fixture();
    let account = AccountId(1);
    let auth = AuthContext::authenticated(account);
    seed_fighter(&fixture, account);

    fixture
        .handle
        .start_encounter(&auth, "bulwark", DifficultyTier::Elite)
        .await
        .unwrap();

    // Two near-simultaneous defends must observe distinct pre-turn states.
    let first = {
        let handle = fixture.handle.clone();
        tokio::spawn(async move {
            handle
                .submit_action(&AuthContext::authenticated(account), CombatAction::Defend)
                .await
        })
    };
    let second = {
        let handle = fixture.handle.clone();
        tokio::spawn(async move {
            handle
                .submit_action(&AuthContext::authenticated(account), CombatAction::Defend)
                .await
        })
    };
    let first = first.await.unwrap().unwrap();
    let second = second.await.unwrap().unwrap();

    let turns = [first.state.turn, second.state.turn];
    assert!(turns.contains(&1) && turns.contains(&2), "turns: {turns:?}");
}
