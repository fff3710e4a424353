//! Duel state machine scenarios: creation, acceptance, progress, and the
//! four win conditions.

use std::sync::Arc;

use arena_core::{
    AccountId, ActivityKind, CombatAttributes, DuelStatus, DuelVariant, EngineConfig,
    ProgressDelta,
};
use arena_runtime::{
    AccountRepository, ArenaHandle, AuthContext, ChallengeParams, EngineError, ErrorKind,
    InMemoryArena, PlayerAccount, StaticAttributeOracle,
};

const ALICE: AccountId = AccountId(1);
const BOB: AccountId = AccountId(2);
const CARA: AccountId = AccountId(3);

struct Fixture {
    handle: ArenaHandle,
    arena: Arc<InMemoryArena>,
}

fn fixture() -> Fixture {
    let arena = Arc::new(InMemoryArena::new());
    let attributes = Arc::new(StaticAttributeOracle::new());
    attributes.set(ALICE, CombatAttributes::new(30, 10, 40, 8));
    attributes.set(BOB, CombatAttributes::new(10, 5, 12, 3));
    attributes.set(CARA, CombatAttributes::new(20, 10, 30, 6));
    let handle = ArenaHandle::builder()
        .repository(arena.clone())
        .attributes(attributes)
        .build();
    Fixture { handle, arena }
}

fn auth(account: AccountId) -> AuthContext {
    AuthContext::authenticated(account)
}

fn distance_race(target: u64) -> ChallengeParams {
    ChallengeParams {
        variant: DuelVariant::DistanceRace,
        activity_filter: None,
        target: Some(target),
    }
}

fn ride(distance_m: u64, duration_s: u64) -> ProgressDelta {
    ProgressDelta {
        distance_m,
        duration_s,
        elevation_m: 0,
    }
}

#[test]
fn challenge_creation_guards() {
    let fixture = fixture();

    let err = fixture
        .handle
        .create_challenge(&auth(ALICE), ALICE, distance_race(10_000))
        .unwrap_err();
    assert!(matches!(err, EngineError::SelfChallenge { .. }));
    assert_eq!(err.kind(), ErrorKind::Conflict);

    let duel = fixture
        .handle
        .create_challenge(&auth(ALICE), BOB, distance_race(10_000))
        .unwrap();
    assert_eq!(duel.status, DuelStatus::Pending);

    // A second unresolved challenge between the pair is refused, in either
    // seat order.
    let err = fixture
        .handle
        .create_challenge(&auth(ALICE), BOB, distance_race(5_000))
        .unwrap_err();
    assert!(matches!(err, EngineError::DuplicateChallenge { .. }));
    let err = fixture
        .handle
        .create_challenge(&auth(BOB), ALICE, distance_race(5_000))
        .unwrap_err();
    assert!(matches!(err, EngineError::DuplicateChallenge { .. }));

    // Other pairs are unaffected.
    fixture
        .handle
        .create_challenge(&auth(ALICE), CARA, distance_race(10_000))
        .unwrap();
}

#[test]
fn acceptance_sets_the_seven_day_window() {
    let fixture = fixture();
    let duel = fixture
        .handle
        .create_challenge(&auth(ALICE), BOB, distance_race(10_000))
        .unwrap();

    // Only the defender may act on a pending challenge.
    let err = fixture
        .handle
        .accept_challenge(&auth(ALICE), duel.id)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    let err = fixture
        .handle
        .accept_challenge(&auth(CARA), duel.id)
        .unwrap_err();
    assert!(matches!(err, EngineError::NotAParticipant { .. }));

    let active = fixture.handle.accept_challenge(&auth(BOB), duel.id).unwrap();
    assert_eq!(active.status, DuelStatus::Active);
    let accepted_at = active.accepted_at.unwrap();
    assert_eq!(
        active.ends_at.unwrap(),
        accepted_at.plus_days(EngineConfig::DUEL_WINDOW_DAYS)
    );

    // Accepting twice is an invalid transition.
    let err = fixture
        .handle
        .accept_challenge(&auth(BOB), duel.id)
        .unwrap_err();
    assert!(matches!(err, EngineError::DuelNotPending { .. }));
    assert_eq!(err.kind(), ErrorKind::InvalidState);
}

#[test]
fn declined_challenges_are_terminal_and_unrewarded() {
    let fixture = fixture();
    let duel = fixture
        .handle
        .create_challenge(&auth(ALICE), BOB, distance_race(10_000))
        .unwrap();
    let declined = fixture
        .handle
        .decline_challenge(&auth(BOB), duel.id)
        .unwrap();
    assert_eq!(declined.status, DuelStatus::Declined);

    let err = fixture
        .handle
        .report_progress(&auth(ALICE), duel.id, None, ride(1_000, 300))
        .unwrap_err();
    assert!(matches!(err, EngineError::DuelNotActive { .. }));

    let wallet = fixture.arena.get_or_create_account(ALICE).unwrap();
    assert_eq!(wallet.gold, PlayerAccount::STARTING_GOLD);

    // The pair is free to duel again.
    fixture
        .handle
        .create_challenge(&auth(ALICE), BOB, distance_race(10_000))
        .unwrap();
}

#[test]
fn progress_requires_an_active_duel_and_a_participant() {
    let fixture = fixture();
    let duel = fixture
        .handle
        .create_challenge(&auth(ALICE), BOB, distance_race(10_000))
        .unwrap();

    let err = fixture
        .handle
        .report_progress(&auth(ALICE), duel.id, None, ride(1_000, 300))
        .unwrap_err();
    assert!(matches!(err, EngineError::DuelNotActive { .. }));

    fixture.handle.accept_challenge(&auth(BOB), duel.id).unwrap();

    let err = fixture
        .handle
        .report_progress(&auth(CARA), duel.id, None, ride(1_000, 300))
        .unwrap_err();
    assert!(matches!(err, EngineError::NotAParticipant { .. }));

    let err = fixture
        .handle
        .report_progress(&auth(ALICE), duel.id, None, ProgressDelta::default())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);

    let err = fixture
        .handle
        .report_progress(
            &auth(ALICE),
            duel.id,
            None,
            ride(EngineConfig::MAX_DISTANCE_DELTA_M + 1, 60),
        )
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
}

#[test]
fn distance_race_resolves_exactly_at_target() {
    let fixture = fixture();
    let duel = fixture
        .handle
        .create_challenge(&auth(ALICE), BOB, distance_race(10_000))
        .unwrap();
    fixture.handle.accept_challenge(&auth(BOB), duel.id).unwrap();

    // 9.99 km does not trigger resolution.
    let report = fixture
        .handle
        .report_progress(&auth(ALICE), duel.id, None, ride(9_990, 1_800))
        .unwrap();
    assert!(!report.resolved);
    assert_eq!(report.duel.status, DuelStatus::Active);

    // The final ten metres land exactly on the target.
    let report = fixture
        .handle
        .report_progress(&auth(ALICE), duel.id, None, ride(10, 5))
        .unwrap();
    assert!(report.resolved);
    assert_eq!(report.duel.status, DuelStatus::Completed);
    assert_eq!(report.duel.winner, Some(ALICE));
    assert!(report.duel.completed_at.is_some());

    // Both sides were rewarded in the same step; equal fresh ratings mean
    // the base amounts.
    let winner = fixture.arena.get_or_create_account(ALICE).unwrap();
    let loser = fixture.arena.get_or_create_account(BOB).unwrap();
    assert_eq!(winner.experience, 100);
    assert_eq!(winner.gold, PlayerAccount::STARTING_GOLD + 50);
    assert_eq!(winner.crystals, 5);
    assert_eq!(loser.experience, 25);
    assert_eq!(loser.gold, PlayerAccount::STARTING_GOLD + 10);
    assert_eq!(loser.crystals, 0);

    // A completed duel accepts no further progress.
    let err = fixture
        .handle
        .report_progress(&auth(BOB), duel.id, None, ride(10_000, 1_700))
        .unwrap_err();
    assert!(matches!(err, EngineError::DuelNotActive { .. }));
}

#[test]
fn speed_demon_waits_for_both_and_ranks_by_duration() {
    let fixture = fixture();
    let duel = fixture
        .handle
        .create_challenge(
            &auth(ALICE),
            BOB,
            ChallengeParams {
                variant: DuelVariant::SpeedDemon,
                activity_filter: None,
                target: Some(5_000),
            },
        )
        .unwrap();
    fixture.handle.accept_challenge(&auth(BOB), duel.id).unwrap();

    // Alice finishes first with the slower time; no winner yet.
    let report = fixture
        .handle
        .report_progress(&auth(ALICE), duel.id, None, ride(5_000, 1_800))
        .unwrap();
    assert!(!report.resolved);
    assert!(report.duel.challenger_progress.finish.is_some());

    // A finished side can keep logging without disturbing its snapshot.
    let report = fixture
        .handle
        .report_progress(&auth(ALICE), duel.id, None, ride(2_000, 600))
        .unwrap();
    assert!(!report.resolved);
    assert_eq!(
        report
            .duel
            .challenger_progress
            .finish
            .unwrap()
            .duration_s,
        1_800
    );

    // Bob reaches the target with the faster accumulated time and wins.
    let report = fixture
        .handle
        .report_progress(&auth(BOB), duel.id, None, ride(5_000, 1_500))
        .unwrap();
    assert!(report.resolved);
    assert_eq!(report.duel.winner, Some(BOB));
}

#[test]
fn elevation_grind_defaults_to_a_thousand_metres() {
    let fixture = fixture();
    let duel = fixture
        .handle
        .create_challenge(
            &auth(ALICE),
            BOB,
            ChallengeParams {
                variant: DuelVariant::ElevationGrind,
                activity_filter: None,
                target: None,
            },
        )
        .unwrap();
    fixture.handle.accept_challenge(&auth(BOB), duel.id).unwrap();

    let climb = |elevation_m| ProgressDelta {
        distance_m: 2_000,
        duration_s: 1_200,
        elevation_m,
    };
    let report = fixture
        .handle
        .report_progress(&auth(BOB), duel.id, None, climb(999))
        .unwrap();
    assert!(!report.resolved);
    let report = fixture
        .handle
        .report_progress(&auth(BOB), duel.id, None, climb(1))
        .unwrap();
    assert!(report.resolved);
    assert_eq!(report.duel.winner, Some(BOB));
}

#[test]
fn activity_filter_rejects_other_workouts() {
    let fixture = fixture();
    let duel = fixture
        .handle
        .create_challenge(
            &auth(ALICE),
            BOB,
            ChallengeParams {
                variant: DuelVariant::DistanceRace,
                activity_filter: Some(ActivityKind::Run),
                target: Some(10_000),
            },
        )
        .unwrap();
    fixture.handle.accept_challenge(&auth(BOB), duel.id).unwrap();

    for wrong in [None, Some(ActivityKind::Ride)] {
        let err = fixture
            .handle
            .report_progress(&auth(ALICE), duel.id, wrong, ride(1_000, 300))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    let report = fixture
        .handle
        .report_progress(&auth(ALICE), duel.id, Some(ActivityKind::Run), ride(1_000, 300))
        .unwrap();
    assert_eq!(report.duel.challenger_progress.distance_m, 1_000);
}

#[test]
fn titan_duel_resolves_through_attacks() {
    let fixture = fixture();
    let duel = fixture
        .handle
        .create_challenge(
            &auth(ALICE),
            BOB,
            ChallengeParams {
                variant: DuelVariant::TitanVsTitan,
                activity_filter: None,
                target: None,
            },
        )
        .unwrap();

    // Workout progress has no meaning here.
    let active = fixture.handle.accept_challenge(&auth(BOB), duel.id).unwrap();
    // Titan HP seeded from each side's attributes at acceptance.
    assert_eq!(active.challenger_progress.titan_hp, 40 * 10 + 8 * 5);
    assert_eq!(active.defender_progress.titan_hp, 12 * 10 + 3 * 5);
    let err = fixture
        .handle
        .report_progress(&auth(ALICE), duel.id, None, ride(1_000, 300))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);

    // Alice out-damages Bob by a wide margin and breaks through first.
    let mut resolved = None;
    for _ in 0..100 {
        let report = fixture.handle.record_attack(&auth(ALICE), duel.id).unwrap();
        if report.resolved {
            resolved = Some(report);
            break;
        }
        let report = fixture.handle.record_attack(&auth(BOB), duel.id).unwrap();
        if report.resolved {
            resolved = Some(report);
            break;
        }
    }
    let report = resolved.expect("the exchange must resolve");
    assert_eq!(report.duel.status, DuelStatus::Completed);
    assert_eq!(report.duel.winner, Some(ALICE));
    assert!(
        report.duel.challenger_progress.combat_score
            >= report.duel.defender_progress.titan_hp
    );

    let err = fixture.handle.record_attack(&auth(BOB), duel.id).unwrap_err();
    assert!(matches!(err, EngineError::DuelNotActive { .. }));
}

#[tokio::test(flavor = "multi_thread")]
async fn concurrent_reports_accumulate_commutatively() {
    let fixture = fixture();
    let duel = fixture
        .handle
        .create_challenge(&auth(ALICE), BOB, distance_race(1_000_000))
        .unwrap();
    fixture.handle.accept_challenge(&auth(BOB), duel.id).unwrap();

    let mut tasks = Vec::new();
    for (distance_m, duration_s) in [(4_000, 1_200), (6_000, 1_500)] {
        let handle = fixture.handle.clone();
        let id = duel.id;
        tasks.push(tokio::spawn(async move {
            handle.report_progress(
                &AuthContext::authenticated(ALICE),
                id,
                None,
                ride(distance_m, duration_s),
            )
        }));
    }
    for task in tasks {
        task.await.unwrap().unwrap();
    }

    let duel = fixture.handle.duel(&auth(ALICE), duel.id).unwrap();
    assert_eq!(duel.challenger_progress.distance_m, 10_000);
    assert_eq!(duel.challenger_progress.duration_s, 2_700);
}
