//! End-to-end tournament flow: registration, formation, combat, payout.

use chrono::Duration;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;

use arena_core::testing::{ManualClock, RecordingScheduler};
use arena_core::{
    ArenaConfig, ArenaError, ArenaService, Clock, CreatePlayerRequest, CreateTournamentRequest,
    MemoryCooldown, MemoryStore, PlayerId, TournamentId,
};

struct Arena {
    service: Arc<ArenaService>,
    clock: Arc<ManualClock>,
    scheduler: Arc<RecordingScheduler>,
}

fn arena(config: ArenaConfig) -> Arena {
    let clock = Arc::new(ManualClock::at(ManualClock::epoch()));
    let scheduler = Arc::new(RecordingScheduler::new());
    let service = Arc::new(ArenaService::with_rng(
        Arc::new(MemoryStore::new()),
        Arc::new(MemoryCooldown::new()),
        scheduler.clone(),
        clock.clone(),
        config,
        StdRng::seed_from_u64(1),
    ));
    Arena { service, clock, scheduler }
}

/// Five players with powers 10..50 registered into a two-hour tournament
/// starting five minutes from the epoch.
fn five_player_tournament(arena: &Arena) -> (TournamentId, Vec<PlayerId>) {
    let start = ManualClock::epoch() + Duration::minutes(5);
    let tid = arena
        .service
        .create_tournament(CreateTournamentRequest {
            start_at: start,
            end_at: start + Duration::hours(2),
        })
        .unwrap();

    let mut players = Vec::new();
    for power in [10, 20, 30, 40, 50] {
        let id = arena
            .service
            .create_player(CreatePlayerRequest::new(format!("power{power}"), power))
            .unwrap();
        arena.service.participate(tid, id).unwrap();
        players.push(id);
    }
    (tid, players)
}

fn run_due_jobs(arena: &Arena) {
    for (job, at) in arena.scheduler.scheduled() {
        if at <= arena.clock.now() {
            arena.service.run_lifecycle_job(job).unwrap();
        }
    }
}

#[test]
fn full_tournament_lifecycle() {
    let arena = arena(ArenaConfig {
        group_size: 3,
        ..Default::default()
    });
    let (tid, players) = five_player_tournament(&arena);
    let [p10, p20, p30, p40, p50] =
        [players[0], players[1], players[2], players[3], players[4]];

    // Nothing to fight before the start time.
    assert_eq!(
        arena.service.attack(tid, p50, p40),
        Err(ArenaError::TournamentNotStarted)
    );
    assert!(arena.service.standings(tid).unwrap().is_empty());

    // Start time: formation fires, splitting by descending power.
    arena.clock.set(ManualClock::epoch() + Duration::minutes(5));
    run_due_jobs(&arena);

    let standings = arena.service.standings(tid).unwrap();
    assert_eq!(standings.len(), 2);
    let mut group_powers: Vec<Vec<u32>> = standings
        .values()
        .map(|g| g.iter().map(|p| p.power).collect())
        .collect();
    group_powers.sort_by_key(|g| std::cmp::Reverse(g.len()));
    assert_eq!(
        {
            let mut top = group_powers[0].clone();
            top.sort_unstable();
            top
        },
        vec![30, 40, 50]
    );
    assert_eq!(
        {
            let mut bottom = group_powers[1].clone();
            bottom.sort_unstable();
            bottom
        },
        vec![10, 20]
    );

    // Registration is closed once running.
    let latecomer = arena
        .service
        .create_player(CreatePlayerRequest::new("late", 1))
        .unwrap();
    assert_eq!(
        arena.service.participate(tid, latecomer),
        Err(ArenaError::TournamentAlreadyStarted)
    );

    // Cross-group combat is matched away: 50 only ever draws 40 or 30.
    for _ in 0..20 {
        let opponent = arena.service.opponent(tid, p50).unwrap();
        assert!(opponent == p40 || opponent == p30);
    }

    // First attack lands; the same pair is frozen then duplicate-blocked.
    let report = arena.service.attack(tid, p50, p40).unwrap();
    assert_eq!(arena.service.player(p50).unwrap().medals, report.score);
    assert_eq!(arena.service.player(p40).unwrap().medals, -report.score);
    assert_eq!(
        arena.service.attack(tid, p50, p40),
        Err(ArenaError::RateLimited)
    );
    // The cooldown is per-attacker: the counter-attack is free to land now.
    arena.service.attack(tid, p40, p50).unwrap();
    arena.clock.advance(Duration::seconds(5));
    assert_eq!(
        arena.service.attack(tid, p50, p40),
        Err(ArenaError::DuplicateAttack)
    );

    // 50 exhausts its group: one more legal target, then no opponent at all.
    arena.service.attack(tid, p50, p30).unwrap();
    assert_eq!(
        arena.service.opponent(tid, p50),
        Err(ArenaError::NoEligibleOpponent)
    );

    // Close the window: combat rejected, payout fires.
    arena.clock.set(ManualClock::epoch() + Duration::hours(3));
    assert_eq!(
        arena.service.attack(tid, p20, p10),
        Err(ArenaError::TournamentEnded)
    );
    run_due_jobs(&arena);

    let standings = arena.service.standings(tid).unwrap();
    for group in standings.values() {
        // Ranked by final medals; everyone in these small groups is paid.
        let ladder = [300, 200, 100];
        for (rank, player) in group.iter().enumerate() {
            assert_eq!(player.money, 1000 + ladder[rank]);
            if rank > 0 {
                assert!(group[rank - 1].medals >= player.medals);
            }
        }
    }

    // Redelivered payout jobs are ignored: nobody is paid twice.
    run_due_jobs(&arena);
    let after = arena.service.standings(tid).unwrap();
    assert_eq!(after, standings);
}

#[test]
fn double_payout_hazard_without_the_ledger() {
    // Calling the unguarded engine entry twice really does double-pay; the
    // ledger in run_lifecycle_job is the only protection.
    let arena = arena(ArenaConfig {
        group_size: 2,
        ..Default::default()
    });
    let start = ManualClock::epoch() + Duration::minutes(1);
    let tid = arena
        .service
        .create_tournament(CreateTournamentRequest {
            start_at: start,
            end_at: start + Duration::hours(1),
        })
        .unwrap();
    let a = arena
        .service
        .create_player(CreatePlayerRequest::new("a", 10))
        .unwrap();
    let b = arena
        .service
        .create_player(CreatePlayerRequest::new("b", 20))
        .unwrap();
    arena.service.participate(tid, a).unwrap();
    arena.service.participate(tid, b).unwrap();

    arena.clock.set(start);
    arena.service.form_groups(tid).unwrap();

    arena.clock.set(start + Duration::hours(2));
    arena.service.pay_rewards(tid).unwrap();
    arena.service.pay_rewards(tid).unwrap();

    let standings = arena.service.standings(tid).unwrap();
    let group = standings.values().next().unwrap();
    let total: i64 = group.iter().map(|p| p.money).sum();
    assert_eq!(total, 2000 + 2 * 500);
}
