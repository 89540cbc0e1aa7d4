use chrono::{DateTime, Duration, Utc};

use crate::engine::registration::participate;
use crate::error::ArenaError;
use crate::models::{Player, PlayerId, Tournament, TournamentId};
use crate::store::{EntityStore, MemoryStore};
use crate::testing::ManualClock;

fn fixture(players: usize) -> (MemoryStore, TournamentId, Vec<PlayerId>, DateTime<Utc>) {
    let store = MemoryStore::new();
    let epoch = ManualClock::epoch();
    let mut txn = store.begin();
    let tournament = Tournament::new(epoch + Duration::minutes(5), epoch + Duration::hours(2));
    let tid = tournament.id;
    txn.put_tournament(tournament);

    let mut ids = Vec::new();
    for i in 0..players {
        let player = Player::new(format!("p{i}"), 100, 0, 1000);
        ids.push(player.id);
        txn.put_player(player);
    }
    txn.commit().unwrap();
    (store, tid, ids, epoch)
}

#[test]
fn registration_before_start_succeeds() {
    let (store, tid, ids, now) = fixture(2);

    let mut txn = store.begin();
    participate(txn.as_mut(), now, 200, tid, ids[0]).unwrap();
    participate(txn.as_mut(), now, 200, tid, ids[1]).unwrap();
    txn.commit().unwrap();

    let mut txn = store.begin();
    assert_eq!(txn.tournament(tid).unwrap().participants, ids);
}

#[test]
fn registration_closes_when_the_tournament_begins() {
    let (store, tid, ids, now) = fixture(1);

    let mut txn = store.begin();
    assert_eq!(
        participate(txn.as_mut(), now + Duration::minutes(5), 200, tid, ids[0]),
        Err(ArenaError::TournamentAlreadyStarted)
    );
    assert_eq!(
        participate(txn.as_mut(), now + Duration::hours(3), 200, tid, ids[0]),
        Err(ArenaError::TournamentEnded)
    );
}

#[test]
fn roster_capacity_is_enforced() {
    let (store, tid, ids, now) = fixture(3);

    let mut txn = store.begin();
    participate(txn.as_mut(), now, 2, tid, ids[0]).unwrap();
    participate(txn.as_mut(), now, 2, tid, ids[1]).unwrap();
    assert_eq!(
        participate(txn.as_mut(), now, 2, tid, ids[2]),
        Err(ArenaError::CapacityExceeded)
    );
}

#[test]
fn double_registration_is_rejected() {
    let (store, tid, ids, now) = fixture(1);

    let mut txn = store.begin();
    participate(txn.as_mut(), now, 200, tid, ids[0]).unwrap();
    assert_eq!(
        participate(txn.as_mut(), now, 200, tid, ids[0]),
        Err(ArenaError::AlreadyRegistered)
    );
}

#[test]
fn unknown_ids_report_not_found() {
    let (store, tid, _, now) = fixture(0);
    let ghost = PlayerId::new();
    let ghost_tournament = TournamentId::new();

    let mut txn = store.begin();
    assert_eq!(
        participate(txn.as_mut(), now, 200, tid, ghost),
        Err(ArenaError::PlayerNotFound(ghost))
    );
    assert_eq!(
        participate(txn.as_mut(), now, 200, ghost_tournament, ghost),
        Err(ArenaError::TournamentNotFound(ghost_tournament))
    );
}
