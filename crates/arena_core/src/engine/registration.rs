//! Tournament registration, the only mutator of the participant roster.

use chrono::{DateTime, Utc};

use crate::error::{ArenaError, Result};
use crate::models::{Phase, PlayerId, TournamentId};
use crate::store::StoreTxn;

/// Add a player to a tournament that has not started yet.
///
/// Once group formation runs at the start time the roster it saw is frozen;
/// the phase check here is what closes the window.
pub fn participate(
    txn: &mut dyn StoreTxn,
    now: DateTime<Utc>,
    max_players: usize,
    tournament_id: TournamentId,
    player_id: PlayerId,
) -> Result<()> {
    let mut tournament = txn.tournament(tournament_id)?;
    match tournament.phase_at(now) {
        Phase::Closed => return Err(ArenaError::TournamentEnded),
        Phase::Running => return Err(ArenaError::TournamentAlreadyStarted),
        Phase::Pending => {}
    }

    let player = txn.player(player_id)?;
    if tournament.participants.len() >= max_players {
        return Err(ArenaError::CapacityExceeded);
    }
    if tournament.participants.contains(&player.id) {
        return Err(ArenaError::AlreadyRegistered);
    }

    tournament.participants.push(player.id);
    txn.put_tournament(tournament);
    Ok(())
}
