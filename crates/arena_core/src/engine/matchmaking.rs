//! Opponent selection within the requester's group.

use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;

use crate::error::{ArenaError, Result};
use crate::models::{PlayerId, TournamentId};
use crate::store::StoreTxn;

/// Draw one opponent uniformly at random from the eligible set.
///
/// Eligible means: a member of the requester's group, not the requester, and
/// not yet a target of the requester in this tournament. The eligible set is
/// recomputed from all committed attacks on every call, so `Err(NoEligibleOpponent)`
/// is the caller's signal to stop attacking with this player.
pub fn pick_opponent<R: Rng + ?Sized>(
    txn: &mut dyn StoreTxn,
    tournament_id: TournamentId,
    player_id: PlayerId,
    rng: &mut R,
) -> Result<PlayerId> {
    let tournament = txn.tournament(tournament_id)?;
    let player = txn.player(player_id)?;

    let mut home = None;
    for group_id in &tournament.groups {
        let group = txn.group(*group_id)?;
        if group.members.contains(&player.id) {
            home = Some(group);
            break;
        }
    }
    // Not grouped (never registered, or formation has not run): nothing to fight.
    let Some(group) = home else {
        return Err(ArenaError::NoEligibleOpponent);
    };

    let already_hit: HashSet<PlayerId> = txn
        .attacked_defenders(tournament_id, player_id)
        .into_iter()
        .collect();
    let eligible: Vec<PlayerId> = group
        .members
        .iter()
        .copied()
        .filter(|id| *id != player_id && !already_hit.contains(id))
        .collect();

    eligible
        .choose(rng)
        .copied()
        .ok_or(ArenaError::NoEligibleOpponent)
}
