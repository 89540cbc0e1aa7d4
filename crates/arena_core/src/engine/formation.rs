//! Group formation: runs once per tournament, at its start time.

use tracing::info;

use crate::error::{ArenaError, Result};
use crate::models::{Group, GroupId, Player, TournamentId};
use crate::store::StoreTxn;

/// Partition the tournament roster into groups of at most `group_size`.
///
/// Participants are ordered by power descending (ties broken by player id
/// ascending) and chunked in order, so the first group holds the strongest
/// block. Zero participants yield zero groups. The roster is frozen from
/// here on; groups are never recomputed.
pub fn form_groups(
    txn: &mut dyn StoreTxn,
    tournament_id: TournamentId,
    group_size: usize,
) -> Result<Vec<GroupId>> {
    if group_size == 0 {
        return Err(ArenaError::Validation("group size must be positive".into()));
    }

    let mut tournament = txn.tournament(tournament_id)?;
    let mut roster = tournament
        .participants
        .iter()
        .map(|id| txn.player(*id))
        .collect::<Result<Vec<Player>>>()?;
    roster.sort_by(|a, b| b.power.cmp(&a.power).then(a.id.cmp(&b.id)));

    let mut group_ids = Vec::with_capacity(roster.len().div_ceil(group_size));
    for block in roster.chunks(group_size) {
        let group = Group::new(tournament_id, block.iter().map(|p| p.id).collect());
        group_ids.push(group.id);
        txn.put_group(group);
    }

    info!(
        tournament = %tournament_id,
        participants = roster.len(),
        groups = group_ids.len(),
        "roster partitioned into groups"
    );
    tournament.groups = group_ids.clone();
    txn.put_tournament(tournament);
    Ok(group_ids)
}
