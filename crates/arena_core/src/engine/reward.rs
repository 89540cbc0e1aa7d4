//! Reward payout: runs once per tournament, at its end time.

use tracing::info;

use crate::error::Result;
use crate::models::{Player, TournamentId};
use crate::store::StoreTxn;

/// Pay the reward ladder to each group's top medal ranks.
///
/// Members are ranked by medals descending (ties broken by player id
/// ascending); rank N receives `ladder[N]` money and ranks past the ladder
/// receive nothing. Groups shorter than the ladder pay as many steps as they
/// have members. Re-running pays again: the service's lifecycle ledger is
/// what keeps this at-most-once.
pub fn pay_rewards(
    txn: &mut dyn StoreTxn,
    tournament_id: TournamentId,
    ladder: &[i64],
) -> Result<()> {
    let tournament = txn.tournament(tournament_id)?;
    let mut paid = 0usize;
    for group_id in &tournament.groups {
        let group = txn.group(*group_id)?;
        let mut members = group
            .members
            .iter()
            .map(|id| txn.player(*id))
            .collect::<Result<Vec<Player>>>()?;
        members.sort_by(|a, b| b.medals.cmp(&a.medals).then(a.id.cmp(&b.id)));

        for (mut winner, bonus) in members.into_iter().zip(ladder.iter()) {
            winner.money += *bonus;
            txn.put_player(winner);
            paid += 1;
        }
    }
    info!(tournament = %tournament_id, winners = paid, "rewards paid");
    Ok(())
}
