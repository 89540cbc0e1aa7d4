//! The attack transaction: the one write path for medals during a
//! tournament.

use chrono::Duration;
use rand::Rng;
use tracing::debug;

use crate::clock::Clock;
use crate::config::ArenaConfig;
use crate::cooldown::CooldownStore;
use crate::error::{ArenaError, Result};
use crate::models::{Attack, AttackId, Phase, PlayerId, TournamentId};
use crate::store::EntityStore;

/// Outcome of a committed attack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttackReport {
    pub attack_id: AttackId,
    /// Medal delta credited to the attacker and debited from the defender.
    pub score: i64,
}

/// Validate and apply one attack.
///
/// Validation order is fixed: self-attack, tournament open, players exist,
/// cooldown, duplicate pair. The first failure is reported and nothing is
/// written. The effect (zero-sum medal swap plus the attack record) commits
/// atomically under optimistic version checks; a lost race surfaces
/// [`ArenaError::ConcurrentModification`] with no partial write, and the
/// caller resubmits.
///
/// The attacker's cooldown is armed only after a successful commit and
/// outside the transaction boundary. Losing that write costs one rate-limit
/// window, never pair uniqueness.
#[allow(clippy::too_many_arguments)]
pub fn execute<R: Rng + ?Sized>(
    store: &dyn EntityStore,
    cooldowns: &dyn CooldownStore,
    clock: &dyn Clock,
    config: &ArenaConfig,
    rng: &mut R,
    tournament_id: TournamentId,
    attacker_id: PlayerId,
    defender_id: PlayerId,
) -> Result<AttackReport> {
    if attacker_id == defender_id {
        return Err(ArenaError::SelfAttack);
    }

    let mut txn = store.begin();
    let tournament = txn.tournament(tournament_id)?;
    let now = clock.now();
    match tournament.phase_at(now) {
        Phase::Pending => return Err(ArenaError::TournamentNotStarted),
        Phase::Closed => return Err(ArenaError::TournamentEnded),
        Phase::Running => {}
    }

    let mut attacker = txn.player(attacker_id)?;
    let mut defender = txn.player(defender_id)?;

    if cooldowns.is_active(tournament_id, attacker_id, now) {
        return Err(ArenaError::RateLimited);
    }
    if txn.attack_exists(tournament_id, attacker_id, defender_id) {
        return Err(ArenaError::DuplicateAttack);
    }

    let score = rng.gen_range(config.score_min..=config.score_max);
    attacker.medals += score;
    defender.medals -= score;
    let attack = Attack::new(tournament_id, attacker_id, defender_id);
    let attack_id = attack.id;

    txn.put_player(attacker);
    txn.put_player(defender);
    txn.put_attack(attack);
    txn.commit()?;

    cooldowns.arm(
        tournament_id,
        attacker_id,
        now + Duration::seconds(config.cooldown_secs),
    );
    debug!(
        tournament = %tournament_id,
        attacker = %attacker_id,
        defender = %defender_id,
        score,
        "attack committed"
    );
    Ok(AttackReport { attack_id, score })
}
