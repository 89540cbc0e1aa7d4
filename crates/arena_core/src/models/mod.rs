//! Entity model: players, tournaments, groups, attacks.
//!
//! Players and tournaments are created once and never deleted. Groups are
//! created exactly once per tournament, at its start time, and are immutable
//! afterwards. An attack, once committed, is a permanent fact: the triple
//! (tournament, attacker, defender) is unique for all time.

mod attack;
mod group;
mod player;
mod tournament;

pub use attack::{Attack, AttackId};
pub use group::{Group, GroupId};
pub use player::{Player, PlayerId, MAX_POWER, MIN_POWER};
pub use tournament::{Phase, Tournament, TournamentId};
