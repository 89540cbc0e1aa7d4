use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::{PlayerId, TournamentId};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct AttackId(Uuid);

impl AttackId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for AttackId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AttackId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One directed attack. Immutable once committed; the store enforces that
/// `(tournament, attacker, defender)` never repeats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attack {
    pub id: AttackId,
    pub tournament: TournamentId,
    pub attacker: PlayerId,
    pub defender: PlayerId,
}

impl Attack {
    pub fn new(tournament: TournamentId, attacker: PlayerId, defender: PlayerId) -> Self {
        Self {
            id: AttackId::new(),
            tournament,
            attacker,
            defender,
        }
    }

    /// The uniqueness key.
    pub fn pair(&self) -> (TournamentId, PlayerId, PlayerId) {
        (self.tournament, self.attacker, self.defender)
    }
}
