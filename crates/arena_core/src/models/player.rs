use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Inclusive bounds for a player's power rating.
pub const MIN_POWER: u32 = 1;
pub const MAX_POWER: u32 = 1000;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PlayerId(Uuid);

impl PlayerId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PlayerId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A registered player.
///
/// `power` is fixed at creation and only drives group seeding. `medals` is
/// the tournament score, mutated exclusively by the attack transaction and
/// the reward engine; `money` is mutated exclusively by the reward engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub power: u32,
    pub medals: i64,
    pub money: i64,
}

impl Player {
    pub fn new(name: impl Into<String>, power: u32, medals: i64, money: i64) -> Self {
        Self {
            id: PlayerId::new(),
            name: name.into(),
            power,
            medals,
            money,
        }
    }
}
