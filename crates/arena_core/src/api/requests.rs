use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ArenaError, Result};
use crate::models::{Player, PlayerId, MAX_POWER, MIN_POWER};

fn default_money() -> i64 {
    1000
}

/// Request to create a player. Defaults mirror the creation schema: zero
/// medals, 1000 money.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlayerRequest {
    pub name: String,
    pub power: u32,
    #[serde(default)]
    pub medals: i64,
    #[serde(default = "default_money")]
    pub money: i64,
}

impl CreatePlayerRequest {
    pub fn new(name: impl Into<String>, power: u32) -> Self {
        Self {
            name: name.into(),
            power,
            medals: 0,
            money: default_money(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(ArenaError::Validation("name must not be empty".into()));
        }
        if !(MIN_POWER..=MAX_POWER).contains(&self.power) {
            return Err(ArenaError::Validation(format!(
                "power must be {MIN_POWER}..={MAX_POWER}, got {}",
                self.power
            )));
        }
        if self.medals < 0 {
            return Err(ArenaError::Validation("medals must not be negative".into()));
        }
        if self.money < 0 {
            return Err(ArenaError::Validation("money must not be negative".into()));
        }
        Ok(())
    }
}

/// Request to create a tournament window.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CreateTournamentRequest {
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
}

impl CreateTournamentRequest {
    pub fn validate(&self) -> Result<()> {
        if self.start_at >= self.end_at {
            return Err(ArenaError::Validation(
                "start_at must be before end_at".into(),
            ));
        }
        Ok(())
    }
}

/// Player fields exposed by queries and standings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerView {
    pub id: PlayerId,
    pub name: String,
    pub power: u32,
    pub medals: i64,
    pub money: i64,
}

impl From<Player> for PlayerView {
    fn from(player: Player) -> Self {
        Self {
            id: player.id,
            name: player.name,
            power: player.power,
            medals: player.medals,
            money: player.money,
        }
    }
}
