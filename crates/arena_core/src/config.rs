//! Policy values for the tournament engine.
//!
//! These are deployment policy, not tournament data: every tournament served
//! by one engine instance shares the same configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArenaConfig {
    /// Players per group; the last group of a tournament may be smaller.
    pub group_size: usize,
    /// Maximum roster size per tournament.
    pub max_players: usize,
    /// Per-attacker freeze after a successful attack, in seconds.
    pub cooldown_secs: i64,
    /// Inclusive bounds of the medal score drawn per attack.
    pub score_min: i64,
    pub score_max: i64,
    /// Money paid to the top ranks of each group, best rank first. Groups
    /// smaller than the ladder pay as many steps as they have members.
    pub reward_ladder: Vec<i64>,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            group_size: 50,
            max_players: 200,
            cooldown_secs: 5,
            score_min: -10,
            score_max: 10,
            reward_ladder: vec![300, 200, 100],
        }
    }
}
