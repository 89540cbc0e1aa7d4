//! Cooldown guard: a fast expiring key/value map, separate from the entity
//! store and outside its transaction boundary. It rate-limits attackers on a
//! best-effort basis only; exactly-once-per-pair correctness comes from the
//! attack uniqueness constraint, never from here.

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Mutex;

use crate::models::{PlayerId, TournamentId};

pub trait CooldownStore: Send + Sync {
    /// Arm the cooldown for `(tournament, attacker)` until `until`.
    fn arm(&self, tournament: TournamentId, attacker: PlayerId, until: DateTime<Utc>);

    /// Whether the key is still inside a cooldown window at `now`.
    fn is_active(&self, tournament: TournamentId, attacker: PlayerId, now: DateTime<Utc>) -> bool;
}

#[derive(Debug, Default)]
pub struct MemoryCooldown {
    entries: Mutex<HashMap<(TournamentId, PlayerId), DateTime<Utc>>>,
}

impl MemoryCooldown {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CooldownStore for MemoryCooldown {
    fn arm(&self, tournament: TournamentId, attacker: PlayerId, until: DateTime<Utc>) {
        let mut entries = self.entries.lock().expect("cooldown lock poisoned");
        // Piggyback expiry sweeping on writes so the map stays bounded.
        entries.retain(|_, expiry| *expiry > until - chrono::Duration::hours(1));
        entries.insert((tournament, attacker), until);
    }

    fn is_active(&self, tournament: TournamentId, attacker: PlayerId, now: DateTime<Utc>) -> bool {
        let entries = self.entries.lock().expect("cooldown lock poisoned");
        entries
            .get(&(tournament, attacker))
            .is_some_and(|until| now < *until)
    }
}
