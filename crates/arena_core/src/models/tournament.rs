use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::{GroupId, PlayerId};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct TournamentId(Uuid);

impl TournamentId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TournamentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TournamentId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle phase derived from the clock; never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Before the start time: registration open, no groups yet.
    Pending,
    /// Inside [start, end): groups fixed, combat allowed.
    Running,
    /// At or past the end time: combat rejected, rewards due.
    Closed,
}

/// A scheduled competition window.
///
/// The participant roster is mutated only by registration and freezes once
/// group formation runs; `groups` is written exactly once, by formation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    pub participants: Vec<PlayerId>,
    pub groups: Vec<GroupId>,
}

impl Tournament {
    pub fn new(start_at: DateTime<Utc>, end_at: DateTime<Utc>) -> Self {
        Self {
            id: TournamentId::new(),
            start_at,
            end_at,
            participants: Vec::new(),
            groups: Vec::new(),
        }
    }

    pub fn phase_at(&self, now: DateTime<Utc>) -> Phase {
        if now < self.start_at {
            Phase::Pending
        } else if now < self.end_at {
            Phase::Running
        } else {
            Phase::Closed
        }
    }
}
