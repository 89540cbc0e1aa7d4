use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::{PlayerId, TournamentId};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct GroupId(Uuid);

impl GroupId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for GroupId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A fixed subset of a tournament's roster, formed once at the start time.
/// Combat only happens between members of the same group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,
    pub tournament: TournamentId,
    pub members: Vec<PlayerId>,
}

impl Group {
    pub fn new(tournament: TournamentId, members: Vec<PlayerId>) -> Self {
        Self {
            id: GroupId::new(),
            tournament,
            members,
        }
    }
}
