use thiserror::Error;

use crate::models::{GroupId, PlayerId, TournamentId};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArenaError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("player not found: {0}")]
    PlayerNotFound(PlayerId),

    #[error("tournament not found: {0}")]
    TournamentNotFound(TournamentId),

    #[error("group not found: {0}")]
    GroupNotFound(GroupId),

    #[error("a player cannot attack himself")]
    SelfAttack,

    #[error("the tournament has not started yet")]
    TournamentNotStarted,

    #[error("the tournament has ended")]
    TournamentEnded,

    #[error("the tournament has already begun")]
    TournamentAlreadyStarted,

    #[error("exceed maximum number of players")]
    CapacityExceeded,

    #[error("player already participates in this tournament")]
    AlreadyRegistered,

    #[error("player cannot attack twice the same player")]
    DuplicateAttack,

    #[error("no opponents")]
    NoEligibleOpponent,

    #[error("too many attacks")]
    RateLimited,

    #[error("attacked by someone else")]
    ConcurrentModification,
}

/// Caller-facing classification of an [`ArenaError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed or out-of-range input, rejected before any lookup.
    Validation,
    /// Unknown player, tournament, or group.
    NotFound,
    /// Wrong lifecycle phase, duplicate registration or attack, capacity,
    /// self-attack, or an empty eligible set.
    PolicyViolation,
    /// Retryable after the cooldown window.
    RateLimited,
    /// Optimistic commit lost the race; immediately retryable.
    Conflict,
}

impl ArenaError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ArenaError::Validation(_) => ErrorKind::Validation,
            ArenaError::PlayerNotFound(_)
            | ArenaError::TournamentNotFound(_)
            | ArenaError::GroupNotFound(_) => ErrorKind::NotFound,
            ArenaError::SelfAttack
            | ArenaError::TournamentNotStarted
            | ArenaError::TournamentEnded
            | ArenaError::TournamentAlreadyStarted
            | ArenaError::CapacityExceeded
            | ArenaError::AlreadyRegistered
            | ArenaError::DuplicateAttack
            | ArenaError::NoEligibleOpponent => ErrorKind::PolicyViolation,
            ArenaError::RateLimited => ErrorKind::RateLimited,
            ArenaError::ConcurrentModification => ErrorKind::Conflict,
        }
    }

    /// Whether resubmitting the same request can succeed without any other
    /// state change.
    pub fn is_retryable(&self) -> bool {
        matches!(self.kind(), ErrorKind::RateLimited | ErrorKind::Conflict)
    }
}

pub type Result<T> = std::result::Result<T, ArenaError>;
