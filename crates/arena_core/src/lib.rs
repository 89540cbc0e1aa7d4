//! # arena_core - Medal Arena tournament engine
//!
//! Elimination-style multiplayer tournaments: players register, are
//! partitioned into power-seeded groups when the tournament starts, attack
//! random group-mates to swap a medals score, and the top three of each
//! group are paid when the tournament closes.
//!
//! ## Features
//! - Optimistic-concurrency entity store: conflicts detected at commit, no
//!   locking, no partial writes
//! - Exactly-once-per-pair attacks plus a best-effort per-attacker cooldown
//! - Wall-clock lifecycle: formation and payout fire as deferred jobs,
//!   at most once per tournament
//! - All external effects behind injected ports (store, cooldown guard,
//!   scheduler, clock, RNG) so the whole engine runs under deterministic
//!   tests

pub mod api;
pub mod clock;
pub mod config;
pub mod cooldown;
pub mod engine;
pub mod error;
pub mod models;
pub mod scheduler;
pub mod store;
pub mod testing;

pub use api::{ArenaService, CreatePlayerRequest, CreateTournamentRequest, PlayerView};
pub use clock::{Clock, SystemClock};
pub use config::ArenaConfig;
pub use cooldown::{CooldownStore, MemoryCooldown};
pub use engine::AttackReport;
pub use error::{ArenaError, ErrorKind, Result};
pub use models::{
    Attack, AttackId, Group, GroupId, Phase, Player, PlayerId, Tournament, TournamentId,
};
pub use scheduler::{run_lifecycle_jobs, JobKind, LifecycleJob, SchedulerPort, TokioScheduler};
pub use store::{EntityStore, MemoryStore, StoreTxn};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
