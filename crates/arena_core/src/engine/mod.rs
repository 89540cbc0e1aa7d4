//! The tournament engine proper: group formation, matchmaking, the attack
//! transaction, reward payout, and registration.
//!
//! Every function here works against the [`StoreTxn`](crate::store::StoreTxn)
//! seam and an injected random source, so the whole engine runs unchanged
//! against any store implementation and under deterministic tests.

pub mod combat;
pub mod formation;
pub mod matchmaking;
pub mod registration;
pub mod reward;

#[cfg(test)]
mod registration_test;

pub use combat::AttackReport;
