//! Boundary types and the service facade.
//!
//! The transport layer (out of scope here) is expected to parse raw input
//! into these typed request values and call [`ArenaService`]; the core never
//! inspects untyped input.

mod requests;
mod service;


pub use requests::{CreatePlayerRequest, CreateTournamentRequest, PlayerView};
pub use service::ArenaService;
