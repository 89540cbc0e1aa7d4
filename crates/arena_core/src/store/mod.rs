//! Entity store port: transactional read/modify/commit with optimistic
//! conflict detection.
//!
//! A transaction records the version of every row it reads (absent rows read
//! as version zero). Nothing blocks while the transaction is open; at commit
//! the versions are re-checked under the store lock and either every staged
//! write lands atomically or the commit is rejected with
//! [`ArenaError::ConcurrentModification`](crate::error::ArenaError) and no
//! partial write is visible. There is no automatic retry: the caller
//! resubmits and all validations re-run against current state.

mod memory;

pub use memory::MemoryStore;

use crate::error::Result;
use crate::models::{Attack, Group, GroupId, Player, PlayerId, Tournament, TournamentId};

/// One optimistic transaction. Reads observe committed state plus this
/// transaction's own staged writes.
pub trait StoreTxn {
    fn player(&mut self, id: PlayerId) -> Result<Player>;
    fn tournament(&mut self, id: TournamentId) -> Result<Tournament>;
    fn group(&mut self, id: GroupId) -> Result<Group>;

    /// Whether an attack for this ordered pair is already committed or
    /// staged. The read is version-tracked, so a pair committed by a racing
    /// transaction fails this one at commit time.
    fn attack_exists(
        &mut self,
        tournament: TournamentId,
        attacker: PlayerId,
        defender: PlayerId,
    ) -> bool;

    /// Defenders the attacker has already hit in this tournament, committed
    /// and staged, each listed once. A snapshot for read-only callers: the
    /// scan is not version-tracked, so it does not widen the commit-time
    /// conflict check.
    fn attacked_defenders(&mut self, tournament: TournamentId, attacker: PlayerId)
        -> Vec<PlayerId>;

    fn put_player(&mut self, player: Player);
    fn put_tournament(&mut self, tournament: Tournament);
    fn put_group(&mut self, group: Group);
    fn put_attack(&mut self, attack: Attack);

    /// Validate read versions and apply all staged writes, or fail with
    /// `ConcurrentModification` (or `DuplicateAttack` if a staged attack's
    /// pair was committed without this transaction ever reading it).
    fn commit(self: Box<Self>) -> Result<()>;
}

pub trait EntityStore: Send + Sync {
    fn begin(&self) -> Box<dyn StoreTxn + '_>;
}
