//! In-memory entity store with per-row version counters.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use crate::error::{ArenaError, Result};
use crate::models::{Attack, Group, GroupId, Player, PlayerId, Tournament, TournamentId};

use super::{EntityStore, StoreTxn};

#[derive(Debug, Clone)]
struct Versioned<T> {
    version: u64,
    value: T,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum RowKey {
    Player(PlayerId),
    Tournament(TournamentId),
    Group(GroupId),
    AttackPair(TournamentId, PlayerId, PlayerId),
}

#[derive(Debug, Default)]
struct Inner {
    players: HashMap<PlayerId, Versioned<Player>>,
    tournaments: HashMap<TournamentId, Versioned<Tournament>>,
    groups: HashMap<GroupId, Versioned<Group>>,
    /// Committed attacks, append-only.
    attacks: Vec<Attack>,
    /// Uniqueness index over (tournament, attacker, defender).
    attack_pairs: HashSet<(TournamentId, PlayerId, PlayerId)>,
}

impl Inner {
    /// Version currently visible for a row; zero means absent. Attack pairs
    /// are immutable facts, so they only ever move from 0 to 1.
    fn version_of(&self, key: RowKey) -> u64 {
        match key {
            RowKey::Player(id) => self.players.get(&id).map_or(0, |v| v.version),
            RowKey::Tournament(id) => self.tournaments.get(&id).map_or(0, |v| v.version),
            RowKey::Group(id) => self.groups.get(&id).map_or(0, |v| v.version),
            RowKey::AttackPair(t, a, d) => u64::from(self.attack_pairs.contains(&(t, a, d))),
        }
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of committed attacks, for tests and diagnostics.
    pub fn attack_count(&self) -> usize {
        self.inner.lock().expect("store lock poisoned").attacks.len()
    }
}

impl EntityStore for MemoryStore {
    fn begin(&self) -> Box<dyn StoreTxn + '_> {
        Box::new(MemoryTxn {
            store: self,
            reads: HashMap::new(),
            players: HashMap::new(),
            tournaments: HashMap::new(),
            groups: HashMap::new(),
            attacks: Vec::new(),
        })
    }
}

struct MemoryTxn<'a> {
    store: &'a MemoryStore,
    /// Row version observed on first read, keyed by row.
    reads: HashMap<RowKey, u64>,
    // Staged writes, visible to this transaction's own reads.
    players: HashMap<PlayerId, Player>,
    tournaments: HashMap<TournamentId, Tournament>,
    groups: HashMap<GroupId, Group>,
    attacks: Vec<Attack>,
}

impl MemoryTxn<'_> {
    /// Record the version seen for `key`, keeping the first observation so a
    /// re-read never masks an interleaved commit.
    fn record_read(reads: &mut HashMap<RowKey, u64>, key: RowKey, version: u64) {
        reads.entry(key).or_insert(version);
    }
}

impl StoreTxn for MemoryTxn<'_> {
    fn player(&mut self, id: PlayerId) -> Result<Player> {
        if let Some(player) = self.players.get(&id) {
            return Ok(player.clone());
        }
        let inner = self.store.inner.lock().expect("store lock poisoned");
        let row = inner.players.get(&id);
        Self::record_read(
            &mut self.reads,
            RowKey::Player(id),
            row.map_or(0, |v| v.version),
        );
        row.map(|v| v.value.clone())
            .ok_or(ArenaError::PlayerNotFound(id))
    }

    fn tournament(&mut self, id: TournamentId) -> Result<Tournament> {
        if let Some(tournament) = self.tournaments.get(&id) {
            return Ok(tournament.clone());
        }
        let inner = self.store.inner.lock().expect("store lock poisoned");
        let row = inner.tournaments.get(&id);
        Self::record_read(
            &mut self.reads,
            RowKey::Tournament(id),
            row.map_or(0, |v| v.version),
        );
        row.map(|v| v.value.clone())
            .ok_or(ArenaError::TournamentNotFound(id))
    }

    fn group(&mut self, id: GroupId) -> Result<Group> {
        if let Some(group) = self.groups.get(&id) {
            return Ok(group.clone());
        }
        let inner = self.store.inner.lock().expect("store lock poisoned");
        let row = inner.groups.get(&id);
        Self::record_read(
            &mut self.reads,
            RowKey::Group(id),
            row.map_or(0, |v| v.version),
        );
        row.map(|v| v.value.clone())
            .ok_or(ArenaError::GroupNotFound(id))
    }

    fn attack_exists(
        &mut self,
        tournament: TournamentId,
        attacker: PlayerId,
        defender: PlayerId,
    ) -> bool {
        if self
            .attacks
            .iter()
            .any(|a| a.pair() == (tournament, attacker, defender))
        {
            return true;
        }
        let inner = self.store.inner.lock().expect("store lock poisoned");
        let exists = inner.attack_pairs.contains(&(tournament, attacker, defender));
        Self::record_read(
            &mut self.reads,
            RowKey::AttackPair(tournament, attacker, defender),
            u64::from(exists),
        );
        exists
    }

    fn attacked_defenders(
        &mut self,
        tournament: TournamentId,
        attacker: PlayerId,
    ) -> Vec<PlayerId> {
        let inner = self.store.inner.lock().expect("store lock poisoned");
        let mut seen = HashSet::new();
        inner
            .attacks
            .iter()
            .chain(self.attacks.iter())
            .filter(|a| a.tournament == tournament && a.attacker == attacker)
            .map(|a| a.defender)
            .filter(|defender| seen.insert(*defender))
            .collect()
    }

    fn put_player(&mut self, player: Player) {
        self.players.insert(player.id, player);
    }

    fn put_tournament(&mut self, tournament: Tournament) {
        self.tournaments.insert(tournament.id, tournament);
    }

    fn put_group(&mut self, group: Group) {
        self.groups.insert(group.id, group);
    }

    fn put_attack(&mut self, attack: Attack) {
        self.attacks.push(attack);
    }

    fn commit(self: Box<Self>) -> Result<()> {
        let mut inner = self.store.inner.lock().expect("store lock poisoned");

        for (key, seen) in &self.reads {
            if inner.version_of(*key) != *seen {
                return Err(ArenaError::ConcurrentModification);
            }
        }
        // Backstop for pairs staged without a prior tracked read.
        for attack in &self.attacks {
            if inner.attack_pairs.contains(&attack.pair()) {
                return Err(ArenaError::DuplicateAttack);
            }
        }

        for (id, player) in self.players {
            match inner.players.entry(id) {
                std::collections::hash_map::Entry::Occupied(mut row) => {
                    let row = row.get_mut();
                    row.version += 1;
                    row.value = player;
                }
                std::collections::hash_map::Entry::Vacant(slot) => {
                    slot.insert(Versioned { version: 1, value: player });
                }
            }
        }
        for (id, tournament) in self.tournaments {
            match inner.tournaments.entry(id) {
                std::collections::hash_map::Entry::Occupied(mut row) => {
                    let row = row.get_mut();
                    row.version += 1;
                    row.value = tournament;
                }
                std::collections::hash_map::Entry::Vacant(slot) => {
                    slot.insert(Versioned { version: 1, value: tournament });
                }
            }
        }
        for (id, group) in self.groups {
            match inner.groups.entry(id) {
                std::collections::hash_map::Entry::Occupied(mut row) => {
                    let row = row.get_mut();
                    row.version += 1;
                    row.value = group;
                }
                std::collections::hash_map::Entry::Vacant(slot) => {
                    slot.insert(Versioned { version: 1, value: group });
                }
            }
        }
        for attack in self.attacks {
            inner.attack_pairs.insert(attack.pair());
            inner.attacks.push(attack);
        }
        Ok(())
    }
}
