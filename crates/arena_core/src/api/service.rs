use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::{BTreeMap, HashSet};
use std::sync::{Arc, Mutex};
use tracing::{info, warn};

use crate::clock::Clock;
use crate::config::ArenaConfig;
use crate::cooldown::CooldownStore;
use crate::engine::{combat, formation, matchmaking, registration, reward, AttackReport};
use crate::error::Result;
use crate::models::{GroupId, Player, PlayerId, Tournament, TournamentId};
use crate::scheduler::{JobKind, LifecycleJob, SchedulerPort};
use crate::store::EntityStore;

use super::requests::{CreatePlayerRequest, CreateTournamentRequest, PlayerView};

/// The tournament engine behind all boundary operations.
///
/// Holds the injected ports (store, cooldown guard, scheduler, clock), the
/// shared random source, and the lifecycle dedup ledger. One instance is the
/// single logical authority over its tournaments' state.
pub struct ArenaService {
    store: Arc<dyn EntityStore>,
    cooldowns: Arc<dyn CooldownStore>,
    scheduler: Arc<dyn SchedulerPort>,
    clock: Arc<dyn Clock>,
    config: ArenaConfig,
    rng: Mutex<StdRng>,
    /// Formation/reward are not idempotent; this ledger makes each run
    /// at-most-once per tournament even under duplicate job delivery.
    lifecycle_done: Mutex<HashSet<(TournamentId, JobKind)>>,
}

impl ArenaService {
    pub fn new(
        store: Arc<dyn EntityStore>,
        cooldowns: Arc<dyn CooldownStore>,
        scheduler: Arc<dyn SchedulerPort>,
        clock: Arc<dyn Clock>,
        config: ArenaConfig,
    ) -> Self {
        Self::with_rng(store, cooldowns, scheduler, clock, config, StdRng::from_entropy())
    }

    /// Like [`ArenaService::new`] but with a caller-supplied random source,
    /// for deterministic opponent draws and attack scores.
    pub fn with_rng(
        store: Arc<dyn EntityStore>,
        cooldowns: Arc<dyn CooldownStore>,
        scheduler: Arc<dyn SchedulerPort>,
        clock: Arc<dyn Clock>,
        config: ArenaConfig,
        rng: StdRng,
    ) -> Self {
        Self {
            store,
            cooldowns,
            scheduler,
            clock,
            config,
            rng: Mutex::new(rng),
            lifecycle_done: Mutex::new(HashSet::new()),
        }
    }

    pub fn config(&self) -> &ArenaConfig {
        &self.config
    }

    /// Fork a per-call random source off the shared one. The shared lock is
    /// held only for the seed draw, never across a store transaction, so
    /// transactions from concurrent callers still overlap and conflict at
    /// commit time instead of queueing here.
    fn fork_rng(&self) -> StdRng {
        let mut shared = self.rng.lock().expect("rng lock poisoned");
        StdRng::seed_from_u64(shared.gen())
    }

    // ── Admin operations ────────────────────────────────────────────────

    pub fn create_player(&self, req: CreatePlayerRequest) -> Result<PlayerId> {
        req.validate()?;
        let player = Player::new(req.name, req.power, req.medals, req.money);
        let id = player.id;
        let mut txn = self.store.begin();
        txn.put_player(player);
        txn.commit()?;
        Ok(id)
    }

    pub fn player(&self, id: PlayerId) -> Result<PlayerView> {
        let mut txn = self.store.begin();
        Ok(txn.player(id)?.into())
    }

    /// Create a tournament and schedule its two lifecycle jobs: group
    /// formation at the start time, reward payout at the end time.
    pub fn create_tournament(&self, req: CreateTournamentRequest) -> Result<TournamentId> {
        req.validate()?;
        let tournament = Tournament::new(req.start_at, req.end_at);
        let id = tournament.id;
        let mut txn = self.store.begin();
        txn.put_tournament(tournament);
        txn.commit()?;

        self.scheduler.schedule(
            LifecycleJob { tournament: id, kind: JobKind::FormGroups },
            req.start_at,
        );
        self.scheduler.schedule(
            LifecycleJob { tournament: id, kind: JobKind::PayRewards },
            req.end_at,
        );
        info!(tournament = %id, start = %req.start_at, end = %req.end_at, "tournament created");
        Ok(id)
    }

    pub fn participate(&self, tournament: TournamentId, player: PlayerId) -> Result<()> {
        let mut txn = self.store.begin();
        registration::participate(
            txn.as_mut(),
            self.clock.now(),
            self.config.max_players,
            tournament,
            player,
        )?;
        txn.commit()
    }

    /// Group standings ordered by medals descending. Empty before group
    /// formation has run.
    pub fn standings(&self, tournament: TournamentId) -> Result<BTreeMap<GroupId, Vec<PlayerView>>> {
        let mut txn = self.store.begin();
        let t = txn.tournament(tournament)?;
        let mut standings = BTreeMap::new();
        for group_id in &t.groups {
            let group = txn.group(*group_id)?;
            let mut members = group
                .members
                .iter()
                .map(|id| txn.player(*id))
                .collect::<Result<Vec<Player>>>()?;
            members.sort_by(|a, b| b.medals.cmp(&a.medals).then(a.id.cmp(&b.id)));
            standings.insert(*group_id, members.into_iter().map(PlayerView::from).collect());
        }
        Ok(standings)
    }

    // ── Game operations ─────────────────────────────────────────────────

    pub fn opponent(&self, tournament: TournamentId, player: PlayerId) -> Result<PlayerId> {
        let mut rng = self.fork_rng();
        let mut txn = self.store.begin();
        matchmaking::pick_opponent(txn.as_mut(), tournament, player, &mut rng)
    }

    pub fn attack(
        &self,
        tournament: TournamentId,
        attacker: PlayerId,
        defender: PlayerId,
    ) -> Result<AttackReport> {
        let mut rng = self.fork_rng();
        combat::execute(
            self.store.as_ref(),
            self.cooldowns.as_ref(),
            self.clock.as_ref(),
            &self.config,
            &mut rng,
            tournament,
            attacker,
            defender,
        )
    }

    // ── Lifecycle jobs ──────────────────────────────────────────────────

    /// Guarded entry point for the job runner. Duplicate deliveries are
    /// skipped; first deliveries dispatch to the engine.
    pub fn run_lifecycle_job(&self, job: LifecycleJob) -> Result<()> {
        let first = self
            .lifecycle_done
            .lock()
            .expect("lifecycle ledger lock poisoned")
            .insert((job.tournament, job.kind));
        if !first {
            warn!(tournament = %job.tournament, kind = ?job.kind, "duplicate lifecycle job skipped");
            return Ok(());
        }
        match job.kind {
            JobKind::FormGroups => self.form_groups(job.tournament).map(|_| ()),
            JobKind::PayRewards => self.pay_rewards(job.tournament),
        }
    }

    /// Run group formation now. Unguarded: calling twice creates duplicate
    /// groups, which is why the runner goes through [`run_lifecycle_job`].
    ///
    /// [`run_lifecycle_job`]: ArenaService::run_lifecycle_job
    pub fn form_groups(&self, tournament: TournamentId) -> Result<Vec<GroupId>> {
        let mut txn = self.store.begin();
        let groups = formation::form_groups(txn.as_mut(), tournament, self.config.group_size)?;
        txn.commit()?;
        Ok(groups)
    }

    /// Run reward payout now. Unguarded: re-running double-pays.
    pub fn pay_rewards(&self, tournament: TournamentId) -> Result<()> {
        let mut txn = self.store.begin();
        reward::pay_rewards(txn.as_mut(), tournament, &self.config.reward_ladder)?;
        txn.commit()
    }
}
