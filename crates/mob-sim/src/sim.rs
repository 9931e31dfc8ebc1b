//! The `Sim` struct and its tick loop.

use mob_core::{MobId, Tick, TickClock};
use rustc_hash::FxHashMap;
use tracing::{debug, info};

use crate::{Mob, MobBuilder, MobState, SimConfig, SimError, SimObserver, SimResult, TickStats};

/// A population of mobs stepped together.
///
/// Each tick every mob runs its own selectors against its own state, in
/// spawn order.  No goal or selector state is shared between mobs, so with
/// the `parallel` feature mobs are ticked on Rayon's pool with the same
/// outcome.
pub struct Sim<S> {
    pub config: SimConfig,

    pub clock: TickClock,

    /// Spawn order is tick order.
    mobs: Vec<Mob<S>>,

    /// `MobId` → slot in `mobs`.
    index: FxHashMap<MobId, usize>,

    next_id: MobId,
}

impl<S: MobState> Sim<S> {
    /// Validate `config` and create an empty population.
    pub fn new(config: SimConfig) -> SimResult<Self> {
        config.validate()?;
        let clock = TickClock::new(config.ticks_per_second)?;
        Ok(Self {
            config,
            clock,
            mobs:    Vec::new(),
            index:   FxHashMap::default(),
            next_id: MobId(0),
        })
    }

    // ── Population ────────────────────────────────────────────────────────

    /// Allocate an id, let `build` describe the mob, and add it.
    ///
    /// The id is consumed even if the builder fails validation.
    pub fn spawn<F>(&mut self, build: F) -> SimResult<MobId>
    where
        F: FnOnce(MobId) -> MobBuilder<S>,
    {
        let id = self.next_id;
        self.next_id = id.next();
        let mob = build(id).build(id, &self.config)?;
        self.index.insert(id, self.mobs.len());
        self.mobs.push(mob);
        debug!(mob = id.0, population = self.mobs.len(), "mob spawned");
        Ok(id)
    }

    /// Remove a mob and hand it back.  Its goals are left as they are.
    pub fn despawn(&mut self, id: MobId) -> SimResult<Mob<S>> {
        let slot = self.index.remove(&id).ok_or(SimError::MobNotFound(id))?;
        let mob = self.mobs.remove(slot);
        for later in &self.mobs[slot..] {
            if let Some(s) = self.index.get_mut(&later.id()) {
                *s -= 1;
            }
        }
        debug!(mob = id.0, population = self.mobs.len(), "mob despawned");
        Ok(mob)
    }

    pub fn mob(&self, id: MobId) -> Option<&Mob<S>> {
        self.index.get(&id).map(|&slot| &self.mobs[slot])
    }

    pub fn mob_mut(&mut self, id: MobId) -> Option<&mut Mob<S>> {
        self.index.get(&id).map(|&slot| &mut self.mobs[slot])
    }

    /// All mobs in tick order.
    pub fn mobs(&self) -> &[Mob<S>] {
        &self.mobs
    }

    pub fn mobs_mut(&mut self) -> &mut [Mob<S>] {
        &mut self.mobs
    }

    pub fn len(&self) -> usize {
        self.mobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mobs.is_empty()
    }

    /// Put each mob on the full-rate or throttled path according to
    /// `is_active`.  Returns the number of active mobs.
    pub fn update_activation<F>(&mut self, mut is_active: F) -> usize
    where
        F: FnMut(&Mob<S>) -> bool,
    {
        let mut active = 0;
        for mob in &mut self.mobs {
            let now_active = is_active(&*mob);
            mob.set_active(now_active);
            active += usize::from(now_active);
        }
        active
    }

    // ── Tick loop ─────────────────────────────────────────────────────────

    /// Run from the current tick to `config.total_ticks`.
    pub fn run<O: SimObserver<S>>(&mut self, observer: &mut O) {
        let end = Tick(self.config.total_ticks);
        info!(mobs = self.mobs.len(), from = %self.clock.current_tick, to = %end, "simulation started");
        while self.clock.current_tick < end {
            self.step(observer);
        }
        observer.on_sim_end(self.clock.current_tick);
        info!(tick = %self.clock.current_tick, "simulation finished");
    }

    /// Run exactly `n` ticks from the current position.
    pub fn run_ticks<O: SimObserver<S>>(&mut self, n: u64, observer: &mut O) {
        for _ in 0..n {
            self.step(observer);
        }
    }

    /// Tick every mob once and advance the clock.
    pub fn step<O: SimObserver<S>>(&mut self, observer: &mut O) -> TickStats {
        let now = self.clock.current_tick;
        observer.on_tick_start(now);

        self.tick_mobs();

        let stats = self.stats(now);
        observer.on_tick_end(now, &stats);
        if now.is_every(self.config.output_interval_ticks) {
            observer.on_snapshot(now, &self.mobs);
        }

        self.clock.advance();
        stats
    }

    #[cfg(not(feature = "parallel"))]
    fn tick_mobs(&mut self) {
        for mob in &mut self.mobs {
            mob.tick();
        }
    }

    #[cfg(feature = "parallel")]
    fn tick_mobs(&mut self) {
        use rayon::prelude::*;

        self.mobs.par_iter_mut().for_each(|mob| mob.tick());
    }

    fn stats(&self, tick: Tick) -> TickStats {
        let mut stats = TickStats { tick, mobs: self.mobs.len(), ..TickStats::default() };
        for mob in &self.mobs {
            stats.active += usize::from(mob.is_active());
            stats.running_goals += mob.running_goal_count();
        }
        stats
    }
}
