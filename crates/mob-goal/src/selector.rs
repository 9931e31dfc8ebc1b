//! `GoalSelector` — per-mob arbitration of goals over control flags.
//!
//! # Tick algorithm
//!
//! ```text
//! tick(ctx):
//!   ① Cleanup    — stop every running goal that touches a disabled flag
//!                  or whose can_continue_to_use() is false.
//!   ② Reconcile  — drop lock entries whose holder is no longer running.
//!   ③ Select     — in registration order, for every idle goal:
//!                    skip if it touches a disabled flag;
//!                    skip unless every flag's holder (or the sentinel)
//!                      can_be_replaced_by(goal);
//!                    skip unless can_use();
//!                    stop the previous holders, lock all flags, start().
//!   ④ Tick       — tick every running goal.
//! ```
//!
//! The order is load-bearing: a goal stopped in ① frees its flags before
//! anything is chosen in ③, and a flag reassigned during ③ is seen by every
//! later candidate of the same pass.
//!
//! # Allocation
//!
//! The lock table is a fixed array indexed by [`Flag::index`], flags are
//! iterated by bit-scan, and the "no holder" case compares against a
//! sentinel built once per selector.  `tick` and `tick_running_goals` never
//! allocate.

use mob_core::GoalId;
use tracing::{trace, trace_span};

use crate::{Flag, FlagSet, Goal, GoalError, GoalResult, SelectorConfig, WrappedGoal};

/// The arbitration engine owned by one mob.
pub struct GoalSelector<C> {
    /// Registration order is evaluation order.
    available_goals: Vec<WrappedGoal<C>>,
    /// Slot into `available_goals` of the goal holding each flag.
    locked_flags:    [Option<usize>; Flag::COUNT],
    disabled_flags:  FlagSet,
    no_goal:         WrappedGoal<C>,
    next_id:         GoalId,
    new_goal_rate:   u32,
    cur_rate:        u32,
}

impl<C> GoalSelector<C> {
    pub fn new() -> Self {
        Self {
            available_goals: Vec::new(),
            locked_flags:    [None; Flag::COUNT],
            disabled_flags:  FlagSet::EMPTY,
            no_goal:         WrappedGoal::no_goal(),
            next_id:         GoalId(0),
            new_goal_rate:   crate::config::DEFAULT_NEW_GOAL_RATE,
            cur_rate:        0,
        }
    }

    /// Build a selector from a validated [`SelectorConfig`].
    pub fn with_config(config: &SelectorConfig) -> GoalResult<Self> {
        config.validate()?;
        let mut selector = Self::new();
        selector.new_goal_rate = config.new_goal_rate;
        Ok(selector)
    }

    // ── Registry ──────────────────────────────────────────────────────────

    /// Register `goal` at `priority` (lower value = higher precedence) and
    /// return its handle.
    pub fn add_goal(&mut self, priority: i32, goal: impl Goal<C> + 'static) -> GoalId {
        self.add_boxed_goal(priority, Box::new(goal))
    }

    pub fn add_boxed_goal(&mut self, priority: i32, goal: Box<dyn Goal<C>>) -> GoalId {
        let id = self.next_id;
        self.next_id = id.next();
        self.available_goals.push(WrappedGoal::new(id, priority, goal));
        id
    }

    /// Remove the goal with handle `id`, stopping it first if it is running.
    ///
    /// Returns the goal, or `None` if `id` is not registered.
    pub fn remove_goal(&mut self, id: GoalId, ctx: &mut C) -> Option<Box<dyn Goal<C>>> {
        let slot = self.slot_of(id)?;
        Some(self.remove_slot(slot, ctx))
    }

    /// Remove every goal matching `predicate`, stopping running ones first.
    /// Returns how many goals were removed.
    ///
    /// The predicate sees the registered goal, so `flags()` is the set the
    /// goal actually locks (after `set_flags` and the `{Unknown}` fallback).
    pub fn remove_all_goals<F>(&mut self, mut predicate: F, ctx: &mut C) -> usize
    where
        F: FnMut(&WrappedGoal<C>) -> bool,
    {
        let mut removed = 0;
        // Back to front so earlier slots stay valid while removing.
        for slot in (0..self.available_goals.len()).rev() {
            if predicate(&self.available_goals[slot]) {
                self.remove_slot(slot, ctx);
                removed += 1;
            }
        }
        removed
    }

    /// Replace the flags of an idle goal.  An empty set becomes `{Unknown}`.
    pub fn set_flags(&mut self, id: GoalId, flags: FlagSet) -> GoalResult<()> {
        let slot = self.slot_of(id).ok_or(GoalError::UnknownGoal(id))?;
        let goal = &mut self.available_goals[slot];
        if goal.is_running() {
            return Err(GoalError::FlagsLockedWhileRunning(id));
        }
        goal.set_flags(flags);
        Ok(())
    }

    fn slot_of(&self, id: GoalId) -> Option<usize> {
        self.available_goals.iter().position(|g| g.id() == id)
    }

    fn remove_slot(&mut self, slot: usize, ctx: &mut C) -> Box<dyn Goal<C>> {
        self.available_goals[slot].stop(ctx);
        let wrapped = self.available_goals.remove(slot);
        for lock in &mut self.locked_flags {
            *lock = match *lock {
                Some(s) if s == slot => None,
                Some(s) if s > slot => Some(s - 1),
                other => other,
            };
        }
        wrapped.into_goal()
    }

    // ── Control flags ─────────────────────────────────────────────────────

    pub fn disable_control_flag(&mut self, flag: Flag) {
        self.disabled_flags.insert(flag);
    }

    pub fn enable_control_flag(&mut self, flag: Flag) {
        self.disabled_flags.remove(flag);
    }

    /// Enable or disable `flag`.  Goals touching a disabled flag are stopped
    /// on the next [`tick`][Self::tick] and not selected while it stays
    /// disabled.
    pub fn set_control_flag(&mut self, flag: Flag, enabled: bool) {
        if enabled {
            self.enable_control_flag(flag);
        } else {
            self.disable_control_flag(flag);
        }
    }

    #[inline]
    pub fn disabled_flags(&self) -> FlagSet {
        self.disabled_flags
    }

    // ── Inactive throttle ─────────────────────────────────────────────────

    /// Count one inactive step.  Returns `true` every `new_goal_rate` calls,
    /// when the caller should run a full [`tick`][Self::tick].
    pub fn inactive_tick(&mut self) -> bool {
        self.cur_rate = self.cur_rate.wrapping_add(1);
        self.cur_rate.is_multiple_of(self.new_goal_rate)
    }

    pub fn set_new_goal_rate(&mut self, rate: u32) -> GoalResult<()> {
        if rate == 0 {
            return Err(GoalError::InvalidGoalRate);
        }
        self.new_goal_rate = rate;
        Ok(())
    }

    #[inline]
    pub fn new_goal_rate(&self) -> u32 {
        self.new_goal_rate
    }

    // ── Tick ──────────────────────────────────────────────────────────────

    /// One full arbitration step: cleanup, lock reconciliation, selection,
    /// then a tick of every running goal.
    pub fn tick(&mut self, ctx: &mut C) {
        {
            let _span = trace_span!("goal_cleanup").entered();
            self.cleanup(ctx);
            self.reconcile_locks();
        }
        {
            let _span = trace_span!("goal_update").entered();
            self.select(ctx);
        }
        self.tick_running_goals(true, ctx);
    }

    /// Tick running goals without re-arbitrating.  With `tick_all == false`
    /// only goals that require every-tick updates are ticked.
    pub fn tick_running_goals(&mut self, tick_all: bool, ctx: &mut C) {
        let _span = trace_span!("goal_tick").entered();
        for goal in &mut self.available_goals {
            if goal.is_running() && (tick_all || goal.requires_update_every_tick()) {
                goal.tick(ctx);
            }
        }
    }

    fn cleanup(&mut self, ctx: &mut C) {
        let disabled = self.disabled_flags;
        for goal in &mut self.available_goals {
            if goal.is_running()
                && (goal.flags().intersects(disabled) || !goal.can_continue_to_use(ctx))
            {
                goal.stop(ctx);
            }
        }
    }

    fn reconcile_locks(&mut self) {
        for lock in &mut self.locked_flags {
            if let Some(slot) = *lock {
                if !self.available_goals[slot].is_running() {
                    *lock = None;
                }
            }
        }
    }

    fn select(&mut self, ctx: &mut C) {
        for slot in 0..self.available_goals.len() {
            let candidate = &self.available_goals[slot];
            if candidate.is_running()
                || candidate.flags().intersects(self.disabled_flags)
                || !self.can_replace_all_flags(candidate)
            {
                continue;
            }
            if !self.available_goals[slot].can_use(ctx) {
                continue;
            }

            for flag in self.available_goals[slot].flags() {
                if let Some(previous) = self.locked_flags[flag.index()] {
                    if self.available_goals[previous].is_running() {
                        trace!(
                            flag = %flag,
                            preempted = self.available_goals[previous].name(),
                            by = self.available_goals[slot].name(),
                            "goal preempted"
                        );
                    }
                    self.available_goals[previous].stop(ctx);
                }
                self.locked_flags[flag.index()] = Some(slot);
            }
            self.available_goals[slot].start(ctx);
        }
    }

    /// Whether `candidate` outranks the holder of every flag it declares.
    fn can_replace_all_flags(&self, candidate: &WrappedGoal<C>) -> bool {
        candidate
            .flags()
            .iter()
            .all(|flag| self.holder(flag).can_be_replaced_by(candidate))
    }

    /// The goal in the lock table for `flag`, or the sentinel.
    #[inline]
    fn holder(&self, flag: Flag) -> &WrappedGoal<C> {
        match self.locked_flags[flag.index()] {
            Some(slot) => &self.available_goals[slot],
            None       => &self.no_goal,
        }
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// `true` if any registered goal is running.
    pub fn has_any_running(&self) -> bool {
        self.available_goals.iter().any(WrappedGoal::is_running)
    }

    pub fn running_goals(&self) -> impl Iterator<Item = &WrappedGoal<C>> {
        self.available_goals.iter().filter(|g| g.is_running())
    }

    /// All registered goals in evaluation order.
    pub fn available_goals(&self) -> &[WrappedGoal<C>] {
        &self.available_goals
    }

    pub fn get(&self, id: GoalId) -> Option<&WrappedGoal<C>> {
        self.available_goals.iter().find(|g| g.id() == id)
    }

    /// The running goal currently holding `flag`, if any.
    pub fn holder_of(&self, flag: Flag) -> Option<GoalId> {
        let slot = self.locked_flags[flag.index()]?;
        let goal = &self.available_goals[slot];
        goal.is_running().then(|| goal.id())
    }

    pub fn len(&self) -> usize {
        self.available_goals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.available_goals.is_empty()
    }
}

impl<C> Default for GoalSelector<C> {
    fn default() -> Self {
        Self::new()
    }
}
