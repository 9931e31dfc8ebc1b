//! `WrappedGoal` — a goal decorated with priority and running state.

use std::fmt;

use mob_core::GoalId;
use tracing::trace;

use crate::goal::NoGoal;
use crate::{FlagSet, Goal};

/// A registered goal as the selector sees it.
///
/// Equality is identity: two `WrappedGoal`s are equal when they carry the
/// same [`GoalId`].
pub struct WrappedGoal<C> {
    id:       GoalId,
    /// Lower value = higher precedence.  Widened from the caller's `i32` so
    /// the sentinel can rank above every real goal.
    priority: i64,
    running:  bool,
    flags:    FlagSet,
    goal:     Box<dyn Goal<C>>,
}

impl<C> WrappedGoal<C> {
    pub(crate) fn new(id: GoalId, priority: i32, goal: Box<dyn Goal<C>>) -> Self {
        let flags = goal.flags().or_unknown();
        Self { id, priority: i64::from(priority), running: false, flags, goal }
    }

    /// The "no holder" sentinel: ranks below every real goal and is never
    /// running, so any goal may replace it.
    pub(crate) fn no_goal() -> Self {
        Self {
            id:       GoalId::INVALID,
            priority: i64::MAX,
            running:  false,
            flags:    FlagSet::EMPTY,
            goal:     Box::new(NoGoal),
        }
    }

    // ── Preemption ────────────────────────────────────────────────────────

    /// Whether `other` may take a flag held by `self`.
    ///
    /// `self` must be interruptable and `other` must have a strictly lower
    /// priority value.  Equal priorities never preempt.
    #[inline]
    pub fn can_be_replaced_by(&self, other: &WrappedGoal<C>) -> bool {
        self.is_interruptable() && other.priority < self.priority
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────

    /// Start the goal unless it is already running.
    pub fn start(&mut self, ctx: &mut C) {
        if self.running {
            return;
        }
        trace!(goal = self.goal.name(), id = self.id.0, priority = self.priority, flags = %self.flags, "goal start");
        self.running = true;
        self.goal.start(ctx);
    }

    /// Stop the goal if it is running.
    pub fn stop(&mut self, ctx: &mut C) {
        if !self.running {
            return;
        }
        trace!(goal = self.goal.name(), id = self.id.0, priority = self.priority, "goal stop");
        self.running = false;
        self.goal.stop(ctx);
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    // ── Delegation ────────────────────────────────────────────────────────

    #[inline]
    pub fn can_use(&mut self, ctx: &C) -> bool {
        self.goal.can_use(ctx)
    }

    #[inline]
    pub fn can_continue_to_use(&mut self, ctx: &C) -> bool {
        self.goal.can_continue_to_use(ctx)
    }

    #[inline]
    pub fn tick(&mut self, ctx: &mut C) {
        self.goal.tick(ctx);
    }

    #[inline]
    pub fn is_interruptable(&self) -> bool {
        self.goal.is_interruptable()
    }

    #[inline]
    pub fn requires_update_every_tick(&self) -> bool {
        self.goal.requires_update_every_tick()
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn id(&self) -> GoalId {
        self.id
    }

    #[inline]
    pub fn priority(&self) -> i32 {
        i32::try_from(self.priority).unwrap_or(i32::MAX)
    }

    /// Flags held while running.  Never empty for a registered goal.
    #[inline]
    pub fn flags(&self) -> FlagSet {
        self.flags
    }

    /// Callers must not change flags of a running goal; the selector checks.
    pub(crate) fn set_flags(&mut self, flags: FlagSet) {
        self.flags = flags.or_unknown();
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.goal.name()
    }

    /// The wrapped goal.
    #[inline]
    pub fn goal(&self) -> &dyn Goal<C> {
        self.goal.as_ref()
    }

    pub(crate) fn into_goal(self) -> Box<dyn Goal<C>> {
        self.goal
    }
}

impl<C> PartialEq for WrappedGoal<C> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<C> Eq for WrappedGoal<C> {}

impl<C> fmt::Debug for WrappedGoal<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WrappedGoal")
            .field("id", &self.id)
            .field("name", &self.goal.name())
            .field("priority", &self.priority)
            .field("running", &self.running)
            .field("flags", &self.flags)
            .finish()
    }
}
