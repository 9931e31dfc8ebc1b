//! The `Goal` trait — one unit of mob conduct.

use crate::FlagSet;

/// Scale a delay measured in full-rate ticks to the reduced cadence at which
/// goals that do not require every-tick updates are ticked.
///
/// Goals that skip every other tick halve their timers, rounding up so a
/// non-zero delay never collapses to zero.
#[inline]
pub fn reduced_tick_delay(ticks: u32) -> u32 {
    ticks.div_ceil(2)
}

/// A behavior a mob may perform, arbitrated by a
/// [`GoalSelector`][crate::GoalSelector].
///
/// `C` is the context the selector is driven with, normally the owning mob's
/// state.  Eligibility probes see it read-only; lifecycle hooks may mutate
/// it.  Only [`can_use`][Self::can_use] is required.
///
/// # Call protocol
///
/// The selector is the only caller.  For one activation it calls
/// `can_use` → `start` → (`can_continue_to_use`, `tick`)* → `stop`.
/// `can_use` may also be called without a following `start` (when a flag
/// turns out to be unavailable), so side effects there must be idempotent,
/// e.g. caching a target.
///
/// `stop` is an immediate abort: it may arrive from cleanup, from a
/// control flag being disabled, or from preemption, and `tick` is not
/// guaranteed to run again beforehand.
///
/// # Example
///
/// ```rust
/// use mob_goal::{Flag, FlagSet, Goal};
///
/// struct Wander;
///
/// impl Goal<u32> for Wander {
///     fn flags(&self) -> FlagSet {
///         Flag::Move.into()
///     }
///
///     fn can_use(&mut self, stamina: &u32) -> bool {
///         *stamina > 10
///     }
///
///     fn tick(&mut self, stamina: &mut u32) {
///         *stamina -= 1;
///     }
/// }
/// ```
pub trait Goal<C>: Send {
    /// Control flags this goal holds while running.
    ///
    /// Read once when the goal is registered; an empty set is replaced by
    /// `{Unknown}`.  Change it later with
    /// [`GoalSelector::set_flags`][crate::GoalSelector::set_flags].
    fn flags(&self) -> FlagSet {
        FlagSet::EMPTY
    }

    /// Should this goal start now?
    fn can_use(&mut self, ctx: &C) -> bool;

    /// Should this running goal keep going?  Defaults to [`can_use`][Self::can_use].
    fn can_continue_to_use(&mut self, ctx: &C) -> bool {
        self.can_use(ctx)
    }

    /// Whether a goal of strictly higher precedence may preempt this one.
    fn is_interruptable(&self) -> bool {
        true
    }

    fn start(&mut self, _ctx: &mut C) {}

    /// Release everything acquired in `start` and `tick`.
    fn stop(&mut self, _ctx: &mut C) {}

    /// `true` to be ticked on reduced-cadence steps as well as full ones.
    fn requires_update_every_tick(&self) -> bool {
        false
    }

    fn tick(&mut self, _ctx: &mut C) {}

    /// `ticks` if this goal is ticked every step, otherwise
    /// [`reduced_tick_delay(ticks)`][reduced_tick_delay].
    fn adjusted_tick_delay(&self, ticks: u32) -> u32 {
        if self.requires_update_every_tick() {
            ticks
        } else {
            reduced_tick_delay(ticks)
        }
    }

    /// Name used in log events.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Placeholder goal behind the selector's "no holder" sentinel.  Never
/// eligible, never started.
pub(crate) struct NoGoal;

impl<C> Goal<C> for NoGoal {
    fn can_use(&mut self, _ctx: &C) -> bool {
        false
    }

    fn name(&self) -> &'static str {
        "no_goal"
    }
}
