//! `Mob` — one agent's brain: a goal selector, a target selector, and the
//! state both are driven with.

use mob_core::MobId;
use mob_goal::{Flag, GoalSelector, SelectorConfig};

use crate::SimResult;

// ── MobState ──────────────────────────────────────────────────────────────────

/// What a mob's body currently allows its goals to control.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ControlPermissions {
    /// The mob steers itself (false while e.g. ridden by another mob).
    /// Gates MOVE, LOOK, and JUMP.
    pub steer: bool,
    /// The mob may jump (false while e.g. sitting in a boat).
    pub jump:  bool,
}

impl ControlPermissions {
    pub const FREE: ControlPermissions = ControlPermissions { steer: true, jump: true };
}

impl Default for ControlPermissions {
    fn default() -> Self {
        Self::FREE
    }
}

/// State type a [`Mob`] carries and hands to its goals as context.
pub trait MobState: Send + 'static {
    /// Consulted every `control_update_interval` ticks to enable or disable
    /// the goal selector's control flags.  Default: everything allowed.
    fn controls(&self) -> ControlPermissions {
        ControlPermissions::FREE
    }
}

// ── Mob ───────────────────────────────────────────────────────────────────────

/// One mob: its state plus the two arbitration engines driven with it.
///
/// Movement, look, and jump goals live in `goal_selector`; target
/// acquisition goals live in `target_selector`.  The two are independent,
/// so a TARGET goal never contends with a MOVE goal.
pub struct Mob<S> {
    id: MobId,

    /// The mob's own state, passed to every goal hook.
    pub state: S,

    pub goal_selector: GoalSelector<S>,

    pub target_selector: GoalSelector<S>,

    /// Ticks since spawn.
    tick_count: u64,

    /// Unaware mobs run no AI at all.
    aware: bool,

    /// Inactive mobs take the throttled path: a full selection pass only
    /// every `new_goal_rate` ticks.
    active: bool,

    control_update_interval: u32,
}

impl<S: MobState> Mob<S> {
    /// A fresh, active, aware mob with empty selectors.
    pub fn new(
        id:                      MobId,
        state:                   S,
        selector:                &SelectorConfig,
        control_update_interval: u32,
    ) -> SimResult<Self> {
        Ok(Self {
            id,
            state,
            goal_selector:   GoalSelector::with_config(selector)?,
            target_selector: GoalSelector::with_config(selector)?,
            tick_count:      0,
            aware:           true,
            active:          true,
            control_update_interval,
        })
    }

    // ── Tick ──────────────────────────────────────────────────────────────

    /// Advance this mob by one simulation tick.
    pub fn tick(&mut self) {
        self.tick_count += 1;
        if self.active {
            self.ai_step();
        } else {
            self.inactive_ai_step();
        }

        let interval = u64::from(self.control_update_interval);
        if interval != 0 && self.tick_count.is_multiple_of(interval) {
            self.update_control_flags();
        }
    }

    /// Full-rate AI.  Mobs alternate between a full arbitration pass and a
    /// reduced-cadence pass; the mob id offsets the phase so a population
    /// does not re-arbitrate all at once.
    fn ai_step(&mut self) {
        if !self.aware {
            return;
        }
        let phase = self.tick_count.wrapping_add(u64::from(self.id.0));
        if phase % 2 != 0 && self.tick_count > 1 {
            self.target_selector.tick_running_goals(false, &mut self.state);
            self.goal_selector.tick_running_goals(false, &mut self.state);
        } else {
            self.target_selector.tick(&mut self.state);
            self.goal_selector.tick(&mut self.state);
        }
    }

    fn inactive_ai_step(&mut self) {
        if !self.aware {
            return;
        }
        if self.goal_selector.inactive_tick() {
            self.goal_selector.tick(&mut self.state);
        }
        if self.target_selector.inactive_tick() {
            self.target_selector.tick(&mut self.state);
        }
    }

    /// Enable or disable MOVE, LOOK, and JUMP according to
    /// [`MobState::controls`].
    pub fn update_control_flags(&mut self) {
        let controls = self.state.controls();
        self.goal_selector.set_control_flag(Flag::Move, controls.steer);
        self.goal_selector.set_control_flag(Flag::Jump, controls.steer && controls.jump);
        self.goal_selector.set_control_flag(Flag::Look, controls.steer);
    }

    /// Remove every goal from both selectors, stopping running ones.
    /// Returns how many goals were removed.
    pub fn clear_goals(&mut self) -> usize {
        self.goal_selector.remove_all_goals(|_| true, &mut self.state)
            + self.target_selector.remove_all_goals(|_| true, &mut self.state)
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn id(&self) -> MobId {
        self.id
    }

    #[inline]
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    #[inline]
    pub fn is_aware(&self) -> bool {
        self.aware
    }

    pub fn set_aware(&mut self, aware: bool) {
        self.aware = aware;
    }

    /// `true` if either selector has a running goal.
    pub fn has_any_running(&self) -> bool {
        self.goal_selector.has_any_running() || self.target_selector.has_any_running()
    }

    pub fn running_goal_count(&self) -> usize {
        self.goal_selector.running_goals().count() + self.target_selector.running_goals().count()
    }
}
