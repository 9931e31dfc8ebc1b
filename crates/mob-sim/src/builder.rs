//! Fluent builder for spawning a [`Mob`].

use mob_core::MobId;
use mob_goal::{Goal, SelectorConfig};

use crate::{Mob, MobState, SimConfig, SimResult};

/// Fluent builder for [`Mob<S>`].
///
/// # Optional inputs (have defaults)
///
/// | Method                  | Default                          |
/// |-------------------------|----------------------------------|
/// | `.goal(p, g)`           | no movement goals                |
/// | `.target_goal(p, g)`    | no target goals                  |
/// | `.selector_config(c)`   | `SimConfig::selector`            |
/// | `.inactive()`           | active                           |
/// | `.unaware()`            | aware                            |
///
/// # Example
///
/// ```rust,ignore
/// let id = sim.spawn(|id| {
///     MobBuilder::new(Sheep::new(id, seed))
///         .goal(1, PanicGoal::new(1.25))
///         .goal(5, RandomStrollGoal::new(1.0))
///         .target_goal(1, HurtByTargetGoal)
/// })?;
/// ```
pub struct MobBuilder<S> {
    state:        S,
    goals:        Vec<(i32, Box<dyn Goal<S>>)>,
    target_goals: Vec<(i32, Box<dyn Goal<S>>)>,
    selector:     Option<SelectorConfig>,
    active:       bool,
    aware:        bool,
}

impl<S: MobState> MobBuilder<S> {
    pub fn new(state: S) -> Self {
        Self {
            state,
            goals:        Vec::new(),
            target_goals: Vec::new(),
            selector:     None,
            active:       true,
            aware:        true,
        }
    }

    /// Register a goal with the goal selector.  Goals are evaluated in the
    /// order they are added.
    pub fn goal(mut self, priority: i32, goal: impl Goal<S> + 'static) -> Self {
        self.goals.push((priority, Box::new(goal)));
        self
    }

    /// Register a goal with the target selector.
    pub fn target_goal(mut self, priority: i32, goal: impl Goal<S> + 'static) -> Self {
        self.target_goals.push((priority, Box::new(goal)));
        self
    }

    /// Override the population-wide selector settings for this mob.
    pub fn selector_config(mut self, config: SelectorConfig) -> Self {
        self.selector = Some(config);
        self
    }

    /// Start on the throttled inactive path.
    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }

    /// Spawn without AI.
    pub fn unaware(mut self) -> Self {
        self.aware = false;
        self
    }

    /// Validate settings and assemble the mob.
    pub fn build(self, id: MobId, config: &SimConfig) -> SimResult<Mob<S>> {
        let selector = self.selector.as_ref().unwrap_or(&config.selector);
        let mut mob = Mob::new(id, self.state, selector, config.control_update_interval)?;
        for (priority, goal) in self.goals {
            mob.goal_selector.add_boxed_goal(priority, goal);
        }
        for (priority, goal) in self.target_goals {
            mob.target_selector.add_boxed_goal(priority, goal);
        }
        mob.set_active(self.active);
        mob.set_aware(self.aware);
        Ok(mob)
    }
}
