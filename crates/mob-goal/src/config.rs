//! Per-selector tuning.

use crate::{GoalError, GoalResult};

/// Default number of inactive ticks between full selection passes.
pub const DEFAULT_NEW_GOAL_RATE: u32 = 3;

/// Configuration for one [`GoalSelector`][crate::GoalSelector].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SelectorConfig {
    /// While the mob is inactive, run a full pass every `new_goal_rate`
    /// calls to `inactive_tick`.  Must be non-zero.
    pub new_goal_rate: u32,
}

impl SelectorConfig {
    pub fn validate(&self) -> GoalResult<()> {
        if self.new_goal_rate == 0 {
            return Err(GoalError::InvalidGoalRate);
        }
        Ok(())
    }
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self { new_goal_rate: DEFAULT_NEW_GOAL_RATE }
    }
}
