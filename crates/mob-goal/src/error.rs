use mob_core::GoalId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GoalError {
    #[error("goal {0} is not registered with this selector")]
    UnknownGoal(GoalId),

    #[error("goal {0} is running; its flags cannot change until it stops")]
    FlagsLockedWhileRunning(GoalId),

    #[error("new goal rate must be at least 1")]
    InvalidGoalRate,
}

pub type GoalResult<T> = Result<T, GoalError>;
